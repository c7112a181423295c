//! Turn order for manual drafts.
//!
//! The draft order is fixed when captains are seeded. A team that has filled
//! up keeps its slot in the order but is skipped: every advance scans forward
//! from the team that just picked, wrapping around, and hands the turn to the
//! first team that still has room. When no team has room the draft is over.

use crate::domain::TeamId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftState {
    pub in_progress: bool,
    pub order: Vec<TeamId>,
    pub index: usize,
    pub current_picking_team: Option<TeamId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftAdvance {
    NextPicker(TeamId),
    Completed,
    /// The stored order was unusable and the draft state was cleared.
    Reset,
}

impl DraftState {
    /// Starts a draft with the first team of `order` picking. An empty order
    /// yields an idle state.
    pub fn begin(order: Vec<TeamId>) -> Self {
        match order.first().copied() {
            Some(first) => Self {
                in_progress: true,
                order,
                index: 0,
                current_picking_team: Some(first),
            },
            None => Self::default(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_turn_of(&self, team_id: TeamId) -> bool {
        self.in_progress && self.current_picking_team == Some(team_id)
    }

    /// While a draft runs, the current picker sits at `index` in `order`.
    pub fn is_consistent(&self) -> bool {
        if !self.in_progress {
            return self.current_picking_team.is_none();
        }
        match self.current_picking_team {
            Some(team_id) => self.order.get(self.index) == Some(&team_id),
            None => false,
        }
    }

    fn position_of(&self, just_picked: TeamId) -> usize {
        if self.order.get(self.index) == Some(&just_picked) {
            return self.index;
        }
        self.order
            .iter()
            .position(|team_id| *team_id == just_picked)
            .unwrap_or(0)
    }

    /// Moves the turn on after `just_picked` made a pick. `roster_size`
    /// reports the current player count of a team in the order.
    pub fn advance(
        &mut self,
        just_picked: TeamId,
        players_per_team: u32,
        roster_size: impl Fn(TeamId) -> usize,
    ) -> DraftAdvance {
        if self.order.is_empty() || players_per_team == 0 {
            self.reset();
            return DraftAdvance::Reset;
        }

        let len = self.order.len();
        let current = self.position_of(just_picked);
        let next = (1..=len)
            .map(|offset| (current + offset) % len)
            .find(|&candidate| roster_size(self.order[candidate]) < players_per_team as usize);

        match next {
            Some(index) => {
                let team_id = self.order[index];
                self.index = index;
                self.current_picking_team = Some(team_id);
                DraftAdvance::NextPicker(team_id)
            }
            None => {
                self.in_progress = false;
                self.current_picking_team = None;
                self.index = 0;
                DraftAdvance::Completed
            }
        }
    }
}
