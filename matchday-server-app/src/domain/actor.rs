use crate::domain::{
    CommunityId, UserId,
    error::{MatchError, MatchResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorRole {
    Admin,
    CommunityManager(CommunityId),
}

/// The user on whose behalf an operation runs, with the roles the caller
/// resolved for them. Passed into every use case explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub roles: Vec<ActorRole>,
}

impl Actor {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: ActorRole) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&ActorRole::Admin)
    }

    pub fn can_manage(&self, community_id: CommunityId) -> bool {
        self.roles.iter().any(|role| match role {
            ActorRole::Admin => true,
            ActorRole::CommunityManager(id) => *id == community_id,
        })
    }

    pub fn ensure_can_manage(&self, community_id: CommunityId) -> MatchResult<()> {
        if self.can_manage(community_id) {
            return Ok(());
        }
        MatchError::forbidden(format!(
            "User does not have COMMUNITY_MANAGER role for community {}",
            community_id
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_scoped_to_community() {
        let community = CommunityId::new();
        let other = CommunityId::new();
        let actor = Actor::new(UserId::new()).with_role(ActorRole::CommunityManager(community));

        assert!(actor.can_manage(community));
        assert!(!actor.can_manage(other));
        assert!(matches!(
            actor.ensure_can_manage(other),
            Err(MatchError::Forbidden(..))
        ));
    }

    #[test]
    fn test_admin_manages_everything() {
        let actor = Actor::new(UserId::new()).with_role(ActorRole::Admin);
        assert!(actor.is_admin());
        assert!(actor.can_manage(CommunityId::new()));
    }

    #[test]
    fn test_plain_user_manages_nothing() {
        let actor = Actor::new(UserId::new());
        assert!(!actor.can_manage(CommunityId::new()));
    }

    #[test]
    fn test_with_role_deduplicates() {
        let community = CommunityId::new();
        let actor = Actor::new(UserId::new())
            .with_role(ActorRole::CommunityManager(community))
            .with_role(ActorRole::CommunityManager(community));
        assert_eq!(actor.roles.len(), 1);
    }
}
