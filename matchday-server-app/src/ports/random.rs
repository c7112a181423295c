use std::sync::Mutex;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::domain::UserId;

/// Source of the only nondeterminism in team generation.
pub trait RandomPort {
    fn shuffle_users(&self, users: &mut [UserId]);
    /// Uniform index in `0..len`. `len` is never zero.
    fn choose_index(&self, len: usize) -> usize;
}

pub struct ThreadRandom;

impl RandomPort for ThreadRandom {
    fn shuffle_users(&self, users: &mut [UserId]) {
        users.shuffle(&mut rand::rng());
    }

    fn choose_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomPort for SeededRandom {
    fn shuffle_users(&self, users: &mut [UserId]) {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        users.shuffle(&mut *rng);
    }

    fn choose_index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(0..len)
    }
}
