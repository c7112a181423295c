use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::MatchId;

type LockMap = DashMap<MatchId, Arc<Mutex<()>>>;

/// Held for the whole check-then-act sequence of an operation on one match.
/// Dropping the last guard of a match with no waiters removes its map entry.
pub struct MatchGuard {
    pub match_id: MatchId,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
}

impl Drop for MatchGuard {
    fn drop(&mut self) {
        // release first so only the map and waiters still count
        self.guard.take();
        self.locks
            .remove_if(&self.match_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[async_trait::async_trait]
pub trait MatchLockService {
    async fn lock_match(&self, match_id: MatchId) -> MatchGuard;
    fn forget_match(&self, match_id: MatchId);
}

pub struct MatchLockServiceImpl {
    locks: Arc<LockMap>,
}

impl MatchLockServiceImpl {
    pub fn new() -> Self {
        Self {
            locks: Arc::new(DashMap::new()),
        }
    }

    fn lock_for(&self, match_id: MatchId) -> Arc<Mutex<()>> {
        self.locks
            .entry(match_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[async_trait::async_trait]
impl MatchLockService for MatchLockServiceImpl {
    async fn lock_match(&self, match_id: MatchId) -> MatchGuard {
        // the dashmap shard guard must be gone before awaiting
        let lock = self.lock_for(match_id);
        MatchGuard {
            match_id,
            guard: Some(lock.lock_owned().await),
            locks: self.locks.clone(),
        }
    }

    fn forget_match(&self, match_id: MatchId) {
        self.locks
            .remove_if(&match_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_same_match_is_serialized() {
        let service = Arc::new(MatchLockServiceImpl::new());
        let match_id = MatchId::new();

        let guard = service.lock_match(match_id).await;

        let contender = {
            let service = service.clone();
            tokio::spawn(async move {
                let _guard = service.lock_match(match_id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("second lock acquired after release")
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_matches_are_independent() {
        let service = MatchLockServiceImpl::new();
        let _first = service.lock_match(MatchId::new()).await;
        let second = tokio::time::timeout(
            Duration::from_millis(200),
            service.lock_match(MatchId::new()),
        )
        .await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_unused_entries_are_removed() {
        let service = MatchLockServiceImpl::new();
        drop(service.lock_match(MatchId::new()).await);
        assert!(service.locks.is_empty());
    }

    #[tokio::test]
    async fn test_entry_kept_while_someone_waits() {
        let service = Arc::new(MatchLockServiceImpl::new());
        let match_id = MatchId::new();
        let guard = service.lock_match(match_id).await;

        let waiter = {
            let service = service.clone();
            tokio::spawn(async move { service.lock_match(match_id).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        drop(guard);
        assert!(service.locks.contains_key(&match_id));

        let second = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter acquires the lock")
            .unwrap();
        assert!(service.locks.contains_key(&match_id));
        drop(second);
        assert!(service.locks.is_empty());
    }

    #[tokio::test]
    async fn test_forget_keeps_held_lock() {
        let service = MatchLockServiceImpl::new();
        let match_id = MatchId::new();
        let guard = service.lock_match(match_id).await;

        service.forget_match(match_id);
        assert!(service.locks.contains_key(&match_id));

        drop(guard);
        service.forget_match(match_id);
        assert!(service.locks.is_empty());
    }
}
