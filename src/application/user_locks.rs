//! Per-user write serialization.
//!
//! Concurrent submissions for the same user must not interleave a
//! decay-and-boost update (lost-update risk), so every mutating handler
//! takes this lock for the duration of its read-modify-write. Different
//! users hold different locks and proceed fully in parallel.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::UserId;

/// Map of per-user async mutexes.
///
/// Locks are created on first use and kept for the life of the engine;
/// the per-user entry is a handful of bytes.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    /// Creates an empty lock map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for one user, waiting if another operation on
    /// the same user is in flight.
    pub async fn acquire(&self, user_id: &UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(user_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn same_user_operations_are_serialized() {
        let locks = Arc::new(UserLocks::new());
        let in_flight = Arc::new(AtomicU32::new(0));
        let max_in_flight = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = locks.clone();
            let in_flight = in_flight.clone();
            let max_in_flight = max_in_flight.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(&user("player-1")).await;
                let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_in_flight.fetch_max(current, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn different_users_proceed_in_parallel() {
        let locks = Arc::new(UserLocks::new());

        let guard_a = locks.acquire(&user("player-1")).await;
        // A second user's lock must not block while the first is held.
        let acquired = tokio::time::timeout(
            Duration::from_millis(50),
            locks.acquire(&user("player-2")),
        )
        .await;
        assert!(acquired.is_ok());
        drop(guard_a);
    }

    #[tokio::test]
    async fn lock_is_reacquirable_after_release() {
        let locks = UserLocks::new();
        drop(locks.acquire(&user("player-1")).await);
        let _guard = locks.acquire(&user("player-1")).await;
    }
}
