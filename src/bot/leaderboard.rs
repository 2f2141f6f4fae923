//! Process-lifetime scoreboard. Nothing here is persisted; a restart resets all scores.
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::transport::UserId;

#[derive(Debug, Default)]
pub struct Leaderboard {
    scores: Mutex<HashMap<UserId, u32>>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<UserId, u32>> {
        self.scores.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add one point for `user` and return the new score.
    ///
    /// The read-modify-write happens under the lock so concurrent wins never lose an increment.
    pub fn record_win(&self, user: &UserId) -> u32 {
        let mut scores = self.guard();
        let entry = scores.entry(user.clone()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }

    pub fn score(&self, user: &UserId) -> u32 {
        self.guard().get(user).copied().unwrap_or(0)
    }

    /// Current scores, in no particular order.
    pub fn snapshot(&self) -> HashMap<UserId, u32> {
        self.guard().clone()
    }

    /// Scores sorted for display: highest first, ties by user id.
    pub fn ranked(&self) -> Vec<(UserId, u32)> {
        let mut rows: Vec<(UserId, u32)> = self.snapshot().into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn first_win_starts_at_one() {
        let board = Leaderboard::new();
        let alice = UserId::from("alice");
        assert_eq!(board.score(&alice), 0);
        assert_eq!(board.record_win(&alice), 1);
        assert_eq!(board.record_win(&alice), 2);
    }

    #[test]
    fn concurrent_wins_are_not_lost() {
        let board = Arc::new(Leaderboard::new());
        let user = UserId::from("racer");
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let board = Arc::clone(&board);
                let user = user.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        board.record_win(&user);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(board.score(&user), 16 * 250);
    }

    #[test]
    fn ranked_orders_by_score() {
        let board = Leaderboard::new();
        let (a, b) = (UserId::from("a"), UserId::from("b"));
        board.record_win(&a);
        board.record_win(&b);
        board.record_win(&b);
        let ranked = board.ranked();
        assert_eq!(ranked[0], (b, 2));
        assert_eq!(ranked[1], (a, 1));
    }
}
