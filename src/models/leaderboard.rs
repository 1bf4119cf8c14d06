//! Leaderboard model.

use serde::{Deserialize, Serialize};

/// A ranked `{name, points}` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub points: i64,
}

/// Add `points` to the entry called `name`, inserting it if absent, then
/// re-sort descending by points. Equal scores keep their relative order.
pub fn award_points(leaderboard: &mut Vec<LeaderboardEntry>, name: &str, points: i64) {
    match leaderboard.iter_mut().find(|entry| entry.name == name) {
        Some(entry) => entry.points += points,
        None => leaderboard.push(LeaderboardEntry {
            name: name.to_string(),
            points,
        }),
    }

    leaderboard.sort_by(|a, b| b.points.cmp(&a.points));
}
