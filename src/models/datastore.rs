//! Datastore model: the whole persisted document.

use serde::{Deserialize, Serialize};

use super::{award_points, ClassificationResult, LeaderboardEntry, ScanRecord, UserProfile};

/// The root document holding the user profile and the leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datastore {
    pub user: UserProfile,
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl Datastore {
    /// Credit the user for a resolvable classification made at `timestamp`
    /// (unix seconds): append history, bump totals, update the leaderboard.
    pub fn record_scan(&mut self, result: &ClassificationResult, points: i64, timestamp: i64) {
        self.user.eco_points += points;
        self.user.co2_saved += result.co2;
        self.user.history.push(ScanRecord {
            kind: result.kind.clone(),
            info: result.info.clone(),
            co2: result.co2,
            points,
            timestamp,
        });

        award_points(&mut self.leaderboard, &self.user.name, points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::POINTS_PER_SCAN;

    fn detected(kind: &str, info: &str, co2: i64) -> ClassificationResult {
        ClassificationResult {
            kind: kind.to_string(),
            info: info.to_string(),
            co2,
            detected: true,
        }
    }

    #[test]
    fn test_default_document_shape() {
        let json = serde_json::to_value(Datastore::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user": {"name": "You", "ecoPoints": 0, "co2Saved": 0, "history": []},
                "leaderboard": []
            })
        );
    }

    #[test]
    fn test_record_scan_updates_totals_history_and_leaderboard() {
        let mut doc = Datastore::default();
        doc.record_scan(
            &detected("Plastic", "Rinse and dry before recycling.", 5),
            POINTS_PER_SCAN,
            1_700_000_000,
        );

        assert_eq!(doc.user.eco_points, 20);
        assert_eq!(doc.user.co2_saved, 5);
        assert_eq!(
            doc.user.history,
            vec![ScanRecord {
                kind: "Plastic".to_string(),
                info: "Rinse and dry before recycling.".to_string(),
                co2: 5,
                points: 20,
                timestamp: 1_700_000_000,
            }]
        );
        assert_eq!(
            doc.leaderboard,
            vec![LeaderboardEntry {
                name: "You".to_string(),
                points: 20
            }]
        );
    }

    #[test]
    fn test_second_scan_accumulates() {
        let mut doc = Datastore::default();
        doc.record_scan(&detected("Plastic", "a", 5), POINTS_PER_SCAN, 1);
        doc.record_scan(&detected("metal", "b", 12), POINTS_PER_SCAN, 2);

        assert_eq!(doc.user.eco_points, 40);
        assert_eq!(doc.user.co2_saved, 17);
        assert_eq!(doc.user.history.len(), 2);
        assert_eq!(doc.user.history[1].kind, "metal");
        assert_eq!(doc.leaderboard.len(), 1);
        assert_eq!(doc.leaderboard[0].points, 40);
    }

    #[test]
    fn test_document_roundtrips_camel_case_fields() {
        let raw = r#"{
            "user": {"name": "Sam", "ecoPoints": 60, "co2Saved": 9,
                     "history": [{"type": "glass", "info": "x", "co2": 8, "points": 20, "timestamp": 5}]},
            "leaderboard": [{"name": "Sam", "points": 60}]
        }"#;
        let doc: Datastore = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.user.name, "Sam");
        assert_eq!(doc.user.history[0].kind, "glass");

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["user"]["ecoPoints"], 60);
        assert_eq!(back["user"]["history"][0]["type"], "glass");
    }
}
