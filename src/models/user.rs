//! User profile model.

use serde::{Deserialize, Serialize};

/// Name given to the single implicit user of a fresh store.
pub const DEFAULT_USER_NAME: &str = "You";

/// The one user profile kept by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub eco_points: i64,
    pub co2_saved: i64,
    pub history: Vec<ScanRecord>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_USER_NAME.to_string(),
            eco_points: 0,
            co2_saved: 0,
            history: Vec::new(),
        }
    }
}

/// One successful scan in the user's history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub info: String,
    pub co2: i64,
    pub points: i64,
    /// Unix seconds
    pub timestamp: i64,
}
