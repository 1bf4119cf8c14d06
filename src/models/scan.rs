//! Scan outcome models.

use serde::{Deserialize, Serialize};

/// Points awarded for every resolvable classification, whatever the category.
pub const POINTS_PER_SCAN: i64 = 20;

/// What the classifier adapter reports about an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Label as the model spelled it, or `Unknown` when nothing was detected
    pub kind: String,
    pub info: String,
    pub co2: i64,
    /// False when the model produced no class; such results are never recorded
    pub detected: bool,
}

/// Response body of `POST /api/scan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub info: String,
    pub co2: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
}

impl ScanResponse {
    /// Response for a result that was not recorded (no points field).
    pub fn unscored(result: ClassificationResult) -> Self {
        Self {
            kind: result.kind,
            info: result.info,
            co2: result.co2,
            points: None,
        }
    }

    /// Response for a result that earned `points`.
    pub fn scored(result: ClassificationResult, points: i64) -> Self {
        Self {
            points: Some(points),
            ..Self::unscored(result)
        }
    }
}
