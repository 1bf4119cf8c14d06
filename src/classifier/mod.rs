//! Classifier adapter.
//!
//! The model itself is external: a [`Classifier`] only answers which label,
//! if any, it sees in an image. [`classify`] maps that answer onto the fixed
//! category table of disposal instructions and CO2 credits.

mod command;

pub use command::*;

use std::path::Path;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::ClassificationResult;

/// Outcome of running the model on one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Top-scoring class label, in the model's own spelling
    Detected(String),
    /// The model produced no class at all
    Undetected,
}

/// An image classification model.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Run the model on the image at `image`. Any failure to do so (unreadable
    /// or corrupt image, model crash) is an [`AppError::Classification`].
    async fn detect(&self, image: &Path) -> Result<Detection, AppError>;
}

/// Disposal instructions and CO2 credit for one waste category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub info: &'static str,
    pub co2: i64,
}

/// Fixed category table, keyed by lowercase label.
const CATEGORIES: &[(&str, CategoryInfo)] = &[
    ("plastic", CategoryInfo { info: "Rinse and dry before recycling.", co2: 5 }),
    ("glass", CategoryInfo { info: "Remove labels and lids.", co2: 8 }),
    ("paper", CategoryInfo { info: "Break down boxes, keep clean/dry.", co2: 3 }),
    ("metal", CategoryInfo { info: "Recycle cans and foils.", co2: 12 }),
    ("cardboard", CategoryInfo { info: "Flatten before recycling.", co2: 4 }),
    ("trash", CategoryInfo { info: "Not recyclable. Dispose responsibly.", co2: 0 }),
    ("e-waste", CategoryInfo { info: "Drop off at e-waste centers.", co2: 20 }),
];

/// Used for labels the model knows but the table does not.
pub const UNLISTED_CATEGORY: CategoryInfo = CategoryInfo {
    info: "Unknown item. Please check manually.",
    co2: 0,
};

pub const UNDETECTED_TYPE: &str = "Unknown";
pub const UNDETECTED_INFO: &str = "Could not classify item.";

/// Look up a label in the category table, ignoring case.
pub fn category_info(label: &str) -> Option<CategoryInfo> {
    let key = label.to_lowercase();
    CATEGORIES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, info)| *info)
}

/// Turn a model answer into the result reported to the user.
pub fn classify(detection: Detection) -> ClassificationResult {
    match detection {
        Detection::Undetected => ClassificationResult {
            kind: UNDETECTED_TYPE.to_string(),
            info: UNDETECTED_INFO.to_string(),
            co2: 0,
            detected: false,
        },
        Detection::Detected(label) => {
            let category = category_info(&label).unwrap_or(UNLISTED_CATEGORY);
            ClassificationResult {
                kind: label,
                info: category.info.to_string(),
                co2: category.co2,
                detected: true,
            }
        }
    }
}

/// Stand-in used when no model command is configured; every scan fails.
#[derive(Debug, Default)]
pub struct UnconfiguredClassifier;

#[async_trait]
impl Classifier for UnconfiguredClassifier {
    async fn detect(&self, _image: &Path) -> Result<Detection, AppError> {
        Err(AppError::Classification(
            "No classification model configured (set GREENLENS_MODEL_COMMAND)".to_string(),
        ))
    }
}
