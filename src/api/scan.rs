//! Scan API endpoint.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use chrono::Utc;

use super::ApiResult;
use crate::classifier::classify;
use crate::errors::AppError;
use crate::models::{ScanResponse, POINTS_PER_SCAN};
use crate::uploads::save_upload;
use crate::AppState;

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// A file part pulled out of the request.
struct Upload {
    filename: String,
    bytes: Bytes,
}

/// POST /api/scan - Classify an uploaded image and credit the user.
pub async fn scan_item(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<ScanResponse> {
    let upload = read_upload(multipart).await?;

    // Every request reads the store first, so an unreadable store fails the
    // scan even when nothing would be recorded.
    state.store.load().await?;

    let path = save_upload(&state.config.upload_dir, &upload.filename, &upload.bytes).await?;
    tracing::info!(path = %path.display(), bytes = upload.bytes.len(), "Saved upload");

    let detection = state.classifier.detect(&path).await?;
    let result = classify(detection);

    if !result.detected {
        tracing::info!(path = %path.display(), "No class detected, nothing recorded");
        return Ok(Json(ScanResponse::unscored(result)));
    }

    // Serialize load-modify-save so concurrent scans cannot drop each other's update.
    // Re-read under the lock: another scan may have saved while the model ran.
    let _guard = state.scan_lock.lock().await;

    let mut document = state.store.load().await?;
    document.record_scan(&result, POINTS_PER_SCAN, Utc::now().timestamp());
    state.store.save(&document).await?;

    tracing::info!(
        category = %result.kind,
        co2 = result.co2,
        eco_points = document.user.eco_points,
        "Recorded scan"
    );

    Ok(Json(ScanResponse::scored(result, POINTS_PER_SCAN)))
}

/// Find the `file` part. A body that is not multipart at all counts as
/// "no file uploaded", as does a `file` part without a filename attribute.
async fn read_upload(multipart: Result<Multipart, MultipartRejection>) -> Result<Upload, AppError> {
    let Ok(mut multipart) = multipart else {
        return Err(AppError::Validation("No file uploaded".to_string()));
    };

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }

        let bytes = field.bytes().await?;
        return Ok(Upload { filename, bytes });
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}
