//! Upload storage.
//!
//! Uploaded images are kept under the upload directory by sanitized original
//! filename; a later upload with the same name replaces the earlier file.

use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use crate::errors::AppError;

/// Reduce a client-supplied filename to a safe single path component.
///
/// Accented letters are folded to ASCII (NFKD, combining marks dropped). Then
/// only ASCII letters, digits, `.`, `-` and `_` survive. Path separators and
/// whitespace split the name into words joined by `_`; words made only of dots
/// are dropped, and leading/trailing `.` and `_` are stripped. Returns an empty
/// string when nothing is left.
pub fn sanitize_filename(name: &str) -> String {
    let folded: String = name.nfkd().filter(|c| c.is_ascii()).collect();

    let words: Vec<String> = folded
        .split(|c: char| c == '/' || c == '\\' || c.is_whitespace())
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '.' | '-' | '_'))
                .collect::<String>()
        })
        .filter(|word| !word.chars().all(|c| c == '.'))
        .collect();

    words
        .join("_")
        .trim_matches(|c: char| c == '.' || c == '_')
        .to_string()
}

/// Write `bytes` to the upload directory under the sanitized `filename`,
/// creating the directory on first use. Returns the written path.
pub async fn save_upload(upload_dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, AppError> {
    let safe_name = sanitize_filename(filename);
    if safe_name.is_empty() {
        return Err(AppError::Validation("Invalid filename".to_string()));
    }

    tokio::fs::create_dir_all(upload_dir).await.map_err(|e| {
        AppError::Internal(format!(
            "Failed to create upload directory {}: {}",
            upload_dir.display(),
            e
        ))
    })?;

    let path = upload_dir.join(safe_name);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to save {}: {}", path.display(), e)))?;

    Ok(path)
}
