//! External-command classifier.
//!
//! Runs a configured command line with `--image <path>` appended and reads
//! one JSON object from its stdout:
//!
//! ```text
//! {"top1": 3, "names": {"0": "cardboard", "1": "glass", "2": "metal", "3": "paper"}}
//! {"top1": null}
//! ```
//!
//! A null or absent `top1` means the model produced no class.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::{Classifier, Detection};
use crate::errors::AppError;

/// Raw model output.
#[derive(Debug, Deserialize)]
struct ModelOutput {
    #[serde(default)]
    top1: Option<usize>,
    #[serde(default)]
    names: BTreeMap<usize, String>,
}

/// Classifier that shells out to a model runner.
#[derive(Debug, Clone)]
pub struct CommandClassifier {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandClassifier {
    /// Split `command_line` shell-style into program and leading arguments.
    pub fn new(command_line: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut parts = shell_words::split(command_line).map_err(|e| {
            AppError::Internal(format!("Invalid model command {:?}: {}", command_line, e))
        })?;
        if parts.is_empty() {
            return Err(AppError::Internal("Model command is empty".to_string()));
        }
        let program = parts.remove(0);

        Ok(Self {
            program,
            args: parts,
            timeout,
        })
    }

    async fn run(&self, image: &Path) -> Result<std::process::Output, AppError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("--image")
            .arg(image)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(program = %self.program, args = ?self.args, image = %image.display(), "Running model");

        let output = cmd.output();
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output).await.map_err(|_| {
                AppError::Classification(format!(
                    "Model timed out after {}s",
                    limit.as_secs_f32()
                ))
            })?,
            None => output.await,
        };

        result.map_err(|e| {
            AppError::Classification(format!("Failed to run model {}: {}", self.program, e))
        })
    }
}

/// Check that the file decodes as an image before handing it to the model.
/// The format is sniffed from the content, not the file extension.
async fn ensure_readable_image(image: &Path) -> Result<(), AppError> {
    let path: PathBuf = image.to_path_buf();
    tokio::task::spawn_blocking(move || read_dimensions(&path))
        .await
        .map_err(|e| AppError::Internal(format!("Image check task failed: {}", e)))?
        .map(|_| ())
        .map_err(|e| AppError::Classification(format!("Cannot read image: {}", e)))
}

fn read_dimensions(path: &Path) -> image::ImageResult<(u32, u32)> {
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()
}

/// Interpret the model's stdout.
pub fn parse_model_output(stdout: &str) -> Result<Detection, AppError> {
    let line = stdout
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with('{'))
        .last()
        .ok_or_else(|| AppError::Classification("Model produced no output".to_string()))?;

    let parsed: ModelOutput = serde_json::from_str(line).map_err(|e| {
        AppError::Classification(format!("Unparseable model output: {}", e))
    })?;

    match parsed.top1 {
        None => Ok(Detection::Undetected),
        Some(index) => parsed
            .names
            .get(&index)
            .map(|name| Detection::Detected(name.clone()))
            .ok_or_else(|| {
                AppError::Classification(format!("Model returned unknown class index {}", index))
            }),
    }
}

#[async_trait]
impl Classifier for CommandClassifier {
    async fn detect(&self, image: &Path) -> Result<Detection, AppError> {
        ensure_readable_image(image).await?;

        let output = self.run(image).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim().lines().last().unwrap_or("").to_string();
            return Err(AppError::Classification(if message.is_empty() {
                format!("Model exited with {}", output.status)
            } else {
                message
            }));
        }

        parse_model_output(&String::from_utf8_lossy(&output.stdout))
    }
}
