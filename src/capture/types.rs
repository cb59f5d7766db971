//! Data types for the capture → upload → publish run.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A screenshot that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    /// Capture time, formatted `YYYYMMDDHHMMSS`.
    pub timestamp: String,
    /// Absolute path of the image.
    pub path: PathBuf,
}

impl CaptureRecord {
    /// File name of the screenshot (the part appended to `base_url`).
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// What the best-effort publishing step managed to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Number of selections (primary/clipboard) that received the URL.
    pub selections_copied: usize,
    pub opened_in_browser: bool,
    pub printed: bool,
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub record: CaptureRecord,
    /// Public URL, `None` when upload is not configured.
    pub url: Option<String>,
    pub publish: PublishReport,
}

/// Errors that can occur while capturing, uploading or publishing a screenshot.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Invalid configuration: {0:#}")]
    Config(anyhow::Error),

    #[error("Could not prepare screenshot file in {}: {source}", .dir.display())]
    Reserve {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not take screenshot: {0}")]
    CaptureTool(String),

    #[error("Could not take screenshot: no image was written to {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("Could not set permissions {mode:o} on {}: {source}", .path.display())]
    Permissions {
        path: PathBuf,
        mode: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not copy file to server: {0}")]
    UploadTool(String),

    #[error("Clipboard operation failed: {0}")]
    Clipboard(String),

    #[error("Could not open browser: {0}")]
    Browser(String),
}

impl CaptureError {
    /// Process exit status reported for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CaptureError::CaptureTool(_) | CaptureError::MissingOutput(_) => 2,
            CaptureError::Permissions { .. } => 3,
            CaptureError::UploadTool(_) => 4,
            CaptureError::Config(_) => 5,
            CaptureError::Reserve { .. }
            | CaptureError::Clipboard(_)
            | CaptureError::Browser(_) => 6,
        }
    }

    pub(crate) fn reserve(dir: &Path, source: std::io::Error) -> Self {
        CaptureError::Reserve {
            dir: dir.to_path_buf(),
            source,
        }
    }
}
