//! Screenshot capture, upload and sharing for upscrot.
//!
//! This module provides:
//! - Interactive region capture through `scrot`
//! - Collision-free file naming and permission handling
//! - Upload through `scp`
//! - Publishing the URL to the X selections, the browser and stdout

pub mod clipboard;
pub mod file;
pub mod types;

mod command;
mod dependencies;
mod pipeline;
mod publish;
mod upload;

pub use dependencies::{
    BrowserLauncher, CaptureTool, ClipboardTool, PipelineDependencies, TransferTool,
};
pub use pipeline::{capture, run};
pub use publish::publish;
pub use types::{CaptureError, CaptureRecord, PublishReport, RunOutcome};
pub use upload::maybe_upload;
