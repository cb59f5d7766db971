//! Library exports for reusing upscrot subsystems.
//!
//! Exposes the configuration types and the capture pipeline so the binary,
//! the schema dumper and the integration tests share one implementation.

pub mod capture;
pub mod config;

pub use capture::{CaptureError, PipelineDependencies, RunOutcome};
pub use config::{Config, Resolved};
