use std::io::Write;

use chrono::Local;

use crate::capture::{
    dependencies::{CaptureTool, PipelineDependencies},
    file, publish, upload,
    types::{CaptureError, CaptureRecord, PublishReport, RunOutcome},
};
use crate::config::Config;

/// Run the whole capture → upload → publish sequence.
///
/// Stops at the first fatal error. A screenshot that was captured is never
/// removed, even when the upload fails.
pub fn run<W: Write>(
    config: &Config,
    dependencies: &PipelineDependencies,
    out: &mut W,
) -> Result<RunOutcome, CaptureError> {
    let record = capture(config, dependencies.capture.as_ref())?;
    log::info!("Screenshot saved to {}", record.path.display());

    let url = upload::maybe_upload(config, &record, dependencies.transfer.as_ref())?;

    let report = match url.as_deref() {
        Some(url) => publish::publish(config, url, dependencies, out),
        None => PublishReport::default(),
    };

    Ok(RunOutcome {
        record,
        url,
        publish: report,
    })
}

/// Let the user select a region and save it with the configured name and mode.
pub fn capture(config: &Config, tool: &dyn CaptureTool) -> Result<CaptureRecord, CaptureError> {
    let mode = config.file_mode().map_err(CaptureError::Config)?;

    let directory = match config.save_directory() {
        Some(dir) => file::ensure_directory_exists(&dir)?,
        None => file::ensure_directory_exists(&std::env::temp_dir())?,
    };

    let timestamp = file::timestamp(&Local::now());
    let path = file::reserve_destination(&directory, &config.local.file_prefix, &timestamp)?;

    tool.capture_region(&path)?;

    if !path.is_file() {
        return Err(CaptureError::MissingOutput(path));
    }

    file::apply_permissions(&path, mode)?;

    Ok(CaptureRecord { timestamp, path })
}
