use crate::capture::{
    dependencies::TransferTool,
    types::{CaptureError, CaptureRecord},
};
use crate::config::Config;

/// Copy the screenshot to the configured server and return its public URL.
///
/// Returns `Ok(None)` without touching the network when the `[upload]`
/// section is absent or incomplete.
pub fn maybe_upload(
    config: &Config,
    record: &CaptureRecord,
    transfer: &dyn TransferTool,
) -> Result<Option<String>, CaptureError> {
    let Some(target) = config.upload_target() else {
        log::debug!("Upload not configured, keeping screenshot local");
        return Ok(None);
    };

    let file_name = record
        .path
        .file_name()
        .map(|name| name.to_string_lossy())
        .ok_or_else(|| {
            CaptureError::UploadTool(format!(
                "{} has no file name to publish",
                record.path.display()
            ))
        })?;

    let remote = format!("{}:{}", target.host, target.dir);
    log::info!("Uploading {} to {}", record.path.display(), remote);
    transfer.transfer(&record.path, &remote)?;

    Ok(Some(format!("{}{}", target.base_url, file_name)))
}
