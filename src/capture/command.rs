//! Blocking invocation of external tools.

use std::ffi::OsStr;
use std::process::{Command, Stdio};

/// Run `program` with `args` and wait for it to exit.
///
/// Stdout is discarded; stderr is captured so it can be folded into the error
/// message. Returns a human-readable description of the failure on spawn errors
/// and non-zero exits.
pub(crate) fn run_quiet<I, S>(program: &str, args: I) -> Result<(), String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);
    log::debug!("Running {:?}", command);

    let output = command
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| format!("failed to run {} (is it installed?): {}", program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        return Err(if stderr.is_empty() {
            format!("{} exited with {}", program, output.status)
        } else {
            format!("{} exited with {}: {}", program, output.status, stderr)
        });
    }

    log::debug!("{} completed successfully", program);
    Ok(())
}
