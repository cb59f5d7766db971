//! Clipboard integration for sharing the uploaded URL.

use super::types::CaptureError;
use std::process::{Command, Stdio};

/// X selection buffers the URL is copied into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Middle-click paste buffer.
    Primary,
    /// Ctrl+V paste buffer.
    Clipboard,
}

impl Selection {
    /// Both selections, in the order they are filled.
    pub const ALL: [Selection; 2] = [Selection::Primary, Selection::Clipboard];

    fn xsel_flag(self) -> &'static str {
        match self {
            Selection::Primary => "-pi",
            Selection::Clipboard => "-bi",
        }
    }
}

pub const XSEL: &str = "xsel";

/// Copy `text` into `selection` by piping it to `xsel`.
pub fn copy_via_xsel(selection: Selection, text: &str) -> Result<(), CaptureError> {
    let mut command = Command::new(XSEL);
    command.arg(selection.xsel_flag());
    let label = format!("{} {}", XSEL, selection.xsel_flag());

    pipe_text(&mut command, &label, text)?;

    log::debug!("Copied URL to {:?} selection", selection);
    Ok(())
}

/// Spawn `command`, feed `text` on its stdin and wait for it.
///
/// The child is always waited for, even when writing to it failed.
fn pipe_text(command: &mut Command, label: &str, text: &str) -> Result<(), CaptureError> {
    use std::io::Write;

    // xsel forks a child that keeps serving the selection; piping its stdout or
    // stderr would block until that child exits.
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            CaptureError::Clipboard(format!("Failed to spawn {} (is it installed?): {}", label, e))
        })?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    let status = child
        .wait()
        .map_err(|e| CaptureError::Clipboard(format!("Failed to wait for {}: {}", label, e)))?;

    written.map_err(|e| {
        CaptureError::Clipboard(format!("Failed to write to {} stdin: {}", label, e))
    })?;

    if !status.success() {
        return Err(CaptureError::Clipboard(format!(
            "{} exited with {}",
            label, status
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selections_map_to_xsel_input_flags() {
        let flags: Vec<_> = Selection::ALL.iter().map(|s| s.xsel_flag()).collect();
        assert_eq!(flags, vec!["-pi", "-bi"]);
    }

    #[cfg(unix)]
    #[test]
    fn write_failure_is_reported_after_reaping_child() {
        // The child closes stdin and exits at once, so a large write hits a broken pipe.
        let mut command = Command::new("sh");
        command.args(["-c", "exec 0<&-; exit 0"]);
        let text = "x".repeat(4 * 1024 * 1024);

        let err = pipe_text(&mut command, "sh", &text).unwrap_err();
        match err {
            CaptureError::Clipboard(message) => {
                assert!(message.starts_with("Failed to write to sh stdin"), "{message}")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn text_reaches_child_stdin() {
        let mut command = Command::new("sh");
        command.args(["-c", "[ \"$(cat)\" = \"https://example.org/a.png\" ]"]);
        assert!(pipe_text(&mut command, "sh", "https://example.org/a.png").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported() {
        let mut command = Command::new("sh");
        command.args(["-c", "cat >/dev/null; exit 1"]);
        let err = pipe_text(&mut command, "sh", "url").unwrap_err();
        assert!(err.to_string().contains("sh exited with exit status: 1"), "{err}");
    }
}
