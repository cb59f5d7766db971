//! Screenshot file naming, placement and permissions.

use super::types::CaptureError;
use chrono::{DateTime, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of every captured image.
pub const EXTENSION: &str = ".png";

/// Length of the random token that keeps names unique within one second.
const TOKEN_LEN: usize = 8;

/// Format a capture time as `YYYYMMDDHHMMSS`.
pub fn timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y%m%d%H%M%S").to_string()
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, CaptureError> {
    if !directory.exists() {
        log::info!("Creating screenshot directory: {}", directory.display());
        fs::create_dir_all(directory).map_err(|e| CaptureError::reserve(directory, e))?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Pick a fresh `<prefix><timestamp>-<token>.png` path inside `directory`.
///
/// The file is created exclusively so no existing screenshot can be clobbered,
/// then closed and removed again: the capture tool refuses to overwrite
/// existing files and must create it itself.
pub fn reserve_destination(
    directory: &Path,
    prefix: &str,
    timestamp: &str,
) -> Result<PathBuf, CaptureError> {
    let reserved = tempfile::Builder::new()
        .prefix(&format!("{}{}-", prefix, timestamp))
        .suffix(EXTENSION)
        .rand_bytes(TOKEN_LEN)
        .tempfile_in(directory)
        .map_err(|e| CaptureError::reserve(directory, e))?;

    let path = reserved.path().to_path_buf();
    reserved
        .close()
        .map_err(|e| CaptureError::reserve(directory, e))?;

    log::debug!("Reserved screenshot path {}", path.display());
    Ok(path)
}

/// Apply the configured permission bits to the captured file.
pub fn apply_permissions(path: &Path, mode: u32) -> Result<(), CaptureError> {
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, Permissions::from_mode(mode)).map_err(|source| {
            CaptureError::Permissions {
                path: path.to_path_buf(),
                mode,
                source,
            }
        })?;
        log::debug!("Set mode {:o} on {}", mode, path.display());
    }

    #[cfg(not(unix))]
    log::warn!(
        "Ignoring file_permissions {:o} for {}: unsupported on this platform",
        mode,
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn assert_name_shape(name: &str, prefix: &str, timestamp: &str) {
        let rest = name.strip_prefix(prefix).expect("prefix");
        let rest = rest.strip_prefix(timestamp).expect("timestamp");
        let token = rest
            .strip_prefix('-')
            .and_then(|r| r.strip_suffix(EXTENSION))
            .expect("-<token>.png");
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn timestamp_has_second_resolution() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(timestamp(&at), "20240309070501");
    }

    #[test]
    fn reserved_names_are_unique_within_a_second() {
        let temp = TempDir::new().unwrap();
        let ts = "20240309070501";

        let first = reserve_destination(temp.path(), "screenshot-", ts).unwrap();
        let second = reserve_destination(temp.path(), "screenshot-", ts).unwrap();

        assert_ne!(first, second);
        for path in [&first, &second] {
            assert_eq!(path.parent(), Some(temp.path()));
            let name = path.file_name().unwrap().to_str().unwrap();
            assert_name_shape(name, "screenshot-", ts);
        }
    }

    #[test]
    fn reservation_leaves_no_file_behind() {
        let temp = TempDir::new().unwrap();
        let path = reserve_destination(temp.path(), "shot_", "20240101000000").unwrap();
        assert!(!path.exists());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn reserve_fails_for_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = reserve_destination(&missing, "x-", "20240101000000").unwrap_err();
        assert!(matches!(err, CaptureError::Reserve { .. }));
    }

    #[test]
    fn ensure_directory_creates_nested_dirs() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        let dir = ensure_directory_exists(&nested).unwrap();
        assert!(dir.is_dir());
        assert!(dir.is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn permissions_are_applied() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shot.png");
        fs::write(&path, b"png").unwrap();

        apply_permissions(&path, 0o640).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, 0o640);
    }

    #[test]
    fn permissions_on_missing_file_fail() {
        let temp = TempDir::new().unwrap();
        let err = apply_permissions(&temp.path().join("gone.png"), 0o644);
        if cfg!(unix) {
            assert!(matches!(err, Err(CaptureError::Permissions { .. })));
        }
    }
}
