//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings for the locally saved screenshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocalConfig {
    /// Directory screenshots are written to. A leading `~/` is expanded to the
    /// home directory. When unset (or empty) the system temp directory is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_to: Option<String>,

    /// Prefix for generated filenames, followed by the capture timestamp
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Permission bits applied to the captured file, as an octal string (e.g. "0644")
    #[serde(default = "default_file_permissions")]
    pub file_permissions: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            save_to: None,
            file_prefix: default_file_prefix(),
            file_permissions: default_file_permissions(),
        }
    }
}

/// Remote upload settings.
///
/// Upload only happens when `target_host`, `target_dir` and `base_url` are all
/// present and non-empty. A partially filled section disables upload entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UploadConfig {
    /// Host passed to scp (may include a user, e.g. `me@example.org`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_host: Option<String>,

    /// Remote directory the screenshot is copied into
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<String>,

    /// Public URL prefix; the screenshot's file name is appended verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Open the uploaded screenshot in the default browser
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_in_browser: Option<Flag>,
}

/// Fully specified upload destination, borrowed from an [`UploadConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTarget<'a> {
    pub host: &'a str,
    pub dir: &'a str,
    pub base_url: &'a str,
}

impl UploadConfig {
    /// Returns the destination if every required key is set, `None` otherwise.
    pub fn target(&self) -> Option<UploadTarget<'_>> {
        Some(UploadTarget {
            host: non_empty(&self.target_host)?,
            dir: non_empty(&self.target_dir)?,
            base_url: non_empty(&self.base_url)?,
        })
    }

    /// Names of required keys that are missing or empty.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            ("target_host", &self.target_host),
            ("target_dir", &self.target_dir),
            ("base_url", &self.base_url),
        ]
        .into_iter()
        .filter(|(_, value)| non_empty(value).is_none())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn open_in_browser(&self) -> bool {
        self.open_in_browser.as_ref().is_some_and(Flag::is_set)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Boolean-like setting.
///
/// # Examples
/// ```toml
/// open_in_browser = true
/// open_in_browser = 1
/// open_in_browser = "yes"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Flag {
    /// Plain TOML boolean
    Bool(bool),
    /// Integer, non-zero means enabled
    Int(i64),
    /// One of "1", "true", "yes", "on" (case-insensitive) means enabled
    Text(String),
}

impl Flag {
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(value) => *value,
            Flag::Int(value) => *value != 0,
            Flag::Text(value) => matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
        }
    }
}

fn default_file_prefix() -> String {
    "screenshot-".to_string()
}

fn default_file_permissions() -> String {
    "0644".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_upload() -> UploadConfig {
        UploadConfig {
            target_host: Some("example.org".into()),
            target_dir: Some("/var/www/tmp".into()),
            base_url: Some("https://example.org/tmp/".into()),
            open_in_browser: None,
        }
    }

    #[test]
    fn target_requires_all_keys() {
        let upload = full_upload();
        let target = upload.target().unwrap();
        assert_eq!(target.host, "example.org");
        assert_eq!(target.dir, "/var/www/tmp");
        assert_eq!(target.base_url, "https://example.org/tmp/");
        assert!(upload.missing_keys().is_empty());

        let mut no_host = full_upload();
        no_host.target_host = None;
        assert!(no_host.target().is_none());
        assert_eq!(no_host.missing_keys(), vec!["target_host"]);

        let mut no_dir = full_upload();
        no_dir.target_dir = Some(String::new());
        assert!(no_dir.target().is_none());
        assert_eq!(no_dir.missing_keys(), vec!["target_dir"]);

        let mut no_url = full_upload();
        no_url.base_url = Some("   ".into());
        assert!(no_url.target().is_none());

        assert_eq!(UploadConfig::default().missing_keys().len(), 3);
    }

    #[test]
    fn flag_truthiness() {
        assert!(Flag::Bool(true).is_set());
        assert!(!Flag::Bool(false).is_set());
        assert!(Flag::Int(1).is_set());
        assert!(!Flag::Int(0).is_set());
        assert!(Flag::Text("Yes".into()).is_set());
        assert!(Flag::Text("1".into()).is_set());
        assert!(!Flag::Text("0".into()).is_set());
        assert!(!Flag::Text(String::new()).is_set());
    }

    #[test]
    fn open_in_browser_defaults_to_false() {
        assert!(!full_upload().open_in_browser());

        let mut upload = full_upload();
        upload.open_in_browser = Some(Flag::Int(1));
        assert!(upload.open_in_browser());
    }
}
