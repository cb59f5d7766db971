//! Configuration file support for upscrot.
//!
//! Settings live in `~/.config/upscrot/config.toml` (or under
//! `$XDG_CONFIG_HOME`). The file has a `[local]` section describing where and
//! how screenshots are saved and an optional `[upload]` section describing the
//! scp destination and public URL.
//!
//! When no config file exists a commented template is written and the caller is
//! expected to stop so the user can edit it.

pub mod types;

pub use types::{Flag, LocalConfig, UploadConfig, UploadTarget};

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the per-user configuration directory.
pub const APP_DIR: &str = "upscrot";

/// Name of the configuration file inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Highest permission value accepted for `file_permissions`.
const MAX_MODE: u32 = 0o7777;

/// Root configuration structure.
///
/// # Example TOML
/// ```toml
/// [local]
/// save_to = "~/Pictures/screenshots"
/// file_prefix = "screenshot-"
/// file_permissions = "0644"
///
/// [upload]
/// target_host = "example.org"
/// target_dir = "/var/www/tmp/screenshots"
/// base_url = "https://example.org/tmp/screenshots/"
/// open_in_browser = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Local file settings
    #[serde(default)]
    pub local: LocalConfig,

    /// Upload settings; absent means screenshots are only saved locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadConfig>,
}

/// Outcome of resolving the configuration at startup.
#[derive(Debug)]
pub enum Resolved {
    /// An existing config file was loaded.
    Loaded(Config),
    /// No config existed; a template was written to this path.
    Bootstrapped(PathBuf),
}

impl Config {
    /// Returns the default path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join(APP_DIR);

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Loads the config at `path`, or writes the template there if it is missing.
    ///
    /// `None` uses [`Config::get_config_path`].
    pub fn resolve(path: Option<&Path>) -> Result<Resolved> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::get_config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            ensure_dir(parent)?;
        }

        if config_path.exists() {
            return Self::load_from(&config_path).map(Resolved::Loaded);
        }

        info!("Config file not found, writing template");
        Self::write_template(&config_path)?;
        Ok(Resolved::Bootstrapped(config_path))
    }

    /// Reads, parses and validates the config file at `path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file contains invalid TOML syntax or wrongly typed values
    /// - `file_permissions` is not a valid octal mode
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Invalid config in {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        parse_mode(&self.local.file_permissions)?;

        if let Some(upload) = &self.upload {
            let missing = upload.missing_keys();
            if !missing.is_empty() {
                info!(
                    "Upload section is missing {}; screenshots will only be saved locally",
                    missing.join(", ")
                );
            }
        }

        Ok(())
    }

    /// Writes the commented bootstrap template to `path`.
    ///
    /// # Errors
    /// Returns an error if the parent directory or the file cannot be written.
    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        fs::write(path, template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// Permission bits to apply to captured files.
    pub fn file_mode(&self) -> Result<u32> {
        parse_mode(&self.local.file_permissions)
    }

    /// Configured save directory, with `~/` expanded. `None` means "use the temp dir".
    pub fn save_directory(&self) -> Option<PathBuf> {
        self.local
            .save_to
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .map(expand_tilde)
    }

    /// Upload destination, if the upload section is complete.
    pub fn upload_target(&self) -> Option<UploadTarget<'_>> {
        self.upload.as_ref().and_then(UploadConfig::target)
    }

    pub fn open_in_browser(&self) -> bool {
        self.upload
            .as_ref()
            .is_some_and(UploadConfig::open_in_browser)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// Parses an octal permission string such as `"0644"`, `"644"` or `"0o644"`.
pub fn parse_mode(value: &str) -> Result<u32> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0o")
        .or_else(|| trimmed.strip_prefix("0O"))
        .unwrap_or(trimmed);

    let mode = u32::from_str_radix(digits, 8)
        .map_err(|_| anyhow!("file_permissions '{}' is not an octal number", value))?;

    if mode > MAX_MODE {
        return Err(anyhow!(
            "file_permissions '{}' is out of range (max 7777)",
            value
        ));
    }

    Ok(mode)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(anyhow::Error::new(err)
            .context(format!("Failed to create config directory {}", dir.display()))),
    }
}

fn template() -> String {
    let save_hint = dirs::picture_dir()
        .map(|dir| dir.join("screenshots").display().to_string())
        .unwrap_or_else(|| "/home/user/pictures/".to_string());

    format!(
        r#"# upscrot configuration
#
# Lines starting with '#' are ignored. Remove the '#' to enable a setting.

[local]
# save_to = "{save_hint}"
file_prefix = "screenshot-"
file_permissions = "0644"

# Remove or comment out target_host, target_dir or base_url to disable uploads.
[upload]
target_host = "example.org"
target_dir = "/var/www/tmp/screenshots"
base_url = "https://example.org/tmp/screenshots/"
# open_in_browser = true
"#
    )
}
