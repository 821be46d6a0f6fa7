//! Config file handling for the mdview CLI.
//!
//! The file is plain TOML deserialized straight into
//! [`LoadConfig`](mdview_fetch::LoadConfig); every key is optional. Command
//! line flags are applied on top by the caller, so precedence is flags over
//! file over built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mdview_fetch::LoadConfig;

/// Load the effective config.
///
/// With an explicit `path` the file must exist and parse; a missing file is
/// an error the user will want to hear about. Without one, the platform
/// config location is consulted and a missing file silently yields the
/// defaults.
pub fn load_config(path: Option<&Path>) -> Result<LoadConfig> {
    if let Some(path) = path {
        return read_config(path);
    }
    let Some(path) = default_config_path() else {
        return Ok(LoadConfig::default());
    };
    if !path.exists() {
        return Ok(LoadConfig::default());
    }
    read_config(&path)
}

fn read_config(path: &Path) -> Result<LoadConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config at {}", path.display()))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mdview").join("config.toml"))
}
