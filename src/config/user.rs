//! User configuration loading for dank-ls.
//!
//! User config location: $XDG_CONFIG_HOME/dank-ls/dank-ls.toml
//! Fallback: the platform config directory (`dirs::config_dir`)

use std::path::PathBuf;

use super::settings::DankSettings;
use crate::error::{DankError, DankResult};

/// Returns the path to the user configuration file.
///
/// Returns None if no config directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)?;
    Some(base.join("dank-ls").join(super::PROJECT_CONFIG_FILE))
}

/// Load the user configuration file.
///
/// A missing file is `Ok(None)`; unreadable or malformed files are errors.
pub fn load_user_config() -> DankResult<Option<DankSettings>> {
    let Some(path) = user_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)?;
    toml::from_str(&contents)
        .map(Some)
        .map_err(|err| DankError::config(format!("{}: {}", path.display(), err)))
}
