//! Bot configuration
//!
//! TOML configuration loaded from the XDG config directory, with the
//! chat token overridable from the environment so the secret can stay
//! out of the file.

mod defaults;
mod loader;
mod schema;

pub use defaults::DEFAULT_CONFIG_TOML;
pub use loader::{ConfigLoader, TOKEN_ENV};
pub use schema::*;

use std::path::PathBuf;

use stagehand_utils::{paths, Result, StagehandError};

/// Write the default configuration template to the standard location
///
/// Refuses to overwrite an existing file.
pub fn write_default_config() -> Result<PathBuf> {
    let path = paths::config_file();
    if path.exists() {
        return Err(StagehandError::config(format!(
            "configuration file already exists: {}",
            path.display()
        )));
    }

    paths::ensure_dir(&paths::config_dir())?;
    std::fs::write(&path, DEFAULT_CONFIG_TOML).map_err(|e| StagehandError::FileWrite {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}
