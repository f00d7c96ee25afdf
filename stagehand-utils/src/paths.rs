//! Path utilities for stagehand
//!
//! Resolves the bot's own XDG directories (config, state, logs) and the
//! OS-dependent location of the VS Code user settings file the bot
//! mutates.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Application identifier for XDG directories
const APP_NAME: &str = "stagehand";

/// Get project directories (cached)
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the configuration directory
///
/// Location: `$XDG_CONFIG_HOME/stagehand` or `~/.config/stagehand`
pub fn config_dir() -> PathBuf {
    project_dirs()
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(fallback_config_dir)
}

/// Get the main configuration file path
///
/// Location: `$XDG_CONFIG_HOME/stagehand/config.toml`
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the state directory
///
/// Location: `$XDG_STATE_HOME/stagehand` or `~/.local/state/stagehand`
pub fn state_dir() -> PathBuf {
    project_dirs()
        .and_then(|p| p.state_dir().map(|d| d.to_path_buf()))
        .unwrap_or_else(fallback_state_dir)
}

/// Get the log directory
///
/// Location: `$XDG_STATE_HOME/stagehand/log` or `~/.local/state/stagehand/log`
pub fn log_dir() -> PathBuf {
    state_dir().join("log")
}

/// Get the VS Code user settings file path
///
/// Location by OS:
/// - Linux: `~/.config/Code/User/settings.json`
/// - macOS: `~/Library/Application Support/Code/User/settings.json`
/// - Windows: `%APPDATA%\Code\User\settings.json`
pub fn editor_settings_file() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| home_dir().join(".config"))
        .join("Code")
        .join("User")
        .join("settings.json")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

// Fallback implementations when the platform dirs are unavailable

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

fn fallback_config_dir() -> PathBuf {
    home_dir().join(".config").join(APP_NAME)
}

fn fallback_state_dir() -> PathBuf {
    home_dir().join(".local").join("state").join(APP_NAME)
}
