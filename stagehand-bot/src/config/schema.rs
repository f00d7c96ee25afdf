//! Configuration schema structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use stagehand_utils::paths;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub account: AccountConfig,
    pub commands: CommandConfig,
    pub rewards: RewardConfig,
    pub editor: EditorConfig,
    pub theme: ThemeConfig,
    pub font: FontConfig,
    pub font_size: FontSizeConfig,
}

/// Chat account settings
///
/// With no username/token the bot connects anonymously: it still reacts
/// to rewards and commands but never sends replies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Bot login name
    pub username: Option<String>,
    /// OAuth chat token ("oauth:...")
    pub token: Option<String>,
    /// Channels to join
    pub channels: Vec<String>,
}

impl AccountConfig {
    /// Whether the account can speak in chat
    pub fn has_identity(&self) -> bool {
        matches!(
            (&self.username, &self.token),
            (Some(u), Some(t)) if !u.is_empty() && !t.is_empty()
        )
    }
}

/// Chat command settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Prefix that marks a chat message as a command
    pub prefix: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self { prefix: "!".into() }
    }
}

/// Channel-point reward ids, as configured on the Twitch dashboard
///
/// Only text-input rewards carry the redeemer's message through chat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Reward id that triggers a theme change
    pub theme: String,
    /// Reward id that triggers a font change
    pub font: String,
}

/// Editor settings file location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Explicit settings file path; defaults to the OS-dependent
    /// VS Code user settings location
    pub settings_path: Option<PathBuf>,
}

impl EditorConfig {
    /// Resolve the settings file path
    pub fn settings_file(&self) -> PathBuf {
        self.settings_path
            .clone()
            .unwrap_or_else(paths::editor_settings_file)
    }
}

/// Color theme field configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Valid theme names, as the editor spells them
    pub catalog: Vec<String>,
    /// Theme to revert to
    pub default: String,
    /// Auto-revert delay in seconds (0 disables)
    pub reset_secs: u64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            catalog: vec![
                "One Dark Pro".into(),
                "One Dark Pro Flat".into(),
                "GitHub Dark".into(),
                "One Monokai".into(),
                "Monokai".into(),
                "Abyss".into(),
                "Solarized Dark".into(),
                "Tomorrow Night Blue".into(),
            ],
            default: "One Dark Pro Flat".into(),
            reset_secs: 300,
        }
    }
}

/// Font family field configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Valid font names (monospace fonts installed on the machine)
    pub catalog: Vec<String>,
    /// Font to revert to
    pub default: String,
    /// Auto-revert delay in seconds (0 disables)
    pub reset_secs: u64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            catalog: vec![
                "Consolas".into(),
                "Fira Code".into(),
                "Source Code Pro".into(),
                "Input Mono Narrow".into(),
                "Noto Sans Mono".into(),
            ],
            default: "Input Mono Narrow".into(),
            reset_secs: 300,
        }
    }
}

/// Font size field configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizeConfig {
    pub min: i64,
    pub max: i64,
    /// Size to revert to
    pub default: i64,
    /// Auto-revert delay in seconds (0 disables)
    pub reset_secs: u64,
}

impl Default for FontSizeConfig {
    fn default() -> Self {
        Self {
            min: 10,
            max: 20,
            default: 16,
            reset_secs: 0,
        }
    }
}
