//! Configuration loader

use std::path::Path;

use stagehand_utils::{config_file, Result, StagehandError};

use super::BotConfig;

/// Environment variable overriding `[account] token`
pub const TOKEN_ENV: &str = "STAGEHAND_TOKEN";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the default location
    pub fn load() -> Result<BotConfig> {
        let path = config_file();
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            Ok(BotConfig::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<BotConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| StagehandError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parse configuration from string
    pub fn parse(content: &str, path: &Path) -> Result<BotConfig> {
        toml::from_str(content).map_err(|e| StagehandError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Validate configuration
    pub fn validate(config: &BotConfig) -> Result<()> {
        if config.account.channels.is_empty() {
            return Err(StagehandError::config(
                "no channels configured ([account] channels); run with --init-config to create a template",
            ));
        }

        let prefix = &config.commands.prefix;
        if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
            return Err(StagehandError::config(
                "command prefix must be non-empty and contain no whitespace",
            ));
        }

        if config.theme.catalog.is_empty() {
            return Err(StagehandError::config("theme catalog must not be empty"));
        }
        if !contains_ignore_case(&config.theme.catalog, &config.theme.default) {
            return Err(StagehandError::config(
                "default theme must be a member of the theme catalog",
            ));
        }

        if config.font.catalog.is_empty() {
            return Err(StagehandError::config("font catalog must not be empty"));
        }
        if !contains_ignore_case(&config.font.catalog, &config.font.default) {
            return Err(StagehandError::config(
                "default font must be a member of the font catalog",
            ));
        }

        let size = &config.font_size;
        if size.min > size.max {
            return Err(StagehandError::config(
                "font size minimum must not exceed the maximum",
            ));
        }
        if size.default < size.min || size.default > size.max {
            return Err(StagehandError::config(
                "default font size must be within the configured bounds",
            ));
        }

        Ok(())
    }

    /// Load from the given path (or the default location), apply
    /// environment overrides, and validate
    pub fn load_and_validate(path: Option<&Path>) -> Result<BotConfig> {
        let mut config = match path {
            Some(p) => Self::load_from_path(p)?,
            None => Self::load()?,
        };
        apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }
}

fn apply_env_overrides(config: &mut BotConfig) {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.is_empty() {
            config.account.token = Some(token);
        }
    }
}

fn contains_ignore_case(catalog: &[String], value: &str) -> bool {
    catalog.iter().any(|c| c.eq_ignore_ascii_case(value))
}
