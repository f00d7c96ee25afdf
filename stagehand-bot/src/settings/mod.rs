//! Settings mutation
//!
//! The core of the bot: given a field, a requested option, and a reset
//! flag, read the editor settings file, compute the new value, write the
//! document back, and manage the field's auto-revert timer. Each call is
//! an independent read-modify-write cycle.

mod document;

pub use document::SettingsDocument;

use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

use stagehand_utils::Result;

use crate::config::BotConfig;
use crate::reset::ResetScheduler;

/// Document key for the color theme
pub const THEME_KEY: &str = "workbench.colorTheme";
/// Document key for the font family
pub const FONT_KEY: &str = "editor.fontFamily";
/// Document key for the font size
pub const FONT_SIZE_KEY: &str = "editor.fontSize";

/// A mutable settings field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Theme,
    Font,
    FontSize,
}

impl Field {
    /// Human-readable label used in replies and logs
    pub fn label(&self) -> &'static str {
        match self {
            Field::Theme => "Theme",
            Field::Font => "Font",
            Field::FontSize => "Font size",
        }
    }

    /// Document key this field lives under
    pub fn key(&self) -> &'static str {
        match self {
            Field::Theme => THEME_KEY,
            Field::Font => FONT_KEY,
            Field::FontSize => FONT_SIZE_KEY,
        }
    }
}

/// Static configuration for a catalog-selection field (theme, font)
#[derive(Debug, Clone)]
pub struct CatalogSpec {
    /// Ordered list of valid values
    pub catalog: Vec<String>,
    /// Value the field reverts to
    pub default: String,
    /// Auto-revert delay in seconds (0 = never revert)
    pub reset_secs: u64,
}

/// Static configuration for the bounded-integer font size field
#[derive(Debug, Clone)]
pub struct SizeSpec {
    pub min: i64,
    pub max: i64,
    pub default: i64,
    pub reset_secs: u64,
}

/// Per-field static configuration
#[derive(Debug, Clone)]
pub struct FieldSpecs {
    pub theme: CatalogSpec,
    pub font: CatalogSpec,
    pub font_size: SizeSpec,
}

impl FieldSpecs {
    /// Build field specs from the loaded bot configuration
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            theme: CatalogSpec {
                catalog: config.theme.catalog.clone(),
                default: config.theme.default.clone(),
                reset_secs: config.theme.reset_secs,
            },
            font: CatalogSpec {
                catalog: config.font.catalog.clone(),
                default: config.font.default.clone(),
                reset_secs: config.font.reset_secs,
            },
            font_size: SizeSpec {
                min: config.font_size.min,
                max: config.font_size.max,
                default: config.font_size.default,
                reset_secs: config.font_size.reset_secs,
            },
        }
    }
}

/// What a mutation attempt decided to do
enum Outcome {
    /// Persist a new value and reply
    Write { value: Value, reply: String },
    /// Reply without touching the document (bounds messages)
    Reply(String),
    /// No write, no reply
    Quiet,
}

/// The settings mutator
///
/// Owns the settings file path, the per-field specs, and the reset
/// scheduler. All mutations funnel through [`SettingsMutator::apply`].
pub struct SettingsMutator {
    settings_path: PathBuf,
    specs: FieldSpecs,
    resets: ResetScheduler,
}

impl SettingsMutator {
    pub fn new(settings_path: PathBuf, specs: FieldSpecs, resets: ResetScheduler) -> Self {
        Self {
            settings_path,
            specs,
            resets,
        }
    }

    /// Apply a mutation, returning the chat reply (if any)
    ///
    /// This is the error boundary for settings I/O: read, parse, or
    /// write failures are logged here and produce no reply.
    pub fn apply(&mut self, field: Field, option: &str, reset: bool) -> Option<String> {
        match self.try_apply(field, option, reset) {
            Ok(reply) => reply,
            Err(e) => {
                error!(field = field.label(), error = %e, "settings mutation failed");
                None
            }
        }
    }

    /// Revert a field to its default; the reset-timer expiry path
    ///
    /// Runs with reset disabled so a fired revert can never re-arm its
    /// own timer.
    pub fn apply_reset(&mut self, field: Field) {
        self.resets.clear(field);

        let option = match field {
            Field::Theme => self.specs.theme.default.clone(),
            Field::Font => self.specs.font.default.clone(),
            Field::FontSize => String::new(),
        };

        info!(field = field.label(), "reset timer fired, reverting to default");
        self.apply(field, &option, false);
    }

    fn try_apply(&mut self, field: Field, option: &str, reset: bool) -> Result<Option<String>> {
        let mut doc = SettingsDocument::load(&self.settings_path)?;

        let outcome = match field {
            Field::Theme => catalog_outcome(&self.specs.theme, &doc, field, option, reset),
            Field::Font => catalog_outcome(&self.specs.font, &doc, field, option, reset),
            Field::FontSize => size_outcome(&self.specs.font_size, &doc, option, reset),
        };

        match outcome {
            Outcome::Write { value, reply } => {
                doc.set(field.key(), value);
                doc.save(&self.settings_path)?;
                info!(field = field.label(), "settings updated");

                let delay = self.reset_delay(field);
                if reset && delay > 0 {
                    self.resets.arm(field, Duration::from_secs(delay));
                    info!(
                        "{} will reset to {} in {} seconds",
                        field.label(),
                        self.default_display(field),
                        delay
                    );
                }

                Ok(Some(reply))
            }
            Outcome::Reply(reply) => Ok(Some(reply)),
            Outcome::Quiet => Ok(None),
        }
    }

    fn reset_delay(&self, field: Field) -> u64 {
        match field {
            Field::Theme => self.specs.theme.reset_secs,
            Field::Font => self.specs.font.reset_secs,
            Field::FontSize => self.specs.font_size.reset_secs,
        }
    }

    fn default_display(&self, field: Field) -> String {
        match field {
            Field::Theme => self.specs.theme.default.clone(),
            Field::Font => self.specs.font.default.clone(),
            Field::FontSize => self.specs.font_size.default.to_string(),
        }
    }
}

/// Select the new value for a catalog field (theme, font)
///
/// The candidate pool excludes the current value when reset is enabled,
/// so a redemption always lands on a visibly different value. Selection
/// order: exact case-insensitive match of the request, else a uniform
/// random pick, else (empty pool) the current value is kept.
fn catalog_outcome(
    spec: &CatalogSpec,
    doc: &SettingsDocument,
    field: Field,
    option: &str,
    reset: bool,
) -> Outcome {
    let current = doc.get_str(field.key()).unwrap_or(&spec.default).to_string();

    let pool: Vec<&str> = if reset {
        spec.catalog
            .iter()
            .map(String::as_str)
            .filter(|c| !c.eq_ignore_ascii_case(&current))
            .collect()
    } else {
        spec.catalog.iter().map(String::as_str).collect()
    };

    let chosen = pool
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(option))
        .or_else(|| {
            if pool.is_empty() {
                None
            } else {
                Some(pool[fastrand::usize(..pool.len())])
            }
        })
        .unwrap_or(current.as_str());

    Outcome::Write {
        value: Value::from(chosen),
        reply: format!("{} changed to {} successfully!", field.label(), chosen),
    }
}

/// Compute the font size mutation
///
/// Bounds are checked against the value read from disk, not the computed
/// target, so a value pushed out of range is only reported on the next
/// request.
fn size_outcome(spec: &SizeSpec, doc: &SettingsDocument, option: &str, reset: bool) -> Outcome {
    let current = doc.get_i64(FONT_SIZE_KEY).unwrap_or(spec.default);

    let target = if !reset {
        spec.default
    } else {
        match option {
            "+" => current + 1,
            "-" => current - 1,
            _ => current,
        }
    };

    if current < spec.min {
        Outcome::Reply(format!("Font size can't be lower than {}", spec.min))
    } else if current > spec.max {
        Outcome::Reply(format!("Font size can't be higher than {}", spec.max))
    } else if target == current {
        Outcome::Quiet
    } else {
        Outcome::Write {
            value: Value::from(target),
            reply: format!("Font size changed to {} successfully!", target),
        }
    }
}
