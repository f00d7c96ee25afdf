//! Chat event routing
//!
//! Classifies incoming chat messages into reward redemptions and prefix
//! commands and drives the settings mutator accordingly. Returns the
//! reply to send, or None when nothing should go back to chat.

use tracing::{debug, info};

use crate::config::BotConfig;
use crate::irc::ChatMessage;
use crate::settings::{Field, SettingsMutator};

/// Routes chat messages to settings mutations
pub struct EventRouter {
    theme_reward: String,
    font_reward: String,
    prefix: String,
}

impl EventRouter {
    pub fn new(config: &BotConfig) -> Self {
        Self {
            theme_reward: config.rewards.theme.clone(),
            font_reward: config.rewards.font.clone(),
            prefix: config.commands.prefix.clone(),
        }
    }

    /// Route one chat message, returning the reply to send (if any)
    pub fn dispatch(&self, msg: &ChatMessage, mutator: &mut SettingsMutator) -> Option<String> {
        if msg.is_self {
            return None;
        }

        if let Some(reward_id) = &msg.reward_id {
            return self.dispatch_reward(reward_id, msg, mutator);
        }

        if msg.text.starts_with(&self.prefix) {
            return self.dispatch_command(msg, mutator);
        }

        None
    }

    fn dispatch_reward(
        &self,
        reward_id: &str,
        msg: &ChatMessage,
        mutator: &mut SettingsMutator,
    ) -> Option<String> {
        let option = normalize_whitespace(&msg.text);
        info!(reward = %reward_id, text = %option, "custom reward claimed");

        if !self.theme_reward.is_empty() && reward_id == self.theme_reward {
            mutator.apply(Field::Theme, &option, true)
        } else if !self.font_reward.is_empty() && reward_id == self.font_reward {
            mutator.apply(Field::Font, &option, true)
        } else {
            None
        }
    }

    fn dispatch_command(&self, msg: &ChatMessage, mutator: &mut SettingsMutator) -> Option<String> {
        let mut words = msg.text.split_whitespace();
        let command = words
            .next()
            .and_then(|w| w.strip_prefix(self.prefix.as_str()))
            .unwrap_or("")
            .to_lowercase();
        let args: Vec<&str> = words.collect();

        debug!(command = %command, args = ?args, "chat command");

        match command.as_str() {
            "fontsize" => {
                if !is_privileged(msg) {
                    debug!(sender = %msg.sender, "fontsize from unprivileged sender ignored");
                    return None;
                }
                mutator.apply(Field::FontSize, args.first().copied().unwrap_or(""), true)
            }
            _ => None,
        }
    }
}

/// Moderators and the channel owner may adjust the font size
fn is_privileged(msg: &ChatMessage) -> bool {
    msg.is_moderator || msg.sender.eq_ignore_ascii_case(&msg.channel)
}

/// Collapse runs of whitespace to single spaces and trim the ends
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reset::ResetScheduler;
    use crate::settings::{CatalogSpec, FieldSpecs, SizeSpec, THEME_KEY};
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};
    use tokio::sync::mpsc;

    fn router() -> EventRouter {
        let mut config = BotConfig::default();
        config.rewards.theme = "theme-reward-id".into();
        config.rewards.font = "font-reward-id".into();
        EventRouter::new(&config)
    }

    fn mutator(dir: &TempDir, content: &str) -> (SettingsMutator, PathBuf) {
        let path = dir.path().join("settings.json");
        std::fs::write(&path, content).unwrap();
        let specs = FieldSpecs {
            theme: CatalogSpec {
                catalog: vec!["One Dark Pro".into(), "Monokai".into()],
                default: "One Dark Pro".into(),
                reset_secs: 0,
            },
            font: CatalogSpec {
                catalog: vec!["Fira Code".into(), "Consolas".into()],
                default: "Fira Code".into(),
                reset_secs: 0,
            },
            font_size: SizeSpec {
                min: 10,
                max: 20,
                default: 16,
                reset_secs: 0,
            },
        };
        // No reset delays in these specs, so the dropped receiver is fine
        let (tx, _rx) = mpsc::unbounded_channel();
        (
            SettingsMutator::new(path.clone(), specs, ResetScheduler::new(tx)),
            path,
        )
    }

    fn message(text: &str) -> ChatMessage {
        ChatMessage {
            channel: "somechannel".into(),
            sender: "viewer".into(),
            text: text.into(),
            is_moderator: false,
            reward_id: None,
            is_self: false,
        }
    }

    fn theme_value(path: &std::path::Path) -> String {
        let doc = crate::settings::SettingsDocument::load(path).unwrap();
        doc.get_str(THEME_KEY).unwrap().to_string()
    }

    #[test]
    fn test_self_messages_ignored() {
        let dir = tempdir().unwrap();
        let (mut m, _path) = mutator(&dir, r#"{"workbench.colorTheme":"Monokai"}"#);
        let mut msg = message("anything");
        msg.reward_id = Some("theme-reward-id".into());
        msg.is_self = true;

        assert_eq!(router().dispatch(&msg, &mut m), None);
    }

    #[test]
    fn test_theme_reward_dispatches() {
        let dir = tempdir().unwrap();
        let (mut m, path) = mutator(&dir, r#"{"workbench.colorTheme":"Monokai"}"#);
        let mut msg = message("  one   dark pro  ");
        msg.reward_id = Some("theme-reward-id".into());

        let reply = router().dispatch(&msg, &mut m);
        assert_eq!(
            reply.as_deref(),
            Some("Theme changed to One Dark Pro successfully!")
        );
        assert_eq!(theme_value(&path), "One Dark Pro");
    }

    #[test]
    fn test_font_reward_dispatches() {
        let dir = tempdir().unwrap();
        let (mut m, _path) = mutator(&dir, r#"{"editor.fontFamily":"Fira Code"}"#);
        let mut msg = message("Consolas");
        msg.reward_id = Some("font-reward-id".into());

        let reply = router().dispatch(&msg, &mut m);
        assert_eq!(reply.as_deref(), Some("Font changed to Consolas successfully!"));
    }

    #[test]
    fn test_unknown_reward_ignored() {
        let dir = tempdir().unwrap();
        let content = r#"{"workbench.colorTheme":"Monokai"}"#;
        let (mut m, path) = mutator(&dir, content);
        let mut msg = message("One Dark Pro");
        msg.reward_id = Some("some-other-reward".into());

        assert_eq!(router().dispatch(&msg, &mut m), None);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_unconfigured_reward_ids_never_match() {
        let dir = tempdir().unwrap();
        let content = r#"{"workbench.colorTheme":"Monokai"}"#;
        let (mut m, path) = mutator(&dir, content);

        // A router with empty reward ids must not treat an empty-tagged
        // redemption as a match
        let plain = EventRouter::new(&BotConfig::default());
        let mut msg = message("One Dark Pro");
        msg.reward_id = Some(String::new());

        assert_eq!(plain.dispatch(&msg, &mut m), None);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_fontsize_requires_privilege() {
        let dir = tempdir().unwrap();
        let content = r#"{"editor.fontSize":14}"#;
        let (mut m, path) = mutator(&dir, content);

        let msg = message("!fontsize +");
        assert_eq!(router().dispatch(&msg, &mut m), None);
        // The mutator was never invoked
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_fontsize_from_moderator() {
        let dir = tempdir().unwrap();
        let (mut m, _path) = mutator(&dir, r#"{"editor.fontSize":14}"#);

        let mut msg = message("!fontsize +");
        msg.is_moderator = true;

        let reply = router().dispatch(&msg, &mut m);
        assert_eq!(
            reply.as_deref(),
            Some("Font size changed to 15 successfully!")
        );
    }

    #[test]
    fn test_fontsize_from_channel_owner() {
        let dir = tempdir().unwrap();
        let (mut m, _path) = mutator(&dir, r#"{"editor.fontSize":14}"#);

        let mut msg = message("!FontSize -");
        msg.sender = "SomeChannel".into();

        let reply = router().dispatch(&msg, &mut m);
        assert_eq!(
            reply.as_deref(),
            Some("Font size changed to 13 successfully!")
        );
    }

    #[test]
    fn test_fontsize_without_argument_is_noop() {
        let dir = tempdir().unwrap();
        let (mut m, _path) = mutator(&dir, r#"{"editor.fontSize":14}"#);

        let mut msg = message("!fontsize");
        msg.is_moderator = true;

        assert_eq!(router().dispatch(&msg, &mut m), None);
    }

    #[test]
    fn test_unknown_command_ignored() {
        let dir = tempdir().unwrap();
        let (mut m, _path) = mutator(&dir, r#"{"editor.fontSize":14}"#);

        let mut msg = message("!theme Monokai");
        msg.is_moderator = true;

        assert_eq!(router().dispatch(&msg, &mut m), None);
    }

    #[test]
    fn test_plain_chat_ignored() {
        let dir = tempdir().unwrap();
        let (mut m, _path) = mutator(&dir, r#"{"editor.fontSize":14}"#);

        assert_eq!(router().dispatch(&message("hello chat"), &mut m), None);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  One   Dark\tPro "), "One Dark Pro");
        assert_eq!(normalize_whitespace(""), "");
    }
}
