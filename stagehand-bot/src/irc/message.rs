//! IRC line parsing
//!
//! Minimal IRCv3 parser covering what Twitch chat actually sends:
//! message tags, prefix, command, middle parameters, trailing parameter.

use std::collections::HashMap;

/// A parsed IRC line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrcMessage {
    /// IRCv3 message tags, values unescaped
    pub tags: HashMap<String, String>,
    /// Message prefix (`nick!user@host` or a server name)
    pub prefix: Option<String>,
    /// Command or numeric ("PRIVMSG", "001", ...)
    pub command: String,
    /// Parameters; the trailing parameter, if present, is last
    pub params: Vec<String>,
}

impl IrcMessage {
    /// Parse one IRC line; returns None for lines with no command
    pub fn parse(line: &str) -> Option<IrcMessage> {
        let mut rest = line.trim_end_matches(['\r', '\n']);
        let mut tags = HashMap::new();

        if let Some(stripped) = rest.strip_prefix('@') {
            let (raw_tags, after) = stripped.split_once(' ')?;
            for tag in raw_tags.split(';') {
                match tag.split_once('=') {
                    Some((key, value)) => {
                        tags.insert(key.to_string(), unescape_tag_value(value));
                    }
                    None => {
                        tags.insert(tag.to_string(), String::new());
                    }
                }
            }
            rest = after.trim_start_matches(' ');
        }

        let mut prefix = None;
        if let Some(stripped) = rest.strip_prefix(':') {
            let (p, after) = stripped.split_once(' ')?;
            prefix = Some(p.to_string());
            rest = after.trim_start_matches(' ');
        }

        let (command, mut param_str) = match rest.split_once(' ') {
            Some((cmd, params)) => (cmd.to_string(), params),
            None => (rest.to_string(), ""),
        };

        if command.is_empty() {
            return None;
        }

        let mut params = Vec::new();
        loop {
            param_str = param_str.trim_start_matches(' ');
            if param_str.is_empty() {
                break;
            }
            if let Some(trailing) = param_str.strip_prefix(':') {
                params.push(trailing.to_string());
                break;
            }
            match param_str.split_once(' ') {
                Some((param, after)) => {
                    params.push(param.to_string());
                    param_str = after;
                }
                None => {
                    params.push(param_str.to_string());
                    break;
                }
            }
        }

        Some(IrcMessage {
            tags,
            prefix,
            command,
            params,
        })
    }

    /// Nick portion of the prefix (`nick!user@host`)
    pub fn nick(&self) -> Option<&str> {
        self.prefix.as_deref().map(|p| match p.split_once('!') {
            Some((nick, _)) => nick,
            None => p,
        })
    }

    /// Look up a tag value
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Undo IRCv3 tag value escaping
fn unescape_tag_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(':') => out.push(';'),
            Some('s') => out.push(' '),
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ping() {
        let msg = IrcMessage::parse("PING :tmi.twitch.tv").unwrap();
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.params, vec!["tmi.twitch.tv"]);
        assert!(msg.prefix.is_none());
        assert!(msg.tags.is_empty());
    }

    #[test]
    fn test_parse_welcome_numeric() {
        let msg = IrcMessage::parse(":tmi.twitch.tv 001 mybot :Welcome, GLHF!").unwrap();
        assert_eq!(msg.command, "001");
        assert_eq!(msg.prefix.as_deref(), Some("tmi.twitch.tv"));
        assert_eq!(msg.params, vec!["mybot", "Welcome, GLHF!"]);
    }

    #[test]
    fn test_parse_privmsg_with_tags() {
        let line = "@badges=moderator/1;custom-reward-id=abc-123;mod=1;display-name=Viewer \
                    :viewer!viewer@viewer.tmi.twitch.tv PRIVMSG #somechannel :One Dark Pro";
        let msg = IrcMessage::parse(line).unwrap();
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.nick(), Some("viewer"));
        assert_eq!(msg.tag("custom-reward-id"), Some("abc-123"));
        assert_eq!(msg.tag("mod"), Some("1"));
        assert_eq!(msg.params, vec!["#somechannel", "One Dark Pro"]);
    }

    #[test]
    fn test_parse_tag_value_unescaping() {
        let msg = IrcMessage::parse(
            r"@system-msg=hello\sworld\:\\again :tmi.twitch.tv NOTICE #chan :hi",
        )
        .unwrap();
        assert_eq!(msg.tag("system-msg"), Some(r"hello world;\again"));
    }

    #[test]
    fn test_parse_valueless_tag() {
        let msg = IrcMessage::parse("@flag :tmi.twitch.tv NOTICE #chan :hi").unwrap();
        assert_eq!(msg.tag("flag"), Some(""));
    }

    #[test]
    fn test_parse_trailing_with_colons() {
        let msg = IrcMessage::parse("PRIVMSG #chan :fontsize: use + or -").unwrap();
        assert_eq!(msg.params, vec!["#chan", "fontsize: use + or -"]);
    }

    #[test]
    fn test_parse_no_trailing() {
        let msg = IrcMessage::parse("JOIN #chan").unwrap();
        assert_eq!(msg.command, "JOIN");
        assert_eq!(msg.params, vec!["#chan"]);
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(IrcMessage::parse("").is_none());
        assert!(IrcMessage::parse("   ").is_none());
    }

    #[test]
    fn test_nick_from_server_prefix() {
        let msg = IrcMessage::parse(":tmi.twitch.tv 372 mybot :motd").unwrap();
        assert_eq!(msg.nick(), Some("tmi.twitch.tv"));
    }

    #[test]
    fn test_crlf_stripped() {
        let msg = IrcMessage::parse("PING :tmi.twitch.tv\r\n").unwrap();
        assert_eq!(msg.params, vec!["tmi.twitch.tv"]);
    }
}
