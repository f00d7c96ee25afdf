//! Twitch chat transport
//!
//! A thin IRC client over plain TCP with line framing. Handles login
//! (authenticated or anonymous read-only), capability negotiation,
//! channel joins, and turns PRIVMSG lines into [`ChatMessage`]s. The
//! event pump is read-only so it stays safe to race against timers;
//! PING and the post-welcome JOIN are surfaced as events and answered
//! by the caller.

mod message;

pub use message::IrcMessage;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};
use tracing::{debug, info, trace};

use stagehand_utils::{Result, StagehandError};

use crate::config::AccountConfig;

const CHAT_HOST: &str = "irc.chat.twitch.tv";
const CHAT_PORT: u16 = 6667;
const MAX_LINE_LENGTH: usize = 8192;

/// A chat line as seen by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Channel login, without the leading '#'
    pub channel: String,
    /// Sender login
    pub sender: String,
    /// Message text
    pub text: String,
    /// Sender has the moderator badge
    pub is_moderator: bool,
    /// Reward id when the message is a channel-point redemption
    pub reward_id: Option<String>,
    /// Message was sent by this bot's own login
    pub is_self: bool,
}

/// Event produced by the connection pump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Login accepted; the caller should join channels now
    Connected,
    /// Server keepalive; the caller must answer with [`TwitchClient::pong`]
    Ping(String),
    /// A channel message
    Message(ChatMessage),
}

/// Connection to Twitch chat
pub struct TwitchClient {
    stream: Framed<TcpStream, LinesCodec>,
    nick: String,
    channels: Vec<String>,
    anonymous: bool,
}

impl TwitchClient {
    /// Connect and log in; channels are joined after the welcome event
    pub async fn connect(account: &AccountConfig) -> Result<Self> {
        let addr = format!("{}:{}", CHAT_HOST, CHAT_PORT);
        let tcp = TcpStream::connect(&addr)
            .await
            .map_err(|e| StagehandError::connection(format!("{}: {}", addr, e)))?;
        info!(host = CHAT_HOST, port = CHAT_PORT, "connected to chat server");

        let mut stream = Framed::new(tcp, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

        send_line(
            &mut stream,
            "CAP REQ :twitch.tv/tags twitch.tv/commands".to_string(),
        )
        .await?;

        let (nick, anonymous) = match (&account.username, &account.token) {
            (Some(username), Some(token)) if !username.is_empty() && !token.is_empty() => {
                let nick = username.to_lowercase();
                send_line(&mut stream, format!("PASS {}", token)).await?;
                send_line(&mut stream, format!("NICK {}", nick)).await?;
                (nick, false)
            }
            _ => {
                // Read-only login; Twitch accepts any justinfan nick
                let nick = format!("justinfan{}", fastrand::u32(10_000..100_000));
                send_line(&mut stream, format!("NICK {}", nick)).await?;
                info!(nick = %nick, "no credentials configured, connecting anonymously");
                (nick, true)
            }
        };

        let channels = account
            .channels
            .iter()
            .map(|c| c.trim_start_matches('#').to_lowercase())
            .collect();

        Ok(Self {
            stream,
            nick,
            channels,
            anonymous,
        })
    }

    /// Whether replies can be sent (anonymous logins are read-only)
    pub fn can_send(&self) -> bool {
        !self.anonymous
    }

    /// Pull the next event from the connection
    ///
    /// Returns Ok(None) when the server closes the connection. This
    /// method never writes to the socket, so it is safe to cancel from
    /// a `select!`.
    pub async fn next_event(&mut self) -> Result<Option<ChatEvent>> {
        while let Some(line) = self.stream.next().await {
            let line = line.map_err(map_codec_err)?;
            trace!(line = %line, "recv");

            let Some(msg) = IrcMessage::parse(&line) else {
                debug!(line = %line, "ignoring unparseable line");
                continue;
            };

            match msg.command.as_str() {
                "PING" => {
                    let payload = msg
                        .params
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "tmi.twitch.tv".to_string());
                    return Ok(Some(ChatEvent::Ping(payload)));
                }
                "001" => return Ok(Some(ChatEvent::Connected)),
                "RECONNECT" => {
                    info!("server requested reconnect");
                    return Err(StagehandError::ConnectionClosed);
                }
                "NOTICE" => {
                    let text = msg.params.last().cloned().unwrap_or_default();
                    // Bad credentials surface as a pre-login NOTICE
                    if text.contains("Login authentication failed")
                        || text.contains("Improperly formatted auth")
                    {
                        return Err(StagehandError::LoginRejected(text));
                    }
                    info!(notice = %text, "server notice");
                }
                "PRIVMSG" => {
                    if let Some(chat) = chat_message(&msg, &self.nick) {
                        return Ok(Some(ChatEvent::Message(chat)));
                    }
                }
                _ => trace!(command = %msg.command, "ignoring"),
            }
        }
        Ok(None)
    }

    /// Answer a PING
    pub async fn pong(&mut self, payload: &str) -> Result<()> {
        self.send(format!("PONG :{}", payload)).await
    }

    /// Join every configured channel; call after [`ChatEvent::Connected`]
    pub async fn join_channels(&mut self) -> Result<()> {
        let channels = self.channels.clone();
        for channel in channels {
            self.send(format!("JOIN #{}", channel)).await?;
            info!(channel = %channel, "joined");
        }
        Ok(())
    }

    /// Send a chat message to a channel
    pub async fn say(&mut self, channel: &str, text: &str) -> Result<()> {
        self.send(format!(
            "PRIVMSG #{} :{}",
            channel.trim_start_matches('#'),
            text
        ))
        .await
    }

    async fn send(&mut self, line: String) -> Result<()> {
        trace!(line = %line, "send");
        self.stream.send(line).await.map_err(map_codec_err)
    }
}

/// Extract a [`ChatMessage`] from a PRIVMSG line
fn chat_message(msg: &IrcMessage, own_nick: &str) -> Option<ChatMessage> {
    let channel = msg.params.first()?.trim_start_matches('#').to_string();
    let text = msg.params.get(1).cloned().unwrap_or_default();
    let sender = msg.nick()?.to_string();

    let is_moderator = msg.tag("mod") == Some("1")
        || msg
            .tag("badges")
            .is_some_and(|b| b.split(',').any(|badge| badge.starts_with("broadcaster/")));

    let reward_id = msg
        .tag("custom-reward-id")
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let is_self = sender.eq_ignore_ascii_case(own_nick);

    Some(ChatMessage {
        channel,
        sender,
        text,
        is_moderator,
        reward_id,
        is_self,
    })
}

async fn send_line(stream: &mut Framed<TcpStream, LinesCodec>, line: String) -> Result<()> {
    stream.send(line).await.map_err(map_codec_err)
}

fn map_codec_err(e: LinesCodecError) -> StagehandError {
    match e {
        LinesCodecError::MaxLineLengthExceeded => {
            StagehandError::invalid_message("line exceeded maximum length")
        }
        LinesCodecError::Io(e) => StagehandError::Io(e),
    }
}
