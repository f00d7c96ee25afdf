//! stagehand - chat-driven editor settings bot
//!
//! Listens to a Twitch channel's chat and mutates the local VS Code
//! user settings in response: viewers redeem channel-point rewards to
//! change the color theme or font, and moderators adjust the font size
//! with a chat command. Changed fields optionally revert to their
//! defaults after a configured delay.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use stagehand_utils::{init_logging_with_config, LogConfig, Result};

mod cli;
mod config;
mod irc;
mod reset;
mod router;
mod settings;

use cli::Args;
use config::{BotConfig, ConfigLoader};
use irc::{ChatEvent, TwitchClient};
use reset::ResetScheduler;
use router::EventRouter;
use settings::{FieldSpecs, SettingsMutator};

/// Delay between reconnection attempts
const RECONNECT_DELAY: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();

    init_logging_with_config(LogConfig::bot())?;
    info!("stagehand starting");

    if args.init_config {
        let path = config::write_default_config()?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = match ConfigLoader::load_and_validate(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {}", e);
            eprintln!("Error: {}", e);
            return Err(e);
        }
    };

    match run_bot(&args, config).await {
        Ok(()) => {
            info!("stagehand exiting normally");
            Ok(())
        }
        Err(e) => {
            error!("stagehand error: {}", e);
            eprintln!("Error: {}", e);
            Err(e)
        }
    }
}

async fn run_bot(args: &Args, config: BotConfig) -> Result<()> {
    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(|| config.editor.settings_file());
    info!(path = %settings_path.display(), "editor settings file");

    if !config.account.has_identity() {
        info!("anonymous account: replies will be suppressed");
    }

    let (reset_tx, mut reset_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut mutator = SettingsMutator::new(
        settings_path,
        FieldSpecs::from_config(&config),
        ResetScheduler::new(reset_tx),
    );
    let router = EventRouter::new(&config);

    loop {
        let mut client = match TwitchClient::connect(&config.account).await {
            Ok(client) => client,
            Err(e) if e.is_retryable() => {
                warn!(error = %e, "connect failed, retrying in {}s", RECONNECT_DELAY.as_secs());
                tokio::time::sleep(RECONNECT_DELAY).await;
                continue;
            }
            Err(e) => return Err(e),
        };

        match pump_events(&mut client, &router, &mut mutator, &mut reset_rx).await {
            Ok(()) => warn!("connection closed by server"),
            Err(e) if e.is_retryable() => warn!(error = %e, "connection error"),
            Err(e) => return Err(e),
        }

        info!("reconnecting in {}s", RECONNECT_DELAY.as_secs());
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

/// Drive one connection until it closes or fails
///
/// One handler runs to completion before the next event is pulled, so a
/// firing reset timer and a chat message are never processed
/// concurrently.
async fn pump_events(
    client: &mut TwitchClient,
    router: &EventRouter,
    mutator: &mut SettingsMutator,
    reset_rx: &mut tokio::sync::mpsc::UnboundedReceiver<settings::Field>,
) -> Result<()> {
    loop {
        tokio::select! {
            event = client.next_event() => match event? {
                Some(ChatEvent::Connected) => {
                    info!("logged in to chat");
                    client.join_channels().await?;
                }
                Some(ChatEvent::Ping(payload)) => {
                    client.pong(&payload).await?;
                }
                Some(ChatEvent::Message(msg)) => {
                    if let Some(reply) = router.dispatch(&msg, mutator) {
                        if client.can_send() {
                            client.say(&msg.channel, &reply).await?;
                            info!(reply = %reply, "replied");
                        } else {
                            debug!(reply = %reply, "reply suppressed (anonymous account)");
                        }
                    }
                }
                None => return Ok(()),
            },
            Some(field) = reset_rx.recv() => {
                mutator.apply_reset(field);
            }
        }
    }
}
