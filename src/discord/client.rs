//! Discord bot client abstraction.
//!
//! Provides a high-level interface for creating and running the Discord bot,
//! hiding serenity implementation details from the rest of the application.
//! Gateway callbacks only forward events; a single task processes them in
//! arrival order.

use std::sync::Arc;
use std::time::Duration;

use serenity::async_trait;
use serenity::http::HttpBuilder;
use serenity::model::channel::Message;
use serenity::model::event::MessageUpdateEvent;
use serenity::model::gateway::Ready;
use serenity::model::guild::{Guild, UnavailableGuild};
use serenity::prelude::*;
use serenity::Client;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::bot::Bot;
use crate::discord::handler::BotHandler;

/// Gateway events the bot reacts to.
pub enum DiscordBotEvent {
    /// Bot connected and ready.
    Ready(Ready),
    /// Guild data received, either at startup or on joining.
    GuildCreate {
        context: Context,
        guild: Guild,
        is_new: Option<bool>,
    },
    /// Removed from a guild, or the guild went unavailable.
    GuildDelete {
        context: Context,
        incomplete: UnavailableGuild,
        full: Option<Guild>,
    },
    /// Message received.
    Message { context: Context, message: Message },
    /// Message edited.
    MessageUpdate {
        context: Context,
        new: Option<Message>,
        event: MessageUpdateEvent,
    },
}

struct DiscordBotEvents {
    discord_events_tx: mpsc::UnboundedSender<DiscordBotEvent>,
}

impl DiscordBotEvents {
    fn new(discord_events_tx: mpsc::UnboundedSender<DiscordBotEvent>) -> Self {
        Self { discord_events_tx }
    }

    fn forward(&self, event: DiscordBotEvent) {
        if let Err(error) = self.discord_events_tx.send(event) {
            warn!("Failed to process discord event: {}", error);
        }
    }
}

#[async_trait]
impl EventHandler for DiscordBotEvents {
    async fn ready(&self, _context: Context, ready: Ready) {
        self.forward(DiscordBotEvent::Ready(ready));
    }

    async fn guild_create(&self, context: Context, guild: Guild, is_new: Option<bool>) {
        self.forward(DiscordBotEvent::GuildCreate {
            context,
            guild,
            is_new,
        });
    }

    async fn guild_delete(&self, context: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        self.forward(DiscordBotEvent::GuildDelete {
            context,
            incomplete,
            full,
        });
    }

    async fn message(&self, context: Context, message: Message) {
        self.forward(DiscordBotEvent::Message { context, message });
    }

    async fn message_update(
        &self,
        context: Context,
        _old_if_available: Option<Message>,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        self.forward(DiscordBotEvent::MessageUpdate {
            context,
            new,
            event,
        });
    }
}

/// Builder for creating the Discord bot.
pub struct DiscordBotBuilder {
    token: String,
    bot: Arc<Bot>,
}

impl DiscordBotBuilder {
    /// Create a new Discord bot builder.
    pub fn new(token: String, bot: Arc<Bot>) -> Self {
        Self { token, bot }
    }

    /// Build the Discord bot.
    pub async fn build(self) -> anyhow::Result<DiscordBot> {
        let (discord_events_tx, discord_events_rx) = mpsc::unbounded_channel::<DiscordBotEvent>();

        let client = build_client(&self.token, discord_events_tx).await?;

        Ok(DiscordBot {
            client,
            handler: BotHandler::new(self.bot),
            discord_events_rx,
        })
    }
}

async fn build_client(
    token: &str,
    discord_events_tx: mpsc::UnboundedSender<DiscordBotEvent>,
) -> anyhow::Result<Client> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    // Build a custom reqwest client with timeout settings
    let reqwest_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    // Build the Serenity HTTP client with our custom reqwest client
    let http = HttpBuilder::new(token).client(reqwest_client).build();

    let events = DiscordBotEvents::new(discord_events_tx);
    let client = serenity::client::ClientBuilder::new_with_http(http, intents)
        .event_handler(events)
        .await?;
    Ok(client)
}

pub struct DiscordBot {
    client: Client,
    handler: BotHandler,
    discord_events_rx: mpsc::UnboundedReceiver<DiscordBotEvent>,
}

impl DiscordBot {
    /// Run until the gateway connection ends or `shutdown_rx` flips to true.
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        let shard_manager = self.client.shard_manager.clone();
        let client = &mut self.client;
        let discord_events_rx = &mut self.discord_events_rx;
        let handler = &self.handler;

        tokio::select! {
            _ = Self::run_connection(client) => {},
            _ = Self::process_events(discord_events_rx, handler) => {},
            _ = async {
                // Wait for shutdown signal
                loop {
                    if shutdown_rx.changed().await.is_err() {
                        // Sender gone: nothing will ever ask us to stop
                        std::future::pending::<()>().await;
                    }
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
                info!("Initiating graceful Discord shutdown...");
                shard_manager.shutdown_all().await;
                info!("Discord shutdown complete");
            } => {}
        }
        info!("Discord task ended");
    }

    async fn run_connection(client: &mut Client) {
        info!("Connecting to Discord...");

        // Serenity reconnects shards on its own; an error here is final.
        match client.start().await {
            Ok(()) => info!("Discord client disconnected normally"),
            Err(e) => error!("Discord client error: {}", e),
        }
    }

    async fn process_events(
        discord_events_rx: &mut mpsc::UnboundedReceiver<DiscordBotEvent>,
        handler: &BotHandler,
    ) {
        while let Some(event) = discord_events_rx.recv().await {
            match event {
                DiscordBotEvent::Ready(ready) => handler.handle_ready(ready).await,
                DiscordBotEvent::GuildCreate {
                    context,
                    guild,
                    is_new,
                } => handler.handle_guild_create(&context, guild, is_new).await,
                DiscordBotEvent::GuildDelete {
                    context,
                    incomplete,
                    full,
                } => handler.handle_guild_delete(&context, incomplete, full).await,
                DiscordBotEvent::Message { context, message } => {
                    handler.handle_message(&context, message).await
                }
                DiscordBotEvent::MessageUpdate {
                    context,
                    new,
                    event,
                } => handler.handle_message_update(&context, new, event).await,
            }
        }
        debug!("Discord events channel closed.");
    }
}
