//! Rainbot - Discord helper bot
//!
//! Answers help/info/invite requests, lists its commands, and hands out
//! self-assignable color roles.

mod bot;
mod cli;
mod common;
mod config;
mod discord;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use bot::Bot;
use cli::Cli;
use config::load_and_validate;
use discord::DiscordBotBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    info!("Rainbot v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = cli.config_path();
    let mut config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} is properly formatted.", config_path);
        e
    })?;
    cli.apply_overrides(&mut config);

    info!("Configuration loaded successfully");
    info!("  Trigger: {}", config.addressing.trigger);
    info!("  Commands: {}", config.commands.len());
    info!("  Color roles: {}", config.color_roles.len());

    let bot = Arc::new(Bot::new(&config)?);

    let Some(token) = cli.resolve_token() else {
        error!("Please supply the login token!");
        return Ok(());
    };

    let discord_bot = DiscordBotBuilder::new(token, bot).build().await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut discord_task = tokio::spawn(discord_bot.run(shutdown_rx));

    let shutdown = tokio::select! {
        biased;
        _ = shutdown_signal() => {
            info!("Shutdown signal received - disconnecting...");
            true
        }
        _ = &mut discord_task => false,
    };

    if shutdown {
        if let Err(e) = shutdown_tx.send(true) {
            debug!("Shutdown channel closed (Discord task already exited): {}", e);
        }
        let timeout = tokio::time::Duration::from_secs(5);
        match tokio::time::timeout(timeout, discord_task).await {
            Ok(Ok(())) => info!("Discord client shut down gracefully"),
            Ok(Err(e)) => warn!("Discord task panicked: {}", e),
            Err(_) => warn!("Discord shutdown timed out"),
        }
    }

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
