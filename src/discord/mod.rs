//! Discord bot integration.
//!
//! This module connects the bot core to the Discord gateway.

pub mod client;
pub mod handler;
pub mod platform;

// Re-export main types for external use
pub use client::DiscordBotBuilder;
