//! Error types for the application.

use serenity::model::id::{GuildId, RoleId, UserId};
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Command registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Chunking error: {0}")]
    Chunk(#[from] ChunkError),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Errors raised while building the command registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Alias '{alias}' is claimed by both '{first}' and '{second}'")]
    AliasCollision {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Unknown command '{name}' in command table")]
    UnknownCommand { name: String },
}

/// Errors produced while splitting outbound text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("Chunk delimiter must not be empty")]
    EmptyDelimiter,

    #[error("Chunk character limit must be non-zero")]
    ZeroLimit,

    #[error("Can't split message into small enough pieces: {{{fragment}}}")]
    Unsplittable { fragment: String },
}

/// Failure of a guild role add/remove.
#[derive(Debug, Error)]
pub enum RoleMutationError {
    #[error("Role '{name}' does not exist in guild {guild_id}")]
    RoleMissing { name: String, guild_id: GuildId },

    #[error("Failed to add role {role_id} to user {user_id}: {source}")]
    AddFailed {
        role_id: RoleId,
        user_id: UserId,
        #[source]
        source: PlatformError,
    },

    #[error("Failed to remove role {role_id} from user {user_id}: {source}")]
    RemoveFailed {
        role_id: RoleId,
        user_id: UserId,
        #[source]
        source: PlatformError,
    },

    #[error("Failed to look up roles in guild {guild_id}: {source}")]
    LookupFailed {
        guild_id: GuildId,
        #[source]
        source: PlatformError,
    },
}

/// Chat platform call errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Serenity error: {0}")]
    Serenity(#[from] serenity::Error),
}

/// Result type alias for platform calls.
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;
