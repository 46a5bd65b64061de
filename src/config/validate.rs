//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use std::collections::HashSet;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    // Addressing
    if config.addressing.trigger.trim().is_empty() {
        errors.push("addressing.trigger must not be empty".to_string());
    }
    if config.addressing.enable_bot_channel_addressing && config.addressing.bot_channel.is_empty() {
        errors.push(
            "addressing.bot_channel is required when enable_bot_channel_addressing is on"
                .to_string(),
        );
    }

    // Outbound chunking
    if config.output.chunk_delimiter.is_empty() {
        errors.push("output.chunk_delimiter must not be empty".to_string());
    }
    if config.output.char_limit == 0 {
        errors.push("output.char_limit must be non-zero".to_string());
    }

    // Command table
    for (name, command) in &config.commands {
        if command.aliases.is_empty() {
            errors.push(format!("commands.{}.aliases is empty", name));
        }
        for (i, alias) in command.aliases.iter().enumerate() {
            if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                errors.push(format!(
                    "commands.{}.aliases[{}] '{}' must be a single non-empty word",
                    name, i, alias
                ));
            }
        }
    }

    // Color roles
    let mut seen = HashSet::new();
    for (i, role) in config.color_roles.iter().enumerate() {
        if role.trim().is_empty() {
            errors.push(format!("color_roles[{}] is empty", i));
        } else if !seen.insert(role.to_lowercase()) {
            errors.push(format!(
                "color_roles[{}] '{}' duplicates another color role (names are case-insensitive)",
                i, role
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}
