//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `RAINBOT_TOKEN` - Discord bot token (when not given on the command line)
//! - `RAINBOT_CONFIG` - Path of the config file
//! - `RAINBOT_TRIGGER` - Command prefix

use std::env;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "RAINBOT";

/// Apply environment variable overrides to a config.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(trigger) = env::var(format!("{}_TRIGGER", ENV_PREFIX)) {
        if !trigger.is_empty() {
            config.addressing.trigger = trigger;
        }
    }

    config
}

/// Get the login token from the environment, ignoring empty values.
pub fn get_env_token() -> Option<String> {
    env::var(format!("{}_TOKEN", ENV_PREFIX))
        .ok()
        .filter(|token| !token.trim().is_empty())
}

/// Get the config file path from environment or use default.
///
/// Checks `RAINBOT_CONFIG` environment variable, otherwise returns "rainbot.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "rainbot.conf".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_prefix() {
        assert_eq!(ENV_PREFIX, "RAINBOT");
    }

    #[test]
    fn test_get_config_path_default() {
        env::remove_var("RAINBOT_CONFIG");
        assert_eq!(get_config_path(), "rainbot.conf");
    }

    #[test]
    fn test_apply_env_overrides_no_vars() {
        env::remove_var("RAINBOT_TRIGGER");

        let result = apply_env_overrides(Config::default());
        assert_eq!(result.addressing.trigger, "-");
    }
}
