//! Command line arguments.

use clap::Parser;

use crate::config::env::{get_config_path, get_env_token};
use crate::config::types::Config;

#[derive(Debug, Parser)]
#[command(name = "rainbot")]
#[command(version, about = "Discord helper bot with self-assignable color roles", long_about = None)]
pub struct Cli {
    /// Discord bot login token (falls back to RAINBOT_TOKEN)
    pub token: Option<String>,

    /// Config file path (falls back to RAINBOT_CONFIG, then rainbot.conf)
    #[arg(long)]
    pub config: Option<String>,

    /// Log every message seen, not just the ones addressed to the bot
    #[arg(long)]
    pub log_all_messages: bool,

    /// Mention the author when replying in a server
    #[arg(long)]
    pub reply_mention: bool,
}

impl Cli {
    pub fn config_path(&self) -> String {
        self.config.clone().unwrap_or_else(get_config_path)
    }

    /// Token from the command line, else the environment.
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .or_else(get_env_token)
    }

    /// Flags only ever switch settings on.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.log_all_messages {
            config.output.log_all_messages = true;
        }
        if self.reply_mention {
            config.output.reply_mention = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_token() {
        let cli = Cli::try_parse_from(["rainbot", "abc.def"]).unwrap();
        assert_eq!(cli.token.as_deref(), Some("abc.def"));
        assert_eq!(cli.resolve_token().as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["rainbot", "--frobnicate", "abc"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["rainbot", "--reply-mention", "--config", "bot.conf", "abc"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert!(config.output.reply_mention);
        assert!(!config.output.log_all_messages);
        assert_eq!(cli.config_path(), "bot.conf");
    }
}
