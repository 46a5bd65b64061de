//! Command registry: alias -> command lookup built once from config.

use std::collections::HashMap;
use std::str::FromStr;

use crate::common::error::RegistryError;
use crate::config::types::CommandConfig;

/// The commands the bot knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    InviteLink,
    Info,
    CommandListing,
    ColorRole,
    ColorRoleList,
}

impl CommandKind {
    /// Name used in the config's command table.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "request_help",
            Self::InviteLink => "request_invite_link",
            Self::Info => "request_info",
            Self::CommandListing => "request_command_listing",
            Self::ColorRole => "color_role",
            Self::ColorRoleList => "color_role_list",
        }
    }
}

impl FromStr for CommandKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "request_help" => Ok(Self::Help),
            "request_invite_link" => Ok(Self::InviteLink),
            "request_info" => Ok(Self::Info),
            "request_command_listing" => Ok(Self::CommandListing),
            "color_role" => Ok(Self::ColorRole),
            "color_role_list" => Ok(Self::ColorRoleList),
            _ => Err(RegistryError::UnknownCommand {
                name: s.to_string(),
            }),
        }
    }
}

/// A registered command as shown in the command listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub kind: CommandKind,
    pub aliases: Vec<String>,
    pub description: String,
}

/// Immutable alias table.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    by_alias: HashMap<String, CommandKind>,
    /// Sorted by command name.
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Build the registry from the config's command table.
    ///
    /// Fails if a command name is unknown or two commands share an alias.
    /// Aliases are matched case-insensitively.
    pub fn from_config<'a>(
        commands: impl IntoIterator<Item = (&'a String, &'a CommandConfig)>,
    ) -> Result<Self, RegistryError> {
        let mut by_alias: HashMap<String, CommandKind> = HashMap::new();
        let mut entries = Vec::new();

        for (name, command) in commands {
            let kind: CommandKind = name.parse()?;

            for alias in &command.aliases {
                let alias = alias.to_lowercase();
                match by_alias.get(&alias) {
                    Some(existing) if *existing != kind => {
                        return Err(RegistryError::AliasCollision {
                            alias,
                            first: existing.name().to_string(),
                            second: kind.name().to_string(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        by_alias.insert(alias, kind);
                    }
                }
            }

            entries.push(CommandEntry {
                kind,
                aliases: command.aliases.clone(),
                description: command.description.clone(),
            });
        }

        entries.sort_by_key(|entry| entry.kind.name());

        Ok(Self { by_alias, entries })
    }

    /// Look up a lower-cased command word.
    pub fn lookup(&self, key: &str) -> Option<CommandKind> {
        self.by_alias.get(key).copied()
    }

    /// Registered commands sorted by name.
    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;
    use std::collections::BTreeMap;

    fn table(entries: &[(&str, &[&str])]) -> BTreeMap<String, CommandConfig> {
        entries
            .iter()
            .map(|(name, aliases)| {
                (
                    name.to_string(),
                    CommandConfig {
                        aliases: aliases.iter().map(|a| a.to_string()).collect(),
                        description: format!("{} description", name),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_default_registry() {
        let config = Config::default();
        let registry = CommandRegistry::from_config(&config.commands).unwrap();

        assert_eq!(registry.lookup("help"), Some(CommandKind::Help));
        assert_eq!(registry.lookup("tutorial"), Some(CommandKind::Help));
        assert_eq!(registry.lookup("role"), Some(CommandKind::ColorRole));
        assert_eq!(registry.lookup("colorrolelist"), Some(CommandKind::ColorRoleList));
        assert_eq!(registry.lookup("nope"), None);
        assert_eq!(registry.entries().len(), 6);
    }

    #[test]
    fn test_entries_sorted_by_name() {
        let registry = CommandRegistry::from_config(&table(&[
            ("request_info", &["info"]),
            ("color_role", &["color"]),
            ("request_help", &["help"]),
        ]))
        .unwrap();

        let names: Vec<&str> = registry.entries().iter().map(|e| e.kind.name()).collect();
        assert_eq!(names, vec!["color_role", "request_help", "request_info"]);
    }

    #[test]
    fn test_alias_collision_rejected() {
        let result = CommandRegistry::from_config(&table(&[
            ("request_help", &["help", "info"]),
            ("request_info", &["info"]),
        ]));

        assert_eq!(
            result.unwrap_err(),
            RegistryError::AliasCollision {
                alias: "info".to_string(),
                first: "request_help".to_string(),
                second: "request_info".to_string(),
            }
        );
    }

    #[test]
    fn test_alias_collision_ignores_case() {
        let result = CommandRegistry::from_config(&table(&[
            ("request_help", &["Help"]),
            ("request_info", &["help"]),
        ]));
        assert!(matches!(result, Err(RegistryError::AliasCollision { .. })));
    }

    #[test]
    fn test_unknown_command_rejected() {
        let result = CommandRegistry::from_config(&table(&[("overwatch_news", &["news"])]));
        assert_eq!(
            result.unwrap_err(),
            RegistryError::UnknownCommand {
                name: "overwatch_news".to_string()
            }
        );
    }

    #[test]
    fn test_mixed_case_alias_is_lowered() {
        let registry = CommandRegistry::from_config(&table(&[("request_help", &["HeLp"])])).unwrap();
        assert_eq!(registry.lookup("help"), Some(CommandKind::Help));
    }
}
