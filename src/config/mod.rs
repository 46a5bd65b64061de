//! Configuration parsing and types.

pub mod env;
pub mod parser;
pub mod types;
pub mod validate;

pub use parser::load_config_or_default;
pub use types::Config;

use crate::common::error::ConfigError;

/// Load the config (or the built-in default), apply environment overrides
/// and validate the result.
pub fn load_and_validate(path: &str) -> Result<Config, ConfigError> {
    let config = env::apply_env_overrides(load_config_or_default(path)?);
    validate::validate_config(&config)?;
    Ok(config)
}
