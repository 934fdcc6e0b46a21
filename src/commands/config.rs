//! Config command - read and write settings

use crate::{TagtreeError, cli::ConfigCommands, config::TagtreeConfig};

type Result<T> = std::result::Result<T, TagtreeError>;

/// Execute the config command
///
/// # Errors
/// Returns an error for a malformed setting, an unknown key, or a config file
/// that cannot be written
pub fn execute(mut config: TagtreeConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting)?;
            config.set(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {value}");
            }
        }
        ConfigCommands::Get { key } => {
            let value = config.get(key).ok_or_else(|| {
                TagtreeError::InvalidInput(format!(
                    "Unknown configuration key: '{key}'. Available keys: {}",
                    crate::config::KEYS.join(", ")
                ))
            })?;
            println!("{value}");
        }
    }
    Ok(())
}

/// Split `key=value`, trimming both sides
///
/// # Errors
/// Returns `TagtreeError::InvalidInput` when there is no `=`
pub fn parse_setting(setting: &str) -> Result<(&str, &str)> {
    setting
        .split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .ok_or_else(|| {
            TagtreeError::InvalidInput("Invalid format. Use: tagtree config set key=value".into())
        })
}
