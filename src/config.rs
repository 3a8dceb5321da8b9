use std::str::FromStr;

use crate::db::MAX_DEAL_ID_OFFSET;
use crate::utils::ConfigError;

const DEFAULT_PREFIX: &str = "$";
const DEFAULT_DEAL_ID_OFFSET: i64 = 1000;
const DEFAULT_COOLDOWN_SECONDS: u64 = 2;

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Prefix that marks a message as a command, e.g. `$create`
    pub command_prefix: String,
    /// Deal ids start right above this value
    pub deal_id_offset: i64,
    /// Per-user, per-command cooldown; 0 disables it
    pub cooldown_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let command_prefix = match lookup("COMMAND_PREFIX") {
            Some(prefix) if prefix.trim().is_empty() || prefix.contains(char::is_whitespace) => {
                return Err(ConfigError::Invalid {
                    key: "COMMAND_PREFIX",
                    value: prefix,
                })
            }
            Some(prefix) => prefix,
            None => DEFAULT_PREFIX.to_string(),
        };

        let deal_id_offset: i64 =
            parse_or_default(&lookup, "DEAL_ID_OFFSET", DEFAULT_DEAL_ID_OFFSET)?;
        if !(0..=MAX_DEAL_ID_OFFSET).contains(&deal_id_offset) {
            return Err(ConfigError::Invalid {
                key: "DEAL_ID_OFFSET",
                value: deal_id_offset.to_string(),
            });
        }

        let cooldown_seconds =
            parse_or_default(&lookup, "COMMAND_COOLDOWN_SECONDS", DEFAULT_COOLDOWN_SECONDS)?;

        Ok(Self {
            discord_token,
            command_prefix,
            deal_id_offset,
            cooldown_seconds,
        })
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
