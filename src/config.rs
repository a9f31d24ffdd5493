//! Runtime configuration read from the environment (`.env` is loaded by `main`).

use crate::constants::*;
use crate::leaderboard::{LeaderboardIdentity, LeaderboardQuery, RenderOptions};
use crate::services::RefreshSettings;
use serenity::model::id::{ChannelId, GuildId};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("environment variable {key} has invalid value {value:?} (expected {expected})")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Clone)]
pub struct Settings {
    pub token: String,
    pub channel_id: ChannelId,
    /// When set, commands are registered and accepted only in this guild.
    pub guild_id: Option<GuildId>,
    pub identity: LeaderboardIdentity,
    pub client_uid: String,
    pub title: String,
    pub trpc_url: String,
    pub update_interval: Duration,
    pub min_entrants: usize,
    pub display_limit: usize,
    pub command_prefix: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .field("guild_id", &self.guild_id)
            .field("identity", &self.identity)
            .field("client_uid", &self.client_uid)
            .field("title", &self.title)
            .field("trpc_url", &self.trpc_url)
            .field("update_interval", &self.update_interval)
            .field("min_entrants", &self.min_entrants)
            .field("display_limit", &self.display_limit)
            .field("command_prefix", &self.command_prefix)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let text = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let token = get("DISCORD_TOKEN")
            .or_else(|| get("TOKEN"))
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let channel_id = positive::<u64>(get("CHANNEL_ID"), "CHANNEL_ID", DEFAULT_CHANNEL_ID)?;
        let guild_id = match get("GUILD_ID") {
            Some(raw) => Some(GuildId::new(positive::<u64>(Some(raw), "GUILD_ID", 1)?)),
            None => None,
        };
        let update_minutes =
            positive::<u64>(get("UPDATE_MINUTES"), "UPDATE_MINUTES", DEFAULT_UPDATE_MINUTES)?;
        let update_secs = update_minutes
            .checked_mul(60)
            .ok_or_else(|| ConfigError::Invalid {
                key: "UPDATE_MINUTES",
                value: update_minutes.to_string(),
                expected: "a number of minutes that fits in seconds",
            })?;
        let display_limit =
            positive::<usize>(get("DISPLAY_LIMIT"), "DISPLAY_LIMIT", DEFAULT_DISPLAY_LIMIT)?;
        let min_entrants = parse(get("MIN_ENTRANTS"), "MIN_ENTRANTS", DEFAULT_MIN_ENTRANTS)?;

        Ok(Self {
            token,
            channel_id: ChannelId::new(channel_id),
            guild_id,
            identity: LeaderboardIdentity {
                uid: text("LEADERBOARD_UID", DEFAULT_LEADERBOARD_UID),
                name: text("EXPECTED_LB_NAME", DEFAULT_EXPECTED_NAME),
            },
            client_uid: text("CLIENT_UID", DEFAULT_CLIENT_UID),
            title: text("LEADERBOARD_TITLE", DEFAULT_TITLE),
            trpc_url: text("TRPC_URL", DEFAULT_TRPC_URL),
            update_interval: Duration::from_secs(update_secs),
            min_entrants,
            display_limit,
            command_prefix: text("COMMAND_PREFIX", DEFAULT_PREFIX),
        })
    }

    pub fn refresh_settings(&self) -> RefreshSettings {
        RefreshSettings {
            identity: self.identity.clone(),
            query: LeaderboardQuery {
                leaderboard_uid: self.identity.uid.clone(),
                client_uid: self.client_uid.clone(),
            },
            min_entrants: self.min_entrants,
            render: RenderOptions {
                title: self.title.clone(),
                limit: self.display_limit,
            },
        }
    }
}

fn parse<T: FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            key,
            value,
            expected: "a non-negative integer",
        }),
    }
}

fn positive<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    let value = parse(raw, key, default)?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
            expected: "a positive integer",
        });
    }
    Ok(value)
}
