//! Configuration types for the bot.

use crate::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// IANA timezone name all schedules are evaluated in.
    pub timezone: String,
    /// Discord delivery settings.
    pub discord: DiscordConfig,
    /// Trigger times.
    pub schedule: ScheduleConfig,
    /// Problem pool settings.
    pub pool: PoolConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            timezone: "Africa/Cairo".to_owned(),
            discord: DiscordConfig::default(),
            schedule: ScheduleConfig::default(),
            pool: PoolConfig::default(),
        }
    }
}

/// Discord delivery configuration.
///
/// The bot token itself never lives in the config file; only the name of
/// the environment variable holding it does.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Destination channel ID.
    pub channel_id: String,
    /// Role ID mentioned in the daily reminder.
    pub role_id: String,
    /// Environment variable the bot token is read from.
    pub token_env: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            channel_id: String::new(),
            role_id: String::new(),
            token_env: "DISCORD_TOKEN".to_owned(),
        }
    }
}

/// Trigger-time configuration. All hours and minutes are local to the
/// configured timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Hour of the daily morning motivation post.
    pub morning_hour: u8,
    /// Minute of the daily morning motivation post.
    pub morning_min: u8,
    /// Hour of the daily reminder ping.
    pub reminder_hour: u8,
    /// Minute of the daily reminder ping.
    pub reminder_min: u8,
    /// Hour of the problem-drop flow.
    pub problem_hour: u8,
    /// Minute of the problem-drop flow.
    pub problem_min: u8,
    /// Cadence of the problem-drop flow in days.
    pub problem_interval_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            morning_hour: 10,
            morning_min: 0,
            reminder_hour: 15,
            reminder_min: 0,
            problem_hour: 10,
            problem_min: 5,
            problem_interval_days: 3,
        }
    }
}

/// Problem pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Path of the problems JSON file.
    pub path: PathBuf,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("problems.json"),
        }
    }
}

impl BotConfig {
    /// Loads configuration from a TOML file, falling back to defaults for
    /// missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BotError::Config(e.to_string()))
    }

    /// Saves configuration to a TOML file, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot
    /// be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| BotError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/nudge/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("nudge").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("nudge")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/nudge-config/config.toml")
        }
    }

    /// Parses the configured timezone.
    pub fn timezone(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse()
            .map_err(|_| BotError::Config(format!("unknown timezone: {}", self.timezone)))
    }

    /// Reads the bot token from the configured environment variable.
    pub fn token(&self) -> Result<String> {
        std::env::var(&self.discord.token_env)
            .map_err(|_| BotError::Config(format!("{} is not set", self.discord.token_env)))
    }
}
