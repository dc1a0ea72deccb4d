//! Message delivery to a destination channel.

use crate::error::{BotError, Result};
use async_trait::async_trait;
use tracing::debug;

/// Zero-width space prefixed to every message. Keeps the chat client from
/// visually merging consecutive bot posts.
pub const PAD: &str = "\u{200B}";

/// Delivers formatted text to a destination channel.
///
/// Delivery is fire-and-forget from the policy engine's perspective: a
/// selection that was persisted stays persisted even when the send fails,
/// and the caller logs the failure without crashing.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends `text` to the channel identified by `channel_id`.
    async fn send(&self, channel_id: &str, text: &str) -> Result<()>;
}

/// Discord REST messenger.
///
/// Posts through `POST /channels/{id}/messages` with bot-token
/// authorization. No gateway connection is held; delivery is plain HTTP.
pub struct DiscordMessenger {
    client: reqwest::Client,
    token: String,
    api_base: String,
}

impl DiscordMessenger {
    /// Production Discord API base URL.
    pub const DEFAULT_API_BASE: &'static str = "https://discord.com/api/v10";

    /// Creates a messenger against the production Discord API.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_base(token, Self::DEFAULT_API_BASE)
    }

    /// Creates a messenger against a custom API base URL (used by tests).
    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn send(&self, channel_id: &str, text: &str) -> Result<()> {
        let url = format!("{}/channels/{channel_id}/messages", self.api_base);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .json(&serde_json::json!({ "content": text }))
            .send()
            .await
            .map_err(|e| BotError::Delivery(format!("cannot reach Discord: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::Delivery(format!(
                "Discord returned {status} for channel {channel_id}"
            )));
        }

        debug!(channel = channel_id, "message delivered");
        Ok(())
    }
}
