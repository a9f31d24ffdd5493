//! The slice of Discord the leaderboard core needs, behind a trait so the
//! publisher and scheduler can run against a fake in tests.

use crate::constants::DISCORD_UNKNOWN_MESSAGE;
use async_trait::async_trait;
use serenity::builder::{CreateMessage, EditMessage};
use serenity::http::{Http, HttpError};
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// The message (or the channel holding it) no longer exists.
    #[error("message not found")]
    NotFound,
    #[error("chat request failed: {0}")]
    Other(String),
}

#[async_trait]
pub trait ChatChannel: Send + Sync {
    async fn send_message(&self, channel: ChannelId, text: &str) -> Result<MessageId, ChatError>;

    async fn edit_message(
        &self,
        channel: ChannelId,
        message: MessageId,
        text: &str,
    ) -> Result<(), ChatError>;

    /// Confirm a message still exists.
    async fn fetch_message(&self, channel: ChannelId, message: MessageId) -> Result<(), ChatError>;

    async fn channel_exists(&self, channel: ChannelId) -> bool;
}

/// [`ChatChannel`] over serenity's REST client.
#[derive(Clone)]
pub struct SerenityChat {
    http: Arc<Http>,
}

impl SerenityChat {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatChannel for SerenityChat {
    async fn send_message(&self, channel: ChannelId, text: &str) -> Result<MessageId, ChatError> {
        channel
            .send_message(&self.http, CreateMessage::new().content(text))
            .await
            .map(|message| message.id)
            .map_err(classify)
    }

    async fn edit_message(
        &self,
        channel: ChannelId,
        message: MessageId,
        text: &str,
    ) -> Result<(), ChatError> {
        channel
            .edit_message(&self.http, message, EditMessage::new().content(text))
            .await
            .map(|_| ())
            .map_err(classify)
    }

    async fn fetch_message(&self, channel: ChannelId, message: MessageId) -> Result<(), ChatError> {
        channel
            .message(&self.http, message)
            .await
            .map(|_| ())
            .map_err(classify)
    }

    async fn channel_exists(&self, channel: ChannelId) -> bool {
        match self.http.get_channel(channel).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(target = "chat.channel", channel = %channel, error = ?e, "channel lookup failed");
                false
            }
        }
    }
}

/// Map a serenity error onto the two outcomes the publisher distinguishes.
fn classify(error: serenity::Error) -> ChatError {
    if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &error
        && is_not_found(response.status_code.as_u16(), response.error.code)
    {
        return ChatError::NotFound;
    }
    ChatError::Other(error.to_string())
}

/// HTTP 404, or Discord's "Unknown Message" code on any status.
fn is_not_found(status: u16, code: isize) -> bool {
    status == 404 || code == DISCORD_UNKNOWN_MESSAGE
}
