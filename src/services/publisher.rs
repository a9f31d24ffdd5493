//! Owns the one message that represents the leaderboard in its destination channel.
//!
//! The first publish creates the message; later publishes edit it in place. If the tracked
//! message was deleted out from under us, the next publish posts a replacement and tracks
//! that instead. The handle is process-local and starts empty on every run.
//!
//! The whole publish step runs under the handle's mutex, so a manual refresh racing the
//! periodic tick cannot create two messages or edit through a stale id.

use crate::chat::{ChatChannel, ChatError};
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Unpublished,
    Published(MessageId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Created(MessageId),
    Edited(MessageId),
    /// The tracked message was gone; a replacement was posted.
    Recreated {
        previous: MessageId,
        current: MessageId,
    },
}

impl PublishOutcome {
    /// Id of the message now holding the leaderboard.
    pub fn message_id(&self) -> MessageId {
        match *self {
            Self::Created(id) | Self::Edited(id) => id,
            Self::Recreated { current, .. } => current,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to post leaderboard message: {0}")]
    Send(#[source] ChatError),
    #[error("failed to edit leaderboard message {message}: {source}")]
    Edit {
        message: MessageId,
        #[source]
        source: ChatError,
    },
}

pub struct Publisher {
    chat: Arc<dyn ChatChannel>,
    destination: ChannelId,
    handle: Mutex<Option<MessageId>>,
}

impl Publisher {
    pub fn new(chat: Arc<dyn ChatChannel>, destination: ChannelId) -> Self {
        Self {
            chat,
            destination,
            handle: Mutex::new(None),
        }
    }

    pub fn destination(&self) -> ChannelId {
        self.destination
    }

    pub async fn state(&self) -> PublishState {
        match *self.handle.lock().await {
            Some(id) => PublishState::Published(id),
            None => PublishState::Unpublished,
        }
    }

    pub async fn publish(&self, text: &str) -> Result<PublishOutcome, PublishError> {
        let mut handle = self.handle.lock().await;

        let Some(previous) = *handle else {
            let id = self.create(text).await?;
            *handle = Some(id);
            info!(target = "leaderboard.publish", message_id = %id, "posted leaderboard message");
            return Ok(PublishOutcome::Created(id));
        };

        match self.update(previous, text).await {
            Ok(()) => Ok(PublishOutcome::Edited(previous)),
            Err(ChatError::NotFound) => {
                warn!(
                    target = "leaderboard.publish",
                    message_id = %previous,
                    "tracked message disappeared; posting a new one"
                );
                let current = self.create(text).await?;
                *handle = Some(current);
                Ok(PublishOutcome::Recreated { previous, current })
            }
            Err(source) => Err(PublishError::Edit {
                message: previous,
                source,
            }),
        }
    }

    async fn create(&self, text: &str) -> Result<MessageId, PublishError> {
        self.chat
            .send_message(self.destination, text)
            .await
            .map_err(PublishError::Send)
    }

    async fn update(&self, message: MessageId, text: &str) -> Result<(), ChatError> {
        self.chat.fetch_message(self.destination, message).await?;
        self.chat.edit_message(self.destination, message, text).await
    }
}
