//! Leaderboard service: one refresh runs fetch → validate → render → publish.
//! The periodic and manual entry points share it but report failures differently.

use super::publisher::{PublishError, PublishOutcome, Publisher};
use crate::chat::ChatChannel;
use crate::leaderboard::{
    FetchError, LeaderboardIdentity, LeaderboardQuery, LeaderboardSource, RenderOptions,
    ValidationError, render, validate,
};
use serenity::model::id::ChannelId;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct RefreshSettings {
    pub identity: LeaderboardIdentity,
    pub query: LeaderboardQuery,
    pub min_entrants: usize,
    pub render: RenderOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// What a periodic tick ended with. The tick itself never fails.
#[derive(Debug)]
pub enum TickReport {
    Published(PublishOutcome),
    ChannelUnavailable,
    Skipped(ValidationError),
    FetchFailed(FetchError),
    PublishFailed(PublishError),
}

pub struct LeaderboardService {
    source: Arc<dyn LeaderboardSource>,
    chat: Arc<dyn ChatChannel>,
    publisher: Publisher,
    settings: RefreshSettings,
}

impl LeaderboardService {
    pub fn new(
        source: Arc<dyn LeaderboardSource>,
        chat: Arc<dyn ChatChannel>,
        destination: ChannelId,
        settings: RefreshSettings,
    ) -> Self {
        Self {
            source,
            publisher: Publisher::new(chat.clone(), destination),
            chat,
            settings,
        }
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Run the full pipeline once. Any stage failing short-circuits.
    #[instrument(level = "debug", skip(self), fields(destination = %self.publisher.destination()))]
    pub async fn refresh(&self) -> Result<PublishOutcome, RefreshError> {
        let snapshot = self.source.fetch(&self.settings.query).await?;
        debug!(target = "leaderboard.fetch", raw = %snapshot.raw(), "fetched leaderboard");

        validate::check(
            &snapshot,
            &self.settings.identity,
            self.settings.min_entrants,
        )?;

        let text = render(&snapshot, &self.settings.render);
        Ok(self.publisher.publish(&text).await?)
    }

    /// On-demand refresh. Every failure, validation included, goes back to the caller.
    pub async fn run_manual(&self) -> Result<PublishOutcome, RefreshError> {
        let result = self.refresh().await;
        match &result {
            Ok(outcome) => {
                info!(target = "leaderboard.manual", outcome = ?outcome, "manual refresh published")
            }
            Err(e) => warn!(target = "leaderboard.manual", error = %e, "manual refresh failed"),
        }
        result
    }

    /// Scheduled refresh. Fetch failures become a best-effort warning in the destination;
    /// validation and publish failures only hit the logs.
    pub async fn run_periodic_tick(&self) -> TickReport {
        let destination = self.publisher.destination();
        if !self.chat.channel_exists(destination).await {
            warn!(target = "leaderboard.tick", channel = %destination, "destination channel unavailable; skipping tick");
            return TickReport::ChannelUnavailable;
        }

        match self.refresh().await {
            Ok(outcome) => TickReport::Published(outcome),
            Err(RefreshError::Validation(reason)) => {
                warn!(target = "leaderboard.tick", reason = %reason, "skipped leaderboard update");
                TickReport::Skipped(reason)
            }
            Err(RefreshError::Fetch(e)) => {
                warn!(target = "leaderboard.tick", error = %e, "leaderboard fetch failed");
                let notice = format!("⚠️ Leaderboard update failed: `{e}`");
                if let Err(send_err) = self.chat.send_message(destination, &notice).await {
                    warn!(target = "leaderboard.tick", error = %send_err, "could not post failure warning");
                }
                TickReport::FetchFailed(e)
            }
            Err(RefreshError::Publish(e)) => {
                error!(target = "leaderboard.tick", error = %e, "leaderboard publish failed");
                TickReport::PublishFailed(e)
            }
        }
    }
}
