//! Outbound request to the ranking API and response envelope normalization.

use super::snapshot::{LeaderboardQuery, Snapshot};
use crate::constants::{
    API_ACCEPT, API_USER_AGENT, DEFAULT_REFERER, FETCH_TIMEOUT_SECS, WARNING_BODY_PREVIEW_CHARS,
};
use crate::util::preview;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, REFERER};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure, timeout or non-success status.
    #[error("leaderboard request failed: {0}")]
    Network(String),
    /// The body matched neither known envelope. `body` holds the raw text.
    #[error("unexpected leaderboard response: {}", preview(.body, WARNING_BODY_PREVIEW_CHARS))]
    Protocol { body: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        let reason = if error.is_timeout() {
            format!("timed out: {error}")
        } else {
            error.to_string()
        };
        FetchError::Network(reason)
    }
}

/// Anything that can produce a leaderboard snapshot.
#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    async fn fetch(&self, query: &LeaderboardQuery) -> Result<Snapshot, FetchError>;
}

/// tRPC client for the public leaderboard endpoint.
#[derive(Debug, Clone)]
pub struct TrpcClient {
    http: reqwest::Client,
    endpoint: String,
    referer: String,
}

impl TrpcClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_options(
            endpoint,
            DEFAULT_REFERER,
            Duration::from_secs(FETCH_TIMEOUT_SECS),
        )
    }

    pub fn with_options(
        endpoint: impl Into<String>,
        referer: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(API_USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            referer: referer.into(),
        })
    }
}

#[async_trait]
impl LeaderboardSource for TrpcClient {
    #[instrument(level = "debug", skip(self), fields(leaderboard = %query.leaderboard_uid))]
    async fn fetch(&self, query: &LeaderboardQuery) -> Result<Snapshot, FetchError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("input", query.input_param())])
            .header(ACCEPT, API_ACCEPT)
            .header(REFERER, &self.referer)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "leaderboard API returned {status}"
            )));
        }

        let text = response.text().await?;
        debug!(target = "leaderboard.fetch", bytes = text.len(), body = %text, "response received");
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(body) => body,
            Err(error) => {
                debug!(target = "leaderboard.fetch", %error, "response is not JSON");
                return Err(FetchError::Protocol { body: text });
            }
        };
        normalize_envelope(body)
    }
}

/// Strip the tRPC envelope: either `{result: {data}}` or `[{result: {data}}, ...]`.
pub fn normalize_envelope(body: Value) -> Result<Snapshot, FetchError> {
    let data = match &body {
        Value::Object(_) => body.pointer("/result/data"),
        Value::Array(items) => items.first().and_then(|first| first.pointer("/result/data")),
        _ => None,
    };
    match data {
        Some(data) => Ok(Snapshot::new(data.clone())),
        None => Err(FetchError::Protocol {
            body: body.to_string(),
        }),
    }
}
