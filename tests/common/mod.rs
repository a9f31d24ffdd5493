// Shared fakes for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use leaderboard_bot::chat::{ChatChannel, ChatError};
use leaderboard_bot::leaderboard::{
    FetchError, LeaderboardIdentity, LeaderboardQuery, LeaderboardSource, RenderOptions, Snapshot,
};
use leaderboard_bot::services::RefreshSettings;
use serde_json::{Value, json};
use serenity::model::id::{ChannelId, MessageId};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

pub const DESTINATION: u64 = 1433997173258715166;

pub fn destination() -> ChannelId {
    ChannelId::new(DESTINATION)
}

pub fn settings() -> RefreshSettings {
    RefreshSettings {
        identity: LeaderboardIdentity {
            uid: "1565-GC91E-MKCX".into(),
            name: "3dhaxxCpu".into(),
        },
        query: LeaderboardQuery {
            leaderboard_uid: "1565-GC91E-MKCX".into(),
            client_uid: "154T-BFD91-4B8S".into(),
        },
        min_entrants: 2,
        render: RenderOptions::default(),
    }
}

/// A payload shaped like the live API's `result.data`.
pub fn board(name: &str, users: usize) -> Value {
    let users: Vec<Value> = (1..=users)
        .map(|i| json!({"position": i, "username": format!("player{i}"), "totalWagered": 1000 * i}))
        .collect();
    json!({"json": {"name": name, "config": {"prizeSimple": [250, 150]}, "users": users}})
}

#[derive(Default)]
pub struct FakeChat {
    next_id: AtomicU64,
    messages: Mutex<HashMap<MessageId, String>>,
    sent: Mutex<Vec<String>>,
    edits: AtomicUsize,
    /// When set, edits fail with this non-NotFound error.
    edit_failure: Mutex<Option<String>>,
    channel_missing: AtomicBool,
}

impl FakeChat {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(100),
            ..Default::default()
        }
    }

    /// Simulate someone deleting the message in Discord.
    pub fn delete(&self, id: MessageId) {
        self.messages.lock().unwrap().remove(&id);
    }

    pub fn content(&self, id: MessageId) -> Option<String> {
        self.messages.lock().unwrap().get(&id).cloned()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn edit_count(&self) -> usize {
        self.edits.load(Ordering::SeqCst)
    }

    pub fn live_messages(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn fail_edits_with(&self, reason: &str) {
        *self.edit_failure.lock().unwrap() = Some(reason.to_string());
    }

    pub fn set_channel_missing(&self, missing: bool) {
        self.channel_missing.store(missing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChatChannel for FakeChat {
    async fn send_message(&self, _channel: ChannelId, text: &str) -> Result<MessageId, ChatError> {
        // Give a racing caller the chance to run mid-send.
        tokio::task::yield_now().await;
        let id = MessageId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.messages.lock().unwrap().insert(id, text.to_string());
        self.sent.lock().unwrap().push(text.to_string());
        Ok(id)
    }

    async fn edit_message(
        &self,
        _channel: ChannelId,
        message: MessageId,
        text: &str,
    ) -> Result<(), ChatError> {
        tokio::task::yield_now().await;
        if let Some(reason) = self.edit_failure.lock().unwrap().clone() {
            return Err(ChatError::Other(reason));
        }
        let mut messages = self.messages.lock().unwrap();
        match messages.get_mut(&message) {
            Some(body) => {
                *body = text.to_string();
                self.edits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            None => Err(ChatError::NotFound),
        }
    }

    async fn fetch_message(&self, _channel: ChannelId, message: MessageId) -> Result<(), ChatError> {
        if self.messages.lock().unwrap().contains_key(&message) {
            Ok(())
        } else {
            Err(ChatError::NotFound)
        }
    }

    async fn channel_exists(&self, _channel: ChannelId) -> bool {
        !self.channel_missing.load(Ordering::SeqCst)
    }
}

pub enum Reply {
    Data(Value),
    Network(String),
    Protocol(String),
}

/// Source that serves whatever reply is currently loaded.
pub struct FakeSource {
    reply: Mutex<Reply>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_data(data: Value) -> Self {
        Self::new(Reply::Data(data))
    }

    pub fn set(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeaderboardSource for FakeSource {
    async fn fetch(&self, _query: &LeaderboardQuery) -> Result<Snapshot, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.reply.lock().unwrap() {
            Reply::Data(data) => Ok(Snapshot::new(data.clone())),
            Reply::Network(reason) => Err(FetchError::Network(reason.clone())),
            Reply::Protocol(body) => Err(FetchError::Protocol { body: body.clone() }),
        }
    }
}
