//! Shared state stored in serenity's `TypeMap` so handlers and commands can reach it.

use crate::services::LeaderboardService;
use serenity::prelude::TypeMapKey;
use std::sync::Arc;

/// The central, shared state of the bot.
pub struct AppState {
    /// Refresh pipeline shared by the scheduler and the manual command.
    pub leaderboard: Arc<LeaderboardService>,
}

impl AppState {
    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
