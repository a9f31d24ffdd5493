//! Implements the run logic for the `/setlb` and `!setlb` commands.

use super::ui::{failure_notice, success_notice};
use crate::AppState;
use serenity::builder::{
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse,
};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;
use tracing::warn;

pub fn register() -> CreateCommand {
    CreateCommand::new("setlb").description("Refresh the leaderboard message now.")
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(
                CreateInteractionResponseMessage::new().ephemeral(true),
            ),
        )
        .await
        .ok();

    let Some(app_state) = AppState::from_ctx(ctx).await else {
        warn!(command = "setlb", "missing_app_state");
        return;
    };

    let content = match app_state.leaderboard.run_manual().await {
        Ok(outcome) => success_notice(&outcome),
        Err(e) => failure_notice(&e),
    };

    if let Err(e) = interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await
    {
        tracing::error!(target = "ui.edit", command = "setlb", error = ?e, "edit_response failed");
    }
}

pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let Some(app_state) = AppState::from_ctx(ctx).await else {
        warn!(command = "setlb", "missing_app_state");
        return;
    };

    match app_state.leaderboard.run_manual().await {
        Ok(_) => {
            msg.react(&ctx.http, '✅').await.ok();
        }
        Err(e) => {
            msg.reply(&ctx.http, failure_notice(&e)).await.ok();
        }
    }
}
