use std::sync::Arc;

use anyhow::Context as _;
use leaderboard_bot::AppState;
use leaderboard_bot::chat::SerenityChat;
use leaderboard_bot::config::Settings;
use leaderboard_bot::handler::Handler;
use leaderboard_bot::leaderboard::TrpcClient;
use leaderboard_bot::services::LeaderboardService;
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,serenity=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine when the variables come from the host environment.
    dotenv::dotenv().ok();
    init_tracing();

    let settings = Settings::from_env().context("invalid configuration")?;
    info!(target = "startup", settings = ?settings, "configuration loaded");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Prefix commands need message content; GUILDS lets slash interactions through.
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&settings.token, intents)
        .event_handler(Handler::new(
            settings.guild_id,
            settings.command_prefix.clone(),
            settings.update_interval,
            shutdown_rx,
        ))
        .await
        .context("error creating the Discord client")?;

    let source = Arc::new(TrpcClient::new(settings.trpc_url.clone())?);
    let chat = Arc::new(SerenityChat::new(client.http.clone()));
    let leaderboard = Arc::new(LeaderboardService::new(
        source,
        chat,
        settings.channel_id,
        settings.refresh_settings(),
    ));

    {
        let mut data = client.data.write().await;
        data.insert::<AppState>(Arc::new(AppState { leaderboard }));
    }

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!(target = "shutdown", "ctrl-c received; stopping");
                shutdown_tx.send(true).ok();
                shard_manager.shutdown_all().await;
            }
            Err(e) => {
                // Keep the sender alive; dropping it would stop the scheduler.
                warn!(target = "shutdown", error = %e, "cannot listen for ctrl-c");
                let _keep = shutdown_tx;
                std::future::pending::<()>().await;
            }
        }
    });

    client.start().await.context("Discord client error")?;
    Ok(())
}
