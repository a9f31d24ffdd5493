use crate::services::Scheduler;
use crate::{AppState, commands};
use serenity::async_trait;
use serenity::client::Context;
use serenity::model::application::{Command as SlashCommand, Interaction};
use serenity::model::{channel::Message, gateway::Ready, id::GuildId};
use serenity::prelude::EventHandler;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn};

enum Command {
    SetLeaderboard,
    Unknown,
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "setlb" | "refreshlb" => Ok(Command::SetLeaderboard),
            _ => Ok(Command::Unknown),
        }
    }
}

pub struct Handler {
    /// Restrict commands to one guild; `None` accepts every guild and registers globally.
    pub allowed_guild_id: Option<GuildId>,
    pub prefix: String,
    pub update_interval: Duration,
    pub shutdown: watch::Receiver<bool>,
    scheduler_started: AtomicBool,
}

impl Handler {
    pub fn new(
        allowed_guild_id: Option<GuildId>,
        prefix: String,
        update_interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            allowed_guild_id,
            prefix,
            update_interval,
            shutdown,
            scheduler_started: AtomicBool::new(false),
        }
    }

    fn guild_allowed(&self, guild_id: Option<GuildId>) -> bool {
        match self.allowed_guild_id {
            Some(allowed) => guild_id == Some(allowed),
            None => true,
        }
    }

    /// Start the periodic refresh the first time the session is ready.
    /// Gateway reconnects emit `Ready` again; those must not spawn a second loop.
    async fn start_scheduler(&self, ctx: &Context) {
        if self.scheduler_started.swap(true, Ordering::SeqCst) {
            return;
        }
        let Some(app_state) = AppState::from_ctx(ctx).await else {
            error!(target = "handler.ready", "AppState missing; scheduler not started");
            self.scheduler_started.store(false, Ordering::SeqCst);
            return;
        };
        Scheduler::new(app_state.leaderboard.clone(), self.update_interval)
            .spawn(self.shutdown.clone());
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = &interaction {
            if !self.guild_allowed(command.guild_id) {
                return;
            }
            match command.data.name.as_str() {
                "setlb" => commands::setlb::run::run_slash(&ctx, command).await,
                _ => {}
            }
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if !self.guild_allowed(msg.guild_id) || msg.author.bot {
            return;
        }
        let Some(command_body) = msg.content.strip_prefix(self.prefix.as_str()) else {
            return;
        };
        let Some(command_str) = command_body.split_whitespace().next() else {
            return;
        };
        let command = Command::from_str(command_str).unwrap_or(Command::Unknown);
        match command {
            Command::SetLeaderboard => commands::setlb::run::run_prefix(&ctx, &msg).await,
            Command::Unknown => {}
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(target = "handler.ready", user = %ready.user.name, "connected and ready");
        let commands_to_register = vec![commands::setlb::run::register()];
        let registered = match self.allowed_guild_id {
            Some(guild) => guild
                .set_commands(&ctx.http, commands_to_register)
                .await
                .map(|_| ()),
            None => SlashCommand::set_global_commands(&ctx.http, commands_to_register)
                .await
                .map(|_| ()),
        };
        match registered {
            Ok(()) => info!(target = "handler.ready", "registered slash commands"),
            Err(e) => warn!(target = "handler.ready", error = ?e, "error registering slash commands"),
        }

        self.start_scheduler(&ctx).await;
    }
}
