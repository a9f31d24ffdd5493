//! Fixed-interval driver for [`LeaderboardService::run_periodic_tick`].
//!
//! The first tick fires immediately, then one per interval. A tick always runs to
//! completion before the next is awaited, so ticks never overlap. Flipping the shutdown
//! channel to `true` (or dropping its sender) stops the loop, abandoning an in-flight tick.

use super::leaderboard::{LeaderboardService, TickReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

pub struct Scheduler {
    service: Arc<LeaderboardService>,
    period: Duration,
}

impl Scheduler {
    pub fn new(service: Arc<LeaderboardService>, period: Duration) -> Self {
        Self { service, period }
    }

    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(target = "leaderboard.scheduler", period_secs = self.period.as_secs(), "scheduler started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait_for(|stop| *stop) => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = shutdown.wait_for(|stop| *stop) => break,
                report = self.service.run_periodic_tick() => log_report(&report),
            }
        }

        info!(target = "leaderboard.scheduler", "scheduler stopped");
    }
}

fn log_report(report: &TickReport) {
    match report {
        TickReport::Published(outcome) => {
            debug!(target = "leaderboard.scheduler", outcome = ?outcome, "tick published")
        }
        other => debug!(target = "leaderboard.scheduler", report = ?other, "tick ended without publishing"),
    }
}
