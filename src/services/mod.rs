//! Service layer: publishing state and the refresh pipeline drivers.

pub mod leaderboard;
pub mod publisher;
pub mod scheduler;

pub use leaderboard::{LeaderboardService, RefreshError, RefreshSettings, TickReport};
pub use publisher::{PublishError, PublishOutcome, PublishState, Publisher};
pub use scheduler::Scheduler;
