//! Remote leaderboard pipeline stages: fetch, validate, format.

pub mod fetch;
pub mod format;
pub mod snapshot;
pub mod validate;

pub use fetch::{FetchError, LeaderboardSource, TrpcClient};
pub use format::{RenderOptions, render};
pub use snapshot::{LeaderboardIdentity, LeaderboardQuery, Snapshot};
pub use validate::ValidationError;
