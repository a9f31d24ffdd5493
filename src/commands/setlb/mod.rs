//! `setlb`: refresh the tracked leaderboard message on demand.

pub mod run;
pub mod ui;
