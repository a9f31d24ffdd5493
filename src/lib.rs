// Library entry so integration tests and the binary share the same modules.
pub mod chat;
pub mod commands;
pub mod config;
pub mod constants;
pub mod handler;
pub mod leaderboard;
pub mod model;
pub mod services;
pub mod util;

pub use model::AppState;
