//! User-facing notices for the `setlb` command.

use crate::leaderboard::ValidationError;
use crate::services::{PublishOutcome, RefreshError};

pub fn success_notice(outcome: &PublishOutcome) -> String {
    match outcome {
        PublishOutcome::Created(id) => format!("✅ Leaderboard posted (message `{id}`)."),
        PublishOutcome::Edited(id) => format!("✅ Leaderboard updated (message `{id}`)."),
        PublishOutcome::Recreated { current, .. } => {
            format!("✅ Leaderboard message was missing, posted a new one (message `{current}`).")
        }
    }
}

pub fn failure_notice(error: &RefreshError) -> String {
    match error {
        RefreshError::Validation(ValidationError::WrongIdentity { .. }) => {
            "⚠️ Received data from a different leaderboard — update skipped.".to_string()
        }
        RefreshError::Validation(ValidationError::InsufficientEntrants { .. }) => {
            "⚠️ Leaderboard data incomplete — skipped this update.".to_string()
        }
        RefreshError::Fetch(e) => format!("⚠️ Leaderboard update failed: `{e}`"),
        RefreshError::Publish(e) => format!("⚠️ Could not publish the leaderboard: `{e}`"),
    }
}
