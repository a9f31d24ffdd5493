//! Guards applied to a fetched snapshot before it is trusted.

use super::snapshot::{LeaderboardIdentity, Snapshot};

/// Why a snapshot was rejected. Never fatal: the tick is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("received data from a different leaderboard (name: {found_name:?}, uid: {found_uid:?})")]
    WrongIdentity {
        found_name: Option<String>,
        found_uid: Option<String>,
    },
    #[error("leaderboard data incomplete ({found} entrants, need at least {minimum})")]
    InsufficientEntrants { found: usize, minimum: usize },
}

/// True when the payload names our leaderboard (case-insensitive) or carries our uid.
///
/// Either signal is enough because the API is inconsistent about which identity
/// field it fills in.
pub fn is_expected(snapshot: &Snapshot, identity: &LeaderboardIdentity) -> bool {
    let name_matches = snapshot
        .name()
        .is_some_and(|name| name.to_lowercase() == identity.name.to_lowercase());
    let uid_matches = snapshot.uid().is_some_and(|uid| uid == identity.uid);
    name_matches || uid_matches
}

pub fn has_enough_entrants(snapshot: &Snapshot, minimum: usize) -> bool {
    snapshot.entrants().len() >= minimum
}

/// Run both guards, identity first.
pub fn check(
    snapshot: &Snapshot,
    identity: &LeaderboardIdentity,
    minimum: usize,
) -> Result<(), ValidationError> {
    if !is_expected(snapshot, identity) {
        return Err(ValidationError::WrongIdentity {
            found_name: snapshot.name().map(str::to_string),
            found_uid: snapshot.uid().map(str::to_string),
        });
    }
    if !has_enough_entrants(snapshot, minimum) {
        return Err(ValidationError::InsufficientEntrants {
            found: snapshot.entrants().len(),
            minimum,
        });
    }
    Ok(())
}
