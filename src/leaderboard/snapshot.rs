//! Identity, query and snapshot types shared by the fetch/validate/format stages.
//!
//! The remote payload is loosely shaped: the same fact can live under several keys
//! depending on the deployment, and the whole body may sit under one `json` envelope.
//! Every accessor here goes through [`first_present`] so the lookup order is explicit.

use serde::Serialize;
use serde_json::Value;

/// Keys that may carry the entrant list, in priority order.
pub const ENTRANT_KEYS: &[&str] = &["users", "entries", "rankings"];
/// Keys under `config` that may carry the prize table, in priority order.
pub const PRIZE_KEYS: &[&str] = &["prizeSimple", "prizeTable"];
pub const NAME_KEYS: &[&str] = &["name", "title"];
pub const UID_KEYS: &[&str] = &["leaderboardUid", "uid"];

/// The leaderboard we expect the API to hand back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardIdentity {
    pub uid: String,
    pub name: String,
}

/// Request parameters sent to the ranking endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub leaderboard_uid: String,
    pub client_uid: String,
}

#[derive(Serialize)]
struct InputEnvelope<'a> {
    json: InputBody<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InputBody<'a> {
    leaderboard_uid: &'a str,
    filters: InputFilters<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InputFilters<'a> {
    client_uid: &'a str,
    sort_by: &'a str,
}

impl LeaderboardQuery {
    /// JSON text for the `input` query parameter.
    pub fn input_param(&self) -> String {
        let envelope = InputEnvelope {
            json: InputBody {
                leaderboard_uid: &self.leaderboard_uid,
                filters: InputFilters {
                    client_uid: &self.client_uid,
                    sort_by: "wagered",
                },
            },
        };
        // Serializing borrowed strings into JSON cannot fail.
        serde_json::to_string(&envelope).unwrap_or_default()
    }
}

/// A fetched leaderboard payload after the transport envelope has been removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(Value);

impl Snapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The payload exactly as extracted from the response.
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// The layer holding the actual fields: `json` is unwrapped one level when present.
    pub fn body(&self) -> &Value {
        match self.0.get("json") {
            Some(inner) if inner.is_object() => inner,
            _ => &self.0,
        }
    }

    pub fn name(&self) -> Option<&str> {
        first_text(self.body(), NAME_KEYS)
    }

    pub fn uid(&self) -> Option<&str> {
        first_text(self.body(), UID_KEYS)
    }

    /// Entrants in source order. Missing or empty lists yield an empty slice.
    pub fn entrants(&self) -> &[Value] {
        first_present(self.body(), ENTRANT_KEYS)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Prize amounts where index 0 belongs to rank 1.
    pub fn prize_table(&self) -> &[Value] {
        self.body()
            .get("config")
            .and_then(|config| first_present(config, PRIZE_KEYS))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Return the first value under `keys` that is present and non-empty.
///
/// `null`, `""`, `[]` and `{}` count as absent so the next candidate is tried.
/// Non-object inputs have no fields and always yield `None`.
pub fn first_present<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|candidate| is_present(candidate))
}

/// Like [`first_present`] but only accepts non-empty strings.
pub fn first_text<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .filter_map(Value::as_str)
        .find(|text| !text.is_empty())
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}
