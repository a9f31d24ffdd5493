//! Renders a validated snapshot into the Discord message body.
//!
//! Rendering is pure: the same snapshot and options always produce byte-identical text,
//! which is what lets the publisher edit the message in place on every refresh.

use super::snapshot::{Snapshot, first_present};
use crate::constants::{DEFAULT_DISPLAY_LIMIT, DEFAULT_TITLE};
use serde_json::Value;

const NAME_KEYS: &[&str] = &["username", "nickname"];
const WAGERED_KEYS: &[&str] = &["totalWagered", "wagered", "amount"];
const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub title: String,
    pub limit: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            limit: DEFAULT_DISPLAY_LIMIT,
        }
    }
}

/// One displayable row, resolved from a raw entrant record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrant {
    pub rank: u64,
    pub name: String,
    pub wagered: String,
}

impl Entrant {
    /// `position` is the 1-based slot in the source list, used when the record has no rank.
    pub fn from_value(value: &Value, position: u64) -> Self {
        let rank = value.get("position").and_then(as_rank).unwrap_or(position);
        let name = first_present(value, NAME_KEYS)
            .map(literal_text)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let wagered = first_present(value, WAGERED_KEYS)
            .map(format_wagered)
            .unwrap_or_else(|| format_usd(0.0));
        Self {
            rank,
            name,
            wagered,
        }
    }
}

fn as_rank(value: &Value) -> Option<u64> {
    let rank = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    rank.filter(|r| *r > 0)
}

pub fn render(snapshot: &Snapshot, options: &RenderOptions) -> String {
    let entrants = snapshot.entrants();
    let prizes = snapshot.prize_table();

    let mut lines = vec![format!("**{}** 🔁 (auto-updates)", options.title)];

    if entrants.is_empty() {
        lines.push("_No entries found_".to_string());
        return lines.join("\n");
    }

    for (position, raw) in (1..).zip(entrants.iter().take(options.limit)) {
        let entrant = Entrant::from_value(raw, position);
        let prize = prize_suffix(prizes, entrant.rank).unwrap_or_default();
        lines.push(format!(
            "**{}. {}** — wagered: {}{}",
            entrant.rank, entrant.name, entrant.wagered, prize
        ));
    }

    lines.join("\n")
}

/// Suffix for `rank` when the prize table covers it.
pub fn prize_suffix(prizes: &[Value], rank: u64) -> Option<String> {
    let index = usize::try_from(rank.checked_sub(1)?).ok()?;
    let amount = prizes.get(index)?;
    Some(format!(" — prize: USD ${}", literal_text(amount)))
}

/// Currency text when the value parses as a finite number, otherwise its literal text.
pub fn format_wagered(value: &Value) -> String {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed.filter(|amount| amount.is_finite()) {
        Some(amount) => format_usd(amount),
        None => literal_text(value),
    }
}

/// `USD $1,234.56`: thousands separators, two decimals.
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("USD ${sign}{grouped}.{fraction}")
}

fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
