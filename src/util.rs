//! Misc small utilities shared across modules.

/// Cut `text` down to at most `max_chars` characters, marking the cut with an ellipsis.
/// Works on char boundaries so multi-byte payloads never panic.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
