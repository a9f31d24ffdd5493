use leaderboard_bot::leaderboard::fetch::normalize_envelope;
use leaderboard_bot::leaderboard::{RenderOptions, Snapshot, render};
use serde_json::{Value, json};

fn entrants(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| json!({"username": format!("p{i:02}"), "wagered": i * 10}))
        .collect()
}

fn entrant_lines(text: &str) -> Vec<&str> {
    text.lines().skip(1).collect()
}

#[test]
fn rendering_is_deterministic() {
    let snapshot = Snapshot::new(json!({"json": {
        "name": "3dhaxxCpu",
        "config": {"prizeSimple": [250, 150, 75.5]},
        "users": entrants(12)
    }}));
    let options = RenderOptions::default();
    let first = render(&snapshot, &options);
    for _ in 0..5 {
        assert_eq!(render(&snapshot.clone(), &options), first);
    }
}

#[test]
fn output_is_truncated_to_limit_in_source_order() {
    // Deliberately not sorted by wager: order must follow the source list.
    let mut users = entrants(15);
    users.reverse();
    let snapshot = Snapshot::new(json!({"users": users}));
    let text = render(&snapshot, &RenderOptions::default());

    let lines = entrant_lines(&text);
    assert_eq!(lines.len(), 10);
    for (i, line) in lines.iter().enumerate() {
        let expected_name = format!("p{:02}", 15 - i);
        assert!(
            line.starts_with(&format!("**{}. {expected_name}**", i + 1)),
            "line {i}: {line}"
        );
    }
}

#[test]
fn custom_limit_and_title() {
    let snapshot = Snapshot::new(json!({"users": entrants(5)}));
    let options = RenderOptions {
        title: "Weekly Race".into(),
        limit: 2,
    };
    let text = render(&snapshot, &options);
    assert!(text.starts_with("**Weekly Race** 🔁 (auto-updates)\n"));
    assert_eq!(entrant_lines(&text).len(), 2);
}

#[test]
fn prize_suffix_respects_table_bounds() {
    let snapshot = Snapshot::new(json!({
        "config": {"prizeSimple": [250, 150]},
        "users": [
            {"position": 1, "username": "first"},
            {"position": 3, "username": "third"}
        ]
    }));
    let text = render(&snapshot, &RenderOptions::default());
    let lines = entrant_lines(&text);
    assert_eq!(lines[0], "**1. first** — wagered: USD $0.00 — prize: USD $250");
    assert_eq!(lines[1], "**3. third** — wagered: USD $0.00");
}

#[test]
fn missing_wager_renders_zero_currency() {
    let snapshot = Snapshot::new(json!({"users": [{"username": "quiet"}]}));
    let text = render(&snapshot, &RenderOptions::default());
    assert!(text.ends_with("**1. quiet** — wagered: USD $0.00"));
}

#[test]
fn both_envelopes_render_identically() {
    let data = json!({"json": {
        "name": "3dhaxxCpu",
        "config": {"prizeSimple": [250, 150]},
        "users": entrants(3)
    }});
    let from_object = normalize_envelope(json!({"result": {"data": data.clone()}})).expect("object");
    let from_array = normalize_envelope(json!([{"result": {"data": data}}])).expect("array");

    let options = RenderOptions::default();
    assert_eq!(render(&from_object, &options), render(&from_array, &options));
}

#[test]
fn no_entrant_list_renders_placeholder() {
    let text = render(&Snapshot::new(json!({"name": "x"})), &RenderOptions::default());
    assert_eq!(text.lines().last(), Some("_No entries found_"));
}
