//! Integration tests for the normalize -> metrics -> slides pipeline
//!
//! These tests use fixture files in `tests/fixtures/` to verify the
//! end-to-end flow over each recognized export shape.

use chrono::NaiveDate;
use solstice_core::analytics::SummerOptions;
use solstice_core::pipeline;
use solstice_core::types::Role;
use std::path::PathBuf;

/// Read a fixture file
fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).expect("fixture should exist")
}

// ============================================
// Full export shape
// ============================================

#[test]
fn test_full_export_end_to_end() {
    let out = pipeline::run(&fixture("full-export.json"), &SummerOptions::new(2030))
        .expect("pipeline should succeed");
    let m = &out.metrics;

    // year auto-selected from the June 2024 messages
    assert_eq!(m.year, 2024);
    assert_eq!(m.start_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(m.end_date, NaiveDate::from_ymd_opt(2024, 8, 31).unwrap());

    assert_eq!(m.total_prompts, 4);
    assert_eq!(m.total_responses, 3);
    assert_eq!(m.unique_days, 4);
    assert_eq!(m.longest_streak, 3);

    // June 10-12 all have one prompt; June 10 wins on the all-role count
    let busiest = m.busiest_day.as_ref().unwrap();
    assert_eq!(busiest.date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
    assert_eq!(busiest.prompts, 1);
    assert_eq!(busiest.total, 2);

    // topic distribution, descending with first-seen tie order
    let topics: Vec<(&str, u64)> = m.topics.iter().map(|t| (t.name.as_str(), t.value)).collect();
    assert_eq!(
        topics,
        vec![("General", 2), ("Coding/Debugging", 1), ("Writing/Comms", 1)]
    );

    let labels: Vec<&str> = m.week_buckets.iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["Week of 06-10", "Week of 06-17"]);
    assert_eq!(m.week_buckets[0].count, 3);

    let thread = m.longest_thread.as_ref().unwrap();
    assert_eq!(thread.id, "c-debug");
    assert_eq!(thread.title, "Debug marathon");
    assert_eq!(thread.turns, 5);

    assert_eq!(m.emotions.panic_count, 1);
    assert_eq!(m.emotions.lol_count, 1);
    let scores: Vec<i64> = m.emotions.daily_scores.iter().map(|d| d.score).collect();
    assert_eq!(scores, vec![0, -4, 3, 0]);

    // 12 + (5+2) + 5 + 8 across four days, none capped
    assert_eq!(m.time_saved_minutes, 32);

    assert_eq!(m.accomplishments.len(), 1);
    assert_eq!(
        m.accomplishments[0].date,
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    );

    assert!(m.keywords.iter().any(|k| k.name == "bug"));
    assert_eq!(
        m.persona.blurb,
        "You leaned General with a side of Coding/Debugging this summer."
    );
    assert!(!m.roast.is_empty());

    // slide deck carries all optional slides for this dataset
    let ids: Vec<&str> = out.slides.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "cover",
            "prompts",
            "active-days",
            "streak",
            "busiest",
            "topics-pie",
            "topics-list",
            "keywords-pie",
            "keywords-list",
            "weekly",
            "thread",
            "time-saved",
            "accomplishments",
            "mood",
            "persona",
            "roast",
            "outro"
        ]
    );
}

// ============================================
// Other shapes
// ============================================

#[test]
fn test_single_conversation_shape() {
    let raw: serde_json::Value =
        serde_json::from_str(&fixture("single-conversation.json")).unwrap();
    let normalized = solstice_core::normalize(&raw);

    assert_eq!(normalized.threads.len(), 1);
    let thread = &normalized.threads[0];
    assert_eq!(thread.id, "share-1");
    assert_eq!(thread.title, "Intern check-ins");
    assert_eq!(thread.messages.len(), 4);

    let roles: Vec<Role> = thread.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::User]);
    // every normalized message has a role and flattened text
    assert_eq!(thread.messages[1].text, "Use a line chart.");
    assert_eq!(thread.messages[2].text, "Thanks, the plot worked");
    assert_eq!(thread.messages[3].text, "Bare string message");
    assert!(thread.messages.iter().all(|m| m.created_at.is_some()));

    let metrics = solstice_core::analytics::compute_summer_metrics(
        &normalized.threads,
        &SummerOptions::new(2030),
    );
    assert_eq!(metrics.year, 2024);
    assert_eq!(metrics.total_prompts, 3);
    assert_eq!(metrics.longest_streak, 3);
}

#[test]
fn test_bare_array_shape() {
    let out = pipeline::run(&fixture("bare-array.json"), &SummerOptions::new(2030)).unwrap();

    assert_eq!(out.metrics.year, 2023);
    assert_eq!(out.metrics.total_prompts, 1);
    assert_eq!(out.metrics.unique_days, 1);
    assert_eq!(out.metrics.longest_streak, 1);
}

#[test]
fn test_bare_array_synthesizes_missing_fields() {
    let raw: serde_json::Value = serde_json::from_str(&fixture("bare-array.json")).unwrap();
    let normalized = solstice_core::normalize(&raw);

    assert_eq!(normalized.threads.len(), 2);
    assert_eq!(normalized.threads[0].id, "conv-1");
    assert_eq!(normalized.threads[0].title, "Conversation 1");
    assert_eq!(normalized.threads[1].id, "conv-2");
    assert_eq!(normalized.threads[1].title, "Empty one");
    assert!(normalized.threads[1].messages.is_empty());
}

#[test]
fn test_unrecognized_shape_yields_empty_state() {
    let out = pipeline::run(&fixture("unrecognized.json"), &SummerOptions::new(2026)).unwrap();

    assert!(out.metrics.is_empty_state());
    assert_eq!(out.metrics.year, 2026);
    assert_eq!(out.metrics.persona.blurb, "No summer data found.");
    // the deck still renders its unconditional slides
    let ids: Vec<&str> = out.slides.iter().map(|s| s.id.as_str()).collect();
    assert!(ids.contains(&"cover"));
    assert!(ids.contains(&"persona"));
    assert!(!ids.contains(&"busiest"));
}

// ============================================
// Canonical scenarios
// ============================================

#[test]
fn test_single_mapped_message_scenario() {
    let text = r#"{
        "conversations": [{
            "id": "c1",
            "title": "T",
            "mapping": {
                "n1": {
                    "message": {
                        "author": { "role": "user" },
                        "create_time": 1719878400,
                        "content": { "parts": ["hello"] }
                    }
                }
            }
        }]
    }"#;
    let out = pipeline::run(text, &SummerOptions::new(2030)).unwrap();
    let m = &out.metrics;

    assert_eq!(m.year, 2024);
    assert_eq!(m.total_prompts, 1);
    assert_eq!(m.unique_days, 1);
    assert_eq!(m.longest_streak, 1);
    assert_eq!(m.topics.len(), 1);
    assert_eq!(m.topics[0].name, "General");
}

#[test]
fn test_invalid_json_is_reported_as_hard_failure() {
    let err = pipeline::run("PK\u{3}\u{4}not-json", &SummerOptions::new(2024)).unwrap_err();
    assert!(matches!(err, solstice_core::Error::Json(_)));
}

#[test]
fn test_metrics_serialize_to_json() {
    let out = pipeline::run(&fixture("full-export.json"), &SummerOptions::new(2030)).unwrap();
    let value = serde_json::to_value(&out).unwrap();

    assert_eq!(value["metrics"]["year"], 2024);
    assert_eq!(value["metrics"]["start_date"], "2024-06-01");
    // slide kinds use the renderer's wire names
    assert_eq!(value["slides"][0]["type"], "full-cover");
}
