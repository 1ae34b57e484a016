//! Accomplishment mining
//!
//! Scans user messages for achievement phrasing (shipping, merging,
//! fixing, offers, demos) and keeps a short most-recent-first list.

use crate::types::Message;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum entries kept.
pub const MAX_ACCOMPLISHMENTS: usize = 6;

/// Label length used both for display and as the dedup key.
const LABEL_CHARS: usize = 60;

/// Achievement phrasing, in fixed order. A message produces at most one
/// accomplishment regardless of how many patterns it matches.
static ACCOMPLISHMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bshipped\b|\bdeployed\b|\blaunched\b|\breleased\b",
        r"(?i)\bmerged\b|\blanded\b|pull request (got )?approved",
        r"(?i)\bfixed\b|\bresolved\b|\bsolved\b|finally works",
        r"(?i)\bapproved\b|\baccepted\b|signed off",
        r"(?i)got (the |an )?offer|offer letter|return offer",
        r"(?i)\bdemoed\b|\bpresented\b|demo went",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("accomplishment pattern must compile"))
    .collect()
});

/// One mined accomplishment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accomplishment {
    /// Truncated message text
    pub label: String,
    /// UTC day it happened
    pub date: NaiveDate,
}

/// Mine accomplishments from user messages.
///
/// Matches are deduplicated by label, ordered most-recent-first, and
/// capped at [`MAX_ACCOMPLISHMENTS`]. Messages without a timestamp are
/// skipped.
pub fn mine_accomplishments(messages: &[&Message]) -> Vec<Accomplishment> {
    let mut hits: Vec<(DateTime<Utc>, String)> = Vec::new();

    for message in messages {
        let Some(at) = message.created_at else {
            continue;
        };
        if ACCOMPLISHMENT_PATTERNS.iter().any(|rx| rx.is_match(&message.text)) {
            hits.push((at, label_for(&message.text)));
        }
    }

    hits.sort_by(|a, b| b.0.cmp(&a.0));

    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<Accomplishment> = Vec::new();
    for (at, label) in hits {
        if !seen.insert(label.clone()) {
            continue;
        }
        out.push(Accomplishment {
            label,
            date: at.date_naive(),
        });
        if out.len() == MAX_ACCOMPLISHMENTS {
            break;
        }
    }
    out
}

/// Collapse whitespace and truncate to the label length.
fn label_for(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(LABEL_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use chrono::NaiveDate;

    fn msg(day: u32, text: &str) -> Message {
        Message {
            role: Role::User,
            created_at: Some(
                NaiveDate::from_ymd_opt(2024, 8, day)
                    .unwrap()
                    .and_hms_opt(15, 0, 0)
                    .unwrap()
                    .and_utc(),
            ),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_mines_achievement_phrasing() {
        let a = msg(1, "finally merged the big refactor");
        let b = msg(2, "can you look at this stack trace");
        let refs: Vec<&Message> = vec![&a, &b];
        let out = mine_accomplishments(&refs);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, "finally merged the big refactor");
    }

    #[test]
    fn test_most_recent_first() {
        let a = msg(1, "shipped the login page");
        let b = msg(5, "got the offer!!");
        let refs: Vec<&Message> = vec![&a, &b];
        let out = mine_accomplishments(&refs);
        assert_eq!(out[0].date, NaiveDate::from_ymd_opt(2024, 8, 5).unwrap());
        assert_eq!(out[1].date, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
    }

    #[test]
    fn test_dedupes_by_label() {
        let a = msg(1, "fixed the flaky test");
        let b = msg(3, "fixed the flaky test");
        let refs: Vec<&Message> = vec![&a, &b];
        let out = mine_accomplishments(&refs);
        assert_eq!(out.len(), 1);
        // the most recent occurrence wins
        assert_eq!(out[0].date, NaiveDate::from_ymd_opt(2024, 8, 3).unwrap());
    }

    #[test]
    fn test_caps_at_six() {
        let messages: Vec<Message> = (1..=9)
            .map(|d| msg(d, &format!("shipped feature number {}", d)))
            .collect();
        let refs: Vec<&Message> = messages.iter().collect();
        assert_eq!(mine_accomplishments(&refs).len(), MAX_ACCOMPLISHMENTS);
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let text = format!("deployed {}", "x".repeat(100));
        let a = msg(7, &text);
        let refs: Vec<&Message> = vec![&a];
        let out = mine_accomplishments(&refs);
        assert_eq!(out[0].label.chars().count(), 60);
    }
}
