//! Time-saved estimation
//!
//! A rough, deterministic estimate of minutes the assistant saved the
//! user. Per message: a base value from its best-matching topic, plus a
//! bonus for long prompts and for urgency phrasing. Contributions are
//! summed per calendar day and each day is capped before the days are
//! summed, so no single frantic day dominates the total.

use crate::analytics::topics::{classify, TOPIC_RULES};
use crate::nlp::lexicons::Lexicons;
use crate::nlp::tokenize::tokenize;
use crate::types::Message;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Ceiling applied to each day's contribution.
pub const DAILY_CAP_MINUTES: u64 = 60;

/// Prompts with more tokens than this get the long-message bonus.
const LONG_MESSAGE_TOKENS: usize = 40;
const LONG_MESSAGE_BONUS: u64 = 3;
const URGENCY_BONUS: u64 = 2;

/// Base minutes per best-matching topic. Tunables, not a contract.
fn topic_minutes(label: &str) -> u64 {
    match label {
        "Coding/Debugging" => 12,
        "Data/Analysis" => 10,
        "Math/Stats" => 10,
        "Research" => 9,
        "Writing/Comms" => 8,
        _ => 5,
    }
}

/// Estimate total minutes saved across the given user messages.
///
/// The best-matching topic is the first matching rule in table order.
/// Messages without a timestamp are skipped (they belong to no day).
pub fn estimate_time_saved(messages: &[&Message], lex: &Lexicons) -> u64 {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for message in messages {
        let Some(at) = message.created_at else {
            continue;
        };
        let tokens = tokenize(&message.text);
        let topics = classify(&tokens, TOPIC_RULES);

        let mut minutes = topic_minutes(topics[0]);
        if tokens.len() > LONG_MESSAGE_TOKENS {
            minutes += LONG_MESSAGE_BONUS;
        }
        if lex.panic_patterns.iter().any(|rx| rx.is_match(&message.text)) {
            minutes += URGENCY_BONUS;
        }

        *per_day.entry(at.date_naive()).or_insert(0) += minutes;
    }

    per_day.values().map(|&m| m.min(DAILY_CAP_MINUTES)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::lexicons::lexicons;
    use crate::types::Role;
    use chrono::NaiveDate;

    fn msg(day: u32, text: &str) -> Message {
        Message {
            role: Role::User,
            created_at: Some(
                NaiveDate::from_ymd_opt(2024, 7, day)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap()
                    .and_utc(),
            ),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_topic_base_values() {
        let coding = msg(1, "fix this bug");
        let refs: Vec<&Message> = vec![&coding];
        assert_eq!(estimate_time_saved(&refs, lexicons()), 12);

        let general = msg(1, "dinner ideas");
        let refs: Vec<&Message> = vec![&general];
        assert_eq!(estimate_time_saved(&refs, lexicons()), 5);
    }

    #[test]
    fn test_urgency_bonus() {
        let urgent = msg(2, "urgent bug in prod");
        let refs: Vec<&Message> = vec![&urgent];
        assert_eq!(estimate_time_saved(&refs, lexicons()), 14);
    }

    #[test]
    fn test_long_message_bonus() {
        let long_text = "word ".repeat(41) + "bug";
        let long = msg(3, &long_text);
        let refs: Vec<&Message> = vec![&long];
        assert_eq!(estimate_time_saved(&refs, lexicons()), 15);
    }

    #[test]
    fn test_daily_cap() {
        // ten coding prompts on one day would be 120 minutes uncapped
        let messages: Vec<Message> = (0..10).map(|_| msg(4, "another bug")).collect();
        let refs: Vec<&Message> = messages.iter().collect();
        assert_eq!(estimate_time_saved(&refs, lexicons()), DAILY_CAP_MINUTES);
    }

    #[test]
    fn test_cap_is_per_day() {
        let mut messages: Vec<Message> = (0..10).map(|_| msg(5, "another bug")).collect();
        messages.push(msg(6, "one more bug"));
        let refs: Vec<&Message> = messages.iter().collect();
        assert_eq!(estimate_time_saved(&refs, lexicons()), DAILY_CAP_MINUTES + 12);
    }
}
