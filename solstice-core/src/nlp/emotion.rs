//! Lexical sentiment scoring and panic/levity detection

use crate::nlp::lexicons::Lexicons;
use crate::nlp::tokenize::tokenize;
use crate::types::Message;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net sentiment score for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyScore {
    pub date: NaiveDate,
    pub score: i64,
}

/// Per-day sentiment series plus the two named-event counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmotionSummary {
    /// One entry per day that had at least one scored message, ascending
    pub daily_scores: Vec<DailyScore>,
    /// Messages that matched a distress/urgency pattern
    pub panic_count: u64,
    /// Messages that matched a laughter/amusement pattern
    pub lol_count: u64,
}

/// Score messages against the sentiment lexicons and event patterns.
///
/// Each token in the positive lexicon adds 1, each negative token
/// subtracts 1, accumulated into the message's UTC calendar day. The
/// raw text is independently tested against the panic and levity
/// pattern lists; each list increments its counter at most once per
/// message no matter how many of its patterns match. Messages without a
/// timestamp are skipped.
pub fn analyze_emotions(messages: &[&Message], lex: &Lexicons) -> EmotionSummary {
    let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut panic_count = 0u64;
    let mut lol_count = 0u64;

    for message in messages {
        let Some(at) = message.created_at else {
            continue;
        };

        let mut score = 0i64;
        for token in tokenize(&message.text) {
            if lex.positive.contains(token.as_str()) {
                score += 1;
            }
            if lex.negative.contains(token.as_str()) {
                score -= 1;
            }
        }
        *daily.entry(at.date_naive()).or_insert(0) += score;

        if lex.panic_patterns.iter().any(|rx| rx.is_match(&message.text)) {
            panic_count += 1;
        }
        if lex.levity_patterns.iter().any(|rx| rx.is_match(&message.text)) {
            lol_count += 1;
        }
    }

    EmotionSummary {
        daily_scores: daily
            .into_iter()
            .map(|(date, score)| DailyScore { date, score })
            .collect(),
        panic_count,
        lol_count,
    }
}
