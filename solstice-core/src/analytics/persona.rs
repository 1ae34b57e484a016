//! Persona and roast text generation
//!
//! Deterministic template selection over the aggregate metrics. Pure
//! string formatting; identical metrics always produce identical text.

use crate::analytics::topics::GENERAL_TOPIC;
use crate::types::NamedCount;
use serde::{Deserialize, Serialize};

/// Shareable one-liner summarizing the summer, plus hashtag-style tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Persona {
    pub blurb: String,
    pub tags: Vec<String>,
}

impl Persona {
    /// The empty-state persona used when no summer data exists.
    pub fn empty() -> Self {
        Self {
            blurb: "No summer data found.".to_string(),
            tags: Vec::new(),
        }
    }
}

/// Build the persona blurb and tags from the topic distribution.
pub fn build_persona(topics: &[NamedCount], total_prompts: u64, longest_streak: u64) -> Persona {
    let top = topics.first().map(|t| t.name.as_str());
    let second = topics.get(1).map(|t| t.name.as_str()).unwrap_or(GENERAL_TOPIC);

    let blurb = match top {
        Some(top) => format!("You leaned {} with a side of {} this summer.", top, second),
        None => "Your summer usage was low-volume but eclectic.".to_string(),
    };

    Persona {
        blurb,
        tags: vec![
            format!("{} prompts", total_prompts),
            format!("{}-day streak", longest_streak),
            top.unwrap_or(GENERAL_TOPIC).to_string(),
        ],
    }
}

/// Build the roast line.
///
/// Branches on the panic/levity balance first, then streak length; the
/// top topic seasons whichever branch wins.
pub fn build_roast(
    topics: &[NamedCount],
    longest_streak: u64,
    panic_count: u64,
    lol_count: u64,
) -> String {
    let top = topics.first().map(|t| t.name.as_str()).unwrap_or(GENERAL_TOPIC);

    if panic_count > lol_count {
        format!(
            "{} of your messages read like a fire alarm. {} kept you up at night, and it shows.",
            panic_count, top
        )
    } else if lol_count > panic_count {
        format!(
            "You laughed {} times at your own chaos. At least {} kept you entertained.",
            lol_count, top
        )
    } else if longest_streak >= 7 {
        format!(
            "A {}-day streak of {}. The outdoors called; you let it go to voicemail.",
            longest_streak, top
        )
    } else {
        format!(
            "Mostly {}, occasionally everything else. A balanced summer, allegedly.",
            top
        )
    }
}
