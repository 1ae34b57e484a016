//! Canonical conversation model
//!
//! These types are what every recognized export shape normalizes into.
//! Downstream analytics only ever see [`Thread`]s and [`Message`]s; the
//! quirks of individual export formats stop at the normalizer.
//!
//! A [`Message`] whose timestamp could not be parsed keeps `None` and is
//! excluded from all summer-window computation; it is never dropped from
//! the thread itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Roles
// ============================================

/// Role of the message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The person typing prompts
    User,
    /// The assistant replying
    Assistant,
    /// System messages, context injection
    System,
    /// Tool execution output
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
        }
    }

    /// Whether this message counts as a prompt for usage statistics.
    pub fn is_user(&self) -> bool {
        matches!(self, Role::User)
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Role::Assistant)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            "tool" => Ok(Role::Tool),
            _ => Err(format!("unknown role: {}", s)),
        }
    }
}

// ============================================
// Messages and Threads
// ============================================

/// A single normalized message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Author role (never absent; unknown export roles map to system)
    pub role: Role,
    /// UTC timestamp, `None` when the export value was unparseable
    pub created_at: Option<DateTime<Utc>>,
    /// Flattened text content (empty string when content carried no text)
    pub text: String,
}

/// One normalized conversation: an ordered sequence of messages.
///
/// Message ordering is chronological by the export's creation/update
/// times; ties preserve the pre-sort relative order (stable sort).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    /// Export-provided id, or synthesized `conv-{n}`
    pub id: String,
    /// Export-provided title, or synthesized `Conversation {n}`
    pub title: String,
    /// Thread-level creation timestamp, if the export carried one
    pub created_at: Option<DateTime<Utc>>,
    /// Messages in chronological order
    pub messages: Vec<Message>,
}

/// Result of normalizing a raw export document.
///
/// An unrecognized shape yields zero threads; that is a soft "no data
/// found" signal to the caller, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizedExport {
    pub threads: Vec<Thread>,
}

// ============================================
// Shared ranking entry
// ============================================

/// A named weight, used for keyword and topic distributions.
///
/// Distributions are sorted descending by `value` with a stable
/// tie-break by first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub value: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::User, Role::Assistant, Role::System, Role::Tool] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
        assert!(Role::from_str("robot").is_err());
    }

    #[test]
    fn test_role_predicates() {
        assert!(Role::User.is_user());
        assert!(!Role::Tool.is_user());
        assert!(Role::Assistant.is_assistant());
    }
}
