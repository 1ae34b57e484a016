//! Tolerant normalizer for chat-export documents
//!
//! Real-world exports arrive in several mutually incompatible shapes:
//! a full export carrying `conversations[]` where each conversation is
//! a keyed `mapping` graph of message nodes, a single shared
//! conversation with a flat `messages[]` array, or a bare array of
//! conversation-like objects. All of them normalize into
//! [`NormalizedExport`].
//!
//! # Error Handling
//!
//! This module never fails. Missing or malformed sub-fields degrade to
//! defaults (`"Conversation {n}"` / `"conv-{n}"`, empty text, `None`
//! timestamps); a document matching no known shape yields zero threads.
//! Degradations worth knowing about are logged at `debug!`.

use crate::types::{Message, NormalizedExport, Role, Thread};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

/// The recognized export shapes, probed in priority order.
///
/// The first structural match wins; a document matching none of them is
/// explicitly [`ExportShape::Unrecognized`] rather than a scattering of
/// silent defaults.
#[derive(Debug)]
pub enum ExportShape<'a> {
    /// Object with a `conversations` array of mapping-graph conversations
    FullExport(&'a [Value]),
    /// Object with a flat `messages` array: one single conversation
    SingleConversation(&'a Value),
    /// Bare array of conversation-like objects with optional `mapping`
    ConversationList(&'a [Value]),
    /// Anything else: yields zero threads
    Unrecognized,
}

impl<'a> ExportShape<'a> {
    /// Probe a parsed document against each known shape in order.
    pub fn detect(raw: &'a Value) -> Self {
        if let Some(obj) = raw.as_object() {
            if let Some(conversations) = obj.get("conversations").and_then(Value::as_array) {
                return ExportShape::FullExport(conversations);
            }
            if obj.get("messages").is_some_and(Value::is_array) {
                return ExportShape::SingleConversation(raw);
            }
        }
        if let Some(items) = raw.as_array() {
            return ExportShape::ConversationList(items);
        }
        ExportShape::Unrecognized
    }
}

/// Normalize a parsed export document into conversation threads.
///
/// Total over all JSON values: an unrecognized shape returns zero
/// threads, signalling "no data found" to the caller.
pub fn normalize(raw: &Value) -> NormalizedExport {
    match ExportShape::detect(raw) {
        ExportShape::FullExport(conversations) => NormalizedExport {
            threads: conversations
                .iter()
                .enumerate()
                .map(|(i, conv)| thread_from_conversation(conv, i))
                .collect(),
        },
        ExportShape::SingleConversation(obj) => NormalizedExport {
            threads: vec![thread_from_flat(obj)],
        },
        ExportShape::ConversationList(items) => NormalizedExport {
            threads: items
                .iter()
                .enumerate()
                .map(|(i, conv)| thread_from_conversation(conv, i))
                .collect(),
        },
        ExportShape::Unrecognized => {
            debug!("unrecognized export shape, yielding zero threads");
            NormalizedExport::default()
        }
    }
}

/// Build a thread from a conversation object carrying a `mapping` graph.
fn thread_from_conversation(conv: &Value, index: usize) -> Thread {
    let id = conv
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("conv-{}", index + 1));
    let title = conv
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Conversation {}", index + 1));

    let messages = conv
        .get("mapping")
        .and_then(Value::as_object)
        .map(extract_from_mapping)
        .unwrap_or_default();

    Thread {
        id,
        title,
        created_at: object_timestamp(conv),
        messages,
    }
}

/// Build the single thread of a flat `messages[]` conversation.
fn thread_from_flat(conv: &Value) -> Thread {
    let messages = conv
        .get("messages")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(flat_message).collect())
        .unwrap_or_default();

    Thread {
        id: conv
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| "conv-1".to_string()),
        title: conv
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| "Conversation".to_string()),
        created_at: object_timestamp(conv),
        messages,
    }
}

/// Extract messages from a keyed mapping graph.
///
/// Nodes are kept only when they carry both an author role and content,
/// then sorted ascending by `create_time` (fallback `update_time`,
/// fallback 0). The sort is stable; the pre-sort order is the mapping's
/// key order, which serde_json keeps deterministic.
fn extract_from_mapping(mapping: &Map<String, Value>) -> Vec<Message> {
    let mut nodes: Vec<(i64, Message)> = Vec::new();

    for node in mapping.values() {
        let Some(msg) = node.get("message") else {
            continue;
        };
        let role = msg
            .get("author")
            .and_then(|a| a.get("role"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        let content = msg.get("content").filter(|c| !c.is_null());
        let (Some(role), Some(content)) = (role, content) else {
            continue;
        };

        let created_at = object_timestamp(msg);
        let sort_key = created_at.map(|dt| dt.timestamp_millis()).unwrap_or(0);
        nodes.push((
            sort_key,
            Message {
                role: map_role(role),
                created_at,
                text: flatten_content(content),
            },
        ));
    }

    nodes.sort_by_key(|(key, _)| *key);
    nodes.into_iter().map(|(_, message)| message).collect()
}

/// Convert one element of a flat `messages[]` array.
///
/// Role resolution tries `author.role`, then a top-level `role`, then
/// defaults to user (flat exports always carry prompts there).
fn flat_message(item: &Value) -> Message {
    let role = item
        .get("author")
        .and_then(|a| a.get("role"))
        .and_then(Value::as_str)
        .or_else(|| item.get("role").and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map(map_role)
        .unwrap_or(Role::User);

    Message {
        role,
        created_at: object_timestamp(item),
        text: item.get("content").map(flatten_content).unwrap_or_default(),
    }
}

/// Map an export role string onto the closed [`Role`] enum.
///
/// Unknown roles become [`Role::System`], which is inert for every
/// user/assistant statistic downstream.
fn map_role(role: &str) -> Role {
    match role.to_ascii_lowercase().as_str() {
        "user" | "human" => Role::User,
        "assistant" | "model" => Role::Assistant,
        "system" => Role::System,
        "tool" | "function" => Role::Tool,
        other => {
            debug!(role = other, "unknown author role, treating as system");
            Role::System
        }
    }
}

/// Pull `create_time` (fallback `update_time`) off an export object.
fn object_timestamp(obj: &Value) -> Option<DateTime<Utc>> {
    obj.get("create_time")
        .and_then(parse_timestamp)
        .or_else(|| obj.get("update_time").and_then(parse_timestamp))
}

/// Normalize an export timestamp value to UTC.
///
/// Accepts epoch seconds (int or float) or a parseable date string;
/// anything else is `None`.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(|secs| DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)),
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// Flatten an export content field to plain text.
///
/// Handles the shapes seen in the wild: `{parts: [...]}` joined by
/// newline, `{text: "..."}`, `{text: {value: ...}}`, an array of
/// heterogeneous content blocks, and a bare string. Unrecognized shapes
/// degrade to the empty string.
fn flatten_content(content: &Value) -> String {
    match content {
        Value::String(s) => s.trim().to_string(),

        Value::Object(obj) => {
            if let Some(parts) = obj.get("parts").and_then(Value::as_array) {
                let joined = parts
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n");
                return joined.trim().to_string();
            }
            if let Some(text) = obj.get("text") {
                if let Some(s) = text.as_str() {
                    return s.trim().to_string();
                }
                if let Some(value) = text.get("value") {
                    if let Some(s) = value.as_str() {
                        return s.trim().to_string();
                    }
                    if value.is_number() || value.is_boolean() {
                        return value.to_string();
                    }
                }
            }
            String::new()
        }

        Value::Array(blocks) => {
            let mut pieces: Vec<String> = Vec::new();
            for block in blocks {
                match block {
                    Value::String(s) => pieces.push(s.clone()),
                    Value::Object(_) => {
                        if let Some(text) = block.get("text") {
                            if let Some(s) = text.get("value").and_then(Value::as_str) {
                                if !s.is_empty() {
                                    pieces.push(s.to_string());
                                    continue;
                                }
                            }
                            if let Some(s) = text.as_str() {
                                pieces.push(s.to_string());
                                continue;
                            }
                        }
                        if block.get("type").and_then(Value::as_str) == Some("input_text") {
                            if let Some(s) = block.get("input_text").and_then(Value::as_str) {
                                pieces.push(s.to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
            pieces.join("\n").trim().to_string()
        }

        _ => String::new(),
    }
}
