//! Rule-based topic classification

use std::collections::HashSet;

/// Label applied when no rule matches.
pub const GENERAL_TOPIC: &str = "General";

/// One classification rule: a label and the tokens that trigger it.
#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

/// The fixed, ordered rule table. Static configuration; not extensible
/// at runtime.
pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        label: "Coding/Debugging",
        keywords: &["code", "bug", "error", "python", "pandas", "sql", "js", "react", "api"],
    },
    TopicRule {
        label: "Writing/Comms",
        keywords: &["email", "draft", "rewrite", "tone", "summary", "bullet", "outline"],
    },
    TopicRule {
        label: "Data/Analysis",
        keywords: &["data", "table", "chart", "plot", "csv", "query", "metrics", "regression"],
    },
    TopicRule {
        label: "Research",
        keywords: &["paper", "cite", "source", "evidence", "policy", "report"],
    },
    TopicRule {
        label: "Math/Stats",
        keywords: &["probability", "matrix", "algebra", "stat", "mean", "variance"],
    },
];

/// Classify a tokenized message against the rule table.
///
/// A message matches a rule when any of its tokens intersects the
/// rule's keyword set; multiple labels are possible. Zero matches
/// yield the single catch-all [`GENERAL_TOPIC`].
pub fn classify(tokens: &[String], rules: &[TopicRule]) -> Vec<&'static str> {
    let set: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    let mut labels: Vec<&'static str> = Vec::new();
    for rule in rules {
        if rule.keywords.iter().any(|k| set.contains(k)) {
            labels.push(rule.label);
        }
    }
    if labels.is_empty() {
        labels.push(GENERAL_TOPIC);
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::tokenize;

    #[test]
    fn test_bug_classifies_as_coding() {
        let labels = classify(&tokenize("there is a bug somewhere"), TOPIC_RULES);
        assert_eq!(labels, vec!["Coding/Debugging"]);
    }

    #[test]
    fn test_multiple_labels() {
        let labels = classify(&tokenize("plot the error data"), TOPIC_RULES);
        assert_eq!(labels, vec!["Coding/Debugging", "Data/Analysis"]);
    }

    #[test]
    fn test_no_match_yields_general() {
        let labels = classify(&tokenize("what should I eat tonight"), TOPIC_RULES);
        assert_eq!(labels, vec![GENERAL_TOPIC]);
    }

    #[test]
    fn test_empty_tokens_yield_general() {
        assert_eq!(classify(&[], TOPIC_RULES), vec![GENERAL_TOPIC]);
    }
}
