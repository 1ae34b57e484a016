//! Term-frequency keyword extraction

use crate::nlp::lexicons::Lexicons;
use crate::nlp::tokenize::tokenize;
use crate::types::{Message, NamedCount};
use std::collections::{HashMap, HashSet};

/// Extra weight for tokens in the caller-supplied alias set. Tunable,
/// not a contract.
const ALIAS_BOOST: u64 = 5;

/// Tokens shorter than this never count.
const MIN_TOKEN_LEN: usize = 2;

/// Options for [`extract_keywords`].
#[derive(Debug, Clone)]
pub struct KeywordOptions {
    /// Number of keywords to keep
    pub top_n: usize,
    /// Lowercase terms that receive boosted weight (e.g. project names)
    pub boost: HashSet<String>,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            top_n: 12,
            boost: HashSet::new(),
        }
    }
}

/// Rank the terms of the user-authored messages by accumulated weight.
///
/// Each occurrence contributes 1 (or [`ALIAS_BOOST`] for boosted
/// tokens); stop-words and sub-2-char tokens are skipped. Output is
/// sorted descending by weight with a stable tie-break by first-seen
/// order, truncated to `top_n`. Pure: identical input always produces
/// identical output.
pub fn extract_keywords(
    messages: &[&Message],
    lex: &Lexicons,
    opts: &KeywordOptions,
) -> Vec<NamedCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<NamedCount> = Vec::new();

    for message in messages {
        if !message.role.is_user() {
            continue;
        }
        for token in tokenize(&message.text) {
            if token.len() < MIN_TOKEN_LEN || lex.stop_words.contains(token.as_str()) {
                continue;
            }
            let weight = if opts.boost.contains(&token) { ALIAS_BOOST } else { 1 };
            match index.get(&token) {
                Some(&i) => counts[i].value += weight,
                None => {
                    index.insert(token.clone(), counts.len());
                    counts.push(NamedCount {
                        name: token,
                        value: weight,
                    });
                }
            }
        }
    }

    counts.sort_by(|a, b| b.value.cmp(&a.value));
    counts.truncate(opts.top_n);
    counts
}
