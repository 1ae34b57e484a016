//! Static lexicons and pattern tables
//!
//! Word lists operate on tokenizer output (ASCII tokens); the panic and
//! levity patterns run against the raw message text, so they may carry
//! emoji and multi-word phrasing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "of", "to", "in", "on", "for", "with", "without", "by",
    "as", "is", "are", "was", "were", "be", "been", "being", "it", "its", "at", "from", "this",
    "that", "i", "you", "we", "they", "he", "she", "them", "my", "our", "your", "me", "us",
    "about", "into", "over", "under", "up", "down", "out", "not", "no", "yes", "ok", "okay",
    "thanks", "thank", "pls", "please", "hey", "hi", "hello",
];

const POSITIVE_WORDS: &[&str] = &[
    "win", "great", "awesome", "love", "nice", "yay", "cool", "clean", "works", "fixed", "pass",
    "haha", "lol", "lmao", "lols", "hehe", "woot", "nailed",
];

const NEGATIVE_WORDS: &[&str] = &[
    "panic", "anxious", "anxiety", "worried", "stressed", "stress", "urgent", "help", "broken",
    "fail", "wtf", "ugh", "omg", "crash", "stuck", "blocked", "deadlines",
];

/// Distress/urgency phrasing, tested against raw text.
const PANIC_PATTERNS: &[&str] = &[
    r"(?i)panic|freak(ing)? out|meltdown|help me",
    r"(?i)urgent|deadline|blocked|stuck",
    r"(?i)resume filter|oa due|offer deadline",
];

/// Laughter/amusement phrasing, tested against raw text.
const LEVITY_PATTERNS: &[&str] = &[
    r"(?i)lol|lmao|haha|hehe|😂|😅",
    r"(?i)this is (so )?funny|i can't believe i did",
];

/// The immutable word lists and compiled pattern tables used by the
/// keyword extractor and emotion analyzer.
#[derive(Debug)]
pub struct Lexicons {
    pub stop_words: HashSet<&'static str>,
    pub positive: HashSet<&'static str>,
    pub negative: HashSet<&'static str>,
    pub panic_patterns: Vec<Regex>,
    pub levity_patterns: Vec<Regex>,
}

impl Lexicons {
    fn new() -> Self {
        let compile = |patterns: &[&str]| {
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("lexicon pattern must compile"))
                .collect()
        };
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            panic_patterns: compile(PANIC_PATTERNS),
            levity_patterns: compile(LEVITY_PATTERNS),
        }
    }
}

static LEXICONS: Lazy<Lexicons> = Lazy::new(Lexicons::new);

/// The process-wide lexicon tables, built once on first use.
pub fn lexicons() -> &'static Lexicons {
    &LEXICONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        let lex = lexicons();
        assert_eq!(lex.panic_patterns.len(), PANIC_PATTERNS.len());
        assert_eq!(lex.levity_patterns.len(), LEVITY_PATTERNS.len());
    }

    #[test]
    fn test_word_lists_are_disjoint_from_stop_words() {
        let lex = lexicons();
        assert!(lex.positive.is_disjoint(&lex.stop_words));
        assert!(lex.negative.is_disjoint(&lex.stop_words));
    }

    #[test]
    fn test_pattern_matching() {
        let lex = lexicons();
        assert!(lex.panic_patterns.iter().any(|rx| rx.is_match("I'm freaking out")));
        assert!(lex.panic_patterns.iter().any(|rx| rx.is_match("the DEADLINE is tomorrow")));
        assert!(lex.levity_patterns.iter().any(|rx| rx.is_match("hahaha nice")));
        assert!(lex.levity_patterns.iter().any(|rx| rx.is_match("this is so funny")));
        assert!(!lex.panic_patterns.iter().any(|rx| rx.is_match("a calm afternoon")));
    }
}
