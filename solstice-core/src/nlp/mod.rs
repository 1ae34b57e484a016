//! Lexical text analysis
//!
//! Everything here is deliberately regex- and wordlist-based: no
//! embeddings, no external services, full local execution. The lexicons
//! and pattern tables are immutable statics built once at first use and
//! passed by reference, keeping every function pure and independently
//! testable.

pub mod emotion;
pub mod keywords;
pub mod lexicons;
pub mod tokenize;

pub use emotion::{analyze_emotions, DailyScore, EmotionSummary};
pub use keywords::{extract_keywords, KeywordOptions};
pub use lexicons::{lexicons, Lexicons};
pub use tokenize::tokenize;
