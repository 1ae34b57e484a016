//! # solstice-core
//!
//! Core library for solstice - a summer-in-review generator for chat
//! export files.
//!
//! This library provides:
//! - Tolerant normalization of several chat-export shapes into one
//!   conversation model
//! - Lexical keyword, topic, and sentiment extraction
//! - Summer-window (June 1 - August 31 UTC) metrics aggregation
//! - A presentation-agnostic slide deck built from the metrics
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! Data flows strictly left-to-right through a synchronous pipeline:
//!
//! raw JSON document -> [`ingest::normalize`] -> [`analytics::compute_summer_metrics`]
//! -> [`slides::build_summer_slides`] -> external presentation layer
//!
//! A document is consumed once and produces one immutable
//! [`analytics::SummerMetrics`] value; nothing is cached across calls.
//!
//! ## Example
//!
//! ```rust
//! use solstice_core::analytics::SummerOptions;
//!
//! let text = r#"{"conversations": []}"#;
//! let output = solstice_core::pipeline::run(text, &SummerOptions::new(2024))
//!     .expect("valid JSON");
//! assert_eq!(output.metrics.total_prompts, 0);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use ingest::normalize;
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod nlp;
pub mod pipeline;
pub mod slides;
pub mod types;
