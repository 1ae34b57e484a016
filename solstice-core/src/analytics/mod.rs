//! Analytics module for solstice
//!
//! Derives the summer usage statistics from normalized threads:
//! - Topic classification (rule-based keyword matching)
//! - The summer aggregator (year resolution, streaks, busiest day,
//!   weekly buckets, longest thread)
//! - Time-saved estimation
//! - Accomplishment mining
//! - Persona/roast text generation
//!
//! Every function here is total: malformed or empty input resolves to
//! explicit zero/empty values with descriptive text, never an error.

pub mod accomplishments;
pub mod persona;
pub mod summer;
pub mod timesaved;
pub mod topics;

pub use accomplishments::{mine_accomplishments, Accomplishment};
pub use persona::{build_persona, build_roast, Persona};
pub use summer::{
    compute_summer_metrics, BusiestDay, SummerMetrics, SummerOptions, SummerWindow, ThreadSummary,
    WeekBucket,
};
pub use timesaved::estimate_time_saved;
pub use topics::{classify, TopicRule, GENERAL_TOPIC, TOPIC_RULES};
