//! End-to-end pipeline
//!
//! One text blob in, one metrics record and one slide deck out. The
//! only failure class is a hard JSON parse error; every later stage is
//! a total function over its input, resolving soft degeneracies to
//! explicit empty values.

use crate::analytics::{compute_summer_metrics, SummerMetrics, SummerOptions};
use crate::error::Result;
use crate::ingest::normalize;
use crate::slides::{build_summer_slides, SlideDescriptor};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the presentation layer consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub metrics: SummerMetrics,
    pub slides: Vec<SlideDescriptor>,
}

/// Run the full pipeline over a raw export text.
///
/// Fails only when `text` is not well-formed JSON; any well-formed
/// value the normalizer does not recognize degrades to the empty-state
/// metrics instead.
pub fn run(text: &str, opts: &SummerOptions) -> Result<PipelineOutput> {
    let raw: serde_json::Value = serde_json::from_str(text)?;

    let normalized = normalize(&raw);
    debug!(threads = normalized.threads.len(), "export normalized");

    let metrics = compute_summer_metrics(&normalized.threads, opts);
    let slides = build_summer_slides(&metrics);
    debug!(year = metrics.year, slides = slides.len(), "pipeline complete");

    Ok(PipelineOutput { metrics, slides })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_invalid_json_is_a_hard_failure() {
        let err = run("this is not json", &SummerOptions::new(2024)).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_unrecognized_shape_is_soft() {
        let out = run(r#"{"surprise": [1, 2, 3]}"#, &SummerOptions::new(2024)).unwrap();
        assert!(out.metrics.is_empty_state());
        assert!(!out.metrics.persona.blurb.is_empty());
        assert!(!out.slides.is_empty());
    }
}
