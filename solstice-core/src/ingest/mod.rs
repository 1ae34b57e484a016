//! Export ingestion
//!
//! Turns a raw, loosely-structured chat-export document into the
//! canonical conversation model.
//!
//! ## Design Principles
//!
//! 1. **Tolerance**: malformed sub-fields degrade to defaults, never
//!    abort the document
//! 2. **Explicit shapes**: the document is probed against each known
//!    export shape in priority order ([`normalizer::ExportShape`]);
//!    anything else falls through to an explicit unrecognized variant
//! 3. **Determinism**: identical input always yields identical threads,
//!    including tie ordering

pub mod normalizer;

pub use normalizer::{normalize, ExportShape};
