//! Core data types for resume ranking.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Candidate`]: A single resume - display identifier plus extracted text
//! - [`RankQuery`]: The job description and required-skill list to rank against
//! - [`MatchStrength`]: Presentation-level classification of a final score
//!
//! All types are plain values: candidates are created by the extraction
//! layer, consumed by one ranking call, and never persisted. Scores from
//! different ranking calls are not comparable because batch statistics
//! (BM25, min-max scaling) are rebuilt per call.

pub mod candidate;
pub mod query;
pub mod types;
