//! Text normalization and tokenization.
//!
//! Every scoring signal consumes text through the same normalization
//! transform - applying it asymmetrically to the query and the candidates
//! would bias scoring, so [`Normalizer`] is the single entry point for both.

pub mod normalize;

pub use normalize::{tokenize, Normalizer, NormalizerConfig};
