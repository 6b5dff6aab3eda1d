//! The hybrid ranking engine and its scoring signals.
//!
//! This module provides the core ranking functionality:
//!
//! - [`RankingEngine`]: Main entry point - ranks a batch of candidates
//! - [`Bm25Model`]: Batch-local lexical relevance (BM25)
//! - [`Embedder`]: Semantic similarity seam, with ML and hash-based impls
//! - [`SkillCoverage`]: Exact skill presence per candidate
//! - [`ScoreRecord`]: One ranked result with its full score breakdown
//!
//! ## Scoring
//!
//! Three independent signals are computed per candidate and combined:
//!
//! 1. **Lexical**: BM25 term overlap with the job description, with
//!    statistics (IDF, average length) built fresh over the current batch
//! 2. **Semantic**: cosine similarity between dense embeddings of the job
//!    description and the resume text
//! 3. **Skills**: fraction of required skills present verbatim
//!    (case-insensitive) in the resume text
//!
//! Lexical and semantic raw scores are min-max normalized across the batch,
//! weighted together with the coverage fraction, and scaled to a 0-100
//! display range. Because normalization is batch-relative, scores from
//! different calls are not comparable.
//!
//! ## Example
//!
//! ```rust
//! use resume_ranker::core::candidate::Candidate;
//! use resume_ranker::core::query::RankQuery;
//! use resume_ranker::ranking::engine::RankingEngine;
//! use resume_ranker::ranking::semantic::HashEmbedder;
//!
//! let embedder = HashEmbedder::default();
//! let engine = RankingEngine::new(&embedder);
//!
//! let query = RankQuery::new(
//!     "Python developer with AWS experience",
//!     vec!["Python".into(), "AWS".into(), "Docker".into()],
//! );
//! let batch = vec![
//!     Candidate::new("alice.pdf", "Seasoned Python and AWS engineer"),
//!     Candidate::new("bob.pdf", "Frontend designer"),
//! ];
//!
//! let records = engine.rank(&query, &batch).unwrap();
//! for r in &records {
//!     println!("{}: {:.2} ({})", r.identifier, r.final_score, r.strength);
//! }
//! ```

pub mod aggregate;
pub mod engine;
pub mod lexical;
pub mod semantic;
pub mod skills;

pub use aggregate::{round2, ScoreRecord, SignalWeights};
pub use engine::{RankError, RankingConfig, RankingEngine};
pub use lexical::Bm25Model;
pub use semantic::{Embedder, FastEmbedEmbedder, HashEmbedder, SemanticError};
pub use skills::SkillCoverage;
