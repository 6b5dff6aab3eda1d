//! # resume-ranker
//!
//! A library for ranking candidate resumes against a job description.
//!
//! Screening a stack of resumes against a role is tedious and inconsistent:
//! keyword greps miss paraphrases, and skimming misses keywords.
//! `resume-ranker` scores every candidate on three complementary,
//! individually-auditable signals and combines them into one ranked list:
//!
//! - **Lexical**: BM25 term overlap with the job description
//! - **Semantic**: sentence-embedding cosine similarity (all-MiniLM-L6-v2)
//! - **Skills**: exact, case-insensitive presence of required skills
//!
//! Lexical and semantic scores are min-max normalized within the batch, so
//! a ranking compares candidates to each other - never to an absolute
//! scale, and never to candidates from another call.
//!
//! ## Example
//!
//! ```rust,no_run
//! use resume_ranker::{Candidate, RankQuery, RankingEngine};
//! use resume_ranker::ranking::semantic::shared_embedder;
//!
//! let embedder = shared_embedder(false).unwrap();
//! let engine = RankingEngine::new(embedder);
//!
//! let query = RankQuery::new(
//!     "Python developer with AWS experience",
//!     vec!["Python".into(), "AWS".into(), "Docker".into()],
//! );
//! let batch = vec![
//!     Candidate::new("alice.pdf", "Python and AWS platform engineer"),
//!     Candidate::new("bob.pdf", "Logistics coordinator"),
//! ];
//!
//! for record in engine.rank(&query, &batch).unwrap() {
//!     println!("{}: {:.2}", record.identifier, record.final_score);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Candidate, query, and result classification types
//! - [`text`]: The shared normalization transform and tokenizer
//! - [`ranking`]: The hybrid ranking engine and its three signals
//! - [`extract`]: PDF/DOCX/TXT text extraction adapters
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based ranking

pub mod cli;
pub mod core;
pub mod extract;
pub mod ranking;
pub mod text;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::core::candidate::Candidate;
pub use crate::core::query::RankQuery;
pub use crate::core::types::MatchStrength;
pub use crate::ranking::engine::{RankError, RankingConfig, RankingEngine};
pub use crate::ranking::{ScoreRecord, SignalWeights};
