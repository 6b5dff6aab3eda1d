//! Command-line interface for resume-ranker.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **rank**: Rank resume files against a job description and skill list
//! - **coverage**: Audit required-skill coverage without the embedding model
//! - **serve**: Start the interactive web interface
//!
//! ## Usage
//!
//! ```text
//! # Rank resumes against a job description
//! resume-ranker rank --job jd.txt --skills "Python,AWS,Docker" resumes/*.pdf
//!
//! # JSON output for scripting
//! resume-ranker rank --job jd.txt --skills "Python" --format json cv.docx
//!
//! # Skill audit only (no model download)
//! resume-ranker coverage --skills "Python,AWS" cv1.pdf cv2.pdf
//!
//! # Start web UI
//! resume-ranker serve --port 8080 --open
//! ```

use clap::{Parser, Subcommand};

pub mod coverage;
pub mod rank;

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(version)]
#[command(about = "Rank candidate resumes against a job description")]
#[command(
    long_about = "resume-ranker scores a batch of resumes against a job description plus a required-skill list.\n\nEach candidate gets an interpretable breakdown:\n- Lexical relevance (BM25 term overlap with the job description)\n- Semantic similarity (sentence-embedding cosine, all-MiniLM-L6-v2)\n- Skill coverage (exact, case-insensitive skill presence)\n\nScores are normalized within the batch, so they rank candidates against each other rather than an absolute scale."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank resume files against a job description
    Rank(rank::RankArgs),

    /// Report required-skill coverage per resume (no embedding model)
    Coverage(coverage::CoverageArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Use the deterministic offline embedder instead of downloading the
    /// MiniLM model (degrades the semantic signal to token overlap)
    #[arg(long)]
    pub offline: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
