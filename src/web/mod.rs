//! Web server for browser-based resume ranking.
//!
//! This module provides an interactive web interface using Axum. Users
//! upload resume files, paste a job description and a skill list, and get
//! the ranked batch back with per-candidate score breakdowns.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! resume-ranker serve
//!
//! # Custom port and auto-open browser
//! resume-ranker serve --port 3000 --open
//!
//! # No model download (deterministic offline embedder)
//! resume-ranker serve --offline
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Main page with the upload form
//! - `POST /api/rank` - Rank uploaded resumes (multipart form)
//! - `GET /api/config` - Default weights and limits

pub mod server;
