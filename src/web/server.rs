use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::core::candidate::Candidate;
use crate::core::query::RankQuery;
use crate::extract::{self, DocumentFormat};
use crate::ranking::aggregate::round2;
use crate::ranking::engine::{RankingConfig, RankingEngine};
use crate::ranking::semantic::{shared_embedder, Embedder};
use crate::ranking::SignalWeights;
use crate::text::NormalizerConfig;
use crate::utils::validation::{validate_upload, ValidationError};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_MULTIPART_FIELDS: usize = 48;
pub const MAX_FILE_FIELD_SIZE: usize = 8 * 1024 * 1024; // 8MB per resume
pub const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024; // 64KB
pub const MAX_RESUMES_PER_REQUEST: usize = 32;

/// Shared application state
pub struct AppState {
    pub embedder: &'static dyn Embedder,
}

/// Input data extracted from the multipart form
#[derive(Debug, Default)]
struct RankRequest {
    /// Job description text
    job_description: String,
    /// Comma-separated skill list, raw
    skills: String,
    /// Parsed resume candidates
    candidates: Vec<Candidate>,
    /// Filenames skipped during extraction, with the reason
    skipped: Vec<(String, String)>,
}

/// Per-request ranking configuration
#[derive(Serialize)]
struct ConfigurationInfo {
    scoring_weights: SignalWeights,
    result_limit: usize,
}

impl Default for ConfigurationInfo {
    fn default() -> Self {
        Self {
            scoring_weights: SignalWeights::default(),
            result_limit: 10,
        }
    }
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the embedding model cannot be loaded, the tokio
/// runtime cannot be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and middleware configured.
///
/// The embedder is resolved eagerly so a model-load failure surfaces at
/// startup rather than on the first request.
///
/// # Errors
///
/// Returns an error if the embedding model cannot be initialized.
#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
pub fn create_router(offline: bool) -> anyhow::Result<Router> {
    let embedder = shared_embedder(offline)?;
    let state = Arc::new(AppState { embedder });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .unwrap();

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/api/rank", post(rank_handler))
        .route("/api/config", get(config_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // IP-based rate limiting to prevent abuse
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                // Request timeout covers model inference on large batches
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(60),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(32))
                // Limit request body size (resume batch + multipart overhead)
                .layer(DefaultBodyLimit::max(
                    MAX_RESUMES_PER_REQUEST * MAX_FILE_FIELD_SIZE / 4,
                )),
        );

    Ok(app)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let app = create_router(args.offline)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting resume-ranker web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

/// Default configuration for the UI
async fn config_handler() -> Json<serde_json::Value> {
    let defaults = ConfigurationInfo::default();
    Json(serde_json::json!({
        "scoring_weights": defaults.scoring_weights,
        "result_limit": defaults.result_limit,
        "max_resumes": MAX_RESUMES_PER_REQUEST,
        "max_file_bytes": MAX_FILE_FIELD_SIZE,
        "supported_formats": ["pdf", "docx", "txt"],
    }))
}

/// API endpoint for ranking uploaded resumes
async fn rank_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let start_time = std::time::Instant::now();

    let (request, config) = match extract_request_data(&mut multipart).await {
        Ok(data) => data,
        Err(error_response) => return error_response,
    };

    let skills = RankQuery::parse_skill_list(&request.skills);
    let query = RankQuery::new(request.job_description, skills);

    let engine = RankingEngine::with_config(
        state.embedder,
        RankingConfig {
            weights: config.scoring_weights,
            normalizer: NormalizerConfig::default(),
        },
    );

    // An empty batch is valid and yields an empty result list.
    let mut records = match engine.rank(&query, &request.candidates) {
        Ok(records) => records,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(create_safe_error_response(
                    "ranking_failed",
                    "Ranking failed, see server logs",
                    Some(&e.to_string()),
                )),
            )
                .into_response();
        }
    };
    records.truncate(config.result_limit);

    let results: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "identifier": r.identifier,
                "final_score": round2(r.final_score),
                "strength": r.strength,
                "scores": {
                    "lexical": round2(r.lexical_score),
                    "semantic": round2(r.semantic_score),
                    "coverage": round2(r.coverage),
                },
                "matched_skills": r.matched_skills,
                "missing_skills": r.missing_skills,
            })
        })
        .collect();

    #[allow(clippy::cast_possible_truncation)] // Processing time won't exceed u64
    let processing_time = start_time.elapsed().as_millis() as u64;

    Json(serde_json::json!({
        "query": {
            "required_skills": query.required_skills,
            "candidate_count": request.candidates.len(),
        },
        "results": results,
        "skipped": request.skipped.iter().map(|(name, reason)| {
            serde_json::json!({"filename": name, "reason": reason})
        }).collect::<Vec<_>>(),
        "processing_info": {
            "embedder": state.embedder.name(),
            "processing_time_ms": processing_time,
            "configuration": {
                "scoring_weights": config.scoring_weights,
                "result_limit": config.result_limit,
            }
        }
    }))
    .into_response()
}

/// Extract input data and configuration from the multipart form
async fn extract_request_data(
    multipart: &mut Multipart,
) -> Result<(RankRequest, ConfigurationInfo), Response> {
    let mut request = RankRequest::default();
    let mut config = ConfigurationInfo::default();

    let mut fields_received = 0usize;

    loop {
        if fields_received >= MAX_MULTIPART_FIELDS {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Too many form fields".to_string(),
                    error_type: "field_limit_exceeded".to_string(),
                    details: None,
                }),
            )
                .into_response());
        }

        match multipart.next_field().await {
            Ok(Some(field)) => {
                fields_received += 1;
                let name = field.name().unwrap_or_default().to_string();

                match name.as_str() {
                    "resumes" => {
                        let filename = field.file_name().map(std::string::ToString::to_string);

                        let bytes = match field.bytes().await {
                            Ok(bytes) => bytes,
                            Err(_) => continue, // truncated field, skip this file
                        };

                        if bytes.len() > MAX_FILE_FIELD_SIZE {
                            return Err((
                                StatusCode::PAYLOAD_TOO_LARGE,
                                Json(ErrorResponse {
                                    error: "File size exceeds limit".to_string(),
                                    error_type: "file_too_large".to_string(),
                                    details: None,
                                }),
                            )
                                .into_response());
                        }

                        if request.candidates.len() >= MAX_RESUMES_PER_REQUEST {
                            return Err((
                                StatusCode::BAD_REQUEST,
                                Json(ErrorResponse {
                                    error: "Too many resume files in one request".to_string(),
                                    error_type: "resume_limit_exceeded".to_string(),
                                    details: None,
                                }),
                            )
                                .into_response());
                        }

                        ingest_resume(&mut request, filename.as_deref(), &bytes)?;
                    }
                    "job_description" => match field.text().await {
                        Ok(text) => {
                            if text.len() > MAX_TEXT_FIELD_SIZE {
                                return Err((
                                    StatusCode::PAYLOAD_TOO_LARGE,
                                    Json(ErrorResponse {
                                        error: "Job description exceeds size limit".to_string(),
                                        error_type: "text_too_large".to_string(),
                                        details: None,
                                    }),
                                )
                                    .into_response());
                            }
                            request.job_description = text;
                        }
                        Err(_) => continue,
                    },
                    "skills" => {
                        if let Ok(text) = field.text().await {
                            if text.len() <= MAX_TEXT_FIELD_SIZE {
                                request.skills = text;
                            }
                        }
                    }
                    "result_limit" => {
                        if let Ok(text) = field.text().await {
                            if let Ok(limit) = text.parse::<usize>() {
                                config.result_limit = limit.clamp(1, 50);
                            }
                        }
                    }
                    "scoring_weights" => {
                        if let Ok(text) = field.text().await {
                            if let Ok(weights) = serde_json::from_str::<HashMap<String, f64>>(&text)
                            {
                                config.scoring_weights = parse_scoring_weights(&weights);
                            }
                        }
                    }
                    _ => {} // Ignore unknown fields
                }
            }
            Ok(None) => break, // No more fields
            Err(_) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(create_safe_error_response(
                        "multipart_error",
                        "Malformed multipart request",
                        None,
                    )),
                )
                    .into_response());
            }
        }
    }

    Ok((request, config))
}

/// Validate and extract one uploaded resume into the request batch.
///
/// Unsupported file types and extraction failures are recorded in the
/// skipped list rather than failing the request - mirroring the CLI, the
/// rest of the batch still ranks. Dangerous filenames are a hard error.
fn ingest_resume(
    request: &mut RankRequest,
    filename: Option<&str>,
    bytes: &[u8],
) -> Result<(), Response> {
    let display_name = filename.unwrap_or("resume").to_string();

    let Some(format) = filename.and_then(DocumentFormat::from_filename) else {
        tracing::warn!("skipping upload {display_name}: unsupported file type");
        request
            .skipped
            .push((display_name, "unsupported file type".to_string()));
        return Ok(());
    };

    let validated_name = match validate_upload(filename, bytes, format) {
        Ok(name) => name,
        Err(ValidationError::FilenameTooLong | ValidationError::InvalidFilename) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(create_safe_error_response(
                    "invalid_filename",
                    "Filename contains invalid or dangerous characters",
                    Some(&format!("filename validation failed for {display_name}")),
                )),
            )
                .into_response());
        }
        Err(e) => {
            tracing::warn!("skipping upload {display_name}: {e}");
            request.skipped.push((display_name, e.to_string()));
            return Ok(());
        }
    };

    match extract::extract_text(bytes, format) {
        Ok(text) => {
            request
                .candidates
                .push(Candidate::new(validated_name.unwrap_or(display_name), text));
        }
        Err(e) => {
            tracing::warn!("skipping upload {display_name}: {e}");
            request.skipped.push((display_name, e.to_string()));
        }
    }

    Ok(())
}

/// Parse scoring weights from the client's JSON map, clamping each
/// component to a sane non-negative range.
fn parse_scoring_weights(weights: &HashMap<String, f64>) -> SignalWeights {
    let defaults = SignalWeights::default();
    let clamp = |v: Option<&f64>, default: f64| v.map_or(default, |w| w.clamp(0.0, 10.0));

    SignalWeights {
        lexical: clamp(weights.get("lexical"), defaults.lexical),
        semantic: clamp(weights.get("semantic"), defaults.semantic),
        skills: clamp(weights.get("skills"), defaults.skills),
    }
}
