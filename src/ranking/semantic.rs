//! Semantic similarity via dense sentence embeddings.
//!
//! The production embedder wraps the all-MiniLM-L6-v2 sentence model
//! (via `fastembed`). Model loading is expensive, so the instance lives in
//! a process-wide lazy singleton and is shared read-only across ranking
//! calls - inference never mutates model state, making concurrent use from
//! the web server safe.
//!
//! [`HashEmbedder`] is a deterministic feature-hashing fallback for offline
//! runs and tests: no downloads, no model files, stable output across
//! processes. It captures token overlap rather than meaning, which is
//! sufficient everywhere the embedder is treated as an opaque signal source.

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use once_cell::sync::OnceCell;

/// Embedding dimension of the hash embedder (matches MiniLM so the two
/// implementations are interchangeable downstream).
pub const HASH_EMBEDDER_DIMENSION: usize = 384;

/// Errors from the semantic scoring layer.
#[derive(Debug, thiserror::Error)]
pub enum SemanticError {
    /// The embedding model could not be initialized (missing weights,
    /// download failure). Fatal for the ranking call; there is no retry.
    #[error("embedding model unavailable: {0}")]
    ModelLoad(String),

    /// Inference failed on otherwise valid input.
    #[error("embedding inference failed: {0}")]
    Inference(String),
}

/// Seam between the ranking engine and the embedding backend.
///
/// Implementations must be safe for concurrent read-only use; the engine
/// embeds the query and every candidate of a batch through the same
/// instance within one call.
pub trait Embedder: Send + Sync {
    /// Short identifier for logs and API responses.
    fn name(&self) -> &'static str;

    /// Embed each text into a fixed-length dense vector, in input order.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticError>;
}

/// MiniLM sentence embedder backed by `fastembed`.
pub struct FastEmbedEmbedder {
    model: TextEmbedding,
}

impl FastEmbedEmbedder {
    /// Initialize the model, downloading weights on first use if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticError::ModelLoad`] if the model cannot be
    /// initialized.
    pub fn new() -> Result<Self, SemanticError> {
        let options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
        let model = TextEmbedding::try_new(options)
            .map_err(|e| SemanticError::ModelLoad(e.to_string()))?;
        Ok(Self { model })
    }
}

impl Embedder for FastEmbedEmbedder {
    fn name(&self) -> &'static str {
        "all-MiniLM-L6-v2"
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticError> {
        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| SemanticError::Inference(e.to_string()))
    }
}

/// Deterministic feature-hashing embedder (offline fallback).
///
/// Tokens are hashed into a fixed number of buckets with a sign bit, counts
/// accumulated, and the vector L2-normalized. Texts with no tokens embed to
/// the zero vector, which the cosine guard maps to similarity 0.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self {
            dimension: HASH_EMBEDDER_DIMENSION,
        }
    }
}

impl HashEmbedder {
    #[must_use]
    pub fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in text.to_lowercase().split_whitespace() {
            let hash = fxhash::hash64(token.as_bytes());
            #[allow(clippy::cast_possible_truncation)]
            let bucket = (hash % self.dimension as u64) as usize;
            // Top bit as sign keeps the expected dot product of unrelated
            // texts near zero.
            let sign = if hash >> 63 == 1 { -1.0 } else { 1.0 };
            vector[bucket] += sign;
        }

        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Embedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "feature-hash"
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SemanticError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

static ML_EMBEDDER: OnceCell<FastEmbedEmbedder> = OnceCell::new();
static HASH_EMBEDDER: OnceCell<HashEmbedder> = OnceCell::new();

/// Process-wide shared embedder.
///
/// The MiniLM model is initialized lazily on first use and reused by every
/// subsequent ranking call in the process; the hash embedder is returned
/// when `offline` is set.
///
/// # Errors
///
/// Returns [`SemanticError::ModelLoad`] if the MiniLM model cannot be
/// initialized. A failed initialization is retried on the next call, which
/// matters only for transient download failures.
pub fn shared_embedder(offline: bool) -> Result<&'static dyn Embedder, SemanticError> {
    if offline {
        Ok(HASH_EMBEDDER.get_or_init(HashEmbedder::default))
    } else {
        Ok(ML_EMBEDDER.get_or_try_init(FastEmbedEmbedder::new)?)
    }
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero magnitude (e.g. an empty text
/// under the hash embedder) instead of dividing by zero. The result is not
/// assumed non-negative by callers.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom > 0.0 {
        dot / denom
    } else {
        0.0
    }
}

/// Raw semantic score of every document against the query, in document
/// order.
///
/// The query and all documents are embedded in a single call so the same
/// model instance and preprocessing apply to both sides.
///
/// # Errors
///
/// Propagates embedding failures from the backend.
pub fn similarities(
    embedder: &dyn Embedder,
    query: &str,
    documents: &[&str],
) -> Result<Vec<f64>, SemanticError> {
    if documents.is_empty() {
        return Ok(Vec::new());
    }

    let mut texts: Vec<&str> = Vec::with_capacity(documents.len() + 1);
    texts.push(query);
    texts.extend_from_slice(documents);

    let mut vectors = embedder.embed(&texts)?;
    if vectors.len() != documents.len() + 1 {
        return Err(SemanticError::Inference(format!(
            "embedder returned {} vectors for {} texts",
            vectors.len(),
            texts.len()
        )));
    }

    let doc_vectors = vectors.split_off(1);
    let query_vector = &vectors[0];

    Ok(doc_vectors
        .iter()
        .map(|v| cosine_similarity(query_vector, v))
        .collect())
}
