//! Deterministic text normalization shared by all scoring signals.
//!
//! The transform is: lowercase, replace a configurable set of punctuation
//! characters with spaces, collapse whitespace runs, trim. It is idempotent,
//! so already-normalized text passes through unchanged.

/// Punctuation characters stripped by default.
///
/// The set is intentionally small: it separates sentence and list
/// punctuation from words ("Python, AWS." or "(Docker)") without mangling
/// tokens where interior punctuation is meaningful, e.g. "ci/cd" or "c++".
pub const DEFAULT_PUNCTUATION: &[char] = &['.', ',', '(', ')', ';', ':'];

/// Configuration for the text normalizer.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Characters replaced with a space before tokenization.
    pub punctuation: Vec<char>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            punctuation: DEFAULT_PUNCTUATION.to_vec(),
        }
    }
}

/// Applies the normalization transform to query text, candidate text, and
/// skill strings alike.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalize raw text: lowercase, punctuation to spaces, collapsed
    /// whitespace, trimmed. Idempotent.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let replaced: String = lowered
            .chars()
            .map(|c| {
                if self.config.punctuation.contains(&c) {
                    ' '
                } else {
                    c
                }
            })
            .collect();

        // Collapsing whitespace runs keeps multi-word skills matchable as
        // substrings ("machine. learning" and "machine learning" normalize
        // to the same form) and makes the transform idempotent.
        let mut out = String::with_capacity(replaced.len());
        for token in replaced.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(token);
        }
        out
    }
}

/// Split normalized text into tokens on whitespace.
///
/// No stemming and no stopword removal: the lexical scorer compares
/// candidates only to each other, and dropping terms would make the signal
/// harder to audit.
#[must_use]
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized.split_whitespace().map(str::to_owned).collect()
}
