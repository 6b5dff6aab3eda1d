//! BM25 lexical relevance, built fresh per batch.
//!
//! The model compares candidates only to each other, never to an external
//! corpus: document frequencies and the average document length come from
//! the current batch alone and are discarded with it. IDF uses the
//! non-negative form `ln((N - df + 0.5) / (df + 0.5) + 1)` so raw scores
//! never go negative for common terms.

use std::collections::HashMap;

/// Term-frequency saturation parameter.
pub const BM25_K1: f64 = 1.5;
/// Document-length normalization parameter.
pub const BM25_B: f64 = 0.75;

/// Safely convert usize to f64 for score calculations.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// A BM25 model over one batch of tokenized documents.
///
/// Constructed with [`Bm25Model::fit`] and discarded after the ranking call;
/// there is no cross-call caching.
#[derive(Debug)]
pub struct Bm25Model {
    /// term -> inverse document frequency
    idf: HashMap<String, f64>,
    /// per-document term frequencies
    term_freqs: Vec<HashMap<String, u32>>,
    /// per-document length in tokens
    doc_lengths: Vec<usize>,
    /// average document length across the batch
    avgdl: f64,
}

impl Bm25Model {
    /// Build batch statistics from tokenized documents.
    ///
    /// An empty batch or empty documents are valid: empty documents simply
    /// contribute length 0 and score 0 against any query.
    #[must_use]
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let n = documents.len();

        let mut term_freqs: Vec<HashMap<String, u32>> = Vec::with_capacity(n);
        let mut doc_lengths: Vec<usize> = Vec::with_capacity(n);
        let mut doc_freqs: HashMap<String, usize> = HashMap::new();

        for tokens in documents {
            let mut tf: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *tf.entry(token.clone()).or_insert(0) += 1;
            }
            for term in tf.keys() {
                *doc_freqs.entry(term.clone()).or_insert(0) += 1;
            }
            doc_lengths.push(tokens.len());
            term_freqs.push(tf);
        }

        let total_len: usize = doc_lengths.iter().sum();
        let avgdl = if n == 0 {
            0.0
        } else {
            count_to_f64(total_len) / count_to_f64(n)
        };

        let n_f = count_to_f64(n);
        let idf = doc_freqs
            .into_iter()
            .map(|(term, df)| {
                let df = count_to_f64(df);
                // IDF: ln((N - df + 0.5) / (df + 0.5) + 1)
                (term, ((n_f - df + 0.5) / (df + 0.5) + 1.0).ln())
            })
            .collect();

        Self {
            idf,
            term_freqs,
            doc_lengths,
            avgdl,
        }
    }

    /// Number of documents the model was fit over.
    #[must_use]
    pub fn len(&self) -> usize {
        self.doc_lengths.len()
    }

    /// Returns `true` if the model was fit over an empty batch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc_lengths.is_empty()
    }

    /// Raw BM25 score of every document against the query tokens, in
    /// document order.
    ///
    /// Scores are unbounded and only meaningful relative to each other
    /// within this batch; the aggregator min-max normalizes them. An empty
    /// query yields 0.0 for every document.
    #[must_use]
    pub fn scores(&self, query_tokens: &[String]) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.term_freqs.len());

        for (i, tf_map) in self.term_freqs.iter().enumerate() {
            let dl = count_to_f64(self.doc_lengths[i]);
            let mut score = 0.0;

            for token in query_tokens {
                let Some(&tf) = tf_map.get(token) else {
                    continue;
                };
                let Some(&idf) = self.idf.get(token) else {
                    continue;
                };

                let tf = f64::from(tf);
                // Guard: a batch of all-empty documents has avgdl == 0, in
                // which case dl is also 0 and length normalization is moot.
                let len_ratio = if self.avgdl > 0.0 { dl / self.avgdl } else { 0.0 };
                let tf_norm = (tf * (BM25_K1 + 1.0)) / (tf + BM25_K1 * (1.0 - BM25_B + BM25_B * len_ratio));
                score += idf * tf_norm;
            }

            out.push(score);
        }

        out
    }
}
