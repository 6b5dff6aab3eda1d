use crate::core::candidate::Candidate;
use crate::core::query::RankQuery;
use crate::ranking::aggregate::{self, ScoreRecord, SignalWeights};
use crate::ranking::lexical::Bm25Model;
use crate::ranking::semantic::{self, Embedder, SemanticError};
use crate::ranking::skills::SkillCoverage;
use crate::text::{tokenize, Normalizer, NormalizerConfig};

/// Errors from a ranking call.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    /// The semantic backend failed - model unavailable or inference error.
    /// Fatal for the call; the core performs no retries.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

/// Configuration for the ranking engine.
#[derive(Debug, Clone, Default)]
pub struct RankingConfig {
    /// Signal weights applied by the aggregator.
    pub weights: SignalWeights,
    /// Normalizer settings shared by tokenization and skill matching.
    pub normalizer: NormalizerConfig,
}

/// The hybrid ranking engine.
///
/// One `rank` call is a synchronous batch computation: all statistics
/// (BM25, min-max ranges) are built from the supplied batch and discarded
/// with it. The engine borrows its embedder, which is shared process-wide
/// and used read-only, so concurrent calls are safe.
pub struct RankingEngine<'a> {
    embedder: &'a dyn Embedder,
    config: RankingConfig,
}

impl<'a> RankingEngine<'a> {
    /// Create an engine with default configuration.
    pub fn new(embedder: &'a dyn Embedder) -> Self {
        Self {
            embedder,
            config: RankingConfig::default(),
        }
    }

    /// Create an engine with custom configuration.
    pub fn with_config(embedder: &'a dyn Embedder, config: RankingConfig) -> Self {
        Self { embedder, config }
    }

    /// Rank a batch of candidates against the query.
    ///
    /// Returns records sorted descending by final score; exact ties keep
    /// input order. An empty batch returns an empty list - ranking nothing
    /// is valid, not an error. When the query carries no required skills,
    /// the effective skills weight is clamped to zero so a nonzero
    /// `weights.skills` cannot silently reward universal zero coverage.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::Semantic`] if the embedding backend fails.
    pub fn rank(
        &self,
        query: &RankQuery,
        candidates: &[Candidate],
    ) -> Result<Vec<ScoreRecord>, RankError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let normalizer = Normalizer::new(self.config.normalizer.clone());

        let normalized_query = normalizer.normalize(&query.text);
        let query_tokens = tokenize(&normalized_query);

        let normalized_docs: Vec<String> = candidates
            .iter()
            .map(|c| normalizer.normalize(&c.raw_text))
            .collect();

        // Lexical: batch-local BM25.
        let doc_tokens: Vec<Vec<String>> = normalized_docs.iter().map(|d| tokenize(d)).collect();
        let bm25 = Bm25Model::fit(&doc_tokens);
        let lexical_raw = bm25.scores(&query_tokens);

        // Semantic: query and documents embedded through the same instance.
        let doc_refs: Vec<&str> = normalized_docs.iter().map(String::as_str).collect();
        let semantic_raw = semantic::similarities(self.embedder, &normalized_query, &doc_refs)?;

        // Skills: exact substring coverage.
        let coverages: Vec<SkillCoverage> = normalized_docs
            .iter()
            .map(|text| SkillCoverage::assess(text, &query.required_skills, &normalizer))
            .collect();

        let mut weights = self.config.weights.clamped();
        if query.required_skills.is_empty() {
            weights.skills = 0.0;
        }

        Ok(aggregate::combine(
            candidates,
            &lexical_raw,
            &semantic_raw,
            coverages,
            &weights,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::semantic::HashEmbedder;

    fn engine_with_weights(embedder: &HashEmbedder, weights: SignalWeights) -> RankingEngine<'_> {
        RankingEngine::with_config(
            embedder,
            RankingConfig {
                weights,
                normalizer: NormalizerConfig::default(),
            },
        )
    }

    #[test]
    fn test_empty_batch_returns_empty() {
        let embedder = HashEmbedder::default();
        let engine = RankingEngine::new(&embedder);
        let query = RankQuery::new("anything", vec!["Rust".into()]);
        assert!(engine.rank(&query, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_ranks_relevant_candidate_first() {
        let embedder = HashEmbedder::default();
        let engine = RankingEngine::new(&embedder);
        let query = RankQuery::new(
            "Python developer with AWS experience",
            vec!["Python".into(), "AWS".into()],
        );
        let batch = vec![
            Candidate::new("florist.txt", "Flower arrangement and shop management"),
            Candidate::new(
                "backend.txt",
                "Python developer, five years of AWS experience",
            ),
        ];

        let records = engine.rank(&query, &batch).unwrap();
        assert_eq!(records[0].identifier, "backend.txt");
        assert!(records[0].final_score > records[1].final_score);
    }

    #[test]
    fn test_skill_partition_invariant() {
        let embedder = HashEmbedder::default();
        let engine = RankingEngine::new(&embedder);
        let skills = vec!["Python".into(), "AWS".into(), "Docker".into()];
        let query = RankQuery::new("engineer", skills.clone());
        let batch = vec![Candidate::new("a.txt", "Python and docker user")];

        let records = engine.rank(&query, &batch).unwrap();
        let r = &records[0];
        let mut all: Vec<String> = r
            .matched_skills
            .iter()
            .chain(r.missing_skills.iter())
            .cloned()
            .collect();
        all.sort();
        let mut expected = skills;
        expected.sort();
        assert_eq!(all, expected);
        for m in &r.matched_skills {
            assert!(!r.missing_skills.contains(m));
        }
    }

    #[test]
    fn test_empty_skill_list_clamps_skills_weight() {
        let embedder = HashEmbedder::default();
        // Positive skills weight with no skills must not fail and must not
        // leak into the final score.
        let engine = engine_with_weights(
            &embedder,
            SignalWeights {
                lexical: 0.0,
                semantic: 0.0,
                skills: 1.0,
            },
        );
        let query = RankQuery::new("engineer", vec![]);
        let batch = vec![
            Candidate::new("a.txt", "some text"),
            Candidate::new("b.txt", "other words"),
        ];

        let records = engine.rank(&query, &batch).unwrap();
        for r in &records {
            assert_eq!(r.final_score, 0.0);
            assert_eq!(r.coverage, 0.0);
        }
    }

    #[test]
    fn test_empty_query_text_no_crash() {
        let embedder = HashEmbedder::default();
        let engine = RankingEngine::new(&embedder);
        let query = RankQuery::new("", vec!["Rust".into()]);
        let batch = vec![
            Candidate::new("a.txt", "Rust developer"),
            Candidate::new("b.txt", "Accountant"),
        ];

        let records = engine.rank(&query, &batch).unwrap();
        for r in &records {
            assert!(r.final_score.is_finite());
            assert_eq!(r.lexical_score, 0.0);
        }
    }

    #[test]
    fn test_idempotent_bit_for_bit() {
        let embedder = HashEmbedder::default();
        let engine = RankingEngine::new(&embedder);
        let query = RankQuery::new(
            "Systems engineer, Rust and Kubernetes",
            vec!["Rust".into(), "Kubernetes".into()],
        );
        let batch = vec![
            Candidate::new("a.txt", "Rust services on Kubernetes clusters"),
            Candidate::new("b.txt", "Java monolith maintenance"),
            Candidate::new("c.txt", "Rust CLI tooling"),
        ];

        let first = engine.rank(&query, &batch).unwrap();
        let second = engine.rank(&query, &batch).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_candidates_tie_in_input_order() {
        let embedder = HashEmbedder::default();
        let engine = RankingEngine::new(&embedder);
        let query = RankQuery::new("engineer", vec![]);
        let text = "identical resume text";
        let batch = vec![
            Candidate::new("first.txt", text),
            Candidate::new("second.txt", text),
            Candidate::new("third.txt", text),
        ];

        let records = engine.rank(&query, &batch).unwrap();
        let order: Vec<&str> = records.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(order, vec!["first.txt", "second.txt", "third.txt"]);
    }
}
