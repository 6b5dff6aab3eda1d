//! Score aggregation: normalization, weighting, and ordering.
//!
//! Raw lexical and semantic scores are min-max normalized independently
//! across the batch, combined with the coverage fraction under the caller's
//! weights, and scaled to a 0-100 display range.
//!
//! Full-coverage policy ("natural-sum"): a candidate matching every
//! required skill contributes `1.0 * w_skills` like any other coverage
//! value - full coverage does not force the final score to the maximum.
//! The final score is clamped to [0, 100] independently, so the display
//! bound holds even when the caller's weights sum to more than 1.

use serde::Serialize;

use crate::core::candidate::Candidate;
use crate::core::types::MatchStrength;
use crate::ranking::skills::SkillCoverage;

/// Spread below which a signal is considered constant across the batch.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Scale factor from the unit interval to the display range.
pub const DISPLAY_SCALE: f64 = 100.0;

/// One ranked result with its full score breakdown.
///
/// `lexical_score` and `semantic_score` are the batch-normalized signals in
/// [0, 1]; `final_score` is the weighted combination scaled to [0, 100].
/// All values carry full precision - display layers round with [`round2`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    /// Candidate display name.
    pub identifier: String,

    /// Min-max normalized BM25 score, [0, 1].
    pub lexical_score: f64,

    /// Min-max normalized cosine similarity, [0, 1].
    pub semantic_score: f64,

    /// Fraction of required skills present, [0, 1].
    pub coverage: f64,

    /// Required skills found in the candidate text, case-preserved.
    pub matched_skills: Vec<String>,

    /// Required skills not found, case-preserved.
    pub missing_skills: Vec<String>,

    /// Weighted combined score, [0, 100].
    pub final_score: f64,

    /// Presentation classification of `final_score`.
    pub strength: MatchStrength,
}

/// Caller-supplied weights for the three signals.
///
/// There is no sum-to-1 invariant: the final score is a weighted sum, not a
/// convex combination. Negative values are clamped to zero before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, serde::Deserialize)]
pub struct SignalWeights {
    /// Weight of the BM25 signal.
    pub lexical: f64,
    /// Weight of the embedding-similarity signal.
    pub semantic: f64,
    /// Weight of the skill-coverage signal.
    pub skills: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            lexical: 0.3,
            semantic: 0.4,
            skills: 0.3,
        }
    }
}

impl SignalWeights {
    /// Copy with negative components clamped to zero.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            lexical: self.lexical.max(0.0),
            semantic: self.semantic.max(0.0),
            skills: self.skills.max(0.0),
        }
    }
}

/// Min-max normalize values to [0, 1] using the batch's observed range.
///
/// A degenerate spread (all values identical within [`DEGENERATE_EPSILON`],
/// including single-element batches) maps every value to the constant 0.0 -
/// "no signal" rather than NaN.
#[must_use]
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = min_max(values) else {
        return Vec::new();
    };

    let range = max - min;
    if range < DEGENERATE_EPSILON {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - min) / range).collect()
}

/// Single-pass min/max computation.
fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for &v in values {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    Some((min, max))
}

/// Round to two decimal places for presentation.
///
/// Sorting and all internal comparisons use full precision; only display
/// layers (CLI printers, JSON responses) go through this.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Combine the three per-candidate signals into sorted [`ScoreRecord`]s.
///
/// The sort is stable and descending by full-precision final score, so
/// candidates with exactly equal scores keep their input order.
#[must_use]
pub(crate) fn combine(
    candidates: &[Candidate],
    lexical_raw: &[f64],
    semantic_raw: &[f64],
    skills: Vec<SkillCoverage>,
    weights: &SignalWeights,
) -> Vec<ScoreRecord> {
    let lexical_norm = min_max_normalize(lexical_raw);
    let semantic_norm = min_max_normalize(semantic_raw);

    let mut records: Vec<ScoreRecord> = candidates
        .iter()
        .zip(skills)
        .enumerate()
        .map(|(i, (candidate, coverage))| {
            let weighted = weights.lexical * lexical_norm[i]
                + weights.semantic * semantic_norm[i]
                + weights.skills * coverage.coverage;
            let final_score = (weighted * DISPLAY_SCALE).clamp(0.0, DISPLAY_SCALE);

            ScoreRecord {
                identifier: candidate.identifier.clone(),
                lexical_score: lexical_norm[i],
                semantic_score: semantic_norm[i],
                coverage: coverage.coverage,
                matched_skills: coverage.matched,
                missing_skills: coverage.missing,
                final_score,
                strength: MatchStrength::from_score(final_score),
            }
        })
        .collect();

    records.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Normalizer;

    #[test]
    fn test_min_max_endpoints() {
        let norm = min_max_normalize(&[3.0, 1.0, 5.0]);
        assert!((norm[2] - 1.0).abs() < 1e-12);
        assert!((norm[1] - 0.0).abs() < 1e-12);
        assert!(norm[0] > 0.0 && norm[0] < 1.0);
    }

    #[test]
    fn test_min_max_degenerate_is_constant_zero() {
        let norm = min_max_normalize(&[2.5, 2.5, 2.5]);
        assert_eq!(norm, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_min_max_single_value() {
        assert_eq!(min_max_normalize(&[7.0]), vec![0.0]);
    }

    #[test]
    fn test_min_max_empty() {
        assert!(min_max_normalize(&[]).is_empty());
    }

    #[test]
    fn test_min_max_never_nan() {
        for values in [vec![0.0, 0.0], vec![-1.0, -1.0], vec![1e-12, 0.0]] {
            for v in min_max_normalize(&values) {
                assert!(v.is_finite());
            }
        }
    }

    #[test]
    fn test_round2() {
        assert!((round2(0.666_666) - 0.67).abs() < 1e-12);
        assert!((round2(87.424_9) - 87.42).abs() < 1e-12);
        assert_eq!(round2(0.0), 0.0);
    }

    fn full_cov(skills: &[&str]) -> SkillCoverage {
        let normalizer = Normalizer::default();
        let skills: Vec<String> = skills.iter().map(|s| (*s).to_string()).collect();
        let text = skills.join(" ").to_lowercase();
        SkillCoverage::assess(&text, &skills, &normalizer)
    }

    fn no_cov(skills: &[&str]) -> SkillCoverage {
        let normalizer = Normalizer::default();
        let skills: Vec<String> = skills.iter().map(|s| (*s).to_string()).collect();
        SkillCoverage::assess("nothing relevant", &skills, &normalizer)
    }

    #[test]
    fn test_combine_sorts_descending() {
        let candidates = vec![Candidate::new("low", ""), Candidate::new("high", "")];
        let records = combine(
            &candidates,
            &[1.0, 5.0],
            &[0.1, 0.9],
            vec![no_cov(&["Rust"]), full_cov(&["Rust"])],
            &SignalWeights::default(),
        );
        assert_eq!(records[0].identifier, "high");
        assert_eq!(records[1].identifier, "low");
    }

    #[test]
    fn test_combine_clamps_to_display_range() {
        let candidates = vec![Candidate::new("a", ""), Candidate::new("b", "")];
        let heavy = SignalWeights {
            lexical: 1.0,
            semantic: 1.0,
            skills: 1.0,
        };
        let records = combine(
            &candidates,
            &[0.0, 10.0],
            &[0.0, 1.0],
            vec![no_cov(&["Rust"]), full_cov(&["Rust"])],
            &heavy,
        );
        for r in &records {
            assert!(r.final_score >= 0.0);
            assert!(r.final_score <= DISPLAY_SCALE);
        }
        assert_eq!(records[0].final_score, DISPLAY_SCALE);
    }

    #[test]
    fn test_combine_stable_on_exact_ties() {
        let candidates = vec![
            Candidate::new("first", ""),
            Candidate::new("second", ""),
            Candidate::new("third", ""),
        ];
        // Identical raw signals everywhere - every final score ties.
        let records = combine(
            &candidates,
            &[1.0, 1.0, 1.0],
            &[0.5, 0.5, 0.5],
            vec![no_cov(&[]), no_cov(&[]), no_cov(&[])],
            &SignalWeights::default(),
        );
        let order: Vec<&str> = records.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_degenerate_batch_finite_scores() {
        let candidates = vec![Candidate::new("a", ""), Candidate::new("b", "")];
        let records = combine(
            &candidates,
            &[0.0, 0.0],
            &[0.7, 0.7],
            vec![no_cov(&[]), no_cov(&[])],
            &SignalWeights::default(),
        );
        for r in &records {
            assert!(r.final_score.is_finite());
            assert_eq!(r.semantic_score, 0.0);
        }
    }

    #[test]
    fn test_clamped_weights() {
        let w = SignalWeights {
            lexical: -0.5,
            semantic: 0.4,
            skills: -0.0,
        };
        let c = w.clamped();
        assert_eq!(c.lexical, 0.0);
        assert_eq!(c.semantic, 0.4);
        assert_eq!(c.skills, 0.0);
    }
}
