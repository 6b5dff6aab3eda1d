//! Exact skill-coverage scoring.
//!
//! A skill is matched iff its normalized form appears verbatim as a
//! substring of the candidate's normalized text. There is deliberately no
//! fuzzy or stemmed matching: the matched/missing split is shown to the end
//! user and has to be auditable at a glance.

use crate::text::Normalizer;

/// Safely convert usize to f64 for the coverage fraction.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Matched/missing split of the required skills for one candidate.
///
/// Invariant: `matched` and `missing` partition the required-skill list -
/// every skill lands in exactly one of the two, case-preserved from the
/// caller's spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCoverage {
    /// Skills found in the candidate text, in required-skill order.
    pub matched: Vec<String>,

    /// Skills not found, in required-skill order.
    pub missing: Vec<String>,

    /// `|matched| / |required|`; 0.0 for an empty skill list.
    pub coverage: f64,
}

impl SkillCoverage {
    /// Assess the required skills against a candidate's normalized text.
    ///
    /// Skills are normalized through the same transform as the text so
    /// punctuation inside a skill ("node.js") matches the way the document
    /// text was normalized. A skill that normalizes to the empty string can
    /// never be meaningfully found and counts as missing.
    #[must_use]
    pub fn assess(normalized_text: &str, required_skills: &[String], normalizer: &Normalizer) -> Self {
        let mut matched = Vec::new();
        let mut missing = Vec::new();

        for skill in required_skills {
            let needle = normalizer.normalize(skill);
            if !needle.is_empty() && normalized_text.contains(&needle) {
                matched.push(skill.clone());
            } else {
                missing.push(skill.clone());
            }
        }

        let coverage = if required_skills.is_empty() {
            0.0
        } else {
            count_to_f64(matched.len()) / count_to_f64(required_skills.len())
        };

        Self {
            matched,
            missing,
            coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(text: &str, skills: &[&str]) -> SkillCoverage {
        let normalizer = Normalizer::default();
        let normalized = normalizer.normalize(text);
        let skills: Vec<String> = skills.iter().map(|s| (*s).to_string()).collect();
        SkillCoverage::assess(&normalized, &skills, &normalizer)
    }

    #[test]
    fn test_partial_coverage() {
        let c = assess(
            "Built data pipelines in Python on AWS.",
            &["Python", "AWS", "Docker"],
        );
        assert_eq!(c.matched, vec!["Python", "AWS"]);
        assert_eq!(c.missing, vec!["Docker"]);
        assert!((c.coverage - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_coverage() {
        let c = assess("Graphic designer portfolio", &["Python", "AWS", "Docker"]);
        assert!(c.matched.is_empty());
        assert_eq!(c.missing, vec!["Python", "AWS", "Docker"]);
        assert_eq!(c.coverage, 0.0);
    }

    #[test]
    fn test_full_coverage() {
        let c = assess("python, aws, docker everywhere", &["Python", "AWS", "Docker"]);
        assert_eq!(c.matched.len(), 3);
        assert!(c.missing.is_empty());
        assert!((c.coverage - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_case_insensitive() {
        let c = assess("POSTGRESQL admin", &["PostgreSQL"]);
        assert_eq!(c.matched, vec!["PostgreSQL"]);
    }

    #[test]
    fn test_empty_skill_list_never_divides_by_zero() {
        let c = assess("any text", &[]);
        assert!(c.matched.is_empty());
        assert!(c.missing.is_empty());
        assert_eq!(c.coverage, 0.0);
    }

    #[test]
    fn test_skill_with_punctuation_matches_normalized_text() {
        // "node.js" normalizes to "node js", and so does the document text.
        let c = assess("Experienced Node.js developer", &["Node.js"]);
        assert_eq!(c.matched, vec!["Node.js"]);
    }

    #[test]
    fn test_multiword_skill() {
        let c = assess("Focus on machine learning systems", &["machine learning"]);
        assert_eq!(c.matched, vec!["machine learning"]);
    }

    #[test]
    fn test_matched_preserves_caller_case() {
        let c = assess("terraform and ansible", &["Terraform", "Ansible"]);
        assert_eq!(c.matched, vec!["Terraform", "Ansible"]);
    }
}
