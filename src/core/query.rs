use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The query one batch of candidates is ranked against: free-form job
/// description text plus an ordered list of required skills.
///
/// Skill order is caller-meaningful for display only; matching is
/// order-independent and case-insensitive. Duplicate skills (compared
/// case-insensitively) are collapsed at construction, keeping the first
/// spelling, so matched/missing splits behave as proper sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankQuery {
    /// Job description text.
    pub text: String,

    /// Required skills, case-preserved, deduplicated.
    pub required_skills: Vec<String>,
}

impl RankQuery {
    #[must_use]
    pub fn new(text: impl Into<String>, skills: Vec<String>) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let required_skills = skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.to_lowercase()))
            .collect();

        Self {
            text: text.into(),
            required_skills,
        }
    }

    /// Parse a comma-separated skill list as entered by an operator
    /// ("Python, AWS,Docker" -> ["Python", "AWS", "Docker"]).
    #[must_use]
    pub fn parse_skill_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
