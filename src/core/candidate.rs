use serde::{Deserialize, Serialize};

/// A candidate resume: a display identifier plus the extracted plain text.
///
/// The identifier is typically the uploaded filename and is not guaranteed
/// unique - two candidates may share a name and are still ranked
/// independently. The text is whatever the extraction layer produced; empty
/// text is valid and simply scores at the bottom of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display name (usually the source filename).
    pub identifier: String,

    /// Extracted plain text, unnormalized. The ranking engine normalizes
    /// it per call; the candidate itself is never mutated.
    pub raw_text: String,
}

impl Candidate {
    #[must_use]
    pub fn new(identifier: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            raw_text: raw_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let c = Candidate::new("alice.pdf", "Python developer");
        assert_eq!(c.identifier, "alice.pdf");
        assert_eq!(c.raw_text, "Python developer");
    }
}
