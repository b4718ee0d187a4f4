//! Domain types shared by the corpus loader, the index and the retriever.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type RuleId = String;

/// Scope tag that makes a rule apply to every language.
pub const ALL_LANGUAGES: &str = "all-languages";

/// One citable rule extracted from a standards document.
///
/// - `rule_id`: identifier from the `Rule ID:` line, unique within a corpus load
/// - `scope`: comma-separated applicability tags (`python`, `http-apis`, `all-languages`)
/// - `doc_name`: file name of the source document
/// - `section_title`: heading in effect when the rule started
/// - `text`: the rule body, trimmed and never empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleChunk {
    pub rule_id: RuleId,
    pub scope: String,
    pub doc_name: String,
    pub section_title: String,
    pub text: String,
}

impl RuleChunk {
    /// Whether this rule is in scope for `language`.
    ///
    /// `all-languages` anywhere in the scope matches every input. Otherwise the
    /// trimmed, lowercased language must equal one of the comma-separated tags.
    pub fn applies_to(&self, language: &str) -> bool {
        let scope = self.scope.to_lowercase();
        if scope.contains(ALL_LANGUAGES) {
            return true;
        }
        let language = language.trim().to_lowercase();
        if language.is_empty() {
            return false;
        }
        scope.split(',').map(str::trim).any(|tag| tag == language)
    }
}

/// A rule returned by an index query. `score` is always strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedRule {
    pub chunk: RuleChunk,
    pub score: f32,
}

/// One code-quality aspect used to drive a retrieval query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Facet(String);

impl Facet {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a caller submits for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub language: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ReviewRequest {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self { language: language.into(), code: code.into(), context: None }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(scope: &str) -> RuleChunk {
        RuleChunk {
            rule_id: "R-1".to_string(),
            scope: scope.to_string(),
            doc_name: "a.md".to_string(),
            section_title: "A".to_string(),
            text: "body".to_string(),
        }
    }

    #[test]
    fn all_languages_matches_anything() {
        let c = chunk("all-languages");
        assert!(c.applies_to("python"));
        assert!(c.applies_to("cobol"));
        assert!(c.applies_to(""));
    }

    #[test]
    fn scope_tokens_match_case_insensitively() {
        let c = chunk("JavaScript, typescript");
        assert!(c.applies_to("  TypeScript "));
        assert!(c.applies_to("javascript"));
        assert!(!c.applies_to("java"));
    }

    #[test]
    fn empty_language_never_matches_an_empty_tag() {
        let c = chunk("python,");
        assert!(!c.applies_to("   "));
    }
}
