//! Structured verdict returned by the reasoning step.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approve,
    ApproveWithNits,
    RequestChanges,
    NoCoverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Nit,
    Minor,
    Major,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewIssue {
    pub id: String,
    pub severity: Severity,
    pub description: String,
    #[serde(default)]
    pub affected_code: Option<String>,
    #[serde(default)]
    pub rule_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositiveFeedbackItem {
    pub message: String,
    #[serde(default)]
    pub rule_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub verdict: Verdict,
    pub summary: String,
    #[serde(default)]
    pub positive_feedback: Vec<PositiveFeedbackItem>,
    #[serde(default)]
    pub issues: Vec<ReviewIssue>,
}

pub const NO_COVERAGE_SUMMARY: &str = "No applicable coding standards could be confidently matched for this code and language. \
The reviewer will stay silent rather than guess.";

impl ReviewResponse {
    /// The abstention returned when no rule applies to a request.
    pub fn no_coverage() -> Self {
        Self {
            verdict: Verdict::NoCoverage,
            summary: NO_COVERAGE_SUMMARY.to_string(),
            positive_feedback: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Parse a reasoning step's JSON reply.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| anyhow::anyhow!("Reviewer did not return valid JSON: {}\nRaw content: {}", e, raw))
    }

    /// Every rule id cited by an issue or a positive note, first-seen order.
    pub fn cited_rule_ids(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        let cited = self
            .issues
            .iter()
            .flat_map(|i| i.rule_ids.iter())
            .chain(self.positive_feedback.iter().flat_map(|p| p.rule_ids.iter()));
        for id in cited {
            if !out.contains(&id.as_str()) {
                out.push(id);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reviewer_reply() {
        let raw = r#"{
            "verdict": "approve_with_nits",
            "summary": "Mostly fine.",
            "positive_feedback": [{"message": "Clear names", "rule_ids": ["NAM-1"]}],
            "issues": [{"id": "ISSUE-1", "severity": "nit", "description": "Long function", "rule_ids": ["FN-1", "NAM-1"]}]
        }"#;
        let response = ReviewResponse::from_json(raw).unwrap();
        assert_eq!(response.verdict, Verdict::ApproveWithNits);
        assert_eq!(response.issues[0].severity, Severity::Nit);
        assert_eq!(response.issues[0].affected_code, None);
        assert_eq!(response.cited_rule_ids(), vec!["FN-1", "NAM-1"]);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let response = ReviewResponse::from_json(r#"{"verdict": "approve", "summary": "ok"}"#).unwrap();
        assert!(response.issues.is_empty());
        assert!(response.positive_feedback.is_empty());
    }

    #[test]
    fn rejects_unknown_verdict() {
        let err = ReviewResponse::from_json(r#"{"verdict": "maybe", "summary": "?"}"#).unwrap_err();
        assert!(err.to_string().contains("Raw content"));
    }

    #[test]
    fn no_coverage_serializes_snake_case() {
        let json = serde_json::to_value(ReviewResponse::no_coverage()).unwrap();
        assert_eq!(json["verdict"], "no_coverage");
    }
}
