use crate::error::Result;
use crate::review::ReviewResponse;
use crate::types::{RetrievedRule, ReviewRequest, RuleChunk};

/// A similarity index over a fixed set of rules, built once and queried read-only.
pub trait RuleIndex: Send + Sync + Sized {
    /// Build over `chunks` in order. An empty slice yields an index whose
    /// queries fail with `Error::IndexNotReady`.
    fn build(chunks: &[RuleChunk]) -> Self;

    /// Best matches for `text`, descending by score, scores strictly positive.
    /// `top_k = 0` returns every match.
    fn query(&self, text: &str, top_k: usize) -> Result<Vec<RetrievedRule>>;
}

/// The reasoning step that turns retrieved rules and code into a verdict.
pub trait Reviewer: Send + Sync {
    fn review(&self, request: &ReviewRequest, rules: &[RuleChunk]) -> anyhow::Result<ReviewResponse>;
}
