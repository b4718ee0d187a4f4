use std::sync::Arc;
use tracing::info;

use sensei_core::corpus::CorpusHandle;
use sensei_core::review::ReviewResponse;
use sensei_core::traits::{Reviewer, RuleIndex};
use sensei_core::types::{ReviewRequest, RuleChunk};
use sensei_text::TfIdfIndex;

use crate::retriever::Retriever;

/// What retrieval hands upstream: either rules to ground on, or an explicit abstention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalOutcome {
    NoCoverage,
    Rules(Vec<RuleChunk>),
}

impl RetrievalOutcome {
    pub fn is_no_coverage(&self) -> bool {
        matches!(self, Self::NoCoverage)
    }
}

/// Shared corpus + retriever, the entry point a front end calls per request.
pub struct ReviewPipeline<I = TfIdfIndex> {
    corpus: Arc<CorpusHandle>,
    retriever: Retriever<I>,
}

impl<I: RuleIndex> ReviewPipeline<I> {
    pub fn new(corpus: Arc<CorpusHandle>, retriever: Retriever<I>) -> Self {
        Self { corpus, retriever }
    }

    pub fn retriever(&self) -> &Retriever<I> {
        &self.retriever
    }

    /// Retrieve rules for `request`. Fails only if the corpus cannot be loaded.
    pub fn outcome(&self, request: &ReviewRequest) -> anyhow::Result<RetrievalOutcome> {
        let corpus = self.corpus.get()?;
        let rules = self.retriever.retrieve(request, corpus.chunks())?;
        if rules.is_empty() {
            info!(language = %request.language, "no coverage");
            return Ok(RetrievalOutcome::NoCoverage);
        }
        Ok(RetrievalOutcome::Rules(rules))
    }

    /// Retrieve, then ask `reviewer` for a verdict. The reviewer is never called
    /// without rules; a no-coverage outcome yields [`ReviewResponse::no_coverage`].
    pub fn run(&self, request: &ReviewRequest, reviewer: &dyn Reviewer) -> anyhow::Result<ReviewResponse> {
        match self.outcome(request)? {
            RetrievalOutcome::NoCoverage => Ok(ReviewResponse::no_coverage()),
            RetrievalOutcome::Rules(rules) => reviewer.review(request, &rules),
        }
    }
}
