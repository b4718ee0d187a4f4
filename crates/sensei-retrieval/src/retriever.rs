use std::collections::HashMap;
use std::marker::PhantomData;
use tracing::{debug, info};

use sensei_core::config::RetrievalSettings;
use sensei_core::corpus::scope_chunks;
use sensei_core::error::Result;
use sensei_core::traits::RuleIndex;
use sensei_core::types::{Facet, RetrievedRule, ReviewRequest, RuleChunk};
use sensei_text::TfIdfIndex;

use crate::facets::FacetPlanner;

/// Multi-facet retrieval over a language-scoped slice of the corpus.
///
/// Every call builds its own index, so one retriever can serve concurrent
/// requests without locking.
pub struct Retriever<I = TfIdfIndex> {
    settings: RetrievalSettings,
    planner: FacetPlanner,
    _index: PhantomData<fn() -> I>,
}

impl Default for Retriever<TfIdfIndex> {
    fn default() -> Self {
        Self::new(RetrievalSettings::default())
    }
}

impl<I: RuleIndex> Retriever<I> {
    pub fn new(settings: RetrievalSettings) -> Self {
        Self { settings, planner: FacetPlanner, _index: PhantomData }
    }

    pub fn planner(&self) -> &FacetPlanner {
        &self.planner
    }

    /// The ranked, deduplicated rules that apply to `request`.
    pub fn retrieve(&self, request: &ReviewRequest, chunks: &[RuleChunk]) -> Result<Vec<RuleChunk>> {
        Ok(self.retrieve_scored(request, chunks)?.into_iter().map(|r| r.chunk).collect())
    }

    /// Same as [`Retriever::retrieve`] but keeps each rule's best facet score.
    pub fn retrieve_scored(&self, request: &ReviewRequest, chunks: &[RuleChunk]) -> Result<Vec<RetrievedRule>> {
        let scoped = scope_chunks(chunks, &request.language);
        if scoped.is_empty() {
            info!(language = %request.language, "no rules in scope for language");
            return Ok(Vec::new());
        }

        let index = I::build(&scoped);
        let facets = self.planner.plan_for(request);
        let code_prefix: String = request.code.chars().take(self.settings.code_prefix_chars).collect();

        let mut merged = MergedHits::default();
        for facet in &facets {
            let query = facet_query(&request.language, facet, &code_prefix);
            let hits = index.query(&query, self.settings.top_k_per_facet)?;
            debug!(facet = %facet, hits = hits.len(), "facet query");
            for hit in hits.into_iter().filter(|h| h.score >= self.settings.min_score) {
                merged.offer(hit);
            }
        }

        let rules = merged.into_ranked();
        if rules.is_empty() {
            info!(language = %request.language, scoped = scoped.len(), "no rule cleared the score threshold");
        } else {
            debug!(rules = rules.len(), facets = facets.len(), "retrieved rules");
        }
        Ok(rules)
    }
}

fn facet_query(language: &str, facet: &Facet, code_prefix: &str) -> String {
    format!("Language: {language}\nFacet: {facet}\n\nCode snippet:\n{code_prefix}")
}

/// Best hit per rule id, remembering first-seen order for tie-breaks.
#[derive(Default)]
struct MergedHits {
    by_id: HashMap<String, usize>,
    hits: Vec<RetrievedRule>,
}

impl MergedHits {
    fn offer(&mut self, hit: RetrievedRule) {
        match self.by_id.get(&hit.chunk.rule_id) {
            Some(&pos) => {
                if hit.score > self.hits[pos].score {
                    self.hits[pos] = hit;
                }
            }
            None => {
                self.by_id.insert(hit.chunk.rule_id.clone(), self.hits.len());
                self.hits.push(hit);
            }
        }
    }

    fn into_ranked(mut self) -> Vec<RetrievedRule> {
        self.hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        self.hits
    }
}
