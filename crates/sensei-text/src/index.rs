use std::collections::HashMap;
use tracing::debug;

use sensei_core::error::{Error, Result};
use sensei_core::traits::RuleIndex;
use sensei_core::types::{RetrievedRule, RuleChunk};

use crate::tantivy_utils::TermAnalyzer;

/// Sparse row: `(term id, weight)` sorted by term id, L2-normalized.
type SparseVector = Vec<(usize, f32)>;

/// In-memory TF-IDF vector space over a fixed set of rules.
///
/// Term weight is raw count times `ln((1 + n) / (1 + df)) + 1`; rows and query
/// vectors are L2-normalized, so relevance is a plain dot product (cosine).
pub struct TfIdfIndex {
    chunks: Vec<RuleChunk>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    rows: Vec<SparseVector>,
    analyzer: TermAnalyzer,
}

impl TfIdfIndex {
    pub fn new(chunks: &[RuleChunk]) -> Self {
        let analyzer = TermAnalyzer::default();
        let tokenized: Vec<Vec<String>> = chunks.iter().map(|c| analyzer.terms(&c.text)).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        for terms in &tokenized {
            let mut seen_here: Vec<usize> = Vec::new();
            for term in terms {
                let next_id = vocabulary.len();
                let id = *vocabulary.entry(term.clone()).or_insert(next_id);
                if id == doc_freq.len() {
                    doc_freq.push(0);
                }
                if !seen_here.contains(&id) {
                    seen_here.push(id);
                    doc_freq[id] += 1;
                }
            }
        }

        let n = chunks.len() as f32;
        let idf: Vec<f32> = doc_freq.iter().map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0).collect();

        let rows: Vec<SparseVector> = tokenized
            .iter()
            .map(|terms| weigh(terms.iter().filter_map(|t| vocabulary.get(t).copied()), &idf))
            .collect();

        debug!(rules = chunks.len(), terms = vocabulary.len(), "built tf-idf index");
        Self { chunks: chunks.to_vec(), vocabulary, idf, rows, analyzer }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Inverse document frequency of `term` after analysis; 0.0 when unseen.
    pub fn idf(&self, term: &str) -> f32 {
        self.term_id(term).map_or(0.0, |id| self.idf[id])
    }

    /// Normalized weight of `term` in the rule at `position`; 0.0 when absent.
    pub fn weight(&self, position: usize, term: &str) -> f32 {
        let (Some(id), Some(row)) = (self.term_id(term), self.rows.get(position)) else {
            return 0.0;
        };
        row.binary_search_by_key(&id, |&(t, _)| t).map_or(0.0, |i| row[i].1)
    }

    /// Rules ranked by cosine similarity to `text`.
    ///
    /// Ties keep corpus order. Non-positive scores are dropped; `top_k = 0`
    /// keeps every remaining match.
    pub fn search(&self, text: &str, top_k: usize) -> Result<Vec<RetrievedRule>> {
        if self.chunks.is_empty() {
            return Err(Error::IndexNotReady);
        }
        let terms = self.analyzer.terms(text);
        let query = weigh(terms.iter().filter_map(|t| self.vocabulary.get(t).copied()), &self.idf);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, f32)> = self
            .rows
            .iter()
            .enumerate()
            .map(|(pos, row)| (pos, dot(&query, row)))
            .filter(|&(_, score)| score > 0.0)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        if top_k > 0 {
            scored.truncate(top_k);
        }

        Ok(scored
            .into_iter()
            .map(|(pos, score)| RetrievedRule { chunk: self.chunks[pos].clone(), score })
            .collect())
    }

    fn term_id(&self, term: &str) -> Option<usize> {
        let analyzed = self.analyzer.terms(term);
        match analyzed.as_slice() {
            [single] => self.vocabulary.get(single).copied(),
            _ => None,
        }
    }
}

impl RuleIndex for TfIdfIndex {
    fn build(chunks: &[RuleChunk]) -> Self {
        Self::new(chunks)
    }

    fn query(&self, text: &str, top_k: usize) -> Result<Vec<RetrievedRule>> {
        self.search(text, top_k)
    }
}

fn weigh(term_ids: impl Iterator<Item = usize>, idf: &[f32]) -> SparseVector {
    let mut counts: HashMap<usize, f32> = HashMap::new();
    for id in term_ids {
        *counts.entry(id).or_insert(0.0) += 1.0;
    }
    let mut row: SparseVector = counts.into_iter().map(|(id, tf)| (id, tf * idf[id])).collect();
    row.sort_unstable_by_key(|&(id, _)| id);
    let norm = row.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in &mut row {
            *w /= norm;
        }
    }
    row
}

fn dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
    let (mut i, mut j, mut sum) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
