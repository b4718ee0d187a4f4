//! sensei-retrieval
//!
//! Facet planning, multi-facet retrieval with per-rule deduplication, prompt
//! rendering, and the review pipeline that short-circuits when no rule applies.

pub mod facets;
pub mod pipeline;
pub mod prompt;
pub mod retriever;

pub use facets::FacetPlanner;
pub use pipeline::{RetrievalOutcome, ReviewPipeline};
pub use retriever::Retriever;
