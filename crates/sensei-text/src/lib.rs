//! sensei-text
//!
//! Term analysis built on tantivy's tokenizer pipeline and an in-memory TF-IDF
//! index that ranks standards rules by cosine similarity.

pub mod index;
pub mod tantivy_utils;

pub use index::TfIdfIndex;
pub use tantivy_utils::TermAnalyzer;
