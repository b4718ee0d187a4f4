//! sensei-core
//!
//! Rule types, the corpus parser and its load-once handle, configuration, and
//! the seams (`RuleIndex`, `Reviewer`) the retrieval crates plug into.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod review;
pub mod traits;
pub mod types;

pub use corpus::{Corpus, CorpusHandle};
pub use error::{Error, Result};
