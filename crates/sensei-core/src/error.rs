use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Standards directory not found: {}", .0.display())]
    CorpusNotFound(PathBuf),

    #[error("No standards rules found in: {}", .0.display())]
    CorpusEmpty(PathBuf),

    #[error("Duplicate rule id '{rule_id}' in {second_doc} (first defined in {first_doc})")]
    DuplicateRuleId {
        rule_id: String,
        first_doc: String,
        second_doc: String,
    },

    #[error("Vector index has not been built over any rules")]
    IndexNotReady,

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
