//! Error types for the graph RAG pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Entity extraction failed after {attempts} attempts")]
    Extraction {
        attempts: usize,
        /// Correction messages accumulated across the retry loop.
        history: Vec<String>,
    },

    #[error("Similarity search returned no matches: {0}")]
    NoMatch(String),

    #[error("Graph store error: {0}")]
    Store(String),

    #[error("Completion service error: {0}")]
    Completion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<neo4rs::Error> for Error {
    fn from(err: neo4rs::Error) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}
