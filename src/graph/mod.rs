//! Neo4j-backed graph and vector store access.

pub mod models;
pub mod store;

pub use models::{ChunkRecord, PathDirection, PathRecord, PathStep, ScoredNode};
pub use store::{GraphStats, GraphStore};
