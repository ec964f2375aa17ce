//! Graph RAG Context Builder & QA Library
//!
//! This library provides tools to:
//! - Extract entities from natural-language questions with a self-correcting LLM loop
//! - Match entities to knowledge graph nodes via vector similarity search (Neo4j)
//! - Traverse multi-hop entity relationships and render directional narratives
//! - Fetch document chunks attached to matched graph nodes
//! - Fuse graph and chunk evidence into a single context string per strategy
//! - Generate answers with retrieved context and run batch model trials

pub mod config;
pub mod error;
pub mod graph;
pub mod integrations;
pub mod prompts;
pub mod retrieval;

// Re-export common types
pub use config::Config;
pub use error::{Error, Result};
pub use graph::{ChunkRecord, GraphStore, PathDirection, PathRecord, PathStep, ScoredNode};
pub use integrations::OllamaClient;
pub use retrieval::{
    ChunkRetriever, ContextBuilder, Embedder, EntityExtractor, GraphRetriever, ResponseGenerator,
    Strategy,
};

// Commands module uses re-exported types, so it must be declared after the re-exports
pub mod commands;
