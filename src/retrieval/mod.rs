//! Graph RAG retrieval pipeline.
//!
//! Builds the context string for a question-answering prompt by combining
//! vector similarity search with multi-hop graph traversal:
//! - extract entities from the question with a self-correcting LLM loop
//! - match each entity to its nearest indexed graph node
//! - walk entity relationships and render them as a directional narrative
//! - fetch the document chunks nearest to the question
//! - fuse both kinds of evidence according to the retrieval strategy

pub mod chunks;
pub mod context;
pub mod embedder;
pub mod extractor;
pub mod generator;
pub mod graph_retriever;

pub use chunks::{render_chunks, ChunkRetriever};
pub use context::{ContextBuilder, Strategy, CHUNK_CONTEXT_HEADER, HYBRID_CONNECTIVE};
pub use embedder::Embedder;
pub use extractor::{parse_entity_list, EntityExtractor, Extraction, ParseFailure};
pub use generator::{GeneratedAnswer, ResponseGenerator};
pub use graph_retriever::{format_path, GraphRetriever};
