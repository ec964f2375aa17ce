//! Context assembly for the answer prompt.

use super::chunks::{render_chunks, ChunkRetriever};
use super::graph_retriever::GraphRetriever;
use crate::config::Config;
use crate::graph::GraphStore;
use crate::integrations::OllamaClient;
use crate::Result;

/// Header announcing the chunk evidence format to the answering model.
pub const CHUNK_CONTEXT_HEADER: &str =
    "Given the following context in the format [(File Name, Text),...] \n";

/// Connective between graph evidence and chunk evidence in hybrid context.
pub const HYBRID_CONNECTIVE: &str =
    "\n And Given the following context in the format [(File Name, Text),...] \n";

/// Retrieval strategy for building context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Chunk evidence only
    Vector,
    /// Relationship narrative only
    Graph,
    /// Both, concatenated (default)
    Hybrid,
    /// No context at all
    None,
}

impl Strategy {
    /// Map a CLI/ENV string to a strategy; unrecognized values mean no
    /// context rather than an error.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "vector" => Strategy::Vector,
            "graph" => Strategy::Graph,
            "hybrid" => Strategy::Hybrid,
            _ => Strategy::None,
        }
    }
}

/// Builds the final context string for the answer prompt.
///
/// Selects and fuses the outputs of the graph and chunk retrievers; no
/// caching happens between calls, so every build reflects the live store.
pub struct ContextBuilder {
    graph: GraphRetriever,
    chunks: ChunkRetriever,
}

impl ContextBuilder {
    pub fn new(llm: OllamaClient, store: GraphStore, config: &Config) -> Self {
        Self {
            graph: GraphRetriever::new(llm.clone(), store.clone(), config),
            chunks: ChunkRetriever::new(llm, store, config),
        }
    }

    /// Build the context for `query` under the given strategy.
    pub async fn build(&self, query: &str, strategy: Strategy) -> Result<String> {
        match strategy {
            Strategy::Vector => {
                let chunks = self.chunks.find_chunks(query).await?;
                Ok(format!("{CHUNK_CONTEXT_HEADER}{}", render_chunks(&chunks)))
            }
            Strategy::Graph => self.graph.retrieve(query).await,
            Strategy::Hybrid => {
                let narrative = self.graph.retrieve(query).await?;
                let chunks = self.chunks.find_chunks(query).await?;
                Ok(format!(
                    "{narrative}{HYBRID_CONNECTIVE}{}",
                    render_chunks(&chunks)
                ))
            }
            Strategy::None => Ok(String::new()),
        }
    }
}
