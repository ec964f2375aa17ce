//! Document chunk retrieval via the vector index.

use tracing::debug;

use super::embedder::Embedder;
use crate::config::Config;
use crate::graph::{ChunkRecord, GraphStore};
use crate::integrations::OllamaClient;
use crate::{Error, Result};

/// Finds the document chunks nearest to a query.
///
/// The query text is embedded directly (not its extracted entities) and
/// matched against the vector index; the chunks attached to the single best
/// node are returned in store order, bounded by the configured cap.
pub struct ChunkRetriever {
    embedder: Embedder,
    store: GraphStore,
    chunk_cap: usize,
}

impl ChunkRetriever {
    pub fn new(llm: OllamaClient, store: GraphStore, config: &Config) -> Self {
        Self {
            embedder: Embedder::from_config(llm, config),
            store,
            chunk_cap: config.chunk_cap,
        }
    }

    /// Fetch the chunks attached to the node nearest to `query`.
    ///
    /// An empty similarity search is an error: it signals an empty index or
    /// a configuration problem, not a legitimate "nothing related" result.
    pub async fn find_chunks(&self, query: &str) -> Result<Vec<ChunkRecord>> {
        let embedding = self.embedder.embed(query).await?;
        let matches = self.store.vector_search(&embedding, 1).await?;

        let best = matches.first().ok_or_else(|| {
            Error::NoMatch(format!("no indexed entity matches query: {query}"))
        })?;

        debug!("Query matched node '{}' (score {:.3})", best.id, best.score);
        self.store.chunks_for_node(&best.id, self.chunk_cap).await
    }
}

/// Render chunks the way the answer prompt announces them: a list of
/// (file name, text) pairs.
pub fn render_chunks(chunks: &[ChunkRecord]) -> String {
    let body = chunks
        .iter()
        .map(|c| format!("('{}', '{}')", c.file_name, c.text))
        .collect::<Vec<_>>()
        .join(", ");

    format!("[{body}]")
}
