//! Raw top-k vector search against the entity index.

use crate::config::Config;
use crate::graph::GraphStore;
use crate::integrations::OllamaClient;
use crate::retrieval::Embedder;
use crate::Result;

pub async fn run(config: &Config, query: &str, k: Option<usize>) -> Result<()> {
    let k = k.unwrap_or(config.top_k).max(1);

    let llm = OllamaClient::with_url(&config.ollama_url);
    let embedder = Embedder::from_config(llm, config);
    let store = GraphStore::from_config(config).await?;

    let embedding = embedder.embed(query).await?;
    let matches = store.vector_search(&embedding, k).await?;

    if matches.is_empty() {
        println!("No matches found.");
        return Ok(());
    }

    for (idx, m) in matches.iter().enumerate() {
        println!("{}. {:.4}  {}", idx + 1, m.score, m.id);
    }

    Ok(())
}
