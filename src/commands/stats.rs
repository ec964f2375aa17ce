//! Show knowledge graph statistics.

use crate::config::Config;
use crate::graph::GraphStore;
use crate::Result;

pub async fn run(config: &Config) -> Result<()> {
    let store = GraphStore::from_config(config).await?;
    let stats = store.stats().await?;

    println!("Entities:      {}", stats.entity_count);
    println!("Chunks:        {}", stats.chunk_count);
    println!("Relationships: {}", stats.relation_count);

    Ok(())
}
