//! (Re)create the entity vector index.

use tracing::info;

use crate::config::Config;
use crate::graph::GraphStore;
use crate::Result;

pub async fn run(config: &Config) -> Result<()> {
    let store = GraphStore::from_config(config).await?;
    let dimension = config.embedding_dimension();

    store.create_vector_index(dimension).await?;

    info!(
        "Index '{}' ready for model '{}'",
        config.index_name, config.embedding_model
    );
    Ok(())
}
