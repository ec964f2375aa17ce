//! Answer a single question with retrieved context.

use tracing::{info, warn};

use crate::config::Config;
use crate::graph::GraphStore;
use crate::integrations::OllamaClient;
use crate::retrieval::{ResponseGenerator, Strategy};
use crate::Result;

pub async fn run(
    config: &Config,
    query: &str,
    mode: &str,
    model: Option<String>,
    show_context: bool,
) -> Result<()> {
    let strategy = Strategy::parse(mode);
    let llm = OllamaClient::with_url(&config.ollama_url);

    if !llm.is_running().await {
        warn!("Ollama does not respond at {}", config.ollama_url);
    }

    let store = GraphStore::from_config(config).await?;
    let mut generator = ResponseGenerator::new(llm, store, config);
    if let Some(model) = model {
        generator = generator.with_model(model);
    }

    info!("Answering with strategy {:?}", strategy);
    let generated = generator.generate(query, strategy).await?;

    if show_context {
        println!("=== Context ===\n{}\n", generated.context);
    }
    println!("{}", generated.answer);

    Ok(())
}
