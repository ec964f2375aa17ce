//! Embedding generation service backed by Ollama.

use tracing::debug;

use crate::config::Config;
use crate::integrations::OllamaClient;
use crate::{Error, Result};

/// Service for generating text embeddings of a fixed dimension.
///
/// The dimension must match the vector index configuration; a mismatch is a
/// configuration error, not a recoverable runtime condition.
#[derive(Debug, Clone)]
pub struct Embedder {
    client: OllamaClient,
    model: String,
    dimension: usize,
}

impl Embedder {
    pub fn new(client: OllamaClient, model: impl Into<String>, dimension: usize) -> Self {
        Self {
            client,
            model: model.into(),
            dimension,
        }
    }

    pub fn from_config(client: OllamaClient, config: &Config) -> Self {
        Self::new(
            client,
            config.embedding_model.clone(),
            config.embedding_dimension(),
        )
    }

    /// Generate an embedding for a single text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.client.embed(text, &self.model).await?;

        if embedding.len() != self.dimension {
            return Err(Error::Config(format!(
                "embedding dimension mismatch: model '{}' returned {} values, index expects {}",
                self.model,
                embedding.len(),
                self.dimension
            )));
        }

        debug!("Embedded {} chars into {} dims", text.len(), self.dimension);
        Ok(embedding)
    }

    /// The embedding dimension this service is configured for.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn embed_accepts_matching_dimension() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/embeddings");
            then.status(200)
                .json_body(json!({ "embedding": [0.5, 0.5, 0.0, 0.7] }));
        });

        let embedder = Embedder::new(OllamaClient::with_url(server.base_url()), "all-minilm", 4);
        let vector = embedder.embed("hypertension").await.unwrap();

        assert_eq!(vector.len(), 4);
    }

    #[tokio::test]
    async fn embed_rejects_dimension_mismatch() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/embeddings");
            then.status(200).json_body(json!({ "embedding": [0.5, 0.5] }));
        });

        let embedder = Embedder::new(OllamaClient::with_url(server.base_url()), "all-minilm", 384);
        let err = embedder.embed("hypertension").await.unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        let msg = err.to_string();
        assert!(msg.contains("returned 2 values"));
        assert!(msg.contains("expects 384"));
    }

    #[test]
    fn from_config_uses_model_dimension() {
        let config = Config::default();
        let embedder = Embedder::from_config(OllamaClient::new(), &config);
        assert_eq!(embedder.dimension(), 384);
    }
}
