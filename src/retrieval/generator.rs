//! Answer generation with retrieved context.

use tracing::debug;

use super::context::{ContextBuilder, Strategy};
use crate::config::Config;
use crate::graph::GraphStore;
use crate::integrations::OllamaClient;
use crate::prompts::answer_prompt;
use crate::Result;

/// A generated answer together with the prompt and context that produced it.
#[derive(Debug, Clone)]
pub struct GeneratedAnswer {
    pub answer: String,
    pub prompt: String,
    pub context: String,
}

/// Feeds retrieved context plus the question to the completion model.
pub struct ResponseGenerator {
    llm: OllamaClient,
    builder: ContextBuilder,
    model: String,
}

impl ResponseGenerator {
    pub fn new(llm: OllamaClient, store: GraphStore, config: &Config) -> Self {
        Self {
            builder: ContextBuilder::new(llm.clone(), store, config),
            llm,
            model: config.completion_model.clone(),
        }
    }

    /// Override the completion model (used by batch trials).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Answer `query` using context built under `strategy`.
    pub async fn generate(&self, query: &str, strategy: Strategy) -> Result<GeneratedAnswer> {
        let context = self.builder.build(query, strategy).await?;
        debug!("Built {} chars of context", context.len());

        let prompt = answer_prompt(query, &context);
        let answer = self.llm.generate(&prompt, &self.model).await?;

        Ok(GeneratedAnswer {
            answer,
            prompt,
            context,
        })
    }
}
