//! Configuration for the graph RAG pipeline
//!
//! Loads configuration from config.yml file.
//! Environment variables take precedence over config.yml values.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default constants (fallback if config.yml not found)
pub const DEFAULT_NEO4J_URI: &str = "bolt://localhost:7687";
pub const DEFAULT_NEO4J_USER: &str = "neo4j";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";
pub const DEFAULT_COMPLETION_MODEL: &str = "llama3.1:latest";
pub const DEFAULT_INDEX_NAME: &str = "entities";
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MAX_HOPS: usize = 2;
pub const DEFAULT_CHUNK_CAP: usize = 8;
pub const DEFAULT_MAX_EXTRACTION_ATTEMPTS: usize = 3;

/// Relationship types that attach chunks to entities during indexing.
/// Traversal skips them so the narrative only surfaces semantic edges.
pub const ADMIN_RELATIONSHIP_TYPES: &[&str] = &["HAS_ENTITY", "MENTIONS"];

/// YAML config structures
#[derive(Debug, Deserialize)]
struct YamlConfig {
    neo4j: Option<Neo4jSection>,
    ollama: Option<OllamaSection>,
    retrieval: Option<RetrievalSection>,
}

#[derive(Debug, Deserialize)]
struct Neo4jSection {
    uri: Option<String>,
    user: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OllamaSection {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RetrievalSection {
    embedding_model: Option<String>,
    completion_model: Option<String>,
    index_name: Option<String>,
    top_k: Option<usize>,
    max_hops: Option<usize>,
    chunk_cap: Option<usize>,
    max_extraction_attempts: Option<usize>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub ollama_url: String,
    pub embedding_model: String,
    pub completion_model: String,
    pub index_name: String,
    pub top_k: usize,
    pub max_hops: usize,
    pub chunk_cap: usize,
    pub max_extraction_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration from config.yml or use defaults
    /// Environment variables take precedence over config.yml values
    pub fn new() -> Self {
        Self::load_from_file("config.yml")
            .or_else(|| Self::load_from_file("../config.yml"))
            .unwrap_or_else(Self::defaults)
    }

    /// Resolve a value: prefer env var if config value looks like ${VAR}
    fn resolve_env_string(value: Option<String>, env_key: &str, default: &str) -> String {
        if let Some(ref v) = value {
            if v.starts_with("${") && v.ends_with('}') {
                let var_name = &v[2..v.len() - 1];
                if let Ok(env_val) = std::env::var(var_name) {
                    return env_val;
                }
            } else if !v.is_empty() {
                return v.clone();
            }
        }
        if let Ok(env_val) = std::env::var(env_key) {
            return env_val;
        }
        default.to_string()
    }

    fn load_from_file(path: impl AsRef<Path>) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        let yaml: YamlConfig = serde_yaml::from_str(&content).ok()?;

        let neo4j = yaml.neo4j;
        let ollama = yaml.ollama;
        let retrieval = yaml.retrieval;

        let (uri, user, password) = match neo4j {
            Some(section) => (section.uri, section.user, section.password),
            None => (None, None, None),
        };

        let retrieval = retrieval.unwrap_or(RetrievalSection {
            embedding_model: None,
            completion_model: None,
            index_name: None,
            top_k: None,
            max_hops: None,
            chunk_cap: None,
            max_extraction_attempts: None,
        });

        Some(Self {
            neo4j_uri: Self::resolve_env_string(uri, "NEO4J_URI", DEFAULT_NEO4J_URI),
            neo4j_user: Self::resolve_env_string(user, "NEO4J_USER", DEFAULT_NEO4J_USER),
            neo4j_password: Self::resolve_env_string(password, "NEO4J_PASSWORD", ""),
            ollama_url: Self::resolve_env_string(
                ollama.and_then(|o| o.url),
                "OLLAMA_URL",
                DEFAULT_OLLAMA_URL,
            ),
            embedding_model: retrieval
                .embedding_model
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            completion_model: retrieval
                .completion_model
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
            index_name: retrieval
                .index_name
                .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            top_k: retrieval.top_k.unwrap_or(DEFAULT_TOP_K),
            max_hops: retrieval.max_hops.unwrap_or(DEFAULT_MAX_HOPS),
            chunk_cap: retrieval.chunk_cap.unwrap_or(DEFAULT_CHUNK_CAP),
            max_extraction_attempts: retrieval
                .max_extraction_attempts
                .unwrap_or(DEFAULT_MAX_EXTRACTION_ATTEMPTS),
        })
    }

    fn defaults() -> Self {
        Self {
            neo4j_uri: Self::resolve_env_string(None, "NEO4J_URI", DEFAULT_NEO4J_URI),
            neo4j_user: Self::resolve_env_string(None, "NEO4J_USER", DEFAULT_NEO4J_USER),
            neo4j_password: Self::resolve_env_string(None, "NEO4J_PASSWORD", ""),
            ollama_url: Self::resolve_env_string(None, "OLLAMA_URL", DEFAULT_OLLAMA_URL),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            top_k: DEFAULT_TOP_K,
            max_hops: DEFAULT_MAX_HOPS,
            chunk_cap: DEFAULT_CHUNK_CAP,
            max_extraction_attempts: DEFAULT_MAX_EXTRACTION_ATTEMPTS,
        }
    }

    /// Get the embedding dimension for the configured embedding model
    pub fn embedding_dimension(&self) -> usize {
        match self.embedding_model.as_str() {
            "all-minilm" => 384,
            "nomic-embed-text" => 768,
            "mxbai-embed-large" => 1024,
            _ => 384, // default
        }
    }
}
