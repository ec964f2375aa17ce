//! External service clients.

pub mod ollama;

pub use ollama::OllamaClient;
