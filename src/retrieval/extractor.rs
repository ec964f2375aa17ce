//! Entity extraction from free text with a self-correcting LLM loop.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::integrations::OllamaClient;
use crate::prompts::extraction_prompt;
use crate::{Error, Result};

/// Outcome of a successful extraction call.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Entity surface forms, deduplicated, first occurrence order.
    pub entities: Vec<String>,
    /// Correction messages issued before the model produced a parseable
    /// list. Empty when the first attempt succeeded.
    pub corrections: Vec<String>,
}

/// Extracts named entities from a query via the completion service.
///
/// Malformed model output is retried with an explicit correction message up
/// to `max_attempts` times, then fails with the full correction history.
/// Service failures are never retried here.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    llm: OllamaClient,
    model: String,
    max_attempts: usize,
}

impl EntityExtractor {
    pub fn new(llm: OllamaClient, model: impl Into<String>, max_attempts: usize) -> Self {
        Self {
            llm,
            model: model.into(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(llm: OllamaClient, config: &Config) -> Self {
        Self::new(
            llm,
            config.completion_model.clone(),
            config.max_extraction_attempts,
        )
    }

    /// Extract entities from `text`.
    pub async fn extract(&self, text: &str) -> Result<Extraction> {
        let mut corrections: Vec<String> = Vec::new();

        for attempt in 1..=self.max_attempts {
            let prompt = extraction_prompt(text, &corrections);
            let response = self.llm.generate(&prompt, &self.model).await?;

            match parse_entity_list(&response) {
                Ok(entities) => {
                    debug!(
                        "Extracted {} entities on attempt {}",
                        entities.len(),
                        attempt
                    );
                    return Ok(Extraction {
                        entities,
                        corrections,
                    });
                }
                Err(failure) => {
                    debug!("Attempt {} failed to parse: {}", attempt, failure);
                    corrections.push(format!(
                        "The previous output threw this error: {}",
                        failure
                    ));
                }
            }
        }

        Err(Error::Extraction {
            attempts: self.max_attempts,
            history: corrections,
        })
    }
}

/// Why a model response could not be coerced into a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// The response is not a valid JSON-style literal at all.
    Malformed(String),
    /// The response parsed, but to something other than a list.
    NotAList { actual: String, value: String },
    /// The response is a list containing non-string items.
    NotAllStrings { value: String },
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::Malformed(detail) => write!(
                f,
                "Expected a list of strings in the format [\"a\", \"b\"], but the output could not be parsed: {}",
                detail
            ),
            ParseFailure::NotAList { actual, value } => write!(
                f,
                "Expected a list of strings, but got {} with value {}",
                actual, value
            ),
            ParseFailure::NotAllStrings { value } => write!(
                f,
                "Expected a list of strings, but the list {} contains non-string items",
                value
            ),
        }
    }
}

/// Parse a model response as a list of entity strings.
///
/// Grammar: a JSON array of strings, optionally surrounded by prose (only
/// the slice from the first `[` to the last `]` is considered). Any other
/// shape is a structured failure that feeds the correction loop. Duplicates
/// are dropped, keeping first occurrence order.
pub fn parse_entity_list(raw: &str) -> std::result::Result<Vec<String>, ParseFailure> {
    let candidate = bracketed_slice(raw).unwrap_or_else(|| raw.trim());

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| ParseFailure::Malformed(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ParseFailure::NotAList {
                actual: json_type_name(&other).to_string(),
                value: other.to_string(),
            })
        }
    };

    let mut entities = Vec::new();
    let mut seen = HashSet::new();
    for item in &items {
        match item.as_str() {
            Some(s) => {
                if seen.insert(s.to_string()) {
                    entities.push(s.to_string());
                }
            }
            None => {
                return Err(ParseFailure::NotAllStrings {
                    value: Value::Array(items.clone()).to_string(),
                })
            }
        }
    }

    Ok(entities)
}

fn bracketed_slice(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    (end > start).then(|| &raw[start..=end])
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn parses_well_formed_list() {
        let entities = parse_entity_list(r#"["hypertension", "lisinopril"]"#).unwrap();
        assert_eq!(entities, vec!["hypertension", "lisinopril"]);
    }

    #[test]
    fn deduplicates_preserving_first_occurrence() {
        let entities =
            parse_entity_list(r#"["aspirin", "fever", "aspirin", "headache", "fever"]"#).unwrap();
        assert_eq!(entities, vec!["aspirin", "fever", "headache"]);
    }

    #[test]
    fn tolerates_surrounding_prose() {
        let entities =
            parse_entity_list("Here are the entities: [\"diabetes\"] as requested.").unwrap();
        assert_eq!(entities, vec!["diabetes"]);
    }

    #[test]
    fn accepts_empty_list() {
        let entities = parse_entity_list("[]").unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn rejects_free_text() {
        let err = parse_entity_list("I could not find any entities.").unwrap_err();
        assert!(matches!(err, ParseFailure::Malformed(_)));
    }

    #[test]
    fn rejects_non_list_value_naming_type_and_value() {
        let err = parse_entity_list("42").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("a number"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn rejects_list_with_non_string_items() {
        let err = parse_entity_list(r#"["aspirin", 5]"#).unwrap_err();
        assert!(matches!(err, ParseFailure::NotAllStrings { .. }));
        assert!(err.to_string().contains("non-string items"));
    }

    #[test]
    fn object_without_inner_list_is_malformed() {
        let err = parse_entity_list(r#"{"count": 2}"#).unwrap_err();
        assert!(matches!(err, ParseFailure::Malformed(_)));
    }

    #[test]
    fn bracket_slice_recovers_list_nested_in_object() {
        // The slice from the first '[' to the last ']' is what gets parsed,
        // so a wrapped list still comes through.
        let entities = parse_entity_list(r#"{"entities": ["aspirin"]}"#).unwrap();
        assert_eq!(entities, vec!["aspirin"]);
    }

    fn extractor(server: &MockServer, max_attempts: usize) -> EntityExtractor {
        EntityExtractor::new(
            OllamaClient::with_url(server.base_url()),
            "llama3.1:latest",
            max_attempts,
        )
    }

    #[tokio::test]
    async fn first_attempt_success_has_no_corrections() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(200)
                .json_body(json!({ "response": "[\"hypertension\"]" }));
        });

        let result = extractor(&server, 3)
            .extract("What treats hypertension?")
            .await
            .unwrap();

        assert_eq!(result.entities, vec!["hypertension"]);
        assert!(result.corrections.is_empty());
    }

    #[tokio::test]
    async fn retries_with_correction_until_valid() {
        let server = MockServer::start_async().await;

        // First attempt: prompt carries no correction yet, model misbehaves.
        let bad = server.mock(|when, then| {
            when.method(POST).path("/api/generate").matches(|req| {
                let body: serde_json::Value = serde_json::from_slice(req.body().as_ref()).unwrap();
                let prompt = body.get("prompt").and_then(|v| v.as_str()).unwrap_or("");
                !prompt.contains("threw this error")
            });
            then.status(200)
                .json_body(json!({ "response": "no entities today" }));
        });

        // Retry: prompt now contains the correction message.
        let good = server.mock(|when, then| {
            when.method(POST).path("/api/generate").matches(|req| {
                let body: serde_json::Value = serde_json::from_slice(req.body().as_ref()).unwrap();
                let prompt = body.get("prompt").and_then(|v| v.as_str()).unwrap_or("");
                prompt.contains("threw this error")
            });
            then.status(200)
                .json_body(json!({ "response": "[\"hypertension\", \"lisinopril\"]" }));
        });

        let result = extractor(&server, 3)
            .extract("What treats hypertension?")
            .await
            .unwrap();

        assert_eq!(result.entities, vec!["hypertension", "lisinopril"]);
        assert_eq!(result.corrections.len(), 1);
        assert!(result.corrections[0].contains("threw this error"));
        bad.assert_calls(1);
        good.assert_calls(1);
    }

    #[tokio::test]
    async fn gives_up_after_attempt_budget() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(200)
                .json_body(json!({ "response": "still not a list" }));
        });

        let err = extractor(&server, 3).extract("query").await.unwrap_err();

        match err {
            Error::Extraction { attempts, history } => {
                assert_eq!(attempts, 3);
                assert_eq!(history.len(), 3);
                assert!(history.iter().all(|c| c.contains("threw this error")));
            }
            other => panic!("expected Extraction error, got {other:?}"),
        }
        mock.assert_calls(3);
    }

    #[tokio::test]
    async fn service_failure_is_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(500).body("overloaded");
        });

        let err = extractor(&server, 3).extract("query").await.unwrap_err();

        assert!(matches!(err, Error::Completion(_)));
        mock.assert_calls(1);
    }
}
