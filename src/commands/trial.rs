//! Batch trials across models and retrieval strategies.
//!
//! Runs every question through every model-strategy combination, exports the
//! results as CSV, and converts a trial CSV into a markdown report for
//! side-by-side evaluation.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::graph::GraphStore;
use crate::integrations::OllamaClient;
use crate::retrieval::{ResponseGenerator, Strategy};
use crate::Result;

/// Models exercised when no explicit list is given.
pub const TRIAL_MODELS: &[&str] = &["llama3.1:latest", "granite3-dense:2b"];

/// Retrieval strategies exercised in a trial run.
pub const TRIAL_METHODS: &[&str] = &["none", "vector", "graph", "hybrid"];

/// Trial results: one row per question, one column per model-method pair.
///
/// Each cell holds a JSON array of response strings, one per trial.
#[derive(Debug, Clone)]
pub struct TrialReport {
    pub questions: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Column labels in model-major order, `"{model}-{method}"`.
pub fn trial_columns(models: &[String]) -> Vec<String> {
    models
        .iter()
        .flat_map(|model| {
            TRIAL_METHODS
                .iter()
                .map(move |method| format!("{model}-{method}"))
        })
        .collect()
}

/// Generate `num_trials` answers per question for every model and strategy.
pub async fn run_trial(
    config: &Config,
    questions: &[String],
    models: &[String],
    num_trials: usize,
) -> Result<TrialReport> {
    let llm = OllamaClient::with_url(&config.ollama_url);
    let store = GraphStore::from_config(config).await?;
    let num_trials = num_trials.max(1);

    let mut rows = Vec::with_capacity(questions.len());

    for (q_idx, question) in questions.iter().enumerate() {
        let mut row = Vec::new();

        for model in models {
            let generator = ResponseGenerator::new(llm.clone(), store.clone(), config)
                .with_model(model.clone());

            for method in TRIAL_METHODS {
                let strategy = Strategy::parse(method);
                let mut responses = Vec::with_capacity(num_trials);

                for _ in 0..num_trials {
                    let generated = generator.generate(question, strategy).await?;
                    responses.push(generated.answer);
                }

                row.push(serde_json::to_string(&responses)?);
            }
        }

        info!(
            "Question {}/{} done ({} cells)",
            q_idx + 1,
            questions.len(),
            row.len()
        );
        rows.push(row);
    }

    Ok(TrialReport {
        questions: questions.to_vec(),
        columns: trial_columns(models),
        rows,
    })
}

/// Export a trial report as CSV with a leading `question` column.
pub fn write_csv(report: &TrialReport, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;

    let mut header = vec!["question".to_string()];
    header.extend(report.columns.iter().cloned());
    writer.write_record(&header)?;

    for (question, row) in report.questions.iter().zip(report.rows.iter()) {
        let mut record = vec![question.clone()];
        record.extend(row.iter().cloned());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    info!(
        "Wrote {} question rows to {}",
        report.questions.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Convert a trial CSV into a markdown report for evaluation.
pub fn create_md(csv_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<()> {
    let mut reader = csv::Reader::from_path(csv_path.as_ref())?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut markdown_content = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let question = record.get(0).unwrap_or("");
        markdown_content.push(format!("## Question {} {}\n", i + 1, question));

        for (column, response) in headers.iter().skip(1).zip(record.iter().skip(1)) {
            markdown_content.push(format!("**{}**:\n\n{}\n\n", column, response));
        }
    }

    std::fs::write(output_path.as_ref(), markdown_content.join("\n"))?;
    info!("Wrote markdown report to {}", output_path.as_ref().display());
    Ok(())
}

/// Load one question per non-empty line.
pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
