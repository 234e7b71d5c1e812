//! Runs one summary request from the command line.

use super::args::CliArgs;
use crate::adapters::input::read_input;
use crate::domain::DomainError;
use crate::ports::{SummaryPort, SummaryRequest, SummaryResponse};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// CLI adapter. Drives a `SummaryPort` from parsed arguments.
pub struct CliRunner {
    summary: Arc<dyn SummaryPort>,
}

impl CliRunner {
    pub fn new(summary: Arc<dyn SummaryPort>) -> Self {
        Self { summary }
    }

    /// Read the input, run the summary, then print the preview or write the PDF.
    /// Returns the written path for documents, `None` for previews.
    pub async fn run(&self, args: &CliArgs) -> Result<Option<PathBuf>, DomainError> {
        let text = match (&args.text, &args.input) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => read_input(path).await?,
            (None, None) => {
                return Err(DomainError::Validation(
                    "Provide an input file or --text".to_string(),
                ));
            }
        };

        let request = SummaryRequest {
            text: Some(text),
            model: args.model.clone(),
            preview_only: args.preview,
        };

        let spinner = spinner();
        let response = self.summary.summarize(request).await;
        spinner.finish_and_clear();

        match response? {
            SummaryResponse::Preview(payload) => {
                let json = serde_json::to_string_pretty(&payload)
                    .map_err(|e| DomainError::Output(format!("Failed to encode preview: {}", e)))?;
                println!("{}", json);
                Ok(None)
            }
            SummaryResponse::Document {
                file_name, bytes, ..
            } => {
                let path = args.output.clone().unwrap_or_else(|| PathBuf::from(file_name));
                tokio::fs::write(&path, &bytes).await.map_err(|e| {
                    DomainError::Output(format!("Failed to write {}: {}", path.display(), e))
                })?;
                info!(path = %path.display(), bytes = bytes.len(), "document written");
                Ok(Some(path))
            }
        }
    }
}

fn spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        bar.set_style(style);
    }
    bar.set_message("Simplifying and categorizing instructions");
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
