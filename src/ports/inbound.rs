//! Inbound port. A host (CLI, HTTP) calls into the application.

use crate::domain::{DomainError, Report};
use serde::{Deserialize, Serialize};

/// Request accepted at the boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Raw discharge text. Missing or blank is a validation error.
    #[serde(default)]
    pub text: Option<String>,
    /// Model identifier; the configured default is used when absent.
    #[serde(default)]
    pub model: Option<String>,
    /// Return the structured preview instead of a rendered document.
    #[serde(default)]
    pub preview_only: bool,
}

impl SummaryRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// One preview row: category tag plus simplified text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewItem {
    pub category: String,
    pub simplified_text: String,
}

/// Preview body: `{ simplified_items: [...], grouped_summary }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewPayload {
    pub simplified_items: Vec<PreviewItem>,
    pub grouped_summary: String,
}

impl From<&Report> for PreviewPayload {
    fn from(report: &Report) -> Self {
        Self {
            simplified_items: report
                .items
                .iter()
                .map(|item| PreviewItem {
                    category: item.category.label().to_string(),
                    simplified_text: item.simplified_text.clone(),
                })
                .collect(),
            grouped_summary: report.grouped_summary.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SummaryResponse {
    Preview(PreviewPayload),
    Document {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Summary use case as seen by a host.
#[async_trait::async_trait]
pub trait SummaryPort: Send + Sync {
    /// Validate, run the pipeline, then preview or render.
    async fn summarize(&self, request: SummaryRequest) -> Result<SummaryResponse, DomainError>;
}
