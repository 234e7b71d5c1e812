//! Summary service. The boundary a host (CLI, HTTP) talks to.
//!
//! Validates the request, runs the pipeline, then returns either the preview
//! payload or the rendered document. Rendering is all-or-nothing.

use crate::domain::{DomainError, Report};
use crate::ports::{DocumentRenderer, PreviewPayload, SummaryPort, SummaryRequest, SummaryResponse};
use crate::usecases::PipelineService;
use std::sync::Arc;
use tracing::{error, info};

pub struct SummaryService {
    pipeline: Arc<PipelineService>,
    renderer: Arc<dyn DocumentRenderer>,
    default_model: String,
}

impl SummaryService {
    /// Create a new summary service.
    ///
    /// # Arguments
    /// * `pipeline` - Orchestrator that produces the report
    /// * `renderer` - Document renderer used when a preview is not requested
    /// * `default_model` - Model used when the request does not name one
    pub fn new(
        pipeline: Arc<PipelineService>,
        renderer: Arc<dyn DocumentRenderer>,
        default_model: String,
    ) -> Self {
        Self {
            pipeline,
            renderer,
            default_model,
        }
    }

    /// Render on the blocking pool; layout and PDF assembly are CPU-bound.
    async fn render(&self, report: Report) -> Result<Vec<u8>, DomainError> {
        let renderer = Arc::clone(&self.renderer);
        tokio::task::spawn_blocking(move || renderer.render(&report))
            .await
            .map_err(|e| DomainError::Render(format!("render task failed: {}", e)))?
    }
}

#[async_trait::async_trait]
impl SummaryPort for SummaryService {
    async fn summarize(&self, request: SummaryRequest) -> Result<SummaryResponse, DomainError> {
        let text = request
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::Validation("No input text provided".to_string()))?;

        let model = request
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.default_model.as_str());

        let report = self.pipeline.run(text, model).await?;

        if request.preview_only {
            info!(items = report.items.len(), "returning preview");
            return Ok(SummaryResponse::Preview(PreviewPayload::from(&report)));
        }

        let bytes = self.render(report).await.inspect_err(|e| {
            error!(error = %e, "document render failed");
        })?;
        info!(bytes = bytes.len(), "document rendered");

        Ok(SummaryResponse::Document {
            file_name: self.renderer.file_name().to_string(),
            content_type: self.renderer.content_type().to_string(),
            bytes,
        })
    }
}
