//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, LlmError, Report};

/// Text-completion provider used for simplification, classification and the
/// grouped rewrite. One call, one result; implementations never retry.
#[async_trait::async_trait]
pub trait RewritingPort: Send + Sync {
    /// Complete `prompt` with `model`. Failures are typed, never folded into the text.
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, LlmError>;
}

/// Turns a finished report into printable document bytes.
pub trait DocumentRenderer: Send + Sync {
    /// Render the whole document or fail; never returns a partial document.
    fn render(&self, report: &Report) -> Result<Vec<u8>, DomainError>;

    /// Download filename for the rendered document.
    fn file_name(&self) -> &str;

    /// MIME type of the rendered bytes.
    fn content_type(&self) -> &str;
}
