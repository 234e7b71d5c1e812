//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Failure of a single rewriting-service call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The request never reached the provider (DNS, TLS, timeout, connection reset).
    #[error("request could not reach the rewriting service: {0}")]
    TransportFailure(String),

    /// Non-success status or an error payload from the provider.
    #[error("rewriting service returned an error: {0}")]
    ProviderError(String),

    /// Success status but no completion text at the expected path.
    #[error("malformed response from rewriting service: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Stable tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::TransportFailure(_) => "transport_failure",
            LlmError::ProviderError(_) => "provider_error",
            LlmError::MalformedResponse(_) => "malformed_response",
        }
    }

    /// Readable text embedded in a report row in place of a completion.
    pub fn inline_text(&self) -> String {
        format!("Error: {}", self)
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    /// Empty or absent input; rejected before any rewriting call.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Failed to generate PDF: {0}")]
    Render(String),

    /// Unreadable or unsupported input file.
    #[error("Input error: {0}")]
    Input(String),

    /// A worker task panicked or was aborted.
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// The host could not write or print the result.
    #[error("Output error: {0}")]
    Output(String),
}

impl DomainError {
    /// True when the caller sent something unusable (400-class); false for 500-class.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::Validation(_) | DomainError::Input(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_text_carries_description() {
        let err = LlmError::ProviderError("rate limited".into());
        let text = err.inline_text();
        assert!(text.starts_with("Error: "));
        assert!(text.contains("rate limited"));
        assert_eq!(err.kind(), "provider_error");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DomainError::Validation("empty".into()).is_client_error());
        assert!(DomainError::Input("bad csv".into()).is_client_error());
        assert!(!DomainError::Render("font".into()).is_client_error());
        assert!(!DomainError::Pipeline("task panicked".into()).is_client_error());
        assert!(!DomainError::Output("disk full".into()).is_client_error());
    }
}
