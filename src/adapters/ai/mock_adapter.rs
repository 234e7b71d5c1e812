//! Mock rewriting adapter for running without API calls.
//!
//! Returns deterministic responses per prompt kind, simulates latency, and can
//! be told to fail specific calls. Used for offline runs and tests.

use crate::domain::LlmError;
use crate::domain::prompts::{CLASSIFICATION_HEADER, GROUPED_HEADER};
use crate::ports::RewritingPort;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

/// Which of the three pipeline calls a prompt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Rewrite,
    Classification,
    Grouped,
}

impl PromptKind {
    pub fn of(prompt: &str) -> Self {
        if prompt.starts_with(CLASSIFICATION_HEADER) {
            PromptKind::Classification
        } else if prompt.starts_with(GROUPED_HEADER) {
            PromptKind::Grouped
        } else {
            PromptKind::Rewrite
        }
    }
}

struct FailureRule {
    kind: PromptKind,
    needle: String,
    error: LlmError,
}

/// Mock rewriting adapter.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    failures: Vec<FailureRule>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self::with_delay(100)
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            failures: Vec::new(),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fail every `kind` call whose prompt contains `needle` with `error`.
    pub fn fail_when(mut self, kind: PromptKind, needle: &str, error: LlmError) -> Self {
        self.failures.push(FailureRule {
            kind,
            needle: needle.to_string(),
            error,
        });
        self
    }

    /// Total number of `complete` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of concurrent per-unit calls (grouped calls excluded).
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Every prompt received, in arrival order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn respond(prompt: &str, kind: PromptKind) -> String {
        match kind {
            PromptKind::Rewrite => {
                let instruction = prompt.rsplit("\n\n").next().unwrap_or(prompt).trim();
                format!("[MOCK] {}", instruction)
            }
            PromptKind::Classification => {
                let instruction = prompt.rsplit("Instruction:\n").next().unwrap_or(prompt);
                guess_category(instruction).to_string()
            }
            PromptKind::Grouped => {
                let body = prompt.split("\"\"\"").nth(1).unwrap_or_default();
                let bullets: Vec<String> = crate::domain::segment(body)
                    .into_iter()
                    .map(|unit| format!("- {}", unit))
                    .collect();
                format!("[MOCK] Grouped summary\n{}", bullets.join("\n"))
            }
        }
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyword guess at a category key, standing in for a real classifier answer.
fn guess_category(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    if has(&["emergency", "911", "return to the er", "ambulance"]) {
        "emergency_room"
    } else if has(&["mg", "tablet", "pill", "dose", "take ", "medicine", "aspirin"]) {
        "medication"
    } else if has(&["call", "chest pain", "fever", "bleeding", "if you", "worse"]) {
        "warning"
    } else if has(&["appointment", "follow", "see your", "check-up", "clinic"]) {
        "follow_up"
    } else {
        "general_info"
    }
}

#[async_trait::async_trait]
impl RewritingPort for MockAiAdapter {
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, LlmError> {
        let kind = PromptKind::of(prompt);
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        info!(model, ?kind, prompt_len = prompt.len(), "[MOCK] Simulating rewriting call");

        let tracked = kind != PromptKind::Grouped;
        if tracked {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        }

        // Simulate network delay
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if tracked {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }

        if let Some(rule) = self
            .failures
            .iter()
            .find(|r| r.kind == kind && prompt.contains(&r.needle))
        {
            return Err(rule.error.clone());
        }

        Ok(Self::respond(prompt, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompts::{self, PromptIntent};

    #[tokio::test]
    async fn test_mock_adapter_responds_per_kind() {
        let adapter = MockAiAdapter::with_delay(1);

        let rewritten = adapter
            .complete(&prompts::build(PromptIntent::default(), "Take aspirin 81mg daily."), "m")
            .await
            .unwrap();
        assert_eq!(rewritten, "[MOCK] Take aspirin 81mg daily.");

        let category = adapter
            .complete(&prompts::classification_prompt(&rewritten), "m")
            .await
            .unwrap();
        assert_eq!(category, "medication");

        let grouped = adapter
            .complete(&prompts::grouped_prompt("Rest. Call if fever."), "m")
            .await
            .unwrap();
        assert_eq!(grouped, "[MOCK] Grouped summary\n- Rest.\n- Call if fever.");

        assert_eq!(adapter.calls(), 3);
        assert_eq!(adapter.prompts().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_adapter_failure_rule_is_kind_specific() {
        let adapter = MockAiAdapter::with_delay(1).fail_when(
            PromptKind::Rewrite,
            "chest",
            LlmError::ProviderError("quota exceeded".into()),
        );

        let err = adapter
            .complete(&prompts::build(PromptIntent::default(), "Chest pain: call 911"), "m")
            .await;
        assert!(err.is_ok(), "needle is case-sensitive");

        let err = adapter
            .complete(&prompts::build(PromptIntent::default(), "If chest pain, call"), "m")
            .await
            .unwrap_err();
        assert_eq!(err, LlmError::ProviderError("quota exceeded".into()));

        assert!(adapter
            .complete(&prompts::grouped_prompt("If chest pain, call"), "m")
            .await
            .is_ok());
    }

    #[test]
    fn test_prompt_kind_detection() {
        assert_eq!(PromptKind::of(&prompts::classification_prompt("x")), PromptKind::Classification);
        assert_eq!(PromptKind::of(&prompts::grouped_prompt("x")), PromptKind::Grouped);
        assert_eq!(
            PromptKind::of(&prompts::build(PromptIntent::ToneSupport, "x")),
            PromptKind::Rewrite
        );
    }
}
