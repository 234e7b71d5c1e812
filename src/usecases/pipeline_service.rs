//! Pipeline orchestrator: segment -> per-unit simplify + classify -> grouped rewrite.
//!
//! - Per-unit work runs on a bounded pool of tokio tasks (semaphore permits)
//! - Results land in index-addressed slots, so the report keeps segmentation order
//! - The grouped rewrite runs concurrently with the unit batch, over the raw text
//! - Rewriting failures are absorbed into the affected row; only task failures abort
//!
//! Dropping the future returned by `run` aborts every in-flight task; no partial
//! report is ever produced.

use crate::domain::prompts::{self, PromptIntent};
use crate::domain::{
    Category, DomainError, InstructionUnit, Report, SimplifiedItem, classify, segment_units,
};
use crate::ports::RewritingPort;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Pipeline service. Turns raw discharge text into a `Report`.
pub struct PipelineService {
    ai: Arc<dyn RewritingPort>,
    intent: PromptIntent,
    concurrency: usize,
}

impl PipelineService {
    /// Create a pipeline using the default simplification intent.
    ///
    /// `concurrency` bounds how many units are processed at once (minimum 1).
    pub fn new(ai: Arc<dyn RewritingPort>, concurrency: usize) -> Self {
        Self {
            ai,
            intent: PromptIntent::default(),
            concurrency: concurrency.max(1),
        }
    }

    pub fn with_intent(mut self, intent: PromptIntent) -> Self {
        self.intent = intent;
        self
    }

    /// Run the whole pipeline for one request.
    ///
    /// # Errors
    /// `DomainError::Validation` if `raw_text` segments to nothing (no rewriting
    /// call is made); `DomainError::Pipeline` if a worker task dies.
    pub async fn run(&self, raw_text: &str, model: &str) -> Result<Report, DomainError> {
        let units = segment_units(raw_text);
        if units.is_empty() {
            return Err(DomainError::Validation("No input text provided".to_string()));
        }

        info!(
            units = units.len(),
            model,
            intent = %self.intent,
            concurrency = self.concurrency,
            "starting pipeline run"
        );

        let (items, grouped_summary) = tokio::join!(
            self.process_units(units, model),
            self.grouped_summary(raw_text, model)
        );
        let items = items?;

        let uncategorized = items
            .iter()
            .filter(|i| i.category == Category::Uncategorized)
            .count();
        info!(items = items.len(), uncategorized, "pipeline run complete");

        Ok(Report {
            items,
            grouped_summary,
        })
    }

    async fn process_units(
        &self,
        units: Vec<InstructionUnit>,
        model: &str,
    ) -> Result<Vec<SimplifiedItem>, DomainError> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut slots: Vec<Option<SimplifiedItem>> = vec![None; units.len()];
        let mut tasks = JoinSet::new();

        for unit in units {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| DomainError::Pipeline(format!("worker pool closed: {}", e)))?;
            let ai = Arc::clone(&self.ai);
            let model = model.to_string();
            let intent = self.intent;

            tasks.spawn(async move {
                let _permit = permit;
                let item = process_unit(ai.as_ref(), intent, &unit, &model).await;
                (unit.ordinal, item)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (ordinal, item) =
                joined.map_err(|e| DomainError::Pipeline(format!("unit task failed: {}", e)))?;
            if let Some(slot) = slots.get_mut(ordinal) {
                *slot = Some(item);
            }
        }

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| DomainError::Pipeline("unit result missing".to_string()))
    }

    async fn grouped_summary(&self, raw_text: &str, model: &str) -> String {
        match self
            .ai
            .complete(&prompts::grouped_prompt(raw_text), model)
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error_kind = e.kind(), error = %e, "grouped rewrite failed, embedding error text");
                e.inline_text()
            }
        }
    }
}

/// Simplify, then classify the simplified wording. Never fails: a rewriting
/// error becomes the row text, a classification error becomes `Uncategorized`.
async fn process_unit(
    ai: &dyn RewritingPort,
    intent: PromptIntent,
    unit: &InstructionUnit,
    model: &str,
) -> SimplifiedItem {
    let simplified = match ai.complete(&prompts::build(intent, &unit.raw_text), model).await {
        Ok(text) => text,
        Err(e) => {
            warn!(
                unit = unit.ordinal,
                error_kind = e.kind(),
                error = %e,
                "simplification failed, embedding error text"
            );
            return SimplifiedItem {
                category: Category::Uncategorized,
                simplified_text: e.inline_text(),
            };
        }
    };

    let category = match ai
        .complete(&prompts::classification_prompt(&simplified), model)
        .await
    {
        Ok(answer) => {
            let category = classify(&answer);
            if category == Category::Uncategorized {
                debug!(unit = unit.ordinal, answer = %answer, "classifier answer outside taxonomy");
            }
            category
        }
        Err(e) => {
            warn!(
                unit = unit.ordinal,
                error_kind = e.kind(),
                error = %e,
                "classification failed, using uncategorized"
            );
            Category::Uncategorized
        }
    };

    debug!(unit = unit.ordinal, %category, "unit processed");
    SimplifiedItem {
        category,
        simplified_text: simplified,
    }
}
