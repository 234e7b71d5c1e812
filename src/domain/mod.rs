//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the segmentation/classification rules, prompt templates and the
//! report layout live here. Dependencies flow inward.

pub mod classifier;
pub mod entities;
pub mod errors;
pub mod layout;
pub mod prompts;
pub mod segmenter;

pub use classifier::classify;
pub use entities::{Category, InstructionUnit, Report, SimplifiedItem};
pub use errors::{DomainError, LlmError};
pub use prompts::PromptIntent;
pub use segmenter::{segment, segment_units};
