//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/PDF types here; adapters map into and out of these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One discrete fragment of the original discharge text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionUnit {
    /// Zero-based position in segmentation order.
    pub ordinal: usize,
    pub raw_text: String,
}

/// Closed category taxonomy used to bucket simplified instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Medication,
    FollowUp,
    Warning,
    GeneralInfo,
    EmergencyRoom,
    Uncategorized,
}

impl Category {
    /// The five categories the rewriting service may answer with.
    pub const KNOWN: [Category; 5] = [
        Category::Medication,
        Category::FollowUp,
        Category::Warning,
        Category::GeneralInfo,
        Category::EmergencyRoom,
    ];

    /// Canonical key, as the classifier prompt lists it.
    pub fn key(self) -> &'static str {
        match self {
            Category::Medication => "medication",
            Category::FollowUp => "follow_up",
            Category::Warning => "warning",
            Category::GeneralInfo => "general_info",
            Category::EmergencyRoom => "emergency_room",
            Category::Uncategorized => "uncategorized",
        }
    }

    /// Bracketed tag shown in previews and in the rendered document.
    pub fn label(self) -> &'static str {
        match self {
            Category::Medication => "[MEDICATION]",
            Category::FollowUp => "[FOLLOW-UP]",
            Category::Warning => "[WARNING]",
            Category::GeneralInfo => "[INFO]",
            Category::EmergencyRoom => "[EMERGENCY]",
            Category::Uncategorized => "[UNCATEGORIZED]",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One simplified and classified instruction. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedItem {
    pub category: Category,
    pub simplified_text: String,
}

/// Result of one pipeline run. Lives for a single request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// One item per instruction unit, in segmentation order.
    pub items: Vec<SimplifiedItem>,
    /// Whole-text grouped rewrite, produced independently of `items`.
    pub grouped_summary: String,
}
