//! Splits raw discharge text into instruction units.
//!
//! Heuristic, not a sentence tokenizer: a line break is inserted after every
//! `". "`, so abbreviations such as "Dr. Smith" are split and sentences ending
//! in `.` without a following space stay joined. Both are inherited behavior.

use super::entities::InstructionUnit;

/// Segment `text` into trimmed, non-empty fragments in input order.
pub fn segment(text: &str) -> Vec<String> {
    text.replace(". ", ".\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Segment and number the fragments.
pub fn segment_units(text: &str) -> Vec<InstructionUnit> {
    segment(text)
        .into_iter()
        .enumerate()
        .map(|(ordinal, raw_text)| InstructionUnit { ordinal, raw_text })
        .collect()
}
