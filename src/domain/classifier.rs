//! Maps a rewriting-service answer onto the category taxonomy.

use super::entities::Category;

/// Normalize `llm_response` and match it against the five known keys.
///
/// Total: anything that is not exactly one key after lower-casing, trimming and
/// replacing each inner space with `_` is `Uncategorized`. Runs of spaces and
/// other inner whitespace are not collapsed, so near-miss answers stay out.
pub fn classify(llm_response: &str) -> Category {
    let normalized = llm_response.trim().to_lowercase().replace(' ', "_");

    match normalized.as_str() {
        "medication" => Category::Medication,
        "follow_up" => Category::FollowUp,
        "warning" => Category::Warning,
        "general_info" => Category::GeneralInfo,
        "emergency_room" => Category::EmergencyRoom,
        _ => Category::Uncategorized,
    }
}
