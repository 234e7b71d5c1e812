//! Prompt builder. Maps an intent plus input text to a completion prompt.
//!
//! Templates are static prefixes; the input is appended trimmed. Classification
//! embeds the already-simplified text so the category follows the plain
//! wording rather than the clinical original.

use std::fmt;

/// First line of every classification prompt.
pub const CLASSIFICATION_HEADER: &str =
    "You are a strict classifier for Emergency Room Discharge Instructions.";

/// First line of every grouped-rewrite prompt.
pub const GROUPED_HEADER: &str =
    "You are a medical assistant simplifying Emergency room discharge instructions.";

/// Rewriting style for a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptIntent {
    #[default]
    InstructionSimplification,
    MedicationClarity,
    TaskExtraction,
    WarningHighlight,
    ToneSupport,
}

impl PromptIntent {
    pub const ALL: [PromptIntent; 5] = [
        PromptIntent::InstructionSimplification,
        PromptIntent::MedicationClarity,
        PromptIntent::TaskExtraction,
        PromptIntent::WarningHighlight,
        PromptIntent::ToneSupport,
    ];

    /// Resolve an intent by name. Unknown names fall back to `InstructionSimplification`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|intent| intent.name() == name.trim())
            .unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            PromptIntent::InstructionSimplification => "instruction_simplification",
            PromptIntent::MedicationClarity => "medication_clarity",
            PromptIntent::TaskExtraction => "task_extraction",
            PromptIntent::WarningHighlight => "warning_highlight",
            PromptIntent::ToneSupport => "tone_support",
        }
    }

    fn template(self) -> &'static str {
        match self {
            PromptIntent::InstructionSimplification => {
                "Simplify the following medical emergency room discharge instruction.\n\
                 Use clear, patient-friendly language that avoids all medical jargon.\n\
                 Do not invent or assume anything. Just simplify what is provided.\n\
                 Return only the simplified instruction, nothing more:\n\n"
            }
            PromptIntent::MedicationClarity => {
                "Rewrite the medication instruction below in simple, simplified language.\n\
                 Mention dose, timing, and any warnings.\n\
                 Do not add anything new.\n\n"
            }
            PromptIntent::TaskExtraction => {
                "Extract and simplify only the core tasks from the instruction below.\n\
                 Return them as short, clear bullet points.\n\
                 Don't invent or explain anything.\n\n"
            }
            PromptIntent::WarningHighlight => {
                "Clearly restate any warning or danger signs in the instruction below.\n\
                 Use direct, serious, and simple language for the patient.\n\
                 Do not guess or add information.\n\n"
            }
            PromptIntent::ToneSupport => {
                "Rephrase this instruction to be gentle and supportive.\n\
                 Keep it clear and easy to follow. Do not add information.\n\n"
            }
        }
    }
}

impl fmt::Display for PromptIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the rewriting prompt for one instruction.
pub fn build(intent: PromptIntent, text: &str) -> String {
    format!("{}{}", intent.template(), text.trim())
}

/// Build the strict single-token classification prompt over simplified text.
pub fn classification_prompt(simplified: &str) -> String {
    format!(
        "{CLASSIFICATION_HEADER}\n\
         Your task is to assign the instruction below to exactly one of the following categories:\n\
         - medication\n\
         - follow_up\n\
         - warning\n\
         - general_info\n\
         - emergency_room\n\n\
         IMPORTANT RULES:\n\
         - Only reply with category from the list.\n\
         - Do not explain.\n\
         - Do not repeat the instruction.\n\
         - Do NOT add, guess, or explain anything beyond the original content.\n\
         - Do not say anything else.\n\n\
         Instruction:\n{}",
        simplified.trim()
    )
}

/// Build the whole-document grouped rewrite prompt over the original text.
pub fn grouped_prompt(full_text: &str) -> String {
    format!(
        "{GROUPED_HEADER}\n\n\
         Your task:\n\
         - Rewrite the instructions below using plain, simplified language.\n\
         - Organize the content into categories.\n\
         - Use bullet points.\n\
         - **IMPORTANT** - Do NOT add, guess, or explain anything beyond the original content.\n\
         - Keep each item short and focused.\n\n\
         Categories:\n\
         1) Emergency signs when to go to the ER\n\
         2) Medicines and pain relief what to take, when, how\n\
         3) Things the patient should avoid actions, foods, etc.\n\
         4) Things the patient should do recovery actions\n\
         5) Follow-up and next steps appointments or further care\n\
         6) Other important details anything else provided\n\n\
         Instructions to rewrite:\n\
         \"\"\"{}\"\"\"\n",
        full_text.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_appends_trimmed_text() {
        let prompt = build(PromptIntent::default(), "  Take 2 tablets daily.\n");
        assert!(prompt.starts_with("Simplify the following medical"));
        assert!(prompt.ends_with("nothing more:\n\nTake 2 tablets daily."));
    }

    #[test]
    fn test_each_intent_has_its_own_prefix() {
        let prompts: Vec<String> = PromptIntent::ALL.iter().map(|i| build(*i, "x")).collect();
        for (i, a) in prompts.iter().enumerate() {
            for b in &prompts[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(build(PromptIntent::MedicationClarity, "x").contains("dose, timing"));
    }

    #[test]
    fn test_unknown_intent_falls_back() {
        assert_eq!(PromptIntent::from_name("task_extraction"), PromptIntent::TaskExtraction);
        assert_eq!(
            PromptIntent::from_name("summarize_everything"),
            PromptIntent::InstructionSimplification
        );
        assert_eq!(PromptIntent::from_name(""), PromptIntent::InstructionSimplification);
    }

    #[test]
    fn test_classification_prompt_embeds_simplified_text() {
        let prompt = classification_prompt("Take one baby aspirin every day.");
        assert!(prompt.starts_with(CLASSIFICATION_HEADER));
        assert!(prompt.contains("- emergency_room"));
        assert!(prompt.ends_with("Instruction:\nTake one baby aspirin every day."));
    }

    #[test]
    fn test_grouped_prompt_quotes_full_text() {
        let prompt = grouped_prompt(" Rest. Drink water. ");
        assert!(prompt.starts_with(GROUPED_HEADER));
        assert!(prompt.contains("\"\"\"Rest. Drink water.\"\"\""));
    }
}
