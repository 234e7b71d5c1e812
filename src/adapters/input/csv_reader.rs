//! CSV input. Uses the `csv` crate so quoting and embedded delimiters are safe.

use crate::domain::DomainError;
use std::io::Read;

/// Column holding one instruction per row.
pub const INSTRUCTION_COLUMN: &str = "instruction";

/// Join the non-empty `instruction` cells of a headed CSV with line breaks.
///
/// # Errors
/// `DomainError::Input` if the header lacks the column or a record is unreadable.
pub fn instructions_from_csv<R: Read>(reader: R) -> Result<String, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| DomainError::Input(format!("Failed to read CSV header: {}", e)))?;
    let column = headers
        .iter()
        .position(|h| h == INSTRUCTION_COLUMN)
        .ok_or_else(|| {
            DomainError::Input(format!(
                "CSV must contain a column named '{}'",
                INSTRUCTION_COLUMN
            ))
        })?;

    let mut instructions = Vec::new();
    for record in rdr.records() {
        let record =
            record.map_err(|e| DomainError::Input(format!("Failed to read CSV row: {}", e)))?;
        if let Some(cell) = record.get(column).filter(|c| !c.is_empty()) {
            instructions.push(cell.to_string());
        }
    }

    Ok(instructions.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_from_csv_basic() {
        let data = "instruction,notes\nTake ibuprofen 400mg,with food\n,empty\nSee your doctor in 3 days,\n";
        assert_eq!(
            instructions_from_csv(data.as_bytes()).unwrap(),
            "Take ibuprofen 400mg\nSee your doctor in 3 days"
        );
    }

    #[test]
    fn test_instructions_from_csv_quoted_cells() {
        let data = "instruction\n\"Rest, then walk\"\n\"Say \"\"stop\"\" if dizzy\"\n";
        assert_eq!(
            instructions_from_csv(data.as_bytes()).unwrap(),
            "Rest, then walk\nSay \"stop\" if dizzy"
        );
    }

    #[test]
    fn test_instructions_from_csv_missing_column() {
        let err = instructions_from_csv("text\nRest\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DomainError::Input(ref m) if m.contains("instruction")));
    }
}
