//! Input extraction for hosts. Turns an uploaded file into raw discharge text.
//!
//! TXT is read as UTF-8; CSV must carry an `instruction` column; PDF pages are
//! joined line by line. Anything else is rejected.

pub mod csv_reader;
pub mod pdf_reader;

pub use csv_reader::instructions_from_csv;
pub use pdf_reader::instructions_from_pdf;

use crate::domain::DomainError;
use std::path::Path;
use tokio::fs;

/// Read `path` and return the discharge text it contains.
pub async fn read_input(path: &Path) -> Result<String, DomainError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::Input(format!("Failed to read {}: {}", path.display(), e))),
        "csv" => {
            let bytes = fs::read(path)
                .await
                .map_err(|e| DomainError::Input(format!("Failed to read {}: {}", path.display(), e)))?;
            instructions_from_csv(bytes.as_slice())
        }
        "pdf" => {
            let bytes = fs::read(path)
                .await
                .map_err(|e| DomainError::Input(format!("Failed to read {}: {}", path.display(), e)))?;
            // Parsing is CPU-bound and may panic on hostile files.
            tokio::task::spawn_blocking(move || instructions_from_pdf(&bytes))
                .await
                .map_err(|e| DomainError::Input(format!("PDF extraction aborted: {}", e)))?
        }
        other => Err(DomainError::Input(format!(
            "Unsupported file type '{}': expected .txt, .csv or .pdf",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_unsupported_extension() {
        let err = read_input(Path::new("discharge.docx")).await.unwrap_err();
        assert!(matches!(err, DomainError::Input(ref m) if m.contains("docx")));
    }

    #[tokio::test]
    async fn test_reads_txt_csv_and_pdf() {
        let dir = std::env::temp_dir().join(format!("promptrx-input-{}", std::process::id()));
        fs::create_dir_all(&dir).await.unwrap();

        let txt = dir.join("notes.TXT");
        fs::write(&txt, "Rest. Drink water.").await.unwrap();
        assert_eq!(read_input(&txt).await.unwrap(), "Rest. Drink water.");

        let csv = dir.join("notes.csv");
        fs::write(&csv, "id,instruction\n1,Rest\n2,Drink water\n").await.unwrap();
        assert_eq!(read_input(&csv).await.unwrap(), "Rest\nDrink water");

        let pdf = dir.join("notes.pdf");
        fs::write(&pdf, pdf_reader::tests::make_test_pdf(&["Rest at home", "Drink water"]))
            .await
            .unwrap();
        let text = read_input(&pdf).await.unwrap();
        assert!(text.contains("Rest") && text.contains("Drink"), "got: {text}");

        fs::remove_dir_all(&dir).await.unwrap();
    }
}
