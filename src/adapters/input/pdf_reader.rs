//! PDF text extraction via `pdf-extract`. Handles digital PDFs with an embedded
//! text layer; scanned pages come back empty and are skipped.

use crate::domain::DomainError;

/// Extract the text of every non-empty page, joined with line breaks.
pub fn instructions_from_pdf(pdf_bytes: &[u8]) -> Result<String, DomainError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| DomainError::Input(format!("Failed to parse PDF: {}", e)))?;

    let text = pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        return Err(DomainError::Input(
            "PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a PDF with one Helvetica text line per page.
    pub(crate) fn make_test_pdf(pages: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let pages_id = doc.new_object_id();

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_extracts_text_and_skips_empty_pages() {
        let pdf = make_test_pdf(&["Rest at home", "", "Drink water"]);
        let text = instructions_from_pdf(&pdf).unwrap();

        assert!(text.contains("Rest"), "got: {text}");
        assert!(text.contains("Drink"), "got: {text}");
        assert!(!text.contains("\n\n"), "empty page leaked a blank line: {text:?}");
        assert!(text.find("Rest") < text.find("Drink"));
    }

    #[test]
    fn test_blank_pdf_is_input_error() {
        let pdf = make_test_pdf(&[""]);
        let err = instructions_from_pdf(&pdf).unwrap_err();
        assert!(matches!(err, DomainError::Input(ref m) if m.contains("no extractable text")));
    }

    #[test]
    fn test_invalid_pdf_is_input_error() {
        let err = instructions_from_pdf(b"not a pdf").unwrap_err();
        assert!(matches!(err, DomainError::Input(ref m) if m.contains("Failed to parse PDF")));
    }
}
