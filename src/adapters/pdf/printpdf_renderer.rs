//! PDF rendering via `printpdf` builtin fonts.
//!
//! Layout (sanitizing, wrapping, pagination) comes from `domain::layout`; this
//! adapter only places the rows on A4 pages.

use crate::domain::layout::{self, PageGeometry, RowStyle};
use crate::domain::{DomainError, Report};
use crate::ports::DocumentRenderer;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use std::io::BufWriter;
use tracing::debug;

pub const PDF_FILE_NAME: &str = "Simplified_Discharge_Instructions.pdf";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const LAYER_NAME: &str = "Layer 1";

/// Renders a report as a paginated PDF.
#[derive(Debug, Clone, Default)]
pub struct PrintPdfRenderer {
    geometry: PageGeometry,
}

impl PrintPdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentRenderer for PrintPdfRenderer {
    fn render(&self, report: &Report) -> Result<Vec<u8>, DomainError> {
        let g = self.geometry;
        let pages = layout::paginate(layout::layout_rows(report), &g);

        let (doc, first_page, first_layer) =
            PdfDocument::new(layout::TITLE, Mm(g.width_mm), Mm(g.height_mm), LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| DomainError::Render(format!("PDF font error: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| DomainError::Render(format!("PDF font error: {e}")))?;

        for (index, page) in pages.iter().enumerate() {
            let (page_idx, layer_idx) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(g.width_mm), Mm(g.height_mm), LAYER_NAME)
            };
            let layer = doc.get_page(page_idx).get_layer(layer_idx);

            for placed in page {
                let font: &IndirectFontRef = match placed.row.style {
                    RowStyle::Title | RowStyle::Heading => &bold,
                    RowStyle::Body => &regular,
                };
                layer.use_text(
                    placed.row.text.as_str(),
                    placed.row.style.font_size_pt(),
                    Mm(g.margin_left_mm),
                    Mm(placed.baseline_mm),
                    font,
                );
            }
        }

        debug!(pages = pages.len(), items = report.items.len(), "document laid out");

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf)
            .map_err(|e| DomainError::Render(format!("PDF save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| DomainError::Render(format!("PDF buffer error: {e}")))
    }

    fn file_name(&self) -> &str {
        PDF_FILE_NAME
    }

    fn content_type(&self) -> &str {
        PDF_CONTENT_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, SimplifiedItem};

    fn sample_report(items: usize) -> Report {
        Report {
            items: (0..items)
                .map(|i| SimplifiedItem {
                    category: Category::KNOWN[i % Category::KNOWN.len()],
                    simplified_text: format!("Instruction number {i} \u{2014} don\u{2019}t skip it 💊"),
                })
                .collect(),
            grouped_summary: "- Take your medicine\n- Call if worse".to_string(),
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = PrintPdfRenderer::new().render(&sample_report(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_spans_multiple_pages() {
        let geometry = PageGeometry::default();
        let short_report = sample_report(2);
        let long_report = sample_report(120);
        assert_eq!(
            layout::paginate(layout::layout_rows(&short_report), &geometry).len(),
            1
        );
        assert!(layout::paginate(layout::layout_rows(&long_report), &geometry).len() > 1);

        let renderer = PrintPdfRenderer::new();
        let short = renderer.render(&short_report).unwrap();
        let long = renderer.render(&long_report).unwrap();
        assert!(long.starts_with(b"%PDF"));
        assert!(long.len() > short.len());
    }

    #[test]
    fn test_renderer_metadata() {
        let renderer = PrintPdfRenderer::new();
        assert_eq!(renderer.file_name(), "Simplified_Discharge_Instructions.pdf");
        assert_eq!(renderer.content_type(), "application/pdf");
    }
}
