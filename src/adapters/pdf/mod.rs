//! Document adapters. Implement DocumentRenderer.

pub mod printpdf_renderer;

pub use printpdf_renderer::{PDF_CONTENT_TYPE, PDF_FILE_NAME, PrintPdfRenderer};
