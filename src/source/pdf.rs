//! PDF text layer extraction.
//!
//! Uses `pdfium-render` (Chromium's PDF library) to read the text layer of
//! each page. Pages are joined in page order with no separator.
//!
//! # Pipeline
//!
//! ```text
//! PDF bytes → pdfium document → per-page text → concatenated blob
//! ```

use anyhow::{bail, Context, Result};
use pdfium_render::prelude::*;
use tracing::debug;

use super::TextSource;

/// Reads the text layer of ellipsometer report PDFs.
pub struct PdfSource;

impl PdfSource {
    pub fn new() -> Self {
        Self
    }

    /// Extract every page's text, returning the per-page strings in order.
    fn extract_pages(bytes: &[u8]) -> Result<Vec<String>> {
        let pdfium = Pdfium::default();
        let doc = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .context("Failed to parse PDF")?;

        doc.pages()
            .iter()
            .enumerate()
            .map(|(page_idx, page)| {
                page.text()
                    .map(|text| text.all())
                    .with_context(|| format!("Failed to extract text from page {}", page_idx + 1))
            })
            .collect()
    }
}

impl Default for PdfSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for PdfSource {
    fn extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let start = std::time::Instant::now();
        let pages = Self::extract_pages(bytes)?;
        let text = join_pages(&pages);

        // Scanned reports (images without text layer) carry nothing to parse
        if text.trim().is_empty() && !pages.is_empty() {
            bail!(
                "Scanned PDF ({} pages) -- no text layer detected",
                pages.len()
            );
        }

        debug!(
            pages = pages.len(),
            chars = text.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "extracted pdf text"
        );
        Ok(text)
    }
}

fn join_pages(pages: &[String]) -> String {
    pages.concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_pages_keeps_order_without_separator() {
        let pages = vec!["Mean 1.0 ".to_string(), "StdDev 0.2 ".to_string()];
        assert_eq!(join_pages(&pages), "Mean 1.0 StdDev 0.2 ");
    }

    #[test]
    fn join_pages_empty() {
        assert_eq!(join_pages(&[]), "");
    }

    #[test]
    fn supported_extension_is_pdf() {
        assert_eq!(PdfSource::new().extensions(), &["pdf"]);
    }
}
