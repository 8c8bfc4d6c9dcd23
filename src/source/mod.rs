//! Document-to-text extraction.
//!
//! Routes a report document to the [`TextSource`] that can produce its text
//! layer. The parser only ever sees the resulting text blob.
//!
//! # Supported Inputs
//!
//! | Extension | Source | Feature Flag |
//! |-----------|--------|-------------|
//! | `.pdf` | [`pdf::PdfSource`] | `pdf` |
//! | `.txt`, `.text`, `.log` | [`PlainSource`] | always |
//!
//! Files with any other extension are sniffed: `%PDF` magic goes to the PDF
//! source, everything else is read as text.
//!
//! # Example
//!
//! ```rust
//! use ellipsomap::source::SourceRouter;
//!
//! let router = SourceRouter::new();
//! let text = router.extract(b"Mean 1.0 StdDev 0.1", "report.txt").unwrap();
//! assert!(text.contains("StdDev"));
//! ```

#[cfg(feature = "pdf")]
pub mod pdf;
pub mod plain;

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

pub use plain::PlainSource;

/// Magic bytes at the start of every PDF file.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Extracts the text layer of a report document.
///
/// Implementations are stateless and synchronous.
pub trait TextSource: Send + Sync {
    /// Lowercase file extensions this source handles (without the dot).
    fn extensions(&self) -> &[&str];

    /// Produce the document's text, all pages concatenated in order.
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}

/// Routes document bytes to the appropriate [`TextSource`] based on the
/// file extension.
pub struct SourceRouter {
    sources: Vec<Box<dyn TextSource>>,
}

impl SourceRouter {
    /// Create a router with all available sources.
    ///
    /// The PDF source is included only when the `pdf` feature flag is enabled.
    pub fn new() -> Self {
        #[cfg(feature = "pdf")]
        let sources: Vec<Box<dyn TextSource>> =
            vec![Box::new(pdf::PdfSource::new()), Box::new(PlainSource)];

        #[cfg(not(feature = "pdf"))]
        let sources: Vec<Box<dyn TextSource>> = vec![Box::new(PlainSource)];

        Self { sources }
    }

    /// Read a document from disk and extract its text.
    pub fn read(&self, path: &Path) -> Result<String> {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        self.extract(&bytes, name)
            .with_context(|| format!("failed to extract text from {}", path.display()))
    }

    /// Extract text from document bytes, choosing a source by `file_name`.
    pub fn extract(&self, bytes: &[u8], file_name: &str) -> Result<String> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        if let Some(source) = self.sources.iter().find(|s| s.extensions().contains(&ext.as_str())) {
            debug!(file = file_name, ext = %ext, "extracting text");
            return source.extract_text(bytes);
        }

        if ext == "pdf" || bytes.starts_with(PDF_MAGIC) {
            return self.extract_pdf(bytes);
        }

        // Fallback: treat unknown files as already-extracted text
        PlainSource.extract_text(bytes)
    }

    fn extract_pdf(&self, bytes: &[u8]) -> Result<String> {
        match self.sources.iter().find(|s| s.extensions().contains(&"pdf")) {
            Some(source) => source.extract_text(bytes),
            None => bail!("PDF input requires building with the `pdf` feature"),
        }
    }
}

impl Default for SourceRouter {
    fn default() -> Self {
        Self::new()
    }
}
