//! Already-extracted text reports.
//!
//! Handles reports that were exported or copied to a text file, passing the
//! bytes through without transformation.

use anyhow::Result;

use super::TextSource;

/// Passes text content through, replacing invalid UTF-8 sequences.
pub struct PlainSource;

impl TextSource for PlainSource {
    fn extensions(&self) -> &[&str] {
        &["txt", "text", "log"]
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_text_through() {
        let text = PlainSource.extract_text(b"StdDev 2.1 Mean 1000.3").unwrap();
        assert_eq!(text, "StdDev 2.1 Mean 1000.3");
    }

    #[test]
    fn handles_empty_input() {
        assert_eq!(PlainSource.extract_text(b"").unwrap(), "");
    }

    #[test]
    fn handles_non_utf8() {
        let bytes: &[u8] = &[0xff, 0xfe, b'R', b'=', b'1', b','];
        let text = PlainSource.extract_text(bytes).unwrap();
        assert!(text.contains("R=1,"));
    }
}
