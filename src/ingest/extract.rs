//! Format-specific text extraction
//!
//! The filename extension alone selects the extraction strategy. Anything
//! outside the supported set is rejected with an extraction error before
//! any bytes are touched, so directory ingestion can skip-and-continue.

use std::path::Path;

use crate::errors::DocRagError;
use crate::errors::Result;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    /// Plain text; markdown is read the same way, its markup survives
    /// into normalization as ordinary punctuation.
    Text,
}

impl DocumentFormat {
    /// Select a format from the filename extension.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("txt" | "md") => Ok(DocumentFormat::Text),
            Some(other) => Err(DocRagError::Extraction(format!(
                "unsupported file extension '.{other}' for {filename}"
            ))),
            None => Err(DocRagError::Extraction(format!(
                "no file extension on {filename}"
            ))),
        }
    }
}

/// Extract raw text from a document buffer.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String> {
    match DocumentFormat::from_filename(filename)? {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            DocRagError::Extraction(format!("failed to extract PDF text from {filename}: {e}"))
        }),
        DocumentFormat::Text => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_format_by_extension() {
        assert_eq!(
            DocumentFormat::from_filename("report.PDF").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_filename("notes.txt").unwrap(),
            DocumentFormat::Text
        );
        assert_eq!(
            DocumentFormat::from_filename("README.md").unwrap(),
            DocumentFormat::Text
        );
    }

    #[test]
    fn rejects_unsupported_extensions() {
        assert!(matches!(
            DocumentFormat::from_filename("image.png"),
            Err(DocRagError::Extraction(_))
        ));
        assert!(matches!(
            DocumentFormat::from_filename("Makefile"),
            Err(DocRagError::Extraction(_))
        ));
    }

    #[test]
    fn plain_text_is_lossy_utf8() {
        let bytes = b"hello \xff world";
        let text = extract_text(bytes, "f.txt").unwrap();
        assert!(text.starts_with("hello"));
        assert!(text.ends_with("world"));
    }
}
