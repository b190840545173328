//! PDF Text Extraction
//!
//! Native text extraction via pdf-extract. Page text arrives already joined
//! with newlines in page order.

use std::path::Path;

use crate::types::{DocError, Result};

/// Extract text from every page of a PDF, in order.
///
/// Wrapped in catch_unwind: pdf-extract (via its font parsing) can panic on
/// malformed fonts, and one bad document must not take down a batch.
pub fn extract(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;

    let extracted = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(&bytes)
    }));

    match extracted {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(DocError::Extraction(format!(
            "cannot extract text from PDF {}: {}",
            path.display(),
            e
        ))),
        Err(_) => Err(DocError::Extraction(format!(
            "PDF extraction panicked for {} (malformed font?)",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_error() {
        let err = extract(Path::new("/nonexistent/file.pdf")).unwrap_err();
        assert!(matches!(err, DocError::Io(_)));
    }

    #[test]
    fn test_garbage_bytes_are_an_extraction_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let err = extract(&path).unwrap_err();
        assert!(matches!(err, DocError::Extraction(_)));
    }
}
