mod sidecar;

pub use sidecar::SidecarTextSource;

use crate::expense_patterns::ExpenseExtractor;
use shared_types::{DocumentProcessingResult, ExtractionError};
use std::path::Path;

const IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/tiff",
    "image/bmp",
];
const PDF_TYPE: &str = "application/pdf";

/// Source of the text contained in an uploaded document.
///
/// Character recognition and PDF parsing live behind this trait so the
/// extraction pipeline only ever sees plain text.
pub trait TextSource {
    fn image_text(&self, path: &Path) -> Result<String, ExtractionError>;

    fn pdf_text(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Supported document kinds, resolved from a MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Image,
    Pdf,
}

impl DocumentKind {
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let mime_type = mime_type.trim().to_lowercase();
        if IMAGE_TYPES.contains(&mime_type.as_str()) {
            Some(DocumentKind::Image)
        } else if mime_type == PDF_TYPE {
            Some(DocumentKind::Pdf)
        } else {
            None
        }
    }
}

/// Runs text acquisition followed by expense extraction
pub struct DocumentProcessor<S> {
    source: S,
    extractor: ExpenseExtractor,
}

impl<S: TextSource> DocumentProcessor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            extractor: ExpenseExtractor::new(),
        }
    }

    /// Never fails: unsupported types and unreadable documents come back as
    /// an unsuccessful result carrying the reason.
    pub fn process_document(&self, path: &Path, mime_type: &str) -> DocumentProcessingResult {
        let Some(kind) = DocumentKind::from_mime(mime_type) else {
            tracing::info!(mime_type, "Rejecting unsupported document type");
            return DocumentProcessingResult::failure(format!(
                "Unsupported file type: {}",
                mime_type
            ));
        };

        let text = match kind {
            DocumentKind::Image => self.source.image_text(path),
            DocumentKind::Pdf => self.source.pdf_text(path),
        };

        let text = match text {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to acquire document text: {}", e);
                return DocumentProcessingResult::failure(e.to_string());
            }
        };

        let record = self.extractor.extract(&text);
        tracing::debug!(
            path = %path.display(),
            confidence = record.confidence,
            category = %record.category,
            "Extracted expense fields"
        );

        DocumentProcessingResult {
            success: true,
            raw_text: Some(text),
            extracted_data: Some(record),
            error: None,
            processed_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }
}
