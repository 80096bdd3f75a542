use super::TextSource;
use shared_types::ExtractionError;
use std::path::{Path, PathBuf};

/// Reads a transcript produced ahead of time by an external OCR or PDF tool.
///
/// For `uploads/receipt.jpg` the transcript is `uploads/receipt.jpg.txt`,
/// falling back to `uploads/receipt.txt`.
#[derive(Debug, Clone, Default)]
pub struct SidecarTextSource;

impl SidecarTextSource {
    pub fn new() -> Self {
        Self
    }

    fn candidates(path: &Path) -> Vec<PathBuf> {
        let mut appended = path.as_os_str().to_owned();
        appended.push(".txt");

        let mut candidates = vec![PathBuf::from(appended)];
        if path.extension().is_some() {
            candidates.push(path.with_extension("txt"));
        }
        candidates
    }

    fn read_transcript(&self, path: &Path) -> Result<String, ExtractionError> {
        for candidate in Self::candidates(path) {
            if candidate.is_file() {
                return std::fs::read_to_string(&candidate).map_err(|e| {
                    tracing::warn!(path = %candidate.display(), "Failed to read transcript: {}", e);
                    ExtractionError::TextUnavailable("transcript could not be read".to_string())
                });
            }
        }

        tracing::warn!(path = %path.display(), "No transcript found");
        Err(ExtractionError::TextUnavailable(
            "no transcript found for this document".to_string(),
        ))
    }
}

impl TextSource for SidecarTextSource {
    fn image_text(&self, path: &Path) -> Result<String, ExtractionError> {
        self.read_transcript(path)
    }

    fn pdf_text(&self, path: &Path) -> Result<String, ExtractionError> {
        self.read_transcript(path)
    }
}
