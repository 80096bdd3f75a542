use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::expense::{Category, CreateExpenseRequest};

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Failed to read document text: {0}")]
    TextUnavailable(String),

    #[error("Export error: {0}")]
    ExportError(String),
}

/// Fields located in a document's text.
///
/// Every field is independently optional: `None` means the pattern library
/// found nothing, which is different from a zero amount or an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ExtractedRecord {
    pub amount: Option<f64>,
    /// Date text exactly as it appeared in the document
    pub date: Option<String>,
    pub vendor: Option<String>,
    pub description: Option<String>,
    pub category: Category,
    /// Heuristic score in `[0, 1]`
    pub confidence: f64,
}

/// Outcome of the minimum-viability checks on an extracted record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors: Vec<String>,
}

/// Result of running document intake on a stored file
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DocumentProcessingResult {
    pub success: bool,
    pub raw_text: Option<String>,
    pub extracted_data: Option<ExtractedRecord>,
    pub error: Option<String>,
    /// RFC 3339 timestamp, only set on success
    pub processed_at: Option<String>,
}

impl DocumentProcessingResult {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            raw_text: None,
            extracted_data: None,
            error: Some(error.into()),
            processed_at: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct ExtractTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct ExtractTextResponse {
    pub record: ExtractedRecord,
    pub validation: ValidationReport,
    pub suggested_title: String,
}

/// Response of processing an uploaded receipt
#[derive(Debug, Serialize, Deserialize, TS)]
pub struct ProcessFileResponse {
    pub result: DocumentProcessingResult,
    pub validation: Option<ValidationReport>,
    pub suggested_title: Option<String>,
    /// Expense pre-filled from the extraction, ready to be posted back
    pub draft: Option<CreateExpenseRequest>,
}
