use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::extraction::ExtractedRecord;

/// Uploaded receipt or invoice document
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct StoredFile {
    pub id: i64,
    pub user_id: i64,
    pub filename: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub upload_date: i64,
    pub processed: bool,
    pub extracted_data: Option<ExtractedRecord>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct FilesResponse {
    pub files: Vec<StoredFile>,
}
