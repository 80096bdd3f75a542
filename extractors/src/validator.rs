use shared_types::{ExtractedRecord, ValidationReport};

pub const MIN_CONFIDENCE: f64 = 0.3;

pub const INVALID_AMOUNT: &str = "Invalid or missing amount";
pub const MISSING_DATE: &str = "No date found in document";
pub const LOW_CONFIDENCE: &str = "Low confidence in extracted data";

/// Check an extracted record for minimum viability.
///
/// Every rule is evaluated so the caller sees all problems at once.
pub fn validate(record: &ExtractedRecord) -> ValidationReport {
    let mut errors = Vec::new();

    if !record.amount.is_some_and(|amount| amount > 0.0) {
        errors.push(INVALID_AMOUNT.to_string());
    }

    if record.date.is_none() {
        errors.push(MISSING_DATE.to_string());
    }

    if record.confidence < MIN_CONFIDENCE {
        errors.push(LOW_CONFIDENCE.to_string());
    }

    ValidationReport {
        ok: errors.is_empty(),
        errors,
    }
}
