use crate::categorizer::categorize_text;
use crate::expense_patterns::{pattern_library, FieldPattern, PatternLibrary};
use regex::Regex;
use shared_types::{Category, ExtractedRecord};
use std::sync::OnceLock;

// Partial confidence credits, in tenths
const AMOUNT_CREDIT: u8 = 4;
const DATE_CREDIT: u8 = 3;
const VENDOR_CREDIT: u8 = 2;
const CATEGORY_CREDIT: u8 = 1;

const DESCRIPTION_LINES: usize = 3;
const DESCRIPTION_SEPARATOR: &str = " | ";

/// Turns the text of a receipt or invoice into an [`ExtractedRecord`].
///
/// Stateless: every call starts from a fresh record, so one extractor can be
/// shared freely between callers.
pub struct ExpenseExtractor {
    library: &'static PatternLibrary,
}

impl ExpenseExtractor {
    pub fn new() -> Self {
        Self {
            library: pattern_library(),
        }
    }

    pub fn extract(&self, text: &str) -> ExtractedRecord {
        let amount = self.extract_amount(text);
        let date = first_capture(&self.library.date, text).map(str::to_string);
        let vendor = self.extract_vendor(text);
        let category = categorize_text(text);
        let description = extract_description(text);
        let confidence = confidence_score(
            amount.is_some(),
            date.is_some(),
            vendor.is_some(),
            category != Category::Other,
        );

        ExtractedRecord {
            amount,
            date,
            vendor,
            description,
            category,
            confidence,
        }
    }

    fn extract_amount(&self, text: &str) -> Option<f64> {
        for pattern in &self.library.amount {
            let Some(raw) = pattern.capture(text) else {
                continue;
            };
            match parse_amount(raw) {
                Some(amount) => return Some(amount),
                None => {
                    tracing::debug!(pattern = pattern.name, raw, "Skipping malformed amount");
                }
            }
        }
        None
    }

    fn extract_vendor(&self, text: &str) -> Option<String> {
        self.library.vendor.iter().find_map(|pattern| {
            pattern
                .capture(text)
                .map(str::trim)
                .filter(|vendor| !vendor.is_empty())
                .map(str::to_string)
        })
    }
}

impl Default for ExpenseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract with the built-in pattern library
pub fn extract(text: &str) -> ExtractedRecord {
    ExpenseExtractor::new().extract(text)
}

fn first_capture<'t>(patterns: &[FieldPattern], text: &'t str) -> Option<&'t str> {
    patterns.iter().find_map(|pattern| pattern.capture(text))
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace(',', "").trim().parse::<f64>().ok()
}

/// Lines that carry nothing but a number (`12`, `$4.50`) are skipped
fn is_bare_number(line: &str) -> bool {
    static BARE_NUMBER: OnceLock<Regex> = OnceLock::new();
    BARE_NUMBER
        .get_or_init(|| Regex::new(r"^\$?\d+\.?\d*$").expect("invalid built-in pattern"))
        .is_match(line)
}

fn extract_description(text: &str) -> Option<String> {
    let parts: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > 3 && !is_bare_number(line))
        .take(DESCRIPTION_LINES)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(DESCRIPTION_SEPARATOR))
    }
}

pub(crate) fn confidence_score(
    has_amount: bool,
    has_date: bool,
    has_vendor: bool,
    categorized: bool,
) -> f64 {
    let tenths = [
        (has_amount, AMOUNT_CREDIT),
        (has_date, DATE_CREDIT),
        (has_vendor, VENDOR_CREDIT),
        (categorized, CATEGORY_CREDIT),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, credit)| *credit)
    .sum::<u8>();

    f64::from(tenths) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECEIPT: &str = "
        STARBUCKS COFFEE
        123 Main Street
        New York, NY 10001

        Date: 01/15/2024
        Time: 14:30

        Large Coffee        $4.50
        Muffin              $2.75
        Tax                 $0.65
        -----------------
        Total              $7.90

        Thank you for your visit!
    ";

    #[test]
    fn test_currency_amount() {
        let record = extract("Paid $12.34 at the counter");
        assert_eq!(record.amount, Some(12.34));
    }

    #[test]
    fn test_amount_absent_without_currency_or_label() {
        let record = extract("Meeting notes\nDiscussed roadmap for 2024-02-01");
        assert_eq!(record.amount, None);
    }

    #[test]
    fn test_amount_pattern_priority() {
        assert_eq!(extract("It cost 15 dollars").amount, Some(15.0));
        assert_eq!(extract("TOTAL: 99.10").amount, Some(99.1));
        assert_eq!(extract("Amount 42").amount, Some(42.0));
        // currency-prefixed wins even when a total label appears first
        assert_eq!(extract("Total: 10\nItem $3.00").amount, Some(3.0));
    }

    #[test]
    fn test_malformed_tail_keeps_valid_prefix() {
        assert_eq!(extract("Paid $12.34.5 today").amount, Some(12.34));
        assert_eq!(extract("Ref $12.34.56").amount, Some(12.34));
        assert_eq!(extract("Ref $1.2.3\nTotal: 9.50").amount, Some(1.2));
    }

    #[test]
    fn test_unparseable_capture_falls_through() {
        assert_eq!(parse_amount("1.2.3"), None);
        assert_eq!(parse_amount("1,234.56"), Some(1234.56));
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(extract("Total $4,340.00").amount, Some(4340.0));
        assert_eq!(extract("Paid $1,234.56 by card").amount, Some(1234.56));
        assert_eq!(extract("Grand total 1,000,000 dollars").amount, Some(1_000_000.0));
    }

    #[test]
    fn test_date_kept_verbatim() {
        assert_eq!(extract("Date: 01/15/2024").date.as_deref(), Some("01/15/2024"));
        assert_eq!(extract("on 2024-01-15").date.as_deref(), Some("2024-01-15"));
        assert_eq!(
            extract("Date: January 15, 2024").date.as_deref(),
            Some("January 15, 2024")
        );
        assert_eq!(extract("15 Jan 2024").date.as_deref(), Some("15 Jan 2024"));
        assert_eq!(extract("no date here").date, None);
    }

    #[test]
    fn test_vendor_labels() {
        assert_eq!(
            extract("Vendor: Sample Store\n$3").vendor.as_deref(),
            Some("Sample Store")
        );
        assert_eq!(extract("MERCHANT:  Joe & Sons  ").vendor.as_deref(), Some("Joe & Sons"));
        assert_eq!(extract("store: 1234").vendor, None);
    }

    #[test]
    fn test_category_order() {
        assert_eq!(extract("coffee and gas").category, Category::FoodDining);
        assert_eq!(extract("gas station").category, Category::Transportation);
        assert_eq!(extract("nothing relevant").category, Category::Other);
    }

    #[test]
    fn test_description_lines() {
        let record = extract("$4.50\nabc\n  First line  \n12\nSecond line\nThird line\nFourth");
        assert_eq!(
            record.description.as_deref(),
            Some("First line | Second line | Third line")
        );
        assert_eq!(extract("$1\n22\nab").description, None);
    }

    #[test]
    fn test_sample_receipt() {
        let record = extract(RECEIPT);
        assert_eq!(record.amount, Some(4.5));
        assert_eq!(record.date.as_deref(), Some("01/15/2024"));
        assert_eq!(record.vendor, None);
        assert_eq!(record.category, Category::FoodDining);
        assert_eq!(
            record.description.as_deref(),
            Some("STARBUCKS COFFEE | 123 Main Street | New York, NY 10001")
        );
        assert_eq!(record.confidence, 0.8);
    }

    #[test]
    fn test_confidence_all_combinations() {
        for mask in 0u8..16 {
            let amount = mask & 1 != 0;
            let date = mask & 2 != 0;
            let vendor = mask & 4 != 0;
            let category = mask & 8 != 0;

            let expected_tenths = u8::from(amount) * 4
                + u8::from(date) * 3
                + u8::from(vendor) * 2
                + u8::from(category);
            let expected = f64::from(expected_tenths) / 10.0;

            assert_eq!(confidence_score(amount, date, vendor, category), expected);
            assert!((0.0..=1.0).contains(&expected));
        }
        assert_eq!(confidence_score(true, true, true, true), 1.0);
        assert_eq!(confidence_score(true, true, false, false), 0.7);
    }

    #[test]
    fn test_extraction_matches_confidence_of_fields() {
        let text = "From: Acme Hotel\nDate: 2024-03-02\nTotal: $120.00";
        let record = extract(text);
        assert_eq!(record.vendor.as_deref(), Some("Acme Hotel"));
        assert_eq!(record.category, Category::Travel);
        assert_eq!(record.confidence, 1.0);
    }
}
