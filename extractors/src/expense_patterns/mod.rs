mod extractor;

pub use extractor::{extract, ExpenseExtractor};

use regex::Regex;
use shared_types::Category;
use std::sync::OnceLock;

/// Number with optional thousands separators and decimals, e.g. `4,340.00`.
/// A malformed tail such as the `.5` in `12.34.5` is left out of the capture,
/// so the valid prefix is still read.
const NUMBER: &str = r"(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+\.?\d*)";

const MONTHS: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)";

/// A single field pattern; capture group 1 holds the value
pub struct FieldPattern {
    pub name: &'static str,
    pub regex: Regex,
}

impl FieldPattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("invalid built-in pattern"),
        }
    }

    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Ordered pattern sets per extracted field. Within a set the first
/// pattern that matches wins.
pub struct PatternLibrary {
    pub amount: Vec<FieldPattern>,
    pub date: Vec<FieldPattern>,
    pub vendor: Vec<FieldPattern>,
}

/// Compiled once per process and shared read-only
pub fn pattern_library() -> &'static PatternLibrary {
    static LIBRARY: OnceLock<PatternLibrary> = OnceLock::new();
    LIBRARY.get_or_init(create_pattern_library)
}

fn create_pattern_library() -> PatternLibrary {
    PatternLibrary {
        amount: vec![
            FieldPattern::new("currency_prefixed", &format!(r"\${}", NUMBER)),
            FieldPattern::new("dollars_suffix", &format!(r"(?i){}\s*dollars?\b", NUMBER)),
            FieldPattern::new("total_label", &format!(r"(?i)total[:\s]*\$?{}", NUMBER)),
            FieldPattern::new("amount_label", &format!(r"(?i)amount[:\s]*\$?{}", NUMBER)),
        ],
        date: vec![
            FieldPattern::new("numeric", r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b"),
            FieldPattern::new("iso", r"\b(\d{4}-\d{2}-\d{2})\b"),
            FieldPattern::new(
                "month_day_year",
                &format!(r"(?i)\b({}[a-z]*\.?\s+\d{{1,2}},?\s+\d{{4}})\b", MONTHS),
            ),
            FieldPattern::new(
                "day_month_year",
                &format!(r"(?i)\b(\d{{1,2}}\s+{}[a-z]*\.?\s+\d{{4}})\b", MONTHS),
            ),
        ],
        vendor: vec![
            FieldPattern::new("from_label", r"(?i)\bfrom[:\s]*([a-z&][a-z& \t]*)"),
            FieldPattern::new("vendor_label", r"(?i)\bvendor[:\s]*([a-z&][a-z& \t]*)"),
            FieldPattern::new("store_label", r"(?i)\bstore[:\s]*([a-z&][a-z& \t]*)"),
            FieldPattern::new("merchant_label", r"(?i)\bmerchant[:\s]*([a-z&][a-z& \t]*)"),
        ],
    }
}

/// Keywords that place a text into a category
pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

/// Shared by document extraction and title categorization. Order matters:
/// a text can hit several rules and the first one wins.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::FoodDining,
        keywords: &[
            "restaurant", "food", "coffee", "starbucks", "lunch", "dinner", "breakfast", "cafe",
            "bar", "pizza", "burger",
        ],
    },
    CategoryRule {
        category: Category::Transportation,
        keywords: &[
            "gas", "gasoline", "fuel", "petrol", "uber", "lyft", "taxi", "parking", "toll",
            "metro", "bus", "train",
        ],
    },
    CategoryRule {
        category: Category::Travel,
        keywords: &[
            "hotel", "flight", "airline", "accommodation", "lodging", "booking", "airbnb",
        ],
    },
    CategoryRule {
        category: Category::OfficeSupplies,
        keywords: &[
            "office", "supplies", "stationery", "paper", "pens", "notebook", "stapler",
        ],
    },
    CategoryRule {
        category: Category::Technology,
        keywords: &[
            "software", "subscription", "license", "saas", "cloud", "hosting", "domain", "app",
        ],
    },
    CategoryRule {
        category: Category::Business,
        keywords: &["meeting", "client", "conference", "seminar", "workshop", "training"],
    },
    CategoryRule {
        category: Category::Healthcare,
        keywords: &[
            "doctor", "medical", "pharmacy", "hospital", "clinic", "medicine", "health",
        ],
    },
    CategoryRule {
        category: Category::Entertainment,
        keywords: &[
            "movie", "theater", "concert", "sports", "game", "entertainment", "netflix", "spotify",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_order() {
        let library = pattern_library();
        let amount_names: Vec<_> = library.amount.iter().map(|p| p.name).collect();
        assert_eq!(
            amount_names,
            vec!["currency_prefixed", "dollars_suffix", "total_label", "amount_label"]
        );
        assert_eq!(library.date.len(), 4);
        assert_eq!(library.vendor.len(), 4);
    }

    #[test]
    fn test_number_capture_stops_before_punctuation() {
        let pattern = &pattern_library().amount[0];
        assert_eq!(pattern.capture("That was $12.34."), Some("12.34"));
        assert_eq!(pattern.capture("Total $4,340.00, thanks"), Some("4,340.00"));
        assert_eq!(pattern.capture("$7"), Some("7"));
        assert_eq!(pattern.capture("Paid $12.34.5"), Some("12.34"));
        assert_eq!(pattern.capture("$1234.56"), Some("1234.56"));
    }

    #[test]
    fn test_iso_date_not_read_as_numeric() {
        let library = pattern_library();
        assert_eq!(library.date[0].capture("Date: 2024-01-15"), None);
        assert_eq!(library.date[1].capture("Date: 2024-01-15"), Some("2024-01-15"));
    }

    #[test]
    fn test_month_name_dates_capture_whole_expression() {
        let library = pattern_library();
        assert_eq!(
            library.date[2].capture("Date: January 15, 2024"),
            Some("January 15, 2024")
        );
        assert_eq!(library.date[3].capture("Issued 3 Mar 2023"), Some("3 Mar 2023"));
    }

    #[test]
    fn test_vendor_stays_on_its_line() {
        let pattern = &pattern_library().vendor[1];
        assert_eq!(
            pattern.capture("Vendor: Sample Store\nDescription: x"),
            Some("Sample Store")
        );
    }

    #[test]
    fn test_every_category_but_other_has_a_rule() {
        let ruled: Vec<_> = CATEGORY_RULES.iter().map(|r| r.category).collect();
        for category in Category::ALL {
            assert_eq!(ruled.contains(&category), category != Category::Other);
        }
    }
}
