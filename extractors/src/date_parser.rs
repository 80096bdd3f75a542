use chrono::NaiveDate;

/// Formats tried in order; numeric dates are read month-first
const NUMERIC_FORMATS: &[&str] = &["%m/%d/%Y", "%m-%d-%Y", "%Y-%m-%d"];
/// `%y` pivots at 70: `00`-`69` are 20xx, `70`-`99` are 19xx
const SHORT_YEAR_FORMATS: &[&str] = &["%m/%d/%y", "%m-%d-%y"];
const NAMED_MONTH_FORMATS: &[&str] = &["%B %d %Y", "%b %d %Y", "%d %B %Y", "%d %b %Y"];

/// Turn a date as it appeared on a receipt into a calendar date.
///
/// Accepts the shapes the extractor recognises: `01/15/2024`, `1-5-24`,
/// `2024-01-15`, `January 15, 2024`, `Jan. 15 2024` and `15 Jan 2024`.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let has_four_digit_year = raw
        .split(|c: char| !c.is_ascii_digit())
        .any(|part| part.len() == 4);

    if has_four_digit_year {
        if let Some(date) = try_formats(raw, NUMERIC_FORMATS) {
            return Some(date);
        }
    } else if let Some(date) = try_formats(raw, SHORT_YEAR_FORMATS) {
        return Some(date);
    }

    let cleaned = raw
        .replace(',', " ")
        .replace('.', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    try_formats(&cleaned, NAMED_MONTH_FORMATS)
}

fn try_formats(raw: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// ISO form stored with expenses
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
