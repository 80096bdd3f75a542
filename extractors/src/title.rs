use shared_types::Category;

/// Suggest an expense title from extracted fields
pub fn suggest_title(vendor: Option<&str>, amount: f64, category: Category) -> String {
    match vendor.map(str::trim).filter(|v| !v.is_empty()) {
        Some(vendor) => format!("{} - {}", vendor, category),
        None if category != Category::Other => format!("{} Expense", category),
        None => format!("Business Expense - ${:.2}", amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_takes_precedence() {
        assert_eq!(
            suggest_title(Some("Acme"), 50.0, Category::Technology),
            "Acme - Technology"
        );
        assert_eq!(
            suggest_title(Some("Acme"), 50.0, Category::Other),
            "Acme - Other"
        );
    }

    #[test]
    fn test_category_title() {
        assert_eq!(
            suggest_title(None, 12.0, Category::FoodDining),
            "Food & Dining Expense"
        );
    }

    #[test]
    fn test_fallback_formats_amount() {
        assert_eq!(suggest_title(None, 50.0, Category::Other), "Business Expense - $50.00");
        assert_eq!(suggest_title(Some("  "), 7.5, Category::Other), "Business Expense - $7.50");
    }
}
