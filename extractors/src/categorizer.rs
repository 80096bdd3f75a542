use crate::expense_patterns::CATEGORY_RULES;
use shared_types::Category;

/// Categorize an expense from its title and optional description
pub fn categorize(title: &str, description: Option<&str>) -> Category {
    categorize_text(&format!("{} {}", title, description.unwrap_or("")))
}

/// First rule with a keyword contained in the text wins, `Other` otherwise
pub fn categorize_text(text: &str) -> Category {
    let text = text.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|rule| rule.category)
        .unwrap_or(Category::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_only() {
        assert_eq!(categorize("Uber to airport", None), Category::Transportation);
        assert_eq!(categorize("Team Lunch", None), Category::FoodDining);
        assert_eq!(categorize("Netflix", None), Category::Entertainment);
    }

    #[test]
    fn test_description_is_considered() {
        assert_eq!(
            categorize("Monthly charge", Some("Cloud hosting plan")),
            Category::Technology
        );
        assert_eq!(
            categorize("Visit", Some("Pharmacy refill")),
            Category::Healthcare
        );
    }

    #[test]
    fn test_first_rule_wins() {
        // "coffee" (food) appears after "gas" (transportation) but food is checked first
        assert_eq!(categorize("Gas and coffee", None), Category::FoodDining);
        assert_eq!(categorize("Hotel conference", None), Category::Travel);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize_text("STAPLER REFILL"), Category::OfficeSupplies);
        assert_eq!(categorize_text("Client Workshop"), Category::Business);
    }

    #[test]
    fn test_fallback_other() {
        assert_eq!(categorize("Misc", None), Category::Other);
        assert_eq!(categorize("", Some("")), Category::Other);
    }
}
