use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Spending category assigned to expenses and extracted documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    FoodDining,
    Transportation,
    Travel,
    OfficeSupplies,
    Technology,
    Business,
    Healthcare,
    Entertainment,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::FoodDining,
        Category::Transportation,
        Category::Travel,
        Category::OfficeSupplies,
        Category::Technology,
        Category::Business,
        Category::Healthcare,
        Category::Entertainment,
        Category::Other,
    ];

    /// Storage/wire identifier, matches the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodDining => "food-dining",
            Category::Transportation => "transportation",
            Category::Travel => "travel",
            Category::OfficeSupplies => "office-supplies",
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Healthcare => "healthcare",
            Category::Entertainment => "entertainment",
            Category::Other => "other",
        }
    }

    /// Human readable name used in titles and exports
    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Travel => "Travel",
            Category::OfficeSupplies => "Office Supplies",
            Category::Technology => "Technology",
            Category::Business => "Business",
            Category::Healthcare => "Healthcare",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts either the identifier (`food-dining`) or the label (`Food & Dining`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .find(|c| c.as_str() == needle || c.label().eq_ignore_ascii_case(needle))
            .copied()
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Review status of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ExpenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "pending",
            ExpenseStatus::Approved => "approved",
            ExpenseStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ExpenseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ExpenseStatus::Pending),
            "approved" => Ok(ExpenseStatus::Approved),
            "rejected" => Ok(ExpenseStatus::Rejected),
            other => Err(format!("Unknown expense status: {}", other)),
        }
    }
}

/// Expense stored for a user
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub description: Option<String>,
    /// ISO `YYYY-MM-DD`
    pub date: String,
    pub receipt_path: Option<String>,
    pub status: ExpenseStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateExpenseRequest {
    pub title: String,
    pub amount: f64,
    /// Assigned by keyword categorization when omitted
    pub category: Option<Category>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub receipt_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpdateExpenseRequest {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub status: Option<ExpenseStatus>,
}

impl UpdateExpenseRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.status.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct ExpensesResponse {
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct CategorizeRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct CategorizeResponse {
    pub category: Category,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct SuggestTitleRequest {
    pub vendor: Option<String>,
    pub amount: f64,
    pub category: Category,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct SuggestTitleResponse {
    pub title: String,
}

/// Anything that carries an amount and a category can be summarized
pub trait CategorizedAmount {
    fn amount(&self) -> f64;
    fn category(&self) -> Category;
}

impl CategorizedAmount for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn category(&self) -> Category {
        self.category
    }
}

/// Minimal amount/category pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpendEntry {
    pub amount: f64,
    pub category: Category,
}

impl CategorizedAmount for SpendEntry {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn category(&self) -> Category {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_identifier_and_label() {
        assert_eq!("food-dining".parse::<Category>(), Ok(Category::FoodDining));
        assert_eq!("Office Supplies".parse::<Category>(), Ok(Category::OfficeSupplies));
        assert_eq!("travel".parse::<Category>(), Ok(Category::Travel));
        assert!("groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_matches_as_str() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_status_defaults_to_pending() {
        assert_eq!(ExpenseStatus::default(), ExpenseStatus::Pending);
        assert_eq!("approved".parse::<ExpenseStatus>(), Ok(ExpenseStatus::Approved));
    }

    #[test]
    fn test_empty_update() {
        assert!(UpdateExpenseRequest::default().is_empty());
        let update = UpdateExpenseRequest {
            amount: Some(12.0),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
