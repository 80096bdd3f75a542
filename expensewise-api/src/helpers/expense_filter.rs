use serde::Deserialize;
use shared_types::{Category, Expense};
use std::str::FromStr;

pub const DEFAULT_LIMIT: usize = 100;

/// Query string accepted by `GET /api/expenses`
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date-desc" => Ok(SortOrder::DateDesc),
            "date-asc" => Ok(SortOrder::DateAsc),
            "amount-desc" => Ok(SortOrder::AmountDesc),
            "amount-asc" => Ok(SortOrder::AmountAsc),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    /// Lowercased search needle
    pub search: Option<String>,
    pub sort: SortOrder,
    pub limit: usize,
}

impl TryFrom<ExpenseQuery> for ExpenseFilter {
    type Error = String;

    fn try_from(query: ExpenseQuery) -> Result<Self, Self::Error> {
        let category = match query.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(raw.parse::<Category>()?),
        };

        let search = query
            .search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let sort = match query.sort.as_deref() {
            None | Some("") => SortOrder::default(),
            Some(raw) => raw.parse()?,
        };

        Ok(ExpenseFilter {
            category,
            search,
            sort,
            limit: query.limit.unwrap_or(DEFAULT_LIMIT),
        })
    }
}

impl ExpenseFilter {
    fn matches(&self, expense: &Expense) -> bool {
        if let Some(category) = self.category {
            if expense.category != category {
                return false;
            }
        }

        match &self.search {
            Some(needle) => {
                expense.title.to_lowercase().contains(needle)
                    || expense
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(needle))
            }
            None => true,
        }
    }

    /// Filters, sorts and truncates expenses already in newest-first order
    pub fn apply(&self, expenses: Vec<Expense>) -> Vec<Expense> {
        let mut selected: Vec<Expense> = expenses.into_iter().filter(|e| self.matches(e)).collect();

        match self.sort {
            SortOrder::DateDesc => {}
            SortOrder::DateAsc => selected.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::AmountDesc => selected.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
            SortOrder::AmountAsc => selected.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
        }

        selected.truncate(self.limit);
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ExpenseStatus;

    fn expense(id: i64, title: &str, amount: f64, category: Category, date: &str) -> Expense {
        Expense {
            id,
            user_id: 1,
            title: title.to_string(),
            amount,
            category,
            description: None,
            date: date.to_string(),
            receipt_path: None,
            status: ExpenseStatus::Pending,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(3, "Team lunch", 45.0, Category::FoodDining, "2024-03-01"),
            expense(2, "Taxi to airport", 30.0, Category::Transportation, "2024-02-15"),
            expense(1, "Coffee", 4.5, Category::FoodDining, "2024-01-15"),
        ]
    }

    fn filter(query: ExpenseQuery) -> ExpenseFilter {
        ExpenseFilter::try_from(query).unwrap()
    }

    #[test]
    fn test_defaults_keep_store_order() {
        let result = filter(ExpenseQuery::default()).apply(sample());
        let ids: Vec<_> = result.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_category_and_search() {
        let by_category = filter(ExpenseQuery {
            category: Some("food-dining".to_string()),
            ..Default::default()
        })
        .apply(sample());
        assert_eq!(by_category.len(), 2);

        let by_label = filter(ExpenseQuery {
            category: Some("Food & Dining".to_string()),
            search: Some("COFFEE".to_string()),
            ..Default::default()
        })
        .apply(sample());
        assert_eq!(by_label.len(), 1);
        assert_eq!(by_label[0].id, 1);
    }

    #[test]
    fn test_sorting_and_limit() {
        let result = filter(ExpenseQuery {
            sort: Some("amount-asc".to_string()),
            limit: Some(2),
            ..Default::default()
        })
        .apply(sample());
        let amounts: Vec<_> = result.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![4.5, 30.0]);

        let result = filter(ExpenseQuery {
            sort: Some("date-asc".to_string()),
            ..Default::default()
        })
        .apply(sample());
        assert_eq!(result[0].date, "2024-01-15");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(ExpenseFilter::try_from(ExpenseQuery {
            sort: Some("price".to_string()),
            ..Default::default()
        })
        .is_err());
        assert!(ExpenseFilter::try_from(ExpenseQuery {
            category: Some("groceries".to_string()),
            ..Default::default()
        })
        .is_err());
    }
}
