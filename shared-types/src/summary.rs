use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::expense::Category;

/// Aggregate view over a set of expenses, recomputed on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ExpenseSummary {
    pub total_amount: f64,
    pub count: usize,
    pub average: f64,
    /// Largest single amount; zero when there are no expenses
    pub max_amount: f64,
    pub top_category: Option<Category>,
    /// One entry per category present in the input, in order of first appearance
    pub category_breakdown: Vec<CategoryBreakdown>,
}

impl ExpenseSummary {
    pub fn empty() -> Self {
        Self {
            total_amount: 0.0,
            count: 0,
            average: 0.0,
            max_amount: 0.0,
            top_category: None,
            category_breakdown: Vec::new(),
        }
    }

    pub fn amount_for(&self, category: Category) -> Option<f64> {
        self.category_breakdown
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.amount)
    }
}

/// Breakdown by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub amount: f64,
    pub percentage: f64,
    pub expense_count: usize,
}

/// Spending for one calendar month (`YYYY-MM`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct MonthlyTotal {
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize, TS)]
pub struct SummaryResponse {
    pub summary: ExpenseSummary,
    pub monthly_trend: Vec<MonthlyTotal>,
}

/// Statistics computed by the store
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ExpenseStats {
    pub total_amount: f64,
    pub expense_count: i64,
    pub average_expense: f64,
    pub categories: Vec<CategoryStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CategoryStat {
    pub category: Category,
    pub amount: f64,
    pub count: i64,
}
