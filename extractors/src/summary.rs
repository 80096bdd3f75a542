use shared_types::{
    CategorizedAmount, Category, CategoryBreakdown, Expense, ExpenseSummary, MonthlyTotal,
};
use std::collections::BTreeMap;

/// Reduce expense-like records to totals, average, largest amount and
/// per-category breakdown
pub fn summarize<T: CategorizedAmount>(records: &[T]) -> ExpenseSummary {
    if records.is_empty() {
        return ExpenseSummary::empty();
    }

    let mut breakdown: Vec<CategoryBreakdown> = Vec::new();
    let mut total_amount = 0.0;
    let mut max_amount = f64::NEG_INFINITY;

    for record in records {
        let amount = record.amount();
        total_amount += amount;
        max_amount = max_amount.max(amount);

        match breakdown.iter_mut().find(|b| b.category == record.category()) {
            Some(entry) => {
                entry.amount += amount;
                entry.expense_count += 1;
            }
            None => breakdown.push(CategoryBreakdown {
                category: record.category(),
                amount,
                percentage: 0.0,
                expense_count: 1,
            }),
        }
    }

    if total_amount != 0.0 {
        for entry in &mut breakdown {
            entry.percentage = entry.amount / total_amount * 100.0;
        }
    }

    let count = records.len();

    ExpenseSummary {
        total_amount,
        count,
        average: total_amount / count as f64,
        max_amount,
        top_category: top_category(&breakdown),
        category_breakdown: breakdown,
    }
}

/// Largest amount wins; on a tie the category seen first is kept
fn top_category(breakdown: &[CategoryBreakdown]) -> Option<Category> {
    let mut top: Option<&CategoryBreakdown> = None;
    for entry in breakdown {
        if top.map_or(true, |best| entry.amount > best.amount) {
            top = Some(entry);
        }
    }
    top.map(|entry| entry.category)
}

/// Spending per calendar month, oldest first. Dates are ISO so the month is
/// the `YYYY-MM` prefix; expenses with a shorter date are skipped.
pub fn monthly_trend(expenses: &[Expense]) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<&str, f64> = BTreeMap::new();

    for expense in expenses {
        match expense.date.get(..7) {
            Some(month) => *months.entry(month).or_insert(0.0) += expense.amount,
            None => tracing::warn!(expense_id = expense.id, date = %expense.date, "Expense date is not ISO"),
        }
    }

    months
        .into_iter()
        .map(|(month, amount)| MonthlyTotal {
            month: month.to_string(),
            amount,
        })
        .collect()
}
