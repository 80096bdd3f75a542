use csv::WriterBuilder;
use serde::Serialize;
use shared_types::{Expense, ExtractionError};

#[derive(Serialize)]
struct ExpenseRow<'a> {
    id: i64,
    date: &'a str,
    title: &'a str,
    category: &'static str,
    amount: String,
    status: &'static str,
    description: &'a str,
    receipt_path: &'a str,
}

impl<'a> From<&'a Expense> for ExpenseRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id,
            date: &expense.date,
            title: &expense.title,
            category: expense.category.label(),
            amount: format!("{:.2}", expense.amount),
            status: expense.status.as_str(),
            description: expense.description.as_deref().unwrap_or(""),
            receipt_path: expense.receipt_path.as_deref().unwrap_or(""),
        }
    }
}

/// Render expenses as CSV with a header row
pub fn write_expenses_csv(expenses: &[Expense]) -> Result<String, ExtractionError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());

    if expenses.is_empty() {
        writer
            .write_record([
                "id",
                "date",
                "title",
                "category",
                "amount",
                "status",
                "description",
                "receipt_path",
            ])
            .map_err(|e| ExtractionError::ExportError(e.to_string()))?;
    }

    for expense in expenses {
        writer
            .serialize(ExpenseRow::from(expense))
            .map_err(|e| ExtractionError::ExportError(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExtractionError::ExportError(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| ExtractionError::ExportError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Category, ExpenseStatus};

    fn expense() -> Expense {
        Expense {
            id: 7,
            user_id: 1,
            title: "Lunch, with client".to_string(),
            amount: 23.5,
            category: Category::FoodDining,
            description: None,
            date: "2024-01-15".to_string(),
            receipt_path: Some("uploads/r.jpg".to_string()),
            status: ExpenseStatus::Approved,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_header_only_when_empty() {
        let csv = write_expenses_csv(&[]).unwrap();
        assert_eq!(
            csv,
            "id,date,title,category,amount,status,description,receipt_path\n"
        );
    }

    #[test]
    fn test_rows_are_quoted_when_needed() {
        let csv = write_expenses_csv(&[expense()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "id,date,title,category,amount,status,description,receipt_path"
        );
        assert_eq!(
            lines[1],
            "7,2024-01-15,\"Lunch, with client\",Food & Dining,23.50,approved,,uploads/r.jpg"
        );
    }
}
