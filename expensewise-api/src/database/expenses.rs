use crate::database::{parse_column, AsyncDbConnection};
use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::OptionalExtension;
use shared_types::{Category, CategoryStat, Expense, ExpenseStats, UpdateExpenseRequest};

/// Expense ready to insert; the category has already been resolved
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub description: Option<String>,
    /// `YYYY-MM-DD`; today when absent
    pub date: Option<String>,
    pub receipt_path: Option<String>,
}

const EXPENSE_COLUMNS: &str = "id, user_id, title, amount, category, description, date,
     receipt_path, status, created_at, updated_at";

fn expense_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        amount: row.get(3)?,
        category: parse_column(row, 4)?,
        description: row.get(5)?,
        date: row.get(6)?,
        receipt_path: row.get(7)?,
        status: parse_column(row, 8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

pub async fn add_expense(
    conn: AsyncDbConnection,
    user_id: i64,
    expense: &NewExpense,
) -> Result<i64> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now();
    let date = expense
        .date
        .clone()
        .unwrap_or_else(|| now.date_naive().format("%Y-%m-%d").to_string());

    let id: i64 = conn.query_row(
        "INSERT INTO expenses
         (user_id, title, amount, category, description, date, receipt_path, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING id",
        rusqlite::params![
            user_id,
            &expense.title,
            expense.amount,
            expense.category.as_str(),
            expense.description.as_ref(),
            &date,
            expense.receipt_path.as_ref(),
            now.timestamp(),
            now.timestamp()
        ],
        |row| row.get(0),
    )?;

    Ok(id)
}

fn select_expenses(
    conn: &rusqlite::Connection,
    user_id: i64,
    limit: Option<usize>,
) -> rusqlite::Result<Vec<Expense>> {
    // SQLite treats a negative LIMIT as no limit
    let limit = limit.map_or(-1, |l| l as i64);

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM expenses
         WHERE user_id = ?
         ORDER BY date DESC, created_at DESC, id DESC
         LIMIT ?",
        EXPENSE_COLUMNS
    ))?;

    let expenses = stmt
        .query_map(rusqlite::params![user_id, limit], expense_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(expenses)
}

/// Most recent first
pub async fn get_expenses(
    conn: AsyncDbConnection,
    user_id: i64,
    limit: usize,
) -> Result<Vec<Expense>> {
    let conn = conn.lock().await?;
    Ok(select_expenses(&conn, user_id, Some(limit))?)
}

/// Every expense of the user, most recent first
pub async fn get_all_expenses(conn: AsyncDbConnection, user_id: i64) -> Result<Vec<Expense>> {
    let conn = conn.lock().await?;
    Ok(select_expenses(&conn, user_id, None)?)
}

pub async fn get_expense(conn: AsyncDbConnection, user_id: i64, id: i64) -> Result<Option<Expense>> {
    let conn = conn.lock().await?;

    let expense = conn
        .query_row(
            &format!(
                "SELECT {} FROM expenses WHERE id = ? AND user_id = ?",
                EXPENSE_COLUMNS
            ),
            rusqlite::params![id, user_id],
            expense_from_row,
        )
        .optional()?;

    Ok(expense)
}

/// Applies the fields present in `update`. Returns false when there was
/// nothing to change or the expense does not belong to the user.
pub async fn update_expense(
    conn: AsyncDbConnection,
    user_id: i64,
    id: i64,
    update: &UpdateExpenseRequest,
) -> Result<bool> {
    if update.is_empty() {
        return Ok(false);
    }

    let mut assignments: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(title) = &update.title {
        assignments.push("title = ?");
        values.push(Value::Text(title.clone()));
    }
    if let Some(amount) = update.amount {
        assignments.push("amount = ?");
        values.push(Value::Real(amount));
    }
    if let Some(category) = update.category {
        assignments.push("category = ?");
        values.push(Value::Text(category.as_str().to_string()));
    }
    if let Some(description) = &update.description {
        assignments.push("description = ?");
        values.push(Value::Text(description.clone()));
    }
    if let Some(date) = &update.date {
        assignments.push("date = ?");
        values.push(Value::Text(date.clone()));
    }
    if let Some(status) = update.status {
        assignments.push("status = ?");
        values.push(Value::Text(status.as_str().to_string()));
    }

    assignments.push("updated_at = ?");
    values.push(Value::Integer(chrono::Utc::now().timestamp()));
    values.push(Value::Integer(id));
    values.push(Value::Integer(user_id));

    let sql = format!(
        "UPDATE expenses SET {} WHERE id = ? AND user_id = ?",
        assignments.join(", ")
    );

    let conn = conn.lock().await?;
    let updated = conn.execute(&sql, rusqlite::params_from_iter(values))?;

    Ok(updated > 0)
}

pub async fn delete_expense(conn: AsyncDbConnection, user_id: i64, id: i64) -> Result<bool> {
    let conn = conn.lock().await?;
    let deleted = conn.execute(
        "DELETE FROM expenses WHERE id = ? AND user_id = ?",
        rusqlite::params![id, user_id],
    )?;
    Ok(deleted > 0)
}

/// Totals over every expense of the user, categories by amount descending
pub async fn get_expense_stats(conn: AsyncDbConnection, user_id: i64) -> Result<ExpenseStats> {
    let conn = conn.lock().await?;

    let (total_amount, expense_count, average_expense): (f64, i64, f64) = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0.0), COUNT(*), COALESCE(AVG(amount), 0.0)
         FROM expenses WHERE user_id = ?",
        [user_id],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    let mut stmt = conn.prepare(
        "SELECT category, SUM(amount), COUNT(*)
         FROM expenses
         WHERE user_id = ?
         GROUP BY category
         ORDER BY SUM(amount) DESC",
    )?;

    let categories = stmt
        .query_map([user_id], |row| {
            Ok(CategoryStat {
                category: parse_column(row, 0)?,
                amount: row.get(1)?,
                count: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExpenseStats {
        total_amount,
        expense_count,
        average_expense,
        categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::{test_db, TestDb};
    use crate::database::users::create_user;
    use shared_types::ExpenseStatus;

    async fn user(db: &TestDb, name: &str) -> i64 {
        create_user(db.conn(), name, &format!("{name}@example.com"), "pw", None)
            .await
            .unwrap()
            .unwrap()
    }

    fn new_expense(title: &str, amount: f64, category: Category, date: &str) -> NewExpense {
        NewExpense {
            title: title.to_string(),
            amount,
            category,
            description: None,
            date: Some(date.to_string()),
            receipt_path: None,
        }
    }

    #[actix_web::test]
    async fn test_add_and_list_in_date_order() {
        let db = test_db();
        let alice = user(&db, "alice").await;
        let bob = user(&db, "bob").await;

        add_expense(db.conn(), alice, &new_expense("Lunch", 12.5, Category::FoodDining, "2024-01-10"))
            .await
            .unwrap();
        add_expense(db.conn(), alice, &new_expense("Taxi", 30.0, Category::Transportation, "2024-02-01"))
            .await
            .unwrap();
        add_expense(db.conn(), bob, &new_expense("Books", 20.0, Category::Business, "2024-03-01"))
            .await
            .unwrap();

        let expenses = get_expenses(db.conn(), alice, 100).await.unwrap();
        let titles: Vec<_> = expenses.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Taxi", "Lunch"]);
        assert_eq!(expenses[0].status, ExpenseStatus::Pending);
        assert_eq!(expenses[0].category, Category::Transportation);

        assert_eq!(get_expenses(db.conn(), alice, 1).await.unwrap().len(), 1);
        assert_eq!(get_expenses(db.conn(), alice, 0).await.unwrap().len(), 0);
    }

    #[actix_web::test]
    async fn test_get_all_expenses_is_unbounded() {
        let db = test_db();
        let alice = user(&db, "alice").await;
        let bob = user(&db, "bob").await;

        for day in 1..=25 {
            let date = format!("2024-01-{:02}", day);
            add_expense(db.conn(), alice, &new_expense("Coffee", 3.0, Category::FoodDining, &date))
                .await
                .unwrap();
        }
        add_expense(db.conn(), bob, &new_expense("Books", 20.0, Category::Business, "2024-03-01"))
            .await
            .unwrap();

        let all = get_all_expenses(db.conn(), alice).await.unwrap();
        assert_eq!(all.len(), 25);
        assert_eq!(all.first().unwrap().date, "2024-01-25");
        assert_eq!(all.last().unwrap().date, "2024-01-01");
        assert!(all.iter().all(|e| e.user_id == alice));

        let limited = get_expenses(db.conn(), alice, 10).await.unwrap();
        let ids = |expenses: &[Expense]| expenses.iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids(&limited), ids(&all[..10]));
    }

    #[actix_web::test]
    async fn test_date_defaults_to_today() {
        let db = test_db();
        let alice = user(&db, "alice").await;

        let mut expense = new_expense("Snack", 2.0, Category::FoodDining, "");
        expense.date = None;
        let id = add_expense(db.conn(), alice, &expense).await.unwrap();

        let stored = get_expense(db.conn(), alice, id).await.unwrap().unwrap();
        assert_eq!(
            stored.date,
            chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
        );
    }

    #[actix_web::test]
    async fn test_update_and_delete_are_scoped_to_owner() {
        let db = test_db();
        let alice = user(&db, "alice").await;
        let bob = user(&db, "bob").await;

        let id = add_expense(db.conn(), alice, &new_expense("Lunch", 12.5, Category::FoodDining, "2024-01-10"))
            .await
            .unwrap();

        let update = UpdateExpenseRequest {
            amount: Some(15.0),
            status: Some(ExpenseStatus::Approved),
            ..Default::default()
        };

        assert!(!update_expense(db.conn(), bob, id, &update).await.unwrap());
        assert!(!update_expense(db.conn(), alice, id, &UpdateExpenseRequest::default())
            .await
            .unwrap());
        assert!(update_expense(db.conn(), alice, id, &update).await.unwrap());

        let stored = get_expense(db.conn(), alice, id).await.unwrap().unwrap();
        assert_eq!(stored.amount, 15.0);
        assert_eq!(stored.status, ExpenseStatus::Approved);
        assert_eq!(stored.title, "Lunch");
        assert!(get_expense(db.conn(), bob, id).await.unwrap().is_none());

        assert!(!delete_expense(db.conn(), bob, id).await.unwrap());
        assert!(delete_expense(db.conn(), alice, id).await.unwrap());
        assert!(get_expense(db.conn(), alice, id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_stats() {
        let db = test_db();
        let alice = user(&db, "alice").await;

        let empty = get_expense_stats(db.conn(), alice).await.unwrap();
        assert_eq!(empty.expense_count, 0);
        assert_eq!(empty.total_amount, 0.0);
        assert!(empty.categories.is_empty());

        for (title, amount, category) in [
            ("Lunch", 10.0, Category::FoodDining),
            ("Flight", 30.0, Category::Travel),
            ("Dinner", 5.0, Category::FoodDining),
        ] {
            add_expense(db.conn(), alice, &new_expense(title, amount, category, "2024-01-01"))
                .await
                .unwrap();
        }

        let stats = get_expense_stats(db.conn(), alice).await.unwrap();
        assert_eq!(stats.expense_count, 3);
        assert_eq!(stats.total_amount, 45.0);
        assert_eq!(stats.average_expense, 15.0);
        assert_eq!(stats.categories[0].category, Category::Travel);
        assert_eq!(stats.categories[1].category, Category::FoodDining);
        assert_eq!(stats.categories[1].amount, 15.0);
        assert_eq!(stats.categories[1].count, 2);
    }
}
