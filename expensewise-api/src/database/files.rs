use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::OptionalExtension;
use shared_types::{ExtractedRecord, StoredFile};

const FILE_COLUMNS: &str =
    "id, user_id, filename, file_path, file_type, file_size, upload_date, processed, extracted_data";

fn file_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredFile> {
    let extracted_json: Option<String> = row.get(8)?;
    let extracted_data = extracted_json
        .map(|json| serde_json::from_str::<ExtractedRecord>(&json))
        .transpose()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(StoredFile {
        id: row.get(0)?,
        user_id: row.get(1)?,
        filename: row.get(2)?,
        file_path: row.get(3)?,
        file_type: row.get(4)?,
        file_size: row.get(5)?,
        upload_date: row.get(6)?,
        processed: row.get(7)?,
        extracted_data,
    })
}

pub async fn add_file(
    conn: AsyncDbConnection,
    user_id: i64,
    filename: &str,
    file_path: &str,
    file_type: &str,
    file_size: i64,
    extracted_data: Option<&ExtractedRecord>,
) -> Result<i64> {
    let extracted_json = extracted_data.map(serde_json::to_string).transpose()?;
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let id: i64 = conn.query_row(
        "INSERT INTO files
         (user_id, filename, file_path, file_type, file_size, upload_date, processed, extracted_data)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING id",
        rusqlite::params![
            user_id,
            filename,
            file_path,
            file_type,
            file_size,
            now,
            extracted_json.is_some(),
            extracted_json
        ],
        |row| row.get(0),
    )?;

    Ok(id)
}

pub async fn get_files(conn: AsyncDbConnection, user_id: i64) -> Result<Vec<StoredFile>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM files WHERE user_id = ? ORDER BY upload_date DESC, id DESC",
        FILE_COLUMNS
    ))?;

    let files = stmt
        .query_map([user_id], file_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(files)
}

pub async fn get_file(conn: AsyncDbConnection, user_id: i64, id: i64) -> Result<Option<StoredFile>> {
    let conn = conn.lock().await?;

    let file = conn
        .query_row(
            &format!("SELECT {} FROM files WHERE id = ? AND user_id = ?", FILE_COLUMNS),
            rusqlite::params![id, user_id],
            file_from_row,
        )
        .optional()?;

    Ok(file)
}

pub async fn mark_file_processed(
    conn: AsyncDbConnection,
    id: i64,
    extracted_data: Option<&ExtractedRecord>,
) -> Result<()> {
    let extracted_json = extracted_data.map(serde_json::to_string).transpose()?;
    let conn = conn.lock().await?;

    conn.execute(
        "UPDATE files SET processed = 1, extracted_data = ? WHERE id = ?",
        rusqlite::params![extracted_json, id],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::test_db;
    use crate::database::users::create_user;
    use shared_types::Category;

    #[actix_web::test]
    async fn test_file_lifecycle() {
        let db = test_db();
        let alice = create_user(db.conn(), "alice", "a@example.com", "pw", None)
            .await
            .unwrap()
            .unwrap();
        let bob = create_user(db.conn(), "bob", "b@example.com", "pw", None)
            .await
            .unwrap()
            .unwrap();

        let id = add_file(db.conn(), alice, "receipt.jpg", "/tmp/x.jpg", "image/jpeg", 1024, None)
            .await
            .unwrap();

        let file = get_file(db.conn(), alice, id).await.unwrap().unwrap();
        assert!(!file.processed);
        assert!(file.extracted_data.is_none());
        assert!(get_file(db.conn(), bob, id).await.unwrap().is_none());

        let record = ExtractedRecord {
            amount: Some(4.5),
            date: Some("01/15/2024".to_string()),
            vendor: None,
            description: Some("Coffee".to_string()),
            category: Category::FoodDining,
            confidence: 0.8,
        };
        mark_file_processed(db.conn(), id, Some(&record)).await.unwrap();

        let files = get_files(db.conn(), alice).await.unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].processed);
        let stored = files[0].extracted_data.as_ref().unwrap();
        assert_eq!(stored.amount, Some(4.5));
        assert_eq!(stored.category, Category::FoodDining);

        assert!(get_files(db.conn(), bob).await.unwrap().is_empty());
    }
}
