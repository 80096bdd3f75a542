use std::path::Path;
use std::sync::Arc;

use crate::database::Database;

/// Open the database at `db_path`, creating the file and schema when missing.
///
/// Default locations (from `ApiConfig::database_path`):
///
/// - **macOS**: `~/Library/Application Support/expensewise/expensewise.db`
/// - **Linux**: `~/.local/share/expensewise/expensewise.db`
/// - **Windows**: `%LOCALAPPDATA%\expensewise\expensewise.db`
pub fn initialize_database(db_path: &Path) -> anyhow::Result<Arc<Database>> {
    let db = Database::new(db_path)?;
    tracing::info!("Database initialized at: {}", db_path.display());
    Ok(Arc::new(db))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_existing_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("expensewise.db");

        let db = initialize_database(&path).unwrap();
        crate::database::users::create_user(db.async_connection.clone(), "alice", "a@example.com", "pw", None)
            .await
            .unwrap();
        drop(db);

        let reopened = initialize_database(&path).unwrap();
        reopened.ping().await.unwrap();
        assert!(
            crate::database::users::authenticate_user(reopened.async_connection.clone(), "alice", "pw")
                .await
                .unwrap()
                .is_some()
        );
    }
}
