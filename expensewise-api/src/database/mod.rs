pub mod expenses;
pub mod files;
pub mod migrations;
pub mod sessions;
pub mod teams;
pub mod users;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AsyncDbConnection {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl AsyncDbConnection {
    pub fn new(pool: Pool<SqliteConnectionManager>) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Check a connection out of the pool; it returns on drop.
    pub async fn lock(&self) -> anyhow::Result<PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| anyhow::anyhow!("Failed to get DB connection from pool: {}", e))
    }
}

pub struct Database {
    pub async_connection: AsyncDbConnection,
}

impl Database {
    /// Open (or create) the database file and run migrations
    pub fn new(db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Migrate on a dedicated connection so pooled connections see the final schema
        {
            let conn = Connection::open(db_path)?;
            migrations::run_migrations(&conn)?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });

        let pool = Pool::builder().max_size(8).build(manager)?;

        Ok(Database {
            async_connection: AsyncDbConnection::new(pool),
        })
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        let conn = self.async_connection.lock().await?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

/// Read a text column into an enum stored by its `as_str` form
pub(crate) fn parse_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e.into())
    })
}

/// Temporary database shared by the store tests
#[cfg(test)]
pub(crate) mod test_support {
    use super::Database;

    pub struct TestDb {
        pub db: Database,
        _dir: tempfile::TempDir,
    }

    pub fn test_db() -> TestDb {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("test.db")).unwrap();
        TestDb { db, _dir: dir }
    }

    impl TestDb {
        pub fn conn(&self) -> super::AsyncDbConnection {
            self.db.async_connection.clone()
        }
    }
}
