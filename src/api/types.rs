//! Shared state for the API router.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::db;
use crate::db::DatabaseError;

/// Shared context for all API routes. Each request opens its own
/// connection from the configured database path; the store's own locking
/// governs concurrent access.
#[derive(Clone)]
pub struct ApiContext {
    db_path: Arc<PathBuf>,
}

impl ApiContext {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    /// Open a database connection for the current request.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_db_creates_schema() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ApiContext::new(tmp.path().join("test.db"));
        let conn = ctx.open_db().unwrap();
        let tables = db::count_tables(&conn).unwrap();
        assert!(tables >= 3);
    }

    #[test]
    fn open_db_shares_data_across_connections() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ApiContext::new(tmp.path().join("test.db"));

        let conn = ctx.open_db().unwrap();
        conn.execute(
            "INSERT INTO patients (first_name, last_name) VALUES ('Ada', 'Lovelace')",
            [],
        )
        .unwrap();
        drop(conn);

        let conn2 = ctx.open_db().unwrap();
        let count: i64 = conn2
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
