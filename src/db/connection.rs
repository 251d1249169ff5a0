use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::errors::AppError;

/// Handle to the single local SQLite file. All access funnels through one
/// connection behind a mutex: the file has no internal concurrency control,
/// so mutations must never interleave and reads must never observe a
/// half-applied row.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| AppError::Storage(format!("open database failed: {e}")))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Provides the connection to the closure, serialized across callers.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError>,
    {
        let mut conn = self.conn.lock().map_err(|_| AppError::Internal)?;
        f(&mut conn)
    }
}

/// Initialize the database from a SQL schema file.
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), AppError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| AppError::Storage(format!("failed to read schema file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| AppError::Storage(format!("failed to apply schema: {e}")))?;
        Ok(())
    })?;

    tracing::info!("database initialized from {schema_path}");
    Ok(())
}
