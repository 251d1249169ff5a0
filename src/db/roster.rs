use std::sync::Mutex;

use crate::db::connection::Database;
use crate::errors::AppError;

/// The roster of valid "assigned to" names. Values are underscore-delimited
/// tokens; a submitted name is trimmed and its whitespace runs collapsed to
/// single underscores before storage, so whitespace variants of the same
/// name dedup to one entry.
///
/// Listing goes through a read-through cache that every add/remove clears;
/// callers re-fetch instead of holding on to stale option lists.
pub struct RosterStore {
    db: Database,
    cache: Mutex<Option<Vec<String>>>,
}

fn canonical(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

impl RosterStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            cache: Mutex::new(None),
        }
    }

    fn invalidate(&self) -> Result<(), AppError> {
        *self.cache.lock().map_err(|_| AppError::Internal)? = None;
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<String>, AppError> {
        let mut cache = self.cache.lock().map_err(|_| AppError::Internal)?;
        if let Some(values) = cache.as_ref() {
            return Ok(values.clone());
        }

        let values = self.db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT name FROM assigned_to ORDER BY name")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })?;

        *cache = Some(values.clone());
        Ok(values)
    }

    pub fn contains(&self, value: &str) -> Result<bool, AppError> {
        Ok(self.list()?.iter().any(|v| v == value))
    }

    pub fn add(&self, name: &str) -> Result<(), AppError> {
        let value = canonical(name);
        if value.is_empty() {
            return Err(AppError::Validation("name must not be blank".into()));
        }

        self.db.with_conn(|conn| {
            let result = conn.execute("INSERT INTO assigned_to (name) VALUES (?1)", [&value]);
            match result {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Err(AppError::Duplicate(format!("{value} is already listed")))
                }
                Err(e) => Err(e.into()),
            }
        })?;

        tracing::info!(name = %value, "roster entry added");
        self.invalidate()
    }

    /// Existing cases keep referencing a removed name; that dangling display
    /// label is accepted rather than cascading the delete.
    pub fn remove(&self, name: &str) -> Result<(), AppError> {
        let value = canonical(name);

        let affected = self
            .db
            .with_conn(|conn| Ok(conn.execute("DELETE FROM assigned_to WHERE name = ?1", [&value])?))?;
        if affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!(name = %value, "roster entry removed");
        self.invalidate()
    }
}
