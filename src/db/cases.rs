use chrono::{Local, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{params, Row};

use crate::db::connection::Database;
use crate::domain::case::{Case, CasePatch, Disposal, NewCase};
use crate::domain::filter::ValidatedFilter;
use crate::errors::AppError;

const SQL_CASES_BY_DATE: &str = include_str!("../../sql/cases_by_date.sql");

fn map_case(row: &Row<'_>) -> rusqlite::Result<Case> {
    let nature: String = row.get(3)?;
    let time_slot: String = row.get(6)?;
    let ndoh_time: Option<String> = row.get(11)?;
    let disposal: Option<String> = row.get(12)?;

    let invalid = |idx: usize, e: AppError| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    };

    Ok(Case {
        id: row.get(0)?,
        case_no: row.get::<_, i64>(1)? as u32,
        year: row.get::<_, i64>(2)? as u16,
        nature_of_case: nature.parse().map_err(|e| invalid(3, e))?,
        received_from: row.get(4)?,
        date: row.get(5)?,
        time_slot: time_slot.parse().map_err(|e| invalid(6, e))?,
        party1: row.get(7)?,
        party2: row.get(8)?,
        assigned_to: row.get(9)?,
        ndoh_date: row.get(10)?,
        ndoh_time: ndoh_time
            .map(|s| s.parse().map_err(|e| invalid(11, e)))
            .transpose()?,
        disposal_of_case: Disposal::from_db(disposal.as_deref()).map_err(|e| invalid(12, e))?,
        connected: row.get::<_, i64>(13)? as u8,
    })
}

/// Persist a new case, stamped with the current local date. The row starts
/// open: no disposal, no NDOH, connected count 0.
pub fn insert_case(db: &Database, case: &NewCase) -> Result<i64, AppError> {
    let date = Local::now().date_naive();

    db.with_conn(|conn| {
        let result = conn.execute(
            "INSERT INTO cases (
                case_no, year, nature_of_case, received_from, date, time_slot,
                party1, party2, assigned_to
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                case.case_no,
                case.year,
                case.nature_of_case.as_str(),
                case.received_from,
                date,
                case.time_slot.as_str(),
                case.party1,
                case.party2,
                case.assigned_to,
            ],
        );

        match result {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                tracing::info!(
                    case_no = case.case_no,
                    year = case.year,
                    "case registered"
                );
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(AppError::Duplicate(format!(
                    "case {}/{} already exists",
                    case.case_no, case.year
                )))
            }
            Err(e) => Err(e.into()),
        }
    })
}

/// Apply a validated status patch to the case keyed by `(case_no, year)`.
/// A single UPDATE statement, so a rejected or failed call leaves the row
/// untouched.
pub fn update_case(
    db: &Database,
    case_no: u32,
    year: u16,
    patch: &CasePatch,
) -> Result<(), AppError> {
    db.with_conn(|conn| {
        let affected = conn.execute(
            "UPDATE cases
             SET disposal_of_case = ?1,
                 ndoh_date = ?2,
                 ndoh_time = ?3,
                 connected = ?4
             WHERE case_no = ?5 AND year = ?6",
            params![
                patch.disposal_of_case.as_db_str(),
                patch.ndoh_date,
                patch.ndoh_time.map(|t| t.as_str()),
                patch.connected,
                case_no,
                year,
            ],
        )?;

        if affected == 0 {
            return Err(AppError::NotFound);
        }
        tracing::info!(case_no, year, "case status updated");
        Ok(())
    })
}

/// All cases registered on `date`, in insertion order.
pub fn cases_by_date(db: &Database, date: NaiveDate) -> Result<Vec<Case>, AppError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(SQL_CASES_BY_DATE)?;
        let rows = stmt.query_map(params![date], map_case)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    })
}

/// Evaluate a validated filter as a conjunctive WHERE clause: each present
/// field narrows the result, absent fields add nothing. Date bounds are
/// inclusive and compare the intake date only.
pub fn query_filtered(db: &Database, filter: &ValidatedFilter) -> Result<Vec<Case>, AppError> {
    let mut sql = String::from(
        "SELECT id, case_no, year, nature_of_case, received_from, date, time_slot,
                party1, party2, assigned_to, ndoh_date, ndoh_time, disposal_of_case,
                connected
         FROM cases WHERE 1=1",
    );
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(start) = filter.start_date {
        params.push(Box::new(start));
        sql.push_str(&format!(" AND date >= ?{}", params.len()));
    }
    if let Some(end) = filter.end_date {
        params.push(Box::new(end));
        sql.push_str(&format!(" AND date <= ?{}", params.len()));
    }
    if let Some(nature) = filter.nature_of_case {
        params.push(Box::new(nature.as_str()));
        sql.push_str(&format!(" AND nature_of_case = ?{}", params.len()));
    }
    if let Some(name) = &filter.assigned_to {
        params.push(Box::new(name.clone()));
        sql.push_str(&format!(" AND assigned_to = ?{}", params.len()));
    }
    sql.push_str(" ORDER BY id");

    db.with_conn(|conn| {
        let mut stmt = conn.prepare(&sql)?;
        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|b| b.as_ref()).collect();
        let rows = stmt.query_map(&params_ref[..], map_case)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    })
}
