use astra::Request;
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use std::io::Read;

use crate::db::cases;
use crate::db::connection::Database;
use crate::db::roster::RosterStore;
use crate::domain::case::{NewCaseInput, UpdateCaseInput};
use crate::domain::filter::CaseFilter;
use crate::domain::report::case_table;
use crate::domain::summary::summarize;
use crate::errors::{AppError, ResultResp};
use crate::responses::json_response;
use crate::spreadsheets::report_xlsx::export_report_xlsx;

/// Shared handles threaded through every request.
pub struct App {
    pub db: Database,
    pub roster: RosterStore,
}

#[derive(Debug, Deserialize)]
struct NameInput {
    name: String,
}

fn read_body(req: &mut Request) -> Result<Vec<u8>, AppError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut buf)
        .map_err(|e| AppError::Validation(format!("unreadable request body: {e}")))?;
    Ok(buf)
}

fn read_json<T: serde::de::DeserializeOwned>(req: &mut Request) -> Result<T, AppError> {
    let buf = read_body(req)?;
    serde_json::from_slice(&buf)
        .map_err(|e| AppError::Validation(format!("malformed request body: {e}")))
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => json_response(&json!({
            "service": "mediation-desk",
            "status": "ok",
        })),

        ("POST", "/cases") => {
            let input: NewCaseInput = read_json(&mut req)?;
            let case = input.validate()?;
            if !app.roster.contains(&case.assigned_to)? {
                return Err(AppError::Validation(format!(
                    "unknown assignee: {}",
                    case.assigned_to
                )));
            }
            let id = cases::insert_case(&app.db, &case)?;
            json_response(&json!({ "id": id }))
        }

        ("POST", "/cases/update") => {
            let input: UpdateCaseInput = read_json(&mut req)?;
            let case_no = input.case_no;
            let year = input.year;
            if !(1..=999_999).contains(&case_no) || !(1000..=9999).contains(&year) {
                return Err(AppError::Validation(format!(
                    "invalid case key {case_no}/{year}"
                )));
            }
            let patch = input.validate(Local::now().date_naive())?;
            cases::update_case(&app.db, case_no as u32, year as u16, &patch)?;
            json_response(&json!({ "updated": true }))
        }

        ("POST", "/cases/query") => {
            let buf = read_body(&mut req)?;
            let filter: CaseFilter = if buf.is_empty() {
                CaseFilter::default()
            } else {
                serde_json::from_slice(&buf)
                    .map_err(|e| AppError::Validation(format!("malformed request body: {e}")))?
            };
            let filter = filter.validate(Local::now().date_naive())?;
            let matched = cases::query_filtered(&app.db, &filter)?;
            let summary = summarize(&matched);
            json_response(&json!({ "cases": matched, "summary": summary }))
        }

        ("GET", "/cases/today") => {
            let today = Local::now().date_naive();
            let matched = cases::cases_by_date(&app.db, today)?;
            json_response(&matched)
        }

        ("GET", "/assigned-to") => json_response(&app.roster.list()?),

        ("POST", "/assigned-to") => {
            let input: NameInput = read_json(&mut req)?;
            app.roster.add(&input.name)?;
            json_response(&json!({ "added": true }))
        }

        ("POST", "/assigned-to/delete") => {
            let input: NameInput = read_json(&mut req)?;
            app.roster.remove(&input.name)?;
            json_response(&json!({ "deleted": true }))
        }

        ("GET", "/reports/today.xlsx") => {
            let today = Local::now().date_naive();
            let matched = cases::cases_by_date(&app.db, today)?;
            let table = case_table(&matched);
            export_report_xlsx(&table, None, "todays_cases.xlsx")
        }

        ("POST", "/reports/filtered.xlsx") => {
            let buf = read_body(&mut req)?;
            let filter: CaseFilter = if buf.is_empty() {
                CaseFilter::default()
            } else {
                serde_json::from_slice(&buf)
                    .map_err(|e| AppError::Validation(format!("malformed request body: {e}")))?
            };
            let filter = filter.validate(Local::now().date_naive())?;
            let matched = cases::query_filtered(&app.db, &filter)?;
            let summary = summarize(&matched);
            let table = case_table(&matched);
            export_report_xlsx(&table, Some(&summary), "filtered_cases.xlsx")
        }

        _ => Err(AppError::NotFound),
    }
}
