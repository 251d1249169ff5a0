use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::db::connection::{init_db, Database};
use crate::db::roster::RosterStore;
use crate::errors::AppError;
use crate::router::{handle, App};

/// Fresh app over a fresh temp-file database using the production schema.
pub fn make_app() -> App {
    let path = std::env::temp_dir().join(format!(
        "mediation_test_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::open(path).expect("failed to open test database");
    init_db(&db, "sql/schema.sql").expect("failed to initialize test database");

    App {
        db: db.clone(),
        roster: RosterStore::new(db),
    }
}

pub fn get(app: &App, path: &str) -> Result<Response, AppError> {
    let req: Request = http::Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    handle(req, app)
}

pub fn post_json(app: &App, path: &str, body: serde_json::Value) -> Result<Response, AppError> {
    let req: Request = http::Request::builder()
        .method(Method::POST)
        .uri(path)
        .body(Body::new(body.to_string()))
        .unwrap();
    handle(req, app)
}

pub fn body_bytes(resp: &mut Response) -> Vec<u8> {
    let mut buf = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut buf)
        .expect("failed to read response body");
    buf
}

pub fn body_json(resp: &mut Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp)).expect("response body was not valid JSON")
}

/// A valid intake payload against the seeded roster; tests override the
/// fields they care about.
pub fn intake_payload(case_no: i64, year: i64) -> serde_json::Value {
    serde_json::json!({
        "case_no": case_no,
        "year": year,
        "nature_of_case": "CivilRecovery",
        "received_from": "DLSA",
        "time_slot": "10:30",
        "party1": "Ram Kumar",
        "party2": "Shyam Kumar",
        "assigned_to": "Sh_Tarun_Shokeen",
    })
}

/// Insert a case row directly, bypassing the intake stamping so tests can
/// control the registration date and disposal.
pub fn plant_case(
    app: &App,
    case_no: i64,
    year: i64,
    nature: &str,
    assigned_to: &str,
    date: &str,
    disposal: Option<&str>,
) {
    app.db
        .with_conn(|conn| {
            conn.execute(
                "INSERT INTO cases (
                    case_no, year, nature_of_case, received_from, date, time_slot,
                    assigned_to, disposal_of_case
                ) VALUES (?1, ?2, ?3, 'DLSA', ?4, '10:00', ?5, ?6)",
                rusqlite::params![case_no, year, nature, date, assigned_to, disposal],
            )?;
            Ok(())
        })
        .expect("failed to plant case row");
}
