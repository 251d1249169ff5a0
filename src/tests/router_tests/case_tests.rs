use serde_json::json;

use crate::errors::AppError;
use crate::tests::utils::{body_json, intake_payload, make_app, post_json};

#[test]
fn insert_then_query_round_trips_every_field() {
    let app = make_app();

    let mut resp = post_json(&app, "/cases", intake_payload(123456, 2024)).unwrap();
    let inserted = body_json(&mut resp);
    assert!(inserted["id"].as_i64().unwrap() > 0);

    let mut resp = post_json(&app, "/cases/query", json!({})).unwrap();
    let result = body_json(&mut resp);
    let cases = result["cases"].as_array().unwrap();
    assert_eq!(cases.len(), 1);

    let case = &cases[0];
    assert_eq!(case["case_no"], 123456);
    assert_eq!(case["year"], 2024);
    assert_eq!(case["nature_of_case"], "CivilRecovery");
    assert_eq!(case["received_from"], "DLSA");
    assert_eq!(case["time_slot"], "10:30");
    assert_eq!(case["party1"], "Ram Kumar");
    assert_eq!(case["party2"], "Shyam Kumar");
    assert_eq!(case["assigned_to"], "Sh_Tarun_Shokeen");
    assert_eq!(case["date"], chrono::Local::now().date_naive().to_string());
    assert_eq!(case["disposal_of_case"], "Pending");
    assert_eq!(case["ndoh_date"], serde_json::Value::Null);
    assert_eq!(case["connected"], 0);
}

#[test]
fn insert_rejects_unknown_nature() {
    let app = make_app();
    let mut payload = intake_payload(1, 2024);
    payload["nature_of_case"] = json!("Bogus");

    let err = post_json(&app, "/cases", payload).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn insert_rejects_assignee_missing_from_roster() {
    let app = make_app();
    let mut payload = intake_payload(1, 2024);
    payload["assigned_to"] = json!("Sh_Nobody");

    let err = post_json(&app, "/cases", payload).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn insert_rejects_duplicate_case_key_but_allows_other_years() {
    let app = make_app();

    post_json(&app, "/cases", intake_payload(42, 2024)).unwrap();
    let err = post_json(&app, "/cases", intake_payload(42, 2024)).unwrap_err();
    assert!(matches!(err, AppError::Duplicate(_)));

    // Same number in another year is a different case.
    post_json(&app, "/cases", intake_payload(42, 2025)).unwrap();
}

#[test]
fn update_missing_case_fails_and_changes_nothing() {
    let app = make_app();
    post_json(&app, "/cases", intake_payload(7, 2024)).unwrap();

    let err = post_json(
        &app,
        "/cases/update",
        json!({
            "case_no": 8,
            "year": 2024,
            "disposal_of_case": "Settled",
            "connected": 0,
        }),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let mut resp = post_json(&app, "/cases/query", json!({})).unwrap();
    let result = body_json(&mut resp);
    assert_eq!(result["cases"][0]["disposal_of_case"], "Pending");
    assert_eq!(result["summary"]["pending"], 1);
}

#[test]
fn update_keyed_by_case_no_and_year() {
    let app = make_app();
    post_json(&app, "/cases", intake_payload(9, 2024)).unwrap();
    post_json(&app, "/cases", intake_payload(9, 2025)).unwrap();

    post_json(
        &app,
        "/cases/update",
        json!({
            "case_no": 9,
            "year": 2025,
            "disposal_of_case": "Settled",
            "connected": 2,
        }),
    )
    .unwrap();

    let mut resp = post_json(&app, "/cases/query", json!({})).unwrap();
    let result = body_json(&mut resp);
    for case in result["cases"].as_array().unwrap() {
        if case["year"] == 2025 {
            assert_eq!(case["disposal_of_case"], "Settled");
            assert_eq!(case["connected"], 2);
        } else {
            assert_eq!(case["disposal_of_case"], "Pending");
        }
    }
}

#[test]
fn update_records_ndoh_when_not_settled() {
    let app = make_app();
    post_json(&app, "/cases", intake_payload(11, 2024)).unwrap();

    let today = chrono::Local::now().date_naive();
    post_json(
        &app,
        "/cases/update",
        json!({
            "case_no": 11,
            "year": 2024,
            "disposal_of_case": "NotSettled",
            "ndoh_date": today.to_string(),
            "ndoh_time": "14:30",
            "connected": 1,
        }),
    )
    .unwrap();

    let mut resp = post_json(&app, "/cases/query", json!({})).unwrap();
    let case = body_json(&mut resp)["cases"][0].clone();
    assert_eq!(case["disposal_of_case"], "NotSettled");
    assert_eq!(case["ndoh_date"], today.to_string());
    assert_eq!(case["ndoh_time"], "14:30");
}

#[test]
fn update_without_ndoh_while_open_is_rejected() {
    let app = make_app();
    post_json(&app, "/cases", intake_payload(12, 2024)).unwrap();

    let err = post_json(
        &app,
        "/cases/update",
        json!({
            "case_no": 12,
            "year": 2024,
            "disposal_of_case": "NotSettled",
            "connected": 0,
        }),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn unknown_route_is_not_found() {
    let app = make_app();
    let err = post_json(&app, "/nope", json!({})).unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
