use serde_json::json;

use crate::errors::AppError;
use crate::tests::utils::{body_json, intake_payload, make_app, get, post_json};

#[test]
fn list_returns_seeded_roster() {
    let app = make_app();
    let mut resp = get(&app, "/assigned-to").unwrap();
    let names = body_json(&mut resp);
    let names: Vec<&str> = names
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(names.contains(&"Sh_Tarun_Shokeen"));
}

#[test]
fn add_canonicalizes_whitespace_and_appears_once() {
    let app = make_app();
    post_json(&app, "/assigned-to", json!({ "name": "  Km  Poonam " })).unwrap();

    let mut resp = get(&app, "/assigned-to").unwrap();
    let names = body_json(&mut resp);
    let count = names
        .as_array()
        .unwrap()
        .iter()
        .filter(|v| v == &&json!("Km_Poonam"))
        .count();
    assert_eq!(count, 1);

    // A whitespace variant of the same name is the same entry.
    let err = post_json(&app, "/assigned-to", json!({ "name": "Km Poonam" })).unwrap_err();
    assert!(matches!(err, AppError::Duplicate(_)));
}

#[test]
fn add_rejects_blank_name() {
    let app = make_app();
    let err = post_json(&app, "/assigned-to", json!({ "name": "   " })).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn remove_then_remove_again_is_not_found() {
    let app = make_app();
    post_json(&app, "/assigned-to/delete", json!({ "name": "Smt_Rekha_Rani" })).unwrap();

    let err =
        post_json(&app, "/assigned-to/delete", json!({ "name": "Smt_Rekha_Rani" })).unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[test]
fn removed_name_disappears_from_fresh_listing() {
    let app = make_app();
    post_json(&app, "/assigned-to", json!({ "name": "Sh_Temp_Mediator" })).unwrap();
    // Warm the cache, then mutate; the next list must not serve stale data.
    get(&app, "/assigned-to").unwrap();
    post_json(&app, "/assigned-to/delete", json!({ "name": "Sh_Temp_Mediator" })).unwrap();

    let mut resp = get(&app, "/assigned-to").unwrap();
    let names = body_json(&mut resp);
    assert!(!names.as_array().unwrap().contains(&json!("Sh_Temp_Mediator")));
}

#[test]
fn deleting_roster_entry_leaves_existing_cases_dangling() {
    let app = make_app();
    post_json(&app, "/cases", intake_payload(5, 2024)).unwrap();
    post_json(&app, "/assigned-to/delete", json!({ "name": "Sh_Tarun_Shokeen" })).unwrap();

    // The case keeps its reference; only new intake is affected.
    let mut resp = post_json(&app, "/cases/query", json!({})).unwrap();
    let result = body_json(&mut resp);
    assert_eq!(result["cases"][0]["assigned_to"], "Sh_Tarun_Shokeen");

    let err = post_json(&app, "/cases", intake_payload(6, 2024)).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
