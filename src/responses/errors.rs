use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

use crate::errors::AppError;

/// Convert an AppError into a JSON error response.
pub fn error_to_response(err: AppError) -> Response {
    let status = match err {
        AppError::Validation(_) | AppError::Range(_) => 400,
        AppError::NotFound => 404,
        AppError::Duplicate(_) => 409,
        AppError::Storage(_) | AppError::Xlsx(_) | AppError::Internal => 500,
    };
    json_error_response(status, &err.to_string())
}

/// Build a JSON error body with the given status.
pub fn json_error_response(status: u16, message: &str) -> Response {
    let body = json!({ "error": message }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::new(body))
        .unwrap_or_else(|_| Response::new(Body::new("internal server error")))
}
