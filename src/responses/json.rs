use astra::{Body, ResponseBuilder};
use serde::Serialize;

use crate::errors::{AppError, ResultResp};

pub fn json_response<T: Serialize>(value: &T) -> ResultResp {
    let body = serde_json::to_string(value).map_err(|_| AppError::Internal)?;

    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::new(body))
        .map_err(|_| AppError::Internal)?;

    Ok(resp)
}
