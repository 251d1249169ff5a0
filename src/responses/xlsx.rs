use astra::{Body, ResponseBuilder};

use crate::errors::{AppError, ResultResp};

/// Return an XLSX workbook as a file download.
pub fn xlsx_response(buffer: Vec<u8>, filename: &str) -> ResultResp {
    let resp = ResponseBuilder::new()
        .status(200)
        .header(
            "Content-Type",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        )
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::new(buffer))
        .map_err(|_| AppError::Internal)?;

    Ok(resp)
}
