use rust_xlsxwriter::Workbook;

use crate::domain::report::ReportTable;
use crate::domain::summary::CaseSummary;
use crate::errors::{AppError, ResultResp};
use crate::responses::xlsx_response;

/// Render a report table into a workbook download. The filtered report also
/// carries its outcome summary as a block under the table, mirroring the
/// layout of the office's printed reports.
pub fn export_report_xlsx(
    table: &ReportTable,
    summary: Option<&CaseSummary>,
    filename: &str,
) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let write_err = |what: &str, e: rust_xlsxwriter::XlsxError| {
        AppError::Xlsx(format!("failed to write {what}: {e}"))
    };

    for (col, header) in table.columns.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, header)
            .map_err(|e| write_err("header", e))?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            worksheet
                .write_string(r, col as u16, cell)
                .map_err(|e| write_err("row", e))?;
        }
    }

    if let Some(summary) = summary {
        // One blank row between the table and the summary block.
        let mut r = table.rows.len() as u32 + 2;
        worksheet
            .write_string(r, 0, "Summary")
            .map_err(|e| write_err("summary", e))?;

        let lines = [
            ("Settled", summary.settled),
            ("Not Settled", summary.not_settled),
            ("Not Fit", summary.not_fit),
            ("Pending", summary.pending),
        ];
        for (label, count) in lines {
            r += 1;
            worksheet
                .write_string(r, 0, label)
                .map_err(|e| write_err("summary", e))?;
            worksheet
                .write_number(r, 1, count as f64)
                .map_err(|e| write_err("summary", e))?;
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| AppError::Xlsx(format!("failed to save workbook: {e}")))?;

    xlsx_response(buffer, filename)
}
