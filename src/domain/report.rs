use crate::domain::case::Case;

/// Row/column structure handed to the document renderer. Row order follows
/// the order the query engine returned the cases in; no re-sorting here.
#[derive(Debug)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

const COLUMNS: [&str; 10] = [
    "Case No",
    "Year",
    "Nature",
    "Received From",
    "Date & Time",
    "Party 1",
    "Party 2",
    "Assigned To",
    "NDOH",
    "Disposal",
];

/// Underscore-delimited roster tokens render with spaces.
pub fn sanitize(value: &str) -> String {
    value.replace('_', " ")
}

fn optional(value: Option<&String>) -> String {
    value.map(|s| sanitize(s)).unwrap_or_default()
}

pub fn case_table(cases: &[Case]) -> ReportTable {
    let rows = cases
        .iter()
        .map(|c| {
            let ndoh = match c.ndoh_date {
                Some(date) => match c.ndoh_time {
                    Some(time) => format!("{date} {}", time.as_str()),
                    None => date.to_string(),
                },
                None => String::new(),
            };
            vec![
                c.display_case_no(),
                c.year.to_string(),
                sanitize(c.nature_of_case.as_str()),
                sanitize(&c.received_from),
                format!("{} {}", c.date, c.time_slot.as_str()),
                optional(c.party1.as_ref()),
                optional(c.party2.as_ref()),
                sanitize(&c.assigned_to),
                ndoh,
                c.disposal_of_case.as_report_str().to_string(),
            ]
        })
        .collect();

    ReportTable {
        columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    }
}
