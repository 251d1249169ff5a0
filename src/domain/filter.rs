use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::case::NatureOfCase;
use crate::errors::AppError;

/// Sparse filter over the case table. An absent (or blank) field puts no
/// constraint on that dimension; date bounds are inclusive and compare the
/// case's intake `date`, never its NDOH date.
#[derive(Debug, Default, Deserialize)]
pub struct CaseFilter {
    pub nature_of_case: Option<String>,
    pub assigned_to: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Filter after boundary validation. Produced by [`CaseFilter::validate`]
/// before any query runs.
#[derive(Debug)]
pub struct ValidatedFilter {
    pub nature_of_case: Option<NatureOfCase>,
    pub assigned_to: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_date(field: &str, s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid {field}: {s}")))
}

impl CaseFilter {
    /// Rejects specifications violating the report date policy with a
    /// `Range` error rather than clamping: bounds may not lie in the future
    /// and the start may not exceed the end.
    pub fn validate(self, today: NaiveDate) -> Result<ValidatedFilter, AppError> {
        let nature_of_case = match present(self.nature_of_case) {
            Some(s) => Some(s.parse::<NatureOfCase>()?),
            None => None,
        };
        let assigned_to = present(self.assigned_to);

        let start_date = match present(self.start_date) {
            Some(s) => Some(parse_date("start_date", &s)?),
            None => None,
        };
        let end_date = match present(self.end_date) {
            Some(s) => Some(parse_date("end_date", &s)?),
            None => None,
        };

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(AppError::Range(format!(
                    "start_date {start} is after end_date {end}"
                )));
            }
        }
        for (name, value) in [("start_date", start_date), ("end_date", end_date)] {
            if let Some(date) = value {
                if date > today {
                    return Err(AppError::Range(format!("{name} {date} is in the future")));
                }
            }
        }

        Ok(ValidatedFilter {
            nature_of_case,
            assigned_to,
            start_date,
            end_date,
        })
    }
}
