use serde::Serialize;

use crate::domain::case::{Case, Disposal};

/// Disposal-outcome counts over a set of matched cases. Every case lands in
/// exactly one bucket, so the four buckets always sum to the input length;
/// cases with no recorded disposal count as pending.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CaseSummary {
    pub settled: u32,
    pub not_settled: u32,
    pub not_fit: u32,
    pub pending: u32,
}

pub fn summarize(cases: &[Case]) -> CaseSummary {
    let mut summary = CaseSummary::default();
    for case in cases {
        match case.disposal_of_case {
            Disposal::Settled => summary.settled += 1,
            Disposal::NotSettled => summary.not_settled += 1,
            Disposal::NotFitForMediation => summary.not_fit += 1,
            Disposal::Open => summary.pending += 1,
        }
    }
    summary
}
