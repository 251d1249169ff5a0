use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::AppError;

/// The office's closed list of case categories. Stored and filtered by the
/// variant token, never by display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NatureOfCase {
    CivilRecovery,
    CivilPartition,
    CivilInjunction,
    CivilPossession,
    CivilProbate,
    Arbitration,
    CivilAppeal,
    CivilExecution,
    OtherCivilSuit,
    CriminalMatter,
    CriminalRevision,
    CriminalAppeal,
    PetitionForDivorce,
    PetitionForMaintenance,
    PetitionForCustody,
    PetitionForDomesticViolenceAct,
    CawCellN,
    CawCellOd,
    PetitionForRecoveryOfRent,
    PetitionUs138OfNiActAndPasaAct,
    PetitionUnderElectricityAct,
    MactCase,
}

impl NatureOfCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            NatureOfCase::CivilRecovery => "CivilRecovery",
            NatureOfCase::CivilPartition => "CivilPartition",
            NatureOfCase::CivilInjunction => "CivilInjunction",
            NatureOfCase::CivilPossession => "CivilPossession",
            NatureOfCase::CivilProbate => "CivilProbate",
            NatureOfCase::Arbitration => "Arbitration",
            NatureOfCase::CivilAppeal => "CivilAppeal",
            NatureOfCase::CivilExecution => "CivilExecution",
            NatureOfCase::OtherCivilSuit => "OtherCivilSuit",
            NatureOfCase::CriminalMatter => "CriminalMatter",
            NatureOfCase::CriminalRevision => "CriminalRevision",
            NatureOfCase::CriminalAppeal => "CriminalAppeal",
            NatureOfCase::PetitionForDivorce => "PetitionForDivorce",
            NatureOfCase::PetitionForMaintenance => "PetitionForMaintenance",
            NatureOfCase::PetitionForCustody => "PetitionForCustody",
            NatureOfCase::PetitionForDomesticViolenceAct => "PetitionForDomesticViolenceAct",
            NatureOfCase::CawCellN => "CawCellN",
            NatureOfCase::CawCellOd => "CawCellOd",
            NatureOfCase::PetitionForRecoveryOfRent => "PetitionForRecoveryOfRent",
            NatureOfCase::PetitionUs138OfNiActAndPasaAct => "PetitionUs138OfNiActAndPasaAct",
            NatureOfCase::PetitionUnderElectricityAct => "PetitionUnderElectricityAct",
            NatureOfCase::MactCase => "MactCase",
        }
    }
}

impl FromStr for NatureOfCase {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = match s {
            "CivilRecovery" => NatureOfCase::CivilRecovery,
            "CivilPartition" => NatureOfCase::CivilPartition,
            "CivilInjunction" => NatureOfCase::CivilInjunction,
            "CivilPossession" => NatureOfCase::CivilPossession,
            "CivilProbate" => NatureOfCase::CivilProbate,
            "Arbitration" => NatureOfCase::Arbitration,
            "CivilAppeal" => NatureOfCase::CivilAppeal,
            "CivilExecution" => NatureOfCase::CivilExecution,
            "OtherCivilSuit" => NatureOfCase::OtherCivilSuit,
            "CriminalMatter" => NatureOfCase::CriminalMatter,
            "CriminalRevision" => NatureOfCase::CriminalRevision,
            "CriminalAppeal" => NatureOfCase::CriminalAppeal,
            "PetitionForDivorce" => NatureOfCase::PetitionForDivorce,
            "PetitionForMaintenance" => NatureOfCase::PetitionForMaintenance,
            "PetitionForCustody" => NatureOfCase::PetitionForCustody,
            "PetitionForDomesticViolenceAct" => NatureOfCase::PetitionForDomesticViolenceAct,
            "CawCellN" => NatureOfCase::CawCellN,
            "CawCellOd" => NatureOfCase::CawCellOd,
            "PetitionForRecoveryOfRent" => NatureOfCase::PetitionForRecoveryOfRent,
            "PetitionUs138OfNiActAndPasaAct" => NatureOfCase::PetitionUs138OfNiActAndPasaAct,
            "PetitionUnderElectricityAct" => NatureOfCase::PetitionUnderElectricityAct,
            "MactCase" => NatureOfCase::MactCase,
            other => {
                return Err(AppError::Validation(format!(
                    "unknown nature_of_case: {other}"
                )))
            }
        };
        Ok(v)
    }
}

/// Assignment slots offered by the intake desk, half-hourly from 10:00
/// through 17:00. Serialized as `HH:MM` on the wire and in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "10:00")]
    S1000,
    #[serde(rename = "10:30")]
    S1030,
    #[serde(rename = "11:00")]
    S1100,
    #[serde(rename = "11:30")]
    S1130,
    #[serde(rename = "12:00")]
    S1200,
    #[serde(rename = "12:30")]
    S1230,
    #[serde(rename = "13:00")]
    S1300,
    #[serde(rename = "13:30")]
    S1330,
    #[serde(rename = "14:00")]
    S1400,
    #[serde(rename = "14:30")]
    S1430,
    #[serde(rename = "15:00")]
    S1500,
    #[serde(rename = "15:30")]
    S1530,
    #[serde(rename = "16:00")]
    S1600,
    #[serde(rename = "16:30")]
    S1630,
    #[serde(rename = "17:00")]
    S1700,
}

impl TimeSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::S1000 => "10:00",
            TimeSlot::S1030 => "10:30",
            TimeSlot::S1100 => "11:00",
            TimeSlot::S1130 => "11:30",
            TimeSlot::S1200 => "12:00",
            TimeSlot::S1230 => "12:30",
            TimeSlot::S1300 => "13:00",
            TimeSlot::S1330 => "13:30",
            TimeSlot::S1400 => "14:00",
            TimeSlot::S1430 => "14:30",
            TimeSlot::S1500 => "15:00",
            TimeSlot::S1530 => "15:30",
            TimeSlot::S1600 => "16:00",
            TimeSlot::S1630 => "16:30",
            TimeSlot::S1700 => "17:00",
        }
    }
}

impl FromStr for TimeSlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = match s {
            "10:00" => TimeSlot::S1000,
            "10:30" => TimeSlot::S1030,
            "11:00" => TimeSlot::S1100,
            "11:30" => TimeSlot::S1130,
            "12:00" => TimeSlot::S1200,
            "12:30" => TimeSlot::S1230,
            "13:00" => TimeSlot::S1300,
            "13:30" => TimeSlot::S1330,
            "14:00" => TimeSlot::S1400,
            "14:30" => TimeSlot::S1430,
            "15:00" => TimeSlot::S1500,
            "15:30" => TimeSlot::S1530,
            "16:00" => TimeSlot::S1600,
            "16:30" => TimeSlot::S1630,
            "17:00" => TimeSlot::S1700,
            other => return Err(AppError::Validation(format!("unknown time slot: {other}"))),
        };
        Ok(v)
    }
}

/// Outcome state of a case. `Open` is the state before any update and is
/// reported as "Pending"; the store keeps it as NULL so the column only ever
/// holds an explicitly recorded disposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Disposal {
    #[default]
    #[serde(rename = "Pending")]
    Open,
    Settled,
    NotSettled,
    NotFitForMediation,
}

impl Disposal {
    /// Token persisted in the `disposal_of_case` column, NULL while open.
    pub fn as_db_str(&self) -> Option<&'static str> {
        match self {
            Disposal::Open => None,
            Disposal::Settled => Some("Settled"),
            Disposal::NotSettled => Some("NotSettled"),
            Disposal::NotFitForMediation => Some("NotFitForMediation"),
        }
    }

    pub fn from_db(value: Option<&str>) -> Result<Self, AppError> {
        match value {
            None => Ok(Disposal::Open),
            Some(s) => s.parse(),
        }
    }

    /// True while the case still needs a follow-up hearing.
    pub fn leaves_open(&self) -> bool {
        matches!(self, Disposal::Open | Disposal::NotSettled)
    }

    pub fn as_report_str(&self) -> &'static str {
        match self {
            Disposal::Open => "Pending",
            Disposal::Settled => "Settled",
            Disposal::NotSettled => "NotSettled",
            Disposal::NotFitForMediation => "NotFitForMediation",
        }
    }
}

impl FromStr for Disposal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Disposal::Open),
            "Settled" => Ok(Disposal::Settled),
            "NotSettled" => Ok(Disposal::NotSettled),
            "NotFitForMediation" => Ok(Disposal::NotFitForMediation),
            other => Err(AppError::Validation(format!(
                "unknown disposal_of_case: {other}"
            ))),
        }
    }
}

/// A persisted case row. Snapshots handed out by the store; all mutation
/// goes back through the store's insert/update operations.
#[derive(Debug, Clone, Serialize)]
pub struct Case {
    pub id: i64,
    pub case_no: u32,
    pub year: u16,
    pub nature_of_case: NatureOfCase,
    pub received_from: String,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub party1: Option<String>,
    pub party2: Option<String>,
    pub assigned_to: String,
    pub ndoh_date: Option<NaiveDate>,
    pub ndoh_time: Option<TimeSlot>,
    pub disposal_of_case: Disposal,
    pub connected: u8,
}

impl Case {
    /// Zero-padded six digit display form, e.g. `001234`.
    pub fn display_case_no(&self) -> String {
        format!("{:06}", self.case_no)
    }
}

/// Raw intake payload. Enum-valued fields arrive as strings from the form
/// layer and are checked against the closed variant lists here; the first
/// invalid required field rejects the whole insert.
#[derive(Debug, Deserialize)]
pub struct NewCaseInput {
    pub case_no: i64,
    pub year: i64,
    pub nature_of_case: String,
    pub received_from: String,
    pub time_slot: String,
    pub party1: Option<String>,
    pub party2: Option<String>,
    pub assigned_to: String,
}

/// Intake payload after boundary validation, ready for the store.
#[derive(Debug)]
pub struct NewCase {
    pub case_no: u32,
    pub year: u16,
    pub nature_of_case: NatureOfCase,
    pub received_from: String,
    pub time_slot: TimeSlot,
    pub party1: Option<String>,
    pub party2: Option<String>,
    pub assigned_to: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl NewCaseInput {
    pub fn validate(self) -> Result<NewCase, AppError> {
        if !(1..=999_999).contains(&self.case_no) {
            return Err(AppError::Validation(format!(
                "case_no must be a positive number of at most six digits, got {}",
                self.case_no
            )));
        }
        if !(1000..=9999).contains(&self.year) {
            return Err(AppError::Validation(format!(
                "year must be a four digit number, got {}",
                self.year
            )));
        }
        let nature_of_case: NatureOfCase = self.nature_of_case.parse()?;
        let received_from = self.received_from.trim().to_string();
        if received_from.is_empty() {
            return Err(AppError::Validation("received_from is required".into()));
        }
        let time_slot: TimeSlot = self.time_slot.parse()?;
        let assigned_to = self.assigned_to.trim().to_string();
        if assigned_to.is_empty() {
            return Err(AppError::Validation("assigned_to is required".into()));
        }

        Ok(NewCase {
            case_no: self.case_no as u32,
            year: self.year as u16,
            nature_of_case,
            received_from,
            time_slot,
            party1: non_blank(self.party1),
            party2: non_blank(self.party2),
            assigned_to,
        })
    }
}

/// Raw status-update payload. Keyed by `(case_no, year)`.
#[derive(Debug, Deserialize)]
pub struct UpdateCaseInput {
    pub case_no: i64,
    pub year: i64,
    pub disposal_of_case: String,
    pub ndoh_date: Option<String>,
    pub ndoh_time: Option<String>,
    #[serde(default)]
    pub connected: i64,
}

/// Validated patch applied by the store's update operation.
#[derive(Debug)]
pub struct CasePatch {
    pub disposal_of_case: Disposal,
    pub ndoh_date: Option<NaiveDate>,
    pub ndoh_time: Option<TimeSlot>,
    pub connected: u8,
}

impl UpdateCaseInput {
    /// Checks the patch against the office's temporal policy as of `today`:
    /// a next date of hearing is required while the case stays open and may
    /// not lie in the past.
    pub fn validate(self, today: NaiveDate) -> Result<CasePatch, AppError> {
        let disposal_of_case: Disposal = self.disposal_of_case.parse()?;

        if !(0..=99).contains(&self.connected) {
            return Err(AppError::Validation(format!(
                "connected must be between 0 and 99, got {}",
                self.connected
            )));
        }

        // The form layer sends "" for untouched date/time inputs.
        let ndoh_date = match non_blank(self.ndoh_date) {
            Some(s) => Some(
                NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map_err(|_| AppError::Validation(format!("invalid ndoh_date: {s}")))?,
            ),
            None => None,
        };
        let ndoh_time = match non_blank(self.ndoh_time) {
            Some(s) => Some(s.parse::<TimeSlot>()?),
            None => None,
        };

        if disposal_of_case.leaves_open() && ndoh_date.is_none() {
            return Err(AppError::Validation(
                "ndoh_date is required while the case remains open".into(),
            ));
        }
        if ndoh_time.is_some() && ndoh_date.is_none() {
            return Err(AppError::Validation(
                "ndoh_time requires an ndoh_date".into(),
            ));
        }
        if let Some(date) = ndoh_date {
            if date < today {
                return Err(AppError::Range(format!(
                    "ndoh_date {date} cannot be in the past"
                )));
            }
        }

        Ok(CasePatch {
            disposal_of_case,
            ndoh_date,
            ndoh_time,
            connected: self.connected as u8,
        })
    }
}
