use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::User;
use crate::utils::time;
use crate::utils::validation::{validate_account_number, validate_ni_number, validate_sort_code};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CandidateStatus {
    #[default]
    New,
    Screening,
    Hired,
    Rejected,
    Churned,
}

impl CandidateStatus {
    /// Churned and Rejected end the pipeline; reaching either triggers the
    /// automatic asset return.
    pub fn is_terminal(self) -> bool {
        matches!(self, CandidateStatus::Churned | CandidateStatus::Rejected)
    }
}

impl std::fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CandidateStatus::New => "New",
            CandidateStatus::Screening => "Screening",
            CandidateStatus::Hired => "Hired",
            CandidateStatus::Rejected => "Rejected",
            CandidateStatus::Churned => "Churned",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DbsStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    Requested,
    Valid,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbationStatus {
    /// Opaque classification set by the operator, not derived from hire date.
    #[serde(rename = "Probation (46%)")]
    Probation,
    #[serde(rename = "Standard (51%)")]
    Standard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BankDetails {
    pub bank_name: String,
    #[validate(custom(function = validate_sort_code))]
    pub sort_code: String,
    #[validate(custom(function = validate_account_number))]
    pub account_number: String,
    pub name_on_account: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NextOfKin {
    pub name: String,
    pub relationship: String,
    pub mobile: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UniformSizes {
    pub polo: String,
    pub jacket: String,
    pub hiviz: String,
}

/// One entry in a candidate's append-only history. The timestamp is generated
/// at the moment of the mutation and the user field carries the acting user's
/// initials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    pub date: DateTime<Utc>,
    pub user: String,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A recruitment-pipeline subject. The relationship to allocated assets is
/// derived by querying `Asset::allocated_to_candidate_id`; it is never stored
/// on the candidate itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    pub id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub email: String,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    pub parking_status: String,
    pub license_points: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_license_number: Option<String>,
    #[validate(custom(function = validate_ni_number))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ni_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utr_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_of_kin: Option<NextOfKin>,
    #[validate(nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<BankDetails>,
    pub experience_summary: String,
    pub availability: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_status: Option<String>,
    pub status: CandidateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dbs_status: Option<DbsStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dbs_expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_signed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handbook_issued: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probation_status: Option<ProbationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uniform_sizes: Option<UniformSizes>,
    pub rating: u8,
    pub notes: String,
    pub date_added: DateTime<Utc>,
    pub history: Vec<HistoryLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Candidate {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date_added: time::now(),
            ..Self::default()
        }
    }

    pub fn log_event(&mut self, acting_user: &User, event: impl Into<String>, details: Option<String>) {
        self.history.push(HistoryLog {
            date: time::now(),
            user: acting_user.initials.clone(),
            event: event.into(),
            details,
        });
    }
}
