use serde::{Deserialize, Serialize};

use crate::models::candidate::Candidate;

/// Structured output of the AI email parser. Deliberately distinct from
/// `Candidate`: every field is optional and nothing here is trusted until the
/// merged record passes the same validation gate as manual entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub parking_status: Option<String>,
    pub license_points: Option<String>,
    pub experience_summary: Option<String>,
    pub availability: Option<String>,
    pub financial_status: Option<String>,
    pub notes: Option<String>,
    pub rating: Option<u8>,
    pub ni_number: Option<String>,
    pub driving_license_number: Option<String>,
}

impl CandidateDraft {
    /// Pre-fills a fresh candidate record. The result is a form draft, not a
    /// committed entity; committing it goes through the save operation.
    pub fn into_candidate(self) -> Candidate {
        let mut candidate = Candidate::new();
        if let Some(name) = self.name {
            candidate.name = name;
        }
        if let Some(email) = self.email {
            candidate.email = email;
        }
        if let Some(mobile) = self.mobile {
            candidate.mobile = mobile;
        }
        candidate.age = self.age;
        if let Some(location) = self.location {
            candidate.location = location;
        }
        if let Some(parking_status) = self.parking_status {
            candidate.parking_status = parking_status;
        }
        if let Some(license_points) = self.license_points {
            candidate.license_points = license_points;
        }
        if let Some(experience_summary) = self.experience_summary {
            candidate.experience_summary = experience_summary;
        }
        if let Some(availability) = self.availability {
            candidate.availability = availability;
        }
        candidate.financial_status = self.financial_status;
        if let Some(notes) = self.notes {
            candidate.notes = notes;
        }
        if let Some(rating) = self.rating {
            candidate.rating = rating;
        }
        candidate.ni_number = self.ni_number;
        candidate.driving_license_number = self.driving_license_number;
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::CandidateStatus;
    use crate::models::user::{User, UserRole};
    use crate::services::candidate_service;

    #[test]
    fn draft_parses_from_model_output_and_prefills_a_candidate() {
        let raw = r#"{
            "name": "Tom Keen",
            "email": "tom@example.com",
            "location": "Sheffield",
            "parkingStatus": "Off-road",
            "licensePoints": "0",
            "rating": 4,
            "niNumber": "QQ123456C",
            "irrelevantExtra": "ignored"
        }"#;
        let draft: CandidateDraft = serde_json::from_str(raw).unwrap();
        let candidate = draft.into_candidate();

        assert!(!candidate.id.is_empty());
        assert_eq!(candidate.name, "Tom Keen");
        assert_eq!(candidate.parking_status, "Off-road");
        assert_eq!(candidate.status, CandidateStatus::New);
        assert!(candidate.history.is_empty());
    }

    #[test]
    fn parsed_output_still_fails_the_save_gate() {
        // the model returned a malformed NI number; the draft itself is fine,
        // the save is not
        let draft = CandidateDraft {
            name: Some("Tom Keen".to_string()),
            ni_number: Some("NOT-AN-NI".to_string()),
            ..CandidateDraft::default()
        };
        let admin = User {
            id: "u-1".to_string(),
            name: "System Admin".to_string(),
            email: "admin@mvm-logistics.co.uk".to_string(),
            role: UserRole::Admin,
            initials: "SA".to_string(),
        };
        let err = candidate_service::save_candidate(None, draft.into_candidate(), &admin, &mut [])
            .unwrap_err();
        assert_eq!(err.field_messages(), vec!["ni_number: Invalid UK NI Number"]);
    }
}
