use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::asset::Asset;
use crate::models::candidate::Candidate;
use crate::models::user::{User, UserRole};
use crate::services::asset_service;

/// The result of a committed save: the candidate as stored, plus how many
/// assets the terminal-status cascade sent back to inventory.
#[derive(Debug)]
pub struct SaveOutcome {
    pub candidate: Candidate,
    pub returned_assets: usize,
}

/// The central lifecycle operation. Ordering is fixed: validation gate,
/// authorization, history append, asset-return cascade. A rejected save
/// leaves history and assets untouched.
///
/// - create (`previous` is None): assigns an id if absent, forces ownership
///   onto a creating recruiter, logs "Profile Created"
/// - status change: logs "Status changed" with from/to; a move to Churned or
///   Rejected returns every allocated asset as a side effect
/// - any other update: logs "Profile Updated"
pub fn save_candidate(
    previous: Option<&Candidate>,
    mut next: Candidate,
    acting_user: &User,
    assets: &mut [Asset],
) -> Result<SaveOutcome> {
    next.validate()?;
    authorize(acting_user, previous)?;

    let mut returned_assets = 0;
    match previous {
        None => {
            if next.id.is_empty() {
                next.id = Uuid::new_v4().to_string();
            }
            if acting_user.role == UserRole::Recruiter {
                // a recruiter can only create candidates for themselves
                next.recruiter_id = Some(acting_user.id.clone());
            }
            next.log_event(acting_user, "Profile Created", None);
        }
        Some(prev) => {
            if acting_user.role == UserRole::Recruiter && next.recruiter_id.is_none() {
                next.recruiter_id = Some(acting_user.id.clone());
            }
            if prev.status != next.status {
                next.log_event(
                    acting_user,
                    "Status changed",
                    Some(format!("From {} to {}", prev.status, next.status)),
                );
                if next.status.is_terminal() {
                    returned_assets = asset_service::return_assets(&next.id, assets);
                }
            } else {
                next.log_event(acting_user, "Profile Updated", None);
            }
        }
    }

    Ok(SaveOutcome {
        candidate: next,
        returned_assets,
    })
}

/// Deletes a candidate, returning their assets to inventory first. Admin
/// only. An unresolved id is a no-op.
pub fn delete_candidate(
    candidate_id: &str,
    acting_user: &User,
    candidates: &mut Vec<Candidate>,
    assets: &mut [Asset],
) -> Result<usize> {
    if acting_user.role != UserRole::Admin {
        return Err(Error::Unauthorized(
            "Only admins can delete candidates".to_string(),
        ));
    }
    if !candidates.iter().any(|c| c.id == candidate_id) {
        return Ok(0);
    }
    let returned = asset_service::return_assets(candidate_id, assets);
    candidates.retain(|c| c.id != candidate_id);
    Ok(returned)
}

fn authorize(acting_user: &User, previous: Option<&Candidate>) -> Result<()> {
    match acting_user.role {
        UserRole::Admin => Ok(()),
        UserRole::ReadOnly => Err(Error::Unauthorized(
            "Read-only users cannot modify candidates".to_string(),
        )),
        UserRole::Recruiter => {
            if let Some(prev) = previous {
                if prev
                    .recruiter_id
                    .as_deref()
                    .is_some_and(|owner| owner != acting_user.id)
                {
                    return Err(Error::Unauthorized(
                        "Candidate belongs to another recruiter".to_string(),
                    ));
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::asset::{AssetStatus, AssetType};
    use crate::models::candidate::{BankDetails, CandidateStatus};
    use crate::utils::invariants;

    fn admin() -> User {
        User {
            id: "u-1".to_string(),
            name: "System Admin".to_string(),
            email: "admin@mvm-logistics.co.uk".to_string(),
            role: UserRole::Admin,
            initials: "SA".to_string(),
        }
    }

    fn recruiter(id: &str) -> User {
        User {
            id: id.to_string(),
            name: "STPJ Recruitment".to_string(),
            email: "contact@stpj.co.uk".to_string(),
            role: UserRole::Recruiter,
            initials: "ST".to_string(),
        }
    }

    fn viewer() -> User {
        User {
            id: "u-2".to_string(),
            name: "Viewer".to_string(),
            email: "view@mvm-logistics.co.uk".to_string(),
            role: UserRole::ReadOnly,
            initials: "VI".to_string(),
        }
    }

    fn draft(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            ..Candidate::new()
        }
    }

    #[test]
    fn create_assigns_id_and_logs_profile_created() {
        let mut candidate = draft("Sarah Jenkins");
        candidate.id.clear();
        let outcome = save_candidate(None, candidate, &admin(), &mut []).unwrap();

        assert!(!outcome.candidate.id.is_empty());
        assert_eq!(outcome.candidate.history.len(), 1);
        assert_eq!(outcome.candidate.history[0].event, "Profile Created");
        assert_eq!(outcome.candidate.history[0].user, "SA");
        assert_eq!(outcome.returned_assets, 0);
    }

    #[test]
    fn recruiter_ownership_is_forced_on_create() {
        let mut candidate = draft("Mike Ross");
        candidate.recruiter_id = Some("someone-else".to_string());
        let outcome = save_candidate(None, candidate, &recruiter("u-3"), &mut []).unwrap();
        assert_eq!(outcome.candidate.recruiter_id.as_deref(), Some("u-3"));
    }

    #[test]
    fn status_change_logs_from_and_to() {
        let prev = draft("Jessica Pearson");
        let mut next = prev.clone();
        next.status = CandidateStatus::Hired;

        let outcome = save_candidate(Some(&prev), next, &admin(), &mut []).unwrap();
        let entry = outcome.candidate.history.last().unwrap();
        assert_eq!(entry.event, "Status changed");
        assert_eq!(entry.details.as_deref(), Some("From New to Hired"));
    }

    #[test]
    fn plain_update_logs_profile_updated() {
        let prev = draft("Jessica Pearson");
        let mut next = prev.clone();
        next.notes = "Called back".to_string();

        let outcome = save_candidate(Some(&prev), next, &admin(), &mut []).unwrap();
        assert_eq!(outcome.candidate.history.len(), 1);
        assert_eq!(outcome.candidate.history[0].event, "Profile Updated");
    }

    #[test]
    fn churn_returns_every_allocated_asset() {
        let mut prev = draft("Mike Ross");
        prev.status = CandidateStatus::Hired;
        let mut assets = vec![
            Asset::new("TP-299", AssetType::TradePlate),
            Asset::new("FC-Shell-001", AssetType::FuelCard),
            Asset::new("Tab-Samsung-09", AssetType::Tablet),
        ];
        asset_service::allocate(&prev, &assets[0].id.clone(), &mut assets).unwrap();
        asset_service::allocate(&prev, &assets[1].id.clone(), &mut assets).unwrap();

        let mut next = prev.clone();
        next.status = CandidateStatus::Churned;
        let outcome = save_candidate(Some(&prev), next, &admin(), &mut assets).unwrap();

        assert_eq!(outcome.returned_assets, 2);
        assert!(assets.iter().all(|a| a.status == AssetStatus::Available));
        invariants::check(&[outcome.candidate], &assets).unwrap();
    }

    #[test]
    fn validation_failure_commits_nothing() {
        let mut prev = draft("Mike Ross");
        prev.status = CandidateStatus::Hired;
        let mut assets = vec![Asset::new("TP-299", AssetType::TradePlate)];
        asset_service::allocate(&prev, &assets[0].id.clone(), &mut assets).unwrap();
        let history_before = assets[0].history.len();

        let mut next = prev.clone();
        next.status = CandidateStatus::Churned;
        next.bank_details = Some(BankDetails {
            sort_code: "12-34".to_string(),
            account_number: "123".to_string(),
            ..BankDetails::default()
        });

        let err = save_candidate(Some(&prev), next, &admin(), &mut assets).unwrap_err();
        let messages = err.field_messages();
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().any(|m| m.contains("Invalid Sort Code")));
        assert!(messages
            .iter()
            .any(|m| m.contains("Account Number must be 8 digits")));

        // no history written, no assets touched
        assert_eq!(assets[0].status, AssetStatus::Allocated);
        assert_eq!(assets[0].history.len(), history_before);
    }

    #[test]
    fn empty_name_is_rejected() {
        let candidate = draft("");
        let err = save_candidate(None, candidate, &admin(), &mut []).unwrap_err();
        assert_eq!(err.field_messages(), vec!["name: Name is required"]);
    }

    #[test]
    fn invalid_ni_number_is_rejected() {
        let mut candidate = draft("Sarah Jenkins");
        candidate.ni_number = Some("XX123456Z".to_string());
        let err = save_candidate(None, candidate, &admin(), &mut []).unwrap_err();
        assert_eq!(err.field_messages(), vec!["ni_number: Invalid UK NI Number"]);
    }

    #[test]
    fn read_only_users_cannot_save() {
        let err = save_candidate(None, draft("Sarah Jenkins"), &viewer(), &mut []).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn recruiter_cannot_edit_a_foreign_candidate() {
        let mut prev = draft("Sarah Jenkins");
        prev.recruiter_id = Some("u-4".to_string());
        let next = prev.clone();

        let err = save_candidate(Some(&prev), next, &recruiter("u-3"), &mut []).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn recruiter_takes_ownership_of_an_unowned_record() {
        let prev = draft("Jessica Pearson");
        assert!(prev.recruiter_id.is_none());
        let next = prev.clone();

        let outcome = save_candidate(Some(&prev), next, &recruiter("u-3"), &mut []).unwrap();
        assert_eq!(outcome.candidate.recruiter_id.as_deref(), Some("u-3"));
    }

    #[test]
    fn delete_returns_assets_first() {
        let hired = draft("Sarah Jenkins");
        let mut candidates = vec![hired.clone()];
        let mut assets = vec![Asset::new("TP-299", AssetType::TradePlate)];
        asset_service::allocate(&hired, &assets[0].id.clone(), &mut assets).unwrap();

        let returned =
            delete_candidate(&hired.id, &admin(), &mut candidates, &mut assets).unwrap();
        assert_eq!(returned, 1);
        assert!(candidates.is_empty());
        assert_eq!(assets[0].status, AssetStatus::Available);

        // deleting again is a no-op
        assert_eq!(
            delete_candidate(&hired.id, &admin(), &mut candidates, &mut assets).unwrap(),
            0
        );
    }

    #[test]
    fn only_admins_delete() {
        let mut candidates = vec![draft("Sarah Jenkins")];
        let id = candidates[0].id.clone();
        let err =
            delete_candidate(&id, &recruiter("u-3"), &mut candidates, &mut []).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
        assert_eq!(candidates.len(), 1);
    }
}
