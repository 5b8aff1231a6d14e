use chrono::Duration;

use crate::models::candidate::{Candidate, CandidateStatus};
use crate::models::notification::{Notification, Severity};
use crate::models::user::User;
use crate::services::access;
use crate::utils::time;

const DBS_EXPIRY_WINDOW_DAYS: i64 = 30;

/// Derives the transient alert list from the candidates visible to the
/// current user. Pure and stateless: the same inputs always produce the same
/// projection, and nothing is persisted.
///
/// For each visible Hired candidate:
/// - DBS expiry date in the past        -> error
/// - DBS expiry within the next 30 days -> warning
/// - contract not signed                -> info (independent of the above)
pub fn notifications(candidates: &[Candidate], current_user: &User) -> Vec<Notification> {
    let now = time::now();
    let today = now.date_naive();
    let mut alerts = Vec::new();

    for candidate in access::visible_candidates(candidates, current_user) {
        if candidate.status != CandidateStatus::Hired {
            continue;
        }

        if let Some(expiry) = candidate.dbs_expiry_date {
            if expiry < today {
                alerts.push(Notification {
                    id: format!("dbs-exp-{}", candidate.id),
                    message: format!("{}'s DBS check has expired.", candidate.name),
                    read: false,
                    date: now,
                    severity: Severity::Error,
                });
            } else if expiry - today < Duration::days(DBS_EXPIRY_WINDOW_DAYS) {
                alerts.push(Notification {
                    id: format!("dbs-near-exp-{}", candidate.id),
                    message: format!("{}'s DBS check is expiring soon.", candidate.name),
                    read: false,
                    date: now,
                    severity: Severity::Warning,
                });
            }
        }

        if !candidate.contract_signed.unwrap_or(false) {
            alerts.push(Notification {
                id: format!("contract-{}", candidate.id),
                message: format!("{} is hired but has not signed their contract.", candidate.name),
                read: false,
                date: now,
                severity: Severity::Info,
            });
        }
    }

    // every entry shares the generation timestamp, so the stable sort keeps
    // creation order within a pass
    alerts.sort_by(|a, b| b.date.cmp(&a.date));
    alerts
}
