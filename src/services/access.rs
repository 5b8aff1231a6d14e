//! Role-based projection. The same predicate gates what is rendered and what
//! the mutating operations may target.

use crate::models::candidate::Candidate;
use crate::models::user::{User, UserRole};

/// Admins and read-only users see everything; recruiters only the candidates
/// they own.
pub fn visible_candidates<'a>(all: &'a [Candidate], user: &User) -> Vec<&'a Candidate> {
    match user.role {
        UserRole::Recruiter => all
            .iter()
            .filter(|c| c.recruiter_id.as_deref() == Some(user.id.as_str()))
            .collect(),
        UserRole::Admin | UserRole::ReadOnly => all.iter().collect(),
    }
}

pub fn can_view(user: &User, candidate: &Candidate) -> bool {
    match user.role {
        UserRole::Recruiter => candidate.recruiter_id.as_deref() == Some(user.id.as_str()),
        UserRole::Admin | UserRole::ReadOnly => true,
    }
}

/// Write access. An unowned record is mutable by a recruiter (who then takes
/// ownership of it on save).
pub fn can_mutate(user: &User, candidate: &Candidate) -> bool {
    match user.role {
        UserRole::Admin => true,
        UserRole::ReadOnly => false,
        UserRole::Recruiter => candidate
            .recruiter_id
            .as_deref()
            .map_or(true, |owner| owner == user.id),
    }
}
