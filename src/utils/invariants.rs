//! Cross-collection consistency checks. The candidate/asset relationship is
//! derived, not stored on both sides, so these assertions are the only place
//! the full set of rules is written down. Intended for use in tests after
//! every mutation.

use std::collections::HashSet;

use crate::models::asset::{Asset, AssetStatus};
use crate::models::candidate::Candidate;

/// Returns every rule violation found, or Ok when the collections are
/// mutually consistent:
/// - an asset's candidate link is set if and only if its status is Allocated
/// - a set link references an existing candidate in a non-terminal status
/// - a candidate holds at most one allocated asset of each type
pub fn check(candidates: &[Candidate], assets: &[Asset]) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();

    for asset in assets {
        match (&asset.allocated_to_candidate_id, asset.status) {
            (Some(_), AssetStatus::Allocated) | (None, AssetStatus::Available)
            | (None, AssetStatus::Maintenance) | (None, AssetStatus::Lost) => {}
            (Some(_), status) => violations.push(format!(
                "asset {} has a candidate link but status {:?}",
                asset.id, status
            )),
            (None, AssetStatus::Allocated) => violations.push(format!(
                "asset {} is Allocated but has no candidate link",
                asset.id
            )),
        }

        if let Some(candidate_id) = &asset.allocated_to_candidate_id {
            match candidates.iter().find(|c| &c.id == candidate_id) {
                None => violations.push(format!(
                    "asset {} references missing candidate {}",
                    asset.id, candidate_id
                )),
                Some(candidate) if candidate.status.is_terminal() => violations.push(format!(
                    "asset {} is allocated to {} candidate {}",
                    asset.id, candidate.status, candidate.id
                )),
                Some(_) => {}
            }
        }
    }

    for candidate in candidates {
        let mut seen_types = HashSet::new();
        for asset in assets
            .iter()
            .filter(|a| a.allocated_to_candidate_id.as_deref() == Some(candidate.id.as_str()))
        {
            if !seen_types.insert(asset.kind) {
                violations.push(format!(
                    "candidate {} holds more than one {}",
                    candidate.id, asset.kind
                ));
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
