//! Pure aggregates behind the dashboard and reports pages.

use std::collections::HashMap;

use crate::models::asset::{Asset, AssetStatus, AssetType};
use crate::models::candidate::{Candidate, CandidateStatus};

pub fn candidate_status_counts(candidates: &[Candidate]) -> HashMap<CandidateStatus, usize> {
    let mut counts = HashMap::new();
    for candidate in candidates {
        *counts.entry(candidate.status).or_insert(0) += 1;
    }
    counts
}

pub fn asset_status_counts(assets: &[Asset]) -> HashMap<AssetStatus, usize> {
    let mut counts = HashMap::new();
    for asset in assets {
        *counts.entry(asset.status).or_insert(0) += 1;
    }
    counts
}

pub fn asset_type_counts(assets: &[Asset]) -> HashMap<AssetType, usize> {
    let mut counts = HashMap::new();
    for asset in assets {
        *counts.entry(asset.kind).or_insert(0) += 1;
    }
    counts
}

/// Units of each type currently out with a known candidate. Links to deleted
/// candidates are not counted.
pub fn allocated_by_type(
    assets: &[Asset],
    candidates: &[Candidate],
) -> HashMap<AssetType, usize> {
    let mut counts = HashMap::new();
    for asset in assets {
        let held = asset
            .allocated_to_candidate_id
            .as_deref()
            .is_some_and(|id| candidates.iter().any(|c| c.id == id));
        if held {
            *counts.entry(asset.kind).or_insert(0) += 1;
        }
    }
    counts
}
