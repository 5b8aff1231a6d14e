use crate::error::{Error, Result};
use crate::models::asset::{Asset, AssetAction, AssetStatus, AssetType};
use crate::models::candidate::Candidate;

pub const AUTO_RETURN_NOTE: &str = "Returned automatically due to candidate status change";

/// Returns every asset held by the given candidate to inventory, appending a
/// Returned entry to each. Idempotent: a second call finds nothing to match.
/// Invoked on candidate deletion and on transition to a terminal status.
pub fn return_assets(candidate_id: &str, assets: &mut [Asset]) -> usize {
    let mut returned = 0;
    for asset in assets.iter_mut() {
        if asset.allocated_to_candidate_id.as_deref() == Some(candidate_id) {
            asset.status = AssetStatus::Available;
            asset.allocated_to_candidate_id = None;
            asset.log_action(AssetAction::Returned, None, Some(AUTO_RETURN_NOTE.to_string()));
            returned += 1;
        }
    }
    returned
}

/// Allocates one asset to one candidate. A candidate may hold at most one
/// asset of each type at a time; a duplicate is a recoverable conflict and
/// leaves everything untouched. An unresolved asset id is a no-op (returns
/// false).
pub fn allocate(candidate: &Candidate, asset_id: &str, assets: &mut [Asset]) -> Result<bool> {
    let Some(target) = assets.iter().position(|a| a.id == asset_id) else {
        return Ok(false);
    };
    let kind = assets[target].kind;

    let duplicate = assets.iter().any(|a| {
        a.allocated_to_candidate_id.as_deref() == Some(candidate.id.as_str()) && a.kind == kind
    });
    if duplicate {
        return Err(Error::Conflict(format!(
            "This candidate already has a {kind} assigned"
        )));
    }

    let asset = &mut assets[target];
    asset.status = AssetStatus::Allocated;
    asset.allocated_to_candidate_id = Some(candidate.id.clone());
    asset.log_action(AssetAction::Allocated, Some(candidate.name.clone()), None);
    Ok(true)
}

/// Returns a single asset to inventory, recording which candidate handed it
/// back. Never fails; an unresolved id is a no-op.
pub fn deallocate(asset_id: &str, assets: &mut [Asset], candidates: &[Candidate]) -> bool {
    let Some(asset) = assets.iter_mut().find(|a| a.id == asset_id) else {
        return false;
    };
    let candidate_name = asset
        .allocated_to_candidate_id
        .as_ref()
        .and_then(|id| candidates.iter().find(|c| &c.id == id))
        .map(|c| c.name.clone());
    asset.status = AssetStatus::Available;
    asset.allocated_to_candidate_id = None;
    asset.log_action(AssetAction::Returned, candidate_name, None);
    true
}

/// Total replacement-cost exposure across every asset marked Lost.
pub fn outstanding_liability(assets: &[Asset]) -> f64 {
    assets
        .iter()
        .filter(|a| a.status == AssetStatus::Lost)
        .map(Asset::liability)
        .sum()
}

pub fn add_asset(
    name: &str,
    kind: AssetType,
    replacement_cost: Option<f64>,
    notes: Option<String>,
    assets: &mut Vec<Asset>,
) -> Result<String> {
    if name.trim().is_empty() {
        return Err(Error::Conflict("Asset name is required".to_string()));
    }
    let mut asset = Asset::new(name, kind);
    if let Some(cost) = replacement_cost {
        asset.replacement_cost = Some(cost);
    }
    asset.notes = notes;
    let id = asset.id.clone();
    assets.push(asset);
    Ok(id)
}

pub fn remove_asset(asset_id: &str, assets: &mut Vec<Asset>) -> bool {
    let before = assets.len();
    assets.retain(|a| a.id != asset_id);
    assets.len() != before
}

/// Moves an asset to Lost or Maintenance (or back to Available) with a
/// matching log entry. Allocation changes must go through allocate/deallocate,
/// so a request for Allocated is rejected here. Leaving the Allocated state
/// clears the candidate link.
pub fn set_asset_status(asset_id: &str, status: AssetStatus, assets: &mut [Asset]) -> Result<bool> {
    if status == AssetStatus::Allocated {
        return Err(Error::Conflict(
            "Assets are allocated through the candidate form".to_string(),
        ));
    }
    let Some(asset) = assets.iter_mut().find(|a| a.id == asset_id) else {
        return Ok(false);
    };
    if asset.status == status {
        return Ok(false);
    }
    asset.status = status;
    asset.allocated_to_candidate_id = None;
    match status {
        AssetStatus::Lost => asset.log_action(AssetAction::Lost, None, None),
        AssetStatus::Maintenance => asset.log_action(AssetAction::Maintenance, None, None),
        AssetStatus::Available => asset.log_action(AssetAction::Returned, None, None),
        AssetStatus::Allocated => unreachable!(),
    }
    Ok(true)
}

/// The derived side of the candidate/asset relationship.
pub fn allocated_to<'a>(candidate_id: &str, assets: &'a [Asset]) -> Vec<&'a Asset> {
    assets
        .iter()
        .filter(|a| a.allocated_to_candidate_id.as_deref() == Some(candidate_id))
        .collect()
}
