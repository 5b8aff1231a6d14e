use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    #[serde(rename = "Trade Plate")]
    TradePlate,
    #[serde(rename = "Fuel Card")]
    FuelCard,
    Tablet,
    Uniform,
    #[serde(rename = "Dash Cam")]
    DashCam,
    #[serde(rename = "ID Badge")]
    IdBadge,
    #[serde(rename = "AA Card")]
    AaCard,
}

impl AssetType {
    pub const ALL: [AssetType; 7] = [
        AssetType::TradePlate,
        AssetType::FuelCard,
        AssetType::Tablet,
        AssetType::Uniform,
        AssetType::DashCam,
        AssetType::IdBadge,
        AssetType::AaCard,
    ];

    /// Replacement charges from section 7.3 of the driver handbook.
    pub fn default_replacement_cost(self) -> f64 {
        match self {
            AssetType::TradePlate => 180.0,
            AssetType::Tablet => 150.0,
            AssetType::DashCam => 155.0,
            AssetType::Uniform => 120.0,
            AssetType::FuelCard => 50.0,
            AssetType::AaCard => 50.0,
            AssetType::IdBadge => 25.0,
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AssetType::TradePlate => "Trade Plate",
            AssetType::FuelCard => "Fuel Card",
            AssetType::Tablet => "Tablet",
            AssetType::Uniform => "Uniform",
            AssetType::DashCam => "Dash Cam",
            AssetType::IdBadge => "ID Badge",
            AssetType::AaCard => "AA Card",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AssetStatus {
    #[default]
    Available,
    Allocated,
    Maintenance,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetAction {
    Allocated,
    Returned,
    Lost,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLog {
    pub date: DateTime<Utc>,
    pub action: AssetAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A physical item owned by the company. `allocated_to_candidate_id` is set
/// if and only if the status is Allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AssetType,
    pub status: AssetStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocated_to_candidate_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub history: Vec<AssetLog>,
}

impl Asset {
    pub fn new(name: impl Into<String>, kind: AssetType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            status: AssetStatus::Available,
            replacement_cost: Some(kind.default_replacement_cost()),
            allocated_to_candidate_id: None,
            notes: None,
            history: Vec::new(),
        }
    }

    pub fn log_action(
        &mut self,
        action: AssetAction,
        candidate_name: Option<String>,
        notes: Option<String>,
    ) {
        self.history.push(AssetLog {
            date: time::now(),
            action,
            candidate_name,
            notes,
        });
    }

    /// What the company charges for this item when it goes missing.
    pub fn liability(&self) -> f64 {
        self.replacement_cost
            .unwrap_or_else(|| self.kind.default_replacement_cost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_labels_round_trip_through_json() {
        let json = serde_json::to_string(&AssetType::TradePlate).unwrap();
        assert_eq!(json, "\"Trade Plate\"");
        let kind: AssetType = serde_json::from_str("\"ID Badge\"").unwrap();
        assert_eq!(kind, AssetType::IdBadge);
    }

    #[test]
    fn liability_falls_back_to_the_type_default() {
        let mut asset = Asset::new("TP-299", AssetType::TradePlate);
        assert_eq!(asset.liability(), 180.0);
        asset.replacement_cost = None;
        assert_eq!(asset.liability(), 180.0);
        asset.replacement_cost = Some(200.0);
        assert_eq!(asset.liability(), 200.0);
    }
}
