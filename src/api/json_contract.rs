use serde::{Deserialize, Serialize};

use crate::core::{StackOrientation, StackedExtent};
use crate::error::{StackError, StackResult};

use super::{StackedPlot, StackedPlotConfig};

pub const STACK_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;
pub const PLOT_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Offsets of one dataset as captured in a [`StackSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStackSnapshot {
    pub key: String,
    pub offsets: Vec<f64>,
    #[serde(default)]
    pub stacked_range: Option<(f64, f64)>,
}

/// Serializable view of a plot's latest stack layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSnapshot {
    pub owner_id: String,
    pub orientation: StackOrientation,
    pub key_domain: Vec<String>,
    pub datasets: Vec<DatasetStackSnapshot>,
    pub extent: StackedExtent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: StackSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: StackedPlotConfig,
}

impl<T> StackedPlot<T> {
    /// Captures the latest layout, `None` before the first successful stack.
    #[must_use]
    pub fn snapshot(&self) -> Option<StackSnapshot> {
        let layout = self.layout.as_ref()?;
        let datasets = self
            .datasets
            .iter()
            .enumerate()
            .map(|(index, dataset)| DatasetStackSnapshot {
                key: dataset.key.clone(),
                offsets: layout
                    .offsets
                    .dataset(index)
                    .map(<[f64]>::to_vec)
                    .unwrap_or_default(),
                stacked_range: layout.dataset_ranges.get(index).copied().flatten(),
            })
            .collect();

        Some(StackSnapshot {
            owner_id: self.config.owner_id.clone(),
            orientation: self.config.orientation,
            key_domain: layout.domain.canonical_keys().map(str::to_owned).collect(),
            datasets,
            extent: layout.extent,
        })
    }
}

impl StackSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> StackResult<String> {
        let payload = StackSnapshotJsonContractV1 {
            schema_version: STACK_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            StackError::InvalidData(format!("failed to serialize stack snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> StackResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<StackSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: StackSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            StackError::InvalidData(format!("failed to parse stack snapshot json payload: {e}"))
        })?;
        if payload.schema_version != STACK_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(StackError::InvalidData(format!(
                "unsupported stack snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl StackedPlotConfig {
    pub fn to_json_contract_v1_pretty(&self) -> StackResult<String> {
        let payload = PlotConfigJsonContractV1 {
            schema_version: PLOT_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            StackError::InvalidConfig(format!("failed to serialize plot config contract v1: {e}"))
        })
    }

    /// Parses either a bare config or a versioned contract, then validates it.
    pub fn from_json_compat_str(input: &str) -> StackResult<Self> {
        let config = match serde_json::from_str::<StackedPlotConfig>(input) {
            Ok(config) => config,
            Err(_) => {
                let payload: PlotConfigJsonContractV1 =
                    serde_json::from_str(input).map_err(|e| {
                        StackError::InvalidConfig(format!(
                            "failed to parse plot config json payload: {e}"
                        ))
                    })?;
                if payload.schema_version != PLOT_CONFIG_JSON_SCHEMA_V1 {
                    return Err(StackError::InvalidConfig(format!(
                        "unsupported plot config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
        };
        config.validate()?;
        Ok(config)
    }
}
