//! Plot-level glue around the stacking core: dataset lifecycle, axis
//! accessors, extent registration and snapshots.

mod dataset_controller;
mod extent_registry;
mod json_contract;
mod plot_config;
mod stack_controller;
mod stacked_plot;

pub use extent_registry::{ExtentRegistry, STACK_EXTENT_FIELD, ScaleExtents};
pub use json_contract::{
    DatasetStackSnapshot, PLOT_CONFIG_JSON_SCHEMA_V1, PlotConfigJsonContractV1,
    STACK_SNAPSHOT_JSON_SCHEMA_V1, StackSnapshot, StackSnapshotJsonContractV1,
};
pub use plot_config::StackedPlotConfig;
pub use stacked_plot::{RemovedDataset, StackDataset, StackedPlot};
