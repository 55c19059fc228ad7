//! stack-rs: stacked layout offsets for stacked bar/area charts.
//!
//! Several datasets sharing a categorical key axis are aligned on a unified
//! key domain, accumulated independently for positive and negative values,
//! and turned into per-observation baseline offsets plus the stacked value
//! extent used to size the dependent numeric axis.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ExtentRegistry, ScaleExtents, StackedPlot, StackedPlotConfig};
pub use error::{StackError, StackResult};
