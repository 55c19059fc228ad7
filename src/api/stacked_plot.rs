use tracing::debug;

use crate::core::{
    AxisAccessor, FieldValue, KeyDomain, StackLayout, StackOrientation, StackedExtent,
};
use crate::error::StackResult;

use super::StackedPlotConfig;
use super::plot_config::validate_missing_value;

/// One named dataset of a stack group.
#[derive(Debug, Clone, PartialEq)]
pub struct StackDataset<T> {
    pub(super) key: String,
    pub(super) observations: Vec<T>,
}

impl<T> StackDataset<T> {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn observations(&self) -> &[T] {
        &self.observations
    }
}

/// A dataset taken out of a stack group by [`StackedPlot::remove_dataset`].
#[derive(Debug)]
pub struct RemovedDataset<T> {
    pub key: String,
    pub observations: Vec<T>,
    /// Result of restacking the datasets left in the group.
    pub restacked: StackResult<bool>,
}

/// A stacked bar/area plot: an ordered stack group plus the axis accessors
/// used to read keys and values off its observations.
///
/// Every dataset or accessor change recomputes the whole layout.
/// Offsets are kept in a side table and never written onto observations.
pub struct StackedPlot<T> {
    pub(super) config: StackedPlotConfig,
    pub(super) datasets: Vec<StackDataset<T>>,
    pub(super) x_accessor: Option<Box<AxisAccessor<T>>>,
    pub(super) y_accessor: Option<Box<AxisAccessor<T>>>,
    pub(super) layout: Option<StackLayout>,
}

impl<T> std::fmt::Debug for StackedPlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackedPlot")
            .field("config", &self.config)
            .field(
                "datasets",
                &self.datasets.iter().map(StackDataset::key).collect::<Vec<_>>(),
            )
            .field("has_x_accessor", &self.x_accessor.is_some())
            .field("has_y_accessor", &self.y_accessor.is_some())
            .field("layout", &self.layout)
            .finish()
    }
}

impl<T> StackedPlot<T> {
    pub fn new(config: StackedPlotConfig) -> StackResult<Self> {
        config.validate()?;
        debug!(
            owner_id = %config.owner_id,
            orientation = ?config.orientation,
            anchored = config.anchored,
            "create stacked plot"
        );
        Ok(Self {
            config,
            datasets: Vec::new(),
            x_accessor: None,
            y_accessor: None,
            layout: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &StackedPlotConfig {
        &self.config
    }

    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.config.owner_id
    }

    #[must_use]
    pub fn orientation(&self) -> StackOrientation {
        self.config.orientation
    }

    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.config.anchored
    }

    /// Anchoring only gates extent registration; it never restacks.
    pub fn set_anchored(&mut self, anchored: bool) {
        self.config.anchored = anchored;
    }

    /// Switches which axis carries the key and restacks.
    pub fn set_orientation(&mut self, orientation: StackOrientation) -> StackResult<bool> {
        self.config.orientation = orientation;
        self.on_dataset_update()
    }

    /// Replaces the missing-value policy and restacks.
    pub fn set_missing_value(&mut self, missing_value: f64) -> StackResult<bool> {
        validate_missing_value(missing_value)?;
        self.config.missing_value = missing_value;
        self.on_dataset_update()
    }

    /// Installs the `x` accessor and restacks.
    pub fn set_x_accessor<F>(&mut self, accessor: F) -> StackResult<bool>
    where
        F: Fn(&T) -> StackResult<FieldValue> + 'static,
    {
        self.x_accessor = Some(Box::new(accessor));
        self.on_dataset_update()
    }

    /// Installs the `y` accessor and restacks.
    pub fn set_y_accessor<F>(&mut self, accessor: F) -> StackResult<bool>
    where
        F: Fn(&T) -> StackResult<FieldValue> + 'static,
    {
        self.y_accessor = Some(Box::new(accessor));
        self.on_dataset_update()
    }

    #[must_use]
    pub fn has_accessors(&self) -> bool {
        self.x_accessor.is_some() && self.y_accessor.is_some()
    }

    /// Latest layout, `None` before the first successful stack.
    #[must_use]
    pub fn layout(&self) -> Option<&StackLayout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn stacked_extent(&self) -> Option<StackedExtent> {
        self.layout.as_ref().map(|layout| layout.extent)
    }

    #[must_use]
    pub fn key_domain(&self) -> Option<&KeyDomain> {
        self.layout.as_ref().map(|layout| &layout.domain)
    }

    /// Stack baseline of one observation.
    #[must_use]
    pub fn stack_offset(&self, dataset_key: &str, observation: usize) -> Option<f64> {
        let index = self.dataset_index(dataset_key)?;
        self.layout.as_ref()?.offset(index, observation)
    }

    /// Stack baselines of every observation of a dataset, in dataset order.
    #[must_use]
    pub fn stack_offsets(&self, dataset_key: &str) -> Option<&[f64]> {
        let index = self.dataset_index(dataset_key)?;
        self.layout.as_ref()?.offsets.dataset(index)
    }
}
