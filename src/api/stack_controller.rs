use tracing::{debug, trace, warn};

use crate::core::{KeyValueExtractor, StackLayout, stack_datasets};
use crate::error::StackResult;

use super::StackedPlot;

impl<T> StackedPlot<T> {
    /// Dataset-changed notification: restacks the whole group.
    ///
    /// Returns `Ok(false)` without stacking while either axis accessor is
    /// missing. On an accessor failure the previous layout is dropped and the
    /// error is returned, so stale offsets are never observable.
    pub fn on_dataset_update(&mut self) -> StackResult<bool> {
        let (Some(x), Some(y)) = (self.x_accessor.as_deref(), self.y_accessor.as_deref()) else {
            trace!(
                owner_id = %self.config.owner_id,
                "skipping stack: axis accessors not configured"
            );
            self.layout = None;
            return Ok(false);
        };

        let extractor = KeyValueExtractor::new(self.config.orientation, x, y);
        let group: Vec<(&str, &[T])> = self
            .datasets
            .iter()
            .map(|dataset| (dataset.key.as_str(), dataset.observations.as_slice()))
            .collect();

        match stack_datasets(&extractor, &group, self.config.missing_value) {
            Ok(layout) => {
                debug!(
                    owner_id = %self.config.owner_id,
                    datasets = group.len(),
                    keys = layout.domain.len(),
                    "restacked plot"
                );
                self.layout = Some(layout);
                Ok(true)
            }
            Err(err) => {
                warn!(
                    owner_id = %self.config.owner_id,
                    error = %err,
                    "stack recompute failed; clearing layout"
                );
                self.layout = None;
                Err(err)
            }
        }
    }

    /// Forces a recompute and returns the fresh layout, if any.
    pub fn restack(&mut self) -> StackResult<Option<&StackLayout>> {
        self.on_dataset_update()?;
        Ok(self.layout.as_ref())
    }
}
