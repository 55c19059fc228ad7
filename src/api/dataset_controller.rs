use tracing::debug;

use crate::error::{StackError, StackResult};

use super::{RemovedDataset, StackDataset, StackedPlot};

// Every mutator commits its change to the stack group before restacking. When
// the restack fails the change is kept, the layout is cleared and the error is
// returned; observations are never dropped.
impl<T> StackedPlot<T> {
    /// Appends a dataset on top of the stack group and restacks.
    ///
    /// See [`StackedPlot::insert_dataset`] for the failure contract.
    pub fn add_dataset(
        &mut self,
        key: impl Into<String>,
        observations: Vec<T>,
    ) -> StackResult<bool> {
        let position = self.datasets.len();
        self.insert_dataset(position, key, observations)
    }

    /// Inserts a dataset at `position` in stacking order and restacks.
    ///
    /// Position `0` makes it the baseline.
    ///
    /// Key and position errors leave the group untouched. If the restack fails
    /// the dataset stays in the group and the layout is cleared: repair it with
    /// [`StackedPlot::set_dataset_data`] or take it back with
    /// [`StackedPlot::remove_dataset`].
    pub fn insert_dataset(
        &mut self,
        position: usize,
        key: impl Into<String>,
        observations: Vec<T>,
    ) -> StackResult<bool> {
        let key = key.into();
        if key.is_empty() {
            return Err(StackError::InvalidData(
                "dataset key must not be empty".to_owned(),
            ));
        }
        if self.dataset_index(&key).is_some() {
            return Err(StackError::DuplicateDataset(key));
        }
        if position > self.datasets.len() {
            return Err(StackError::InvalidData(format!(
                "dataset position {position} is out of range (len {})",
                self.datasets.len()
            )));
        }

        debug!(
            dataset = %key,
            position,
            observations = observations.len(),
            "insert dataset"
        );
        self.datasets
            .insert(position, StackDataset { key, observations });
        self.on_dataset_update()
    }

    /// Removes a dataset from the stack group and restacks the rest.
    ///
    /// Only an unknown key is an error. The removed observations are always
    /// handed back; the outcome of restacking the remaining group is reported
    /// in [`RemovedDataset::restacked`].
    pub fn remove_dataset(&mut self, key: &str) -> StackResult<RemovedDataset<T>> {
        let index = self
            .dataset_index(key)
            .ok_or_else(|| StackError::UnknownDataset(key.to_owned()))?;
        let StackDataset { key, observations } = self.datasets.remove(index);
        debug!(dataset = %key, "remove dataset");
        let restacked = self.on_dataset_update();
        Ok(RemovedDataset {
            key,
            observations,
            restacked,
        })
    }

    /// Replaces a dataset's observations and restacks.
    ///
    /// The new observations are kept even if the restack fails.
    pub fn set_dataset_data(&mut self, key: &str, observations: Vec<T>) -> StackResult<bool> {
        let index = self
            .dataset_index(key)
            .ok_or_else(|| StackError::UnknownDataset(key.to_owned()))?;
        debug!(
            dataset = %key,
            observations = observations.len(),
            "set dataset data"
        );
        self.datasets[index].observations = observations;
        self.on_dataset_update()
    }

    /// Moves a dataset to a new stacking position and restacks.
    ///
    /// The new order is kept even if the restack fails.
    pub fn move_dataset(&mut self, key: &str, position: usize) -> StackResult<bool> {
        let index = self
            .dataset_index(key)
            .ok_or_else(|| StackError::UnknownDataset(key.to_owned()))?;
        if position >= self.datasets.len() {
            return Err(StackError::InvalidData(format!(
                "dataset position {position} is out of range (len {})",
                self.datasets.len()
            )));
        }
        let dataset = self.datasets.remove(index);
        self.datasets.insert(position, dataset);
        self.on_dataset_update()
    }

    /// Dataset keys in stacking order.
    pub fn dataset_keys(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(StackDataset::key)
    }

    #[must_use]
    pub fn dataset(&self, key: &str) -> Option<&[T]> {
        self.datasets
            .iter()
            .find(|dataset| dataset.key == key)
            .map(StackDataset::observations)
    }

    #[must_use]
    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    #[must_use]
    pub fn dataset_index(&self, key: &str) -> Option<usize> {
        self.datasets.iter().position(|dataset| dataset.key == key)
    }
}
