use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::StackedExtent;

use super::StackedPlot;

/// Field name under which a stacked plot registers its extent.
pub const STACK_EXTENT_FIELD: &str = "stack_extent";

/// Extent store of the dependent numeric scale.
///
/// Both operations are idempotent: updating replaces any prior extent for the
/// same `(owner_id, field)` and removing an absent entry is a no-op.
pub trait ExtentRegistry {
    fn update_extent(&mut self, owner_id: &str, field: &str, extent: StackedExtent);
    fn remove_extent(&mut self, owner_id: &str, field: &str);
}

/// In-memory [`ExtentRegistry`] keyed by `(owner_id, field)`.
///
/// `IndexMap` is used to preserve registration order for stable inspection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleExtents {
    extents: IndexMap<(String, String), StackedExtent>,
}

impl ScaleExtents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn extent(&self, owner_id: &str, field: &str) -> Option<StackedExtent> {
        self.extents
            .get(&(owner_id.to_owned(), field.to_owned()))
            .copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Registered entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, StackedExtent)> {
        self.extents
            .iter()
            .map(|((owner, field), extent)| (owner.as_str(), field.as_str(), *extent))
    }

    /// Union of every registered extent, `None` when nothing is registered.
    #[must_use]
    pub fn combined_extent(&self) -> Option<StackedExtent> {
        self.extents.values().copied().reduce(|acc, extent| StackedExtent {
            min: acc.min.min(extent.min),
            max: acc.max.max(extent.max),
        })
    }
}

impl ExtentRegistry for ScaleExtents {
    fn update_extent(&mut self, owner_id: &str, field: &str, extent: StackedExtent) {
        self.extents
            .insert((owner_id.to_owned(), field.to_owned()), extent);
    }

    fn remove_extent(&mut self, owner_id: &str, field: &str) {
        self.extents
            .shift_remove(&(owner_id.to_owned(), field.to_owned()));
    }
}

impl<T> StackedPlot<T> {
    /// Publishes the stacked extent to the dependent scale.
    ///
    /// Without a scale this is a no-op. An anchored plot with a layout
    /// registers its extent; otherwise any earlier registration is removed.
    pub fn update_scale_extents(&self, registry: Option<&mut dyn ExtentRegistry>) {
        let Some(registry) = registry else {
            trace!(
                owner_id = %self.config.owner_id,
                "no dependent scale; skipping extent registration"
            );
            return;
        };

        match self.stacked_extent() {
            Some(extent) if self.config.anchored => {
                debug!(
                    owner_id = %self.config.owner_id,
                    min = extent.min,
                    max = extent.max,
                    "register stacked extent"
                );
                registry.update_extent(&self.config.owner_id, STACK_EXTENT_FIELD, extent);
            }
            _ => {
                debug!(
                    owner_id = %self.config.owner_id,
                    anchored = self.config.anchored,
                    "remove stacked extent"
                );
                registry.remove_extent(&self.config.owner_id, STACK_EXTENT_FIELD);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_replaces_and_remove_is_idempotent() {
        let mut registry = ScaleExtents::new();
        registry.update_extent("p", STACK_EXTENT_FIELD, StackedExtent { min: -1.0, max: 2.0 });
        registry.update_extent("p", STACK_EXTENT_FIELD, StackedExtent { min: 0.0, max: 5.0 });
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.extent("p", STACK_EXTENT_FIELD),
            Some(StackedExtent { min: 0.0, max: 5.0 })
        );

        registry.remove_extent("p", STACK_EXTENT_FIELD);
        registry.remove_extent("p", STACK_EXTENT_FIELD);
        registry.remove_extent("never", STACK_EXTENT_FIELD);
        assert!(registry.is_empty());
    }

    #[test]
    fn combined_extent_unions_owners() {
        let mut registry = ScaleExtents::new();
        assert_eq!(registry.combined_extent(), None);
        registry.update_extent("a", STACK_EXTENT_FIELD, StackedExtent { min: -3.0, max: 1.0 });
        registry.update_extent("b", STACK_EXTENT_FIELD, StackedExtent { min: 0.0, max: 8.0 });
        assert_eq!(
            registry.combined_extent(),
            Some(StackedExtent { min: -3.0, max: 8.0 })
        );
    }
}
