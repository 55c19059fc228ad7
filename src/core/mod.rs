pub mod accumulate;
pub mod domain;
pub mod extent;
pub mod extract;
pub mod field;
pub mod layout;
pub mod offsets;
pub mod primitives;
pub mod sign;

pub use accumulate::{StackedRecord, accumulate_branch};
pub use domain::{AlignedDataset, KeyDomain};
pub use extent::{StackedExtent, dataset_stacked_range, track_extent};
pub use extract::{AlignedRecord, AxisAccessor, KeyValueExtractor, StackOrientation};
pub use field::{FieldValue, StackKey};
pub use layout::{StackLayout, compute_stack_layout, stack_datasets};
pub use offsets::{StackOffsets, merge_offsets};
pub use sign::{SignBranches, negative_part, positive_part, split_signs};
