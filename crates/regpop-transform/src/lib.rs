//! Registry transformation.
//!
//! - **label**: splits `"<name>(<code>)"` region labels
//! - **normalize**: backward-fill, row exclusion and the wide-to-long melt
//! - **frame**: Polars frames of the long table and delta tables for export

pub mod frame;
pub mod label;
pub mod normalize;

pub use frame::{deltas_to_frame, records_to_frame, write_frame_csv};
pub use label::{RegionLabel, parse_region_label, parse_region_label_with_padding};
pub use normalize::{
    ColumnLabel, backward_fill, exclude_rows, normalize_registry, parse_population,
    split_column_label,
};
