//! Takeout Sync Common Library
//!
//! Export record types and timestamp rules shared by the index builder and
//! the reconcilers.

pub mod error;
pub mod timestamp;
pub mod types;

pub use error::{Error, Result};
pub use timestamp::{
    day_bounds, format_catalog_time, parse_catalog_time, parse_epoch, same_utc_day, utc_day,
    DateWindow,
};
pub use types::{AlbumGrouping, Sidecar, SidecarTime, TakeoutRecord};
