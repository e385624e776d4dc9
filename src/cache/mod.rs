//! Cache module for the downloaded dataset
//!
//! The dataset is kept as a single JSON snapshot next to a stamp recording
//! the date and hour it was fetched. `gate` decides when the snapshot is too
//! old; `store` performs the download, the write, and the load.

mod gate;
mod store;

pub use gate::{is_stale, CacheStamp};
pub use store::DataStore;
