//! Request handlers organized by functionality
//!
//! - `dataset` - Dataset lifecycle and diagnostics
//! - `query` - The three layer bounding-box queries
//! - `buffer` - Buffer analysis over a supplied feature

pub mod buffer;
pub mod dataset;
pub mod query;

pub use buffer::handle_buffer_feature;
pub use dataset::{handle_close, handle_get_memory, handle_load_dataset, handle_status};
pub use query::{handle_query_buildings, handle_query_parcels, handle_query_zoning};
