//! Geometry engine for the zoning query service
//!
//! # Submodules
//! - `crs` - Reprojection between EPSG:2926 storage feet and WGS84
//! - `repair` - Geometry parsing, validity repair, 2D enforcement
//! - `spatial` - R-tree indexing over layer features
//! - `buffer` - Radius buffer analysis around a selected feature

pub mod buffer;
pub mod crs;
pub mod repair;
pub mod spatial;

pub use buffer::{buffer_geometry, DEFAULT_RADIUS_M};
pub use spatial::{build_index, IndexedFeature};
