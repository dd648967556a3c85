//! zonemap - bounding-box queries over a municipal spatial dataset
//!
//! Building footprints, zoning districts, and parcels are stored in a
//! projected state-plane CRS; queries arrive as WGS84 bounding boxes.
//! The engine reprojects the window, selects intersecting features,
//! associates each building with the zoning district containing its
//! centroid, classifies the declared use against the district's rule,
//! and emits capped GeoJSON FeatureCollections. A separate buffer
//! analysis produces a radius polygon around a selected feature.
//!
//! # Modules
//! - `geom` - Reprojection, repair, spatial indexing, buffering
//! - `model` - Source-of-record entity types
//! - `store` - Read-only dataset (in-memory snapshot, SQLite loader)
//! - `query` - The bounding-box query and classification engine
//! - `service` - JSON-RPC request layer over the engine

pub mod geom;
pub mod model;
pub mod query;
pub mod service;
pub mod store;
