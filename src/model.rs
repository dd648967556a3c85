//! Source-of-record entity types
//!
//! All persistent entities are read-only inputs owned by the backing
//! store; this crate only reads them. Geometries are kept in the storage
//! CRS (EPSG:2926 feet) and reprojected at the response boundary.

use geo::Geometry;
use serde::{Deserialize, Serialize};

/// A building footprint row
#[derive(Clone, Debug)]
pub struct Building {
    pub gid: i64,
    /// Parcel identification number
    pub pin: String,
    /// Declared land-use label; absent or empty in much of the source data
    pub use_label: Option<String>,
    pub geometry: Geometry<f64>,
}

/// A zoning district polygon
#[derive(Clone, Debug)]
pub struct District {
    pub gid: i64,
    /// Zoning code, the lookup key into the rule table
    pub code: String,
    pub category: String,
    pub geometry: Geometry<f64>,
}

/// An administrative parcel
#[derive(Clone, Debug)]
pub struct Parcel {
    pub gid: i64,
    pub name: String,
    pub city: String,
    pub geometry: Geometry<f64>,
}

/// The three queryable layers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Buildings,
    Zoning,
    Parcels,
}

impl LayerKind {
    /// Per-layer result cap, guaranteeing a bounded response size
    pub fn cap(self) -> usize {
        match self {
            LayerKind::Buildings => 1000,
            LayerKind::Zoning => 100,
            LayerKind::Parcels => 100,
        }
    }
}
