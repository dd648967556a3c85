//! GeoJSON FeatureCollection assembly
//!
//! Packages classified records into the per-layer response contracts.
//! Every response is a well-formed FeatureCollection: populated, empty,
//! or empty-with-error. Consumers always have a renderable default.

use super::compliance::ComplianceStatus;
use crate::geom::repair;
use geo::Geometry;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::json;

/// A classified building ready for emission, geometry already in WGS84
#[derive(Clone, Debug)]
pub struct BuildingRecord {
    pub gid: i64,
    pub pin: String,
    pub use_label: Option<String>,
    /// District code, or the Unzoned sentinel
    pub zoning: String,
    pub status: ComplianceStatus,
    pub geometry: Geometry<f64>,
}

/// A zoning district ready for emission
#[derive(Clone, Debug)]
pub struct DistrictRecord {
    pub gid: i64,
    pub code: String,
    pub category: String,
    pub geometry: Geometry<f64>,
}

/// A parcel ready for emission
#[derive(Clone, Debug)]
pub struct ParcelRecord {
    pub gid: i64,
    pub name: String,
    pub city: String,
    pub geometry: Geometry<f64>,
}

fn feature(gid: i64, geometry: &Geometry<f64>, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(repair::to_geojson(geometry)),
        id: Some(Id::Number(gid.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// A well-formed empty collection, the uniform "nothing to show" result
pub fn empty_collection() -> FeatureCollection {
    collection(Vec::new())
}

/// The uniform failure shape: still a valid empty FeatureCollection,
/// with the error message attached as a foreign member so a naive
/// consumer renders an empty layer instead of crashing.
pub fn error_collection(message: &str) -> FeatureCollection {
    let mut members = JsonObject::new();
    members.insert("error".to_string(), json!(message));
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: Some(members),
    }
}

/// Assemble the buildings layer: pin, declared use, zoning code or
/// sentinel, and compliance status
pub fn buildings_collection(records: Vec<BuildingRecord>) -> FeatureCollection {
    let features = records
        .into_iter()
        .map(|record| {
            let mut properties = JsonObject::new();
            properties.insert("pin".to_string(), json!(record.pin));
            properties.insert("use".to_string(), json!(record.use_label));
            properties.insert("zoning".to_string(), json!(record.zoning));
            properties.insert("status".to_string(), json!(record.status.as_str()));
            feature(record.gid, &record.geometry, properties)
        })
        .collect();
    collection(features)
}

/// Assemble the zoning layer: code and category
pub fn districts_collection(records: Vec<DistrictRecord>) -> FeatureCollection {
    let features = records
        .into_iter()
        .map(|record| {
            let mut properties = JsonObject::new();
            properties.insert("code".to_string(), json!(record.code));
            properties.insert("category".to_string(), json!(record.category));
            feature(record.gid, &record.geometry, properties)
        })
        .collect();
    collection(features)
}

/// Assemble the parcels layer: name and city
pub fn parcels_collection(records: Vec<ParcelRecord>) -> FeatureCollection {
    let features = records
        .into_iter()
        .map(|record| {
            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), json!(record.name));
            properties.insert("city".to_string(), json!(record.city));
            feature(record.gid, &record.geometry, properties)
        })
        .collect();
    collection(features)
}
