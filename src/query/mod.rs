//! Bounding-box query engine
//!
//! One request flows: envelope validation -> bounding-box filter ->
//! (buildings only) district association + compliance classification ->
//! geometry repair and reprojection -> FeatureCollection assembly.
//! Everything is computed fresh per request from the read-only dataset;
//! nothing is cached between requests.
//!
//! # Submodules
//! - `envelope` - Query envelope validation and reprojection
//! - `bbox` - Bounding-box filter with per-layer caps
//! - `associate` - Centroid-in-district association resolver
//! - `compliance` - Declared-use vs allowed-use classification
//! - `assemble` - GeoJSON FeatureCollection assembly

pub mod assemble;
pub mod associate;
pub mod bbox;
pub mod compliance;
pub mod envelope;

pub use compliance::{classify, ComplianceStatus, UNZONED};
pub use envelope::QueryEnvelope;

use crate::geom::{crs, repair};
use crate::model::LayerKind;
use crate::store::Dataset;
use assemble::{BuildingRecord, DistrictRecord, ParcelRecord};
use geojson::FeatureCollection;
use rayon::prelude::*;

/// Answer a bounding-box query for one layer.
///
/// Features whose geometry cannot be repaired are dropped individually;
/// the query itself always succeeds with a well-formed collection.
pub fn query_layer(
    dataset: &Dataset,
    layer: LayerKind,
    envelope: &QueryEnvelope,
) -> FeatureCollection {
    match layer {
        LayerKind::Buildings => query_buildings(dataset, envelope),
        LayerKind::Zoning => query_zoning(dataset, envelope),
        LayerKind::Parcels => query_parcels(dataset, envelope),
    }
}

fn query_buildings(dataset: &Dataset, envelope: &QueryEnvelope) -> FeatureCollection {
    let slots = bbox::filter(
        dataset.index(LayerKind::Buildings),
        envelope,
        LayerKind::Buildings.cap(),
        |slot| &dataset.buildings()[slot].geometry,
    );

    // Association and classification are independent per building
    let records: Vec<BuildingRecord> = slots
        .into_par_iter()
        .filter_map(|slot| {
            let building = &dataset.buildings()[slot];
            let normalized = repair::normalize(building.geometry.clone())?;

            let district = associate::resolve(&normalized, dataset);
            let (zoning, allowed_use) = match district {
                Some(district) => (district.code.clone(), dataset.allowed_use(&district.code)),
                None => (UNZONED.to_string(), None),
            };
            let status = classify(building.use_label.as_deref(), allowed_use);

            Some(BuildingRecord {
                gid: building.gid,
                pin: building.pin.clone(),
                use_label: building.use_label.clone(),
                zoning,
                status,
                geometry: crs::geometry_to_wgs84(&normalized),
            })
        })
        .collect();

    assemble::buildings_collection(records)
}

fn query_zoning(dataset: &Dataset, envelope: &QueryEnvelope) -> FeatureCollection {
    let slots = bbox::filter(
        dataset.index(LayerKind::Zoning),
        envelope,
        LayerKind::Zoning.cap(),
        |slot| &dataset.districts()[slot].geometry,
    );

    let records: Vec<DistrictRecord> = slots
        .into_par_iter()
        .filter_map(|slot| {
            let district = &dataset.districts()[slot];
            let normalized = repair::normalize(district.geometry.clone())?;
            Some(DistrictRecord {
                gid: district.gid,
                code: district.code.clone(),
                category: district.category.clone(),
                geometry: crs::geometry_to_wgs84(&normalized),
            })
        })
        .collect();

    assemble::districts_collection(records)
}

fn query_parcels(dataset: &Dataset, envelope: &QueryEnvelope) -> FeatureCollection {
    let slots = bbox::filter(
        dataset.index(LayerKind::Parcels),
        envelope,
        LayerKind::Parcels.cap(),
        |slot| &dataset.parcels()[slot].geometry,
    );

    let records: Vec<ParcelRecord> = slots
        .into_par_iter()
        .filter_map(|slot| {
            let parcel = &dataset.parcels()[slot];
            let normalized = repair::normalize(parcel.geometry.clone())?;
            Some(ParcelRecord {
                gid: parcel.gid,
                name: parcel.name.clone(),
                city: parcel.city.clone(),
                geometry: crs::geometry_to_wgs84(&normalized),
            })
        })
        .collect();

    assemble::parcels_collection(records)
}
