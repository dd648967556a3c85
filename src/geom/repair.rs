//! Geometry normalization for stored features
//!
//! Raw footprints and district polygons arrive from the store with the
//! usual municipal-data defects: self-intersecting rings, occasional Z
//! values, NULL or unparseable geometry columns. Everything downstream
//! assumes topologically valid 2D polygons, so all cleanup happens here.
//! A feature whose geometry cannot be parsed or repaired is dropped from
//! the result; the query itself never fails over a single bad row.

use geo::algorithm::bool_ops::BooleanOps;
use geo::algorithm::Validation;
use geo::{Geometry, MultiPolygon};

/// Parse a stored GeoJSON geometry string into a geo geometry.
///
/// Returns `None` for unparseable text or non-areal geometry; the caller
/// treats that as "feature has no geometry". Any third (elevation)
/// coordinate in the source positions is discarded by the conversion, so
/// the in-memory representation is always 2D.
pub fn parse_stored_geometry(text: &str) -> Option<Geometry<f64>> {
    let parsed = text.parse::<geojson::GeoJson>().ok()?;
    let geojson::GeoJson::Geometry(raw) = parsed else {
        return None;
    };
    let geometry = Geometry::<f64>::try_from(raw.value).ok()?;
    match geometry {
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Some(geometry),
        _ => None,
    }
}

/// Repair an invalid areal geometry, or pass a valid one through.
///
/// Self-intersecting rings are resolved by unioning the geometry with
/// itself, which splits the ring at its crossing points the same way the
/// reference system's ST_MakeValid did. Returns `None` when the geometry
/// is still invalid after repair (the feature is dropped).
pub fn normalize(geometry: Geometry<f64>) -> Option<Geometry<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => {
            if polygon.is_valid() {
                return Some(Geometry::Polygon(polygon));
            }
            repaired_to_geometry(polygon.union(&polygon))
        }
        Geometry::MultiPolygon(multi) => {
            if multi.is_valid() {
                return Some(Geometry::MultiPolygon(multi));
            }
            repaired_to_geometry(multi.union(&multi))
        }
        // Layers only carry areal geometry; anything else was filtered at parse
        _ => None,
    }
}

/// Collapse a repaired MultiPolygon to the simplest valid geometry
fn repaired_to_geometry(mut repaired: MultiPolygon<f64>) -> Option<Geometry<f64>> {
    if !repaired.is_valid() {
        return None;
    }
    match repaired.0.len() {
        0 => None,
        1 => repaired.0.pop().map(Geometry::Polygon),
        _ => Some(Geometry::MultiPolygon(repaired)),
    }
}

/// Convert a geo geometry to a GeoJSON geometry object.
///
/// geo types are inherently 2D, so emitted positions are always
/// two-element arrays regardless of what the source carried.
pub fn to_geojson(geometry: &Geometry<f64>) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::from(geometry))
}
