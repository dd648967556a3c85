//! Buffer analysis around a selected feature
//!
//! Produces the Minkowski-style buffer of a geometry at a real-world
//! radius in meters. Input and output are WGS84; the buffer itself is
//! computed in the projected storage plane where distances are linear,
//! then reprojected back. Pure computation, no store involvement.

use crate::geom::crs;
use geo::algorithm::Buffer;
use geo::Geometry;

/// Reference buffer radius used by the map client, in meters
pub const DEFAULT_RADIUS_M: f64 = 100.0;

/// Buffer a WGS84 geometry by `radius_m` meters.
///
/// Returns `None` for an empty buffer result (degenerate input or a
/// non-positive radius collapsing the geometry away). Each call is
/// independent; nothing is cached between invocations.
pub fn buffer_geometry(geometry: &Geometry<f64>, radius_m: f64) -> Option<Geometry<f64>> {
    let projected = crs::geometry_to_storage(geometry);
    let mut buffered = projected.buffer(crs::meters_to_us_ft(radius_m));

    let result = match buffered.0.len() {
        0 => return None,
        1 => Geometry::Polygon(buffered.0.pop()?),
        _ => Geometry::MultiPolygon(buffered),
    };
    Some(crs::geometry_to_wgs84(&result))
}
