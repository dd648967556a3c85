//! Coordinate reprojection between the storage CRS and WGS84
//!
//! Stored geometries use EPSG:2926 (NAD83(HARN) / Washington North, US
//! survey feet), a Lambert Conformal Conic 2SP projection on the GRS80
//! ellipsoid. Request and response payloads use WGS84 longitude/latitude.
//! The projection math follows the EPSG 9802 formulas directly, which
//! keeps the crate free of a native PROJ linkage; the NAD83(HARN)/WGS84
//! datum shift is sub-meter at city scale and is treated as identity.

use geo::{Coord, Geometry, MapCoords, Rect};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::sync::OnceLock;

/// GRS80 semi-major axis in meters
const GRS80_A: f64 = 6_378_137.0;
/// GRS80 first eccentricity squared
const GRS80_E2: f64 = 0.006_694_380_022_903_416;

/// EPSG:2926 projection parameters (degrees / meters)
const LAT_1_DEG: f64 = 48.733_333_333_333_334; // upper standard parallel
const LAT_2_DEG: f64 = 47.5; // lower standard parallel
const LAT_0_DEG: f64 = 47.0; // latitude of false origin
const LON_0_DEG: f64 = -120.833_333_333_333_33; // central meridian
const FALSE_EASTING_M: f64 = 500_000.000_101_600_1;
const FALSE_NORTHING_M: f64 = 0.0;

/// One US survey foot in meters (1200/3937)
pub const M_PER_US_FT: f64 = 0.304_800_609_601_219_2;

/// Convert a real-world distance in meters to storage-CRS feet
pub fn meters_to_us_ft(meters: f64) -> f64 {
    meters / M_PER_US_FT
}

/// Derived LCC constants, computed once
struct LccParams {
    e: f64,
    n: f64,
    big_f: f64,
    r0: f64,
}

/// Isometric latitude factor t(phi), EPSG 9802
fn tsfn(lat: f64, e: f64) -> f64 {
    let es = e * lat.sin();
    (FRAC_PI_4 - lat / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}

/// Parallel radius factor m(phi), EPSG 9802
fn msfn(lat: f64) -> f64 {
    lat.cos() / (1.0 - GRS80_E2 * lat.sin() * lat.sin()).sqrt()
}

fn params() -> &'static LccParams {
    static PARAMS: OnceLock<LccParams> = OnceLock::new();
    PARAMS.get_or_init(|| {
        let e = GRS80_E2.sqrt();
        let lat1 = LAT_1_DEG.to_radians();
        let lat2 = LAT_2_DEG.to_radians();
        let lat0 = LAT_0_DEG.to_radians();

        let m1 = msfn(lat1);
        let m2 = msfn(lat2);
        let t0 = tsfn(lat0, e);
        let t1 = tsfn(lat1, e);
        let t2 = tsfn(lat2, e);

        let n = (m1.ln() - m2.ln()) / (t1.ln() - t2.ln());
        let big_f = m1 / (n * t1.powf(n));
        let r0 = GRS80_A * big_f * t0.powf(n);

        LccParams { e, n, big_f, r0 }
    })
}

/// Project a WGS84 lon/lat coordinate (degrees) into storage feet
pub fn wgs84_to_storage(c: Coord<f64>) -> Coord<f64> {
    let p = params();
    let lat = c.y.to_radians();
    let lon = c.x.to_radians();

    let t = tsfn(lat, p.e);
    let r = GRS80_A * p.big_f * t.powf(p.n);
    let theta = p.n * (lon - LON_0_DEG.to_radians());

    let easting_m = FALSE_EASTING_M + r * theta.sin();
    let northing_m = FALSE_NORTHING_M + p.r0 - r * theta.cos();
    Coord {
        x: easting_m / M_PER_US_FT,
        y: northing_m / M_PER_US_FT,
    }
}

/// Unproject a storage-feet coordinate back to WGS84 lon/lat (degrees)
pub fn storage_to_wgs84(c: Coord<f64>) -> Coord<f64> {
    let p = params();
    let de = c.x * M_PER_US_FT - FALSE_EASTING_M;
    let dn = p.r0 - (c.y * M_PER_US_FT - FALSE_NORTHING_M);

    // n > 0 for a northern-hemisphere zone, so no sign flip on r
    let r = (de * de + dn * dn).sqrt();
    let t = (r / (GRS80_A * p.big_f)).powf(1.0 / p.n);
    let theta = de.atan2(dn);

    let lon = theta / p.n + LON_0_DEG.to_radians();

    // Fixed-point iteration for the conformal latitude inverse
    let mut lat = FRAC_PI_2 - 2.0 * t.atan();
    for _ in 0..12 {
        let es = p.e * lat.sin();
        let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - es) / (1.0 + es)).powf(p.e / 2.0)).atan();
        if (next - lat).abs() < 1e-12 {
            lat = next;
            break;
        }
        lat = next;
    }

    Coord {
        x: lon.to_degrees(),
        y: lat.to_degrees(),
    }
}

/// Reproject a whole geometry from storage feet to WGS84
pub fn geometry_to_wgs84(geometry: &Geometry<f64>) -> Geometry<f64> {
    geometry.map_coords(storage_to_wgs84)
}

/// Reproject a whole geometry from WGS84 to storage feet
pub fn geometry_to_storage(geometry: &Geometry<f64>) -> Geometry<f64> {
    geometry.map_coords(wgs84_to_storage)
}

/// Project a WGS84 envelope into an axis-aligned storage-CRS rectangle.
///
/// The projected image of a lon/lat rectangle is not axis-aligned, so all
/// four corners are projected and re-boxed. Over a map window the LCC
/// curvature is far below feature size, matching how the reference system
/// transformed its query envelope.
pub fn rect_to_storage(rect: &Rect<f64>) -> Rect<f64> {
    let corners = [
        wgs84_to_storage(Coord { x: rect.min().x, y: rect.min().y }),
        wgs84_to_storage(Coord { x: rect.min().x, y: rect.max().y }),
        wgs84_to_storage(Coord { x: rect.max().x, y: rect.min().y }),
        wgs84_to_storage(Coord { x: rect.max().x, y: rect.max().y }),
    ];
    let min_x = corners.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
    let min_y = corners.iter().map(|c| c.y).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|c| c.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = corners.iter().map(|c| c.y).fold(f64::NEG_INFINITY, f64::max);
    Rect::new(Coord { x: min_x, y: min_y }, Coord { x: max_x, y: max_y })
}
