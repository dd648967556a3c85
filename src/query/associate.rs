//! Spatial association of buildings to zoning districts
//!
//! A building belongs to the district whose polygon contains the
//! building's centroid. Containment is tested against the district
//! R-tree (point query, then precise predicate), so the cost per
//! building is logarithmic in the district count rather than a scan.
//!
//! Source polygons overlap in places; when the centroid lands in more
//! than one district, the district with the lowest identifier wins. That
//! tie-break is arbitrary but stable, which is the property that
//! matters: the same input always resolves to the same district.

use crate::model::{District, LayerKind};
use crate::store::Dataset;
use geo::{Centroid, Geometry, Intersects};

/// Resolve the zoning district containing a building's centroid.
///
/// Returns `None` when no district contains the centroid (the building
/// is treated as unzoned downstream) or when the geometry has no
/// centroid at all. A centroid on a district boundary counts as inside,
/// matching the reference system's intersects test.
pub fn resolve<'a>(
    building_geometry: &Geometry<f64>,
    dataset: &'a Dataset,
) -> Option<&'a District> {
    let centroid = building_geometry.centroid()?;

    let mut resolved: Option<&District> = None;
    for entry in dataset
        .index(LayerKind::Zoning)
        .locate_all_at_point(&[centroid.x(), centroid.y()])
    {
        let district = &dataset.districts()[entry.slot];
        if !district.geometry.intersects(&centroid) {
            continue;
        }
        if resolved.map_or(true, |current| district.gid < current.gid) {
            resolved = Some(district);
        }
    }
    resolved
}
