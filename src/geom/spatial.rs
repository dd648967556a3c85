//! Spatial indexing for layer features
//!
//! R-tree entries over feature bounding boxes, enabling fast envelope
//! queries per layer and point queries for the centroid-in-district join.

use geo::{BoundingRect, Geometry};
use rstar::{Envelope, PointDistance, RTree, RTreeObject, AABB};

/// One indexed feature: its slot in the owning layer's vector plus its
/// storage-CRS bounding box. The slot doubles as the stable store order.
#[derive(Clone, Debug)]
pub struct IndexedFeature {
    pub slot: usize,
    pub bounds: AABB<[f64; 2]>,
}

impl IndexedFeature {
    /// Build an index entry from a feature's geometry, if it has extent
    pub fn new(slot: usize, geometry: &Geometry<f64>) -> Option<Self> {
        let rect = geometry.bounding_rect()?;
        Some(Self {
            slot,
            bounds: AABB::from_corners(
                [rect.min().x, rect.min().y],
                [rect.max().x, rect.max().y],
            ),
        })
    }
}

impl RTreeObject for IndexedFeature {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

impl PointDistance for IndexedFeature {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.bounds.distance_2(point)
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.bounds.contains_point(point)
    }
}

/// Bulk-load an R-tree over a layer's geometries.
///
/// Features without usable geometry simply get no index entry, so they
/// can never appear in a query result.
pub fn build_index<'a, I>(geometries: I) -> RTree<IndexedFeature>
where
    I: IntoIterator<Item = &'a Geometry<f64>>,
{
    let entries: Vec<IndexedFeature> = geometries
        .into_iter()
        .enumerate()
        .filter_map(|(slot, geometry)| IndexedFeature::new(slot, geometry))
        .collect();
    RTree::bulk_load(entries)
}
