//! Bounding-box filter over an indexed layer
//!
//! R-tree candidate lookup followed by a precise intersects test, with
//! the per-layer cap applied in stable store order. The predicate is
//! "intersects", not containment, so features partially inside the
//! window are included.

use super::envelope::QueryEnvelope;
use crate::geom::IndexedFeature;
use geo::{Geometry, Intersects};
use rstar::RTree;

/// Select the slots of features whose geometry intersects the envelope,
/// truncated to `cap` in ascending slot order.
///
/// The R-tree yields candidates in arbitrary order; sorting by slot
/// restores the store order so that truncation is deterministic and two
/// identical queries see identical results.
pub fn filter<'a, G>(
    index: &RTree<IndexedFeature>,
    envelope: &QueryEnvelope,
    cap: usize,
    geometry_of: G,
) -> Vec<usize>
where
    G: Fn(usize) -> &'a Geometry<f64>,
{
    let window = envelope.storage_aabb();
    let mut slots: Vec<usize> = index
        .locate_in_envelope_intersecting(&window)
        .map(|entry| entry.slot)
        .collect();
    slots.sort_unstable();

    let precise = envelope.storage_rect().to_polygon();
    slots
        .into_iter()
        .filter(|&slot| geometry_of(slot).intersects(&precise))
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{build_index, crs};
    use geo::{Coord, LineString, Polygon};

    /// Axis-aligned square in storage feet
    fn square(x: f64, y: f64, size: f64) -> Geometry<f64> {
        Geometry::Polygon(Polygon::new(
            LineString::from(vec![
                Coord { x, y },
                Coord { x: x + size, y },
                Coord { x: x + size, y: y + size },
                Coord { x, y: y + size },
                Coord { x, y },
            ]),
            vec![],
        ))
    }

    /// Envelope around a storage-feet window, built through WGS84 the way
    /// a request would arrive
    fn envelope_around(min: Coord<f64>, max: Coord<f64>) -> QueryEnvelope {
        let lo = crs::storage_to_wgs84(min);
        let hi = crs::storage_to_wgs84(max);
        QueryEnvelope::new(lo.x, lo.y, hi.x, hi.y).unwrap()
    }

    #[test]
    fn test_partial_overlap_included_disjoint_excluded() {
        let geometries = vec![
            square(1_270_000.0, 223_000.0, 100.0), // inside window
            square(1_270_450.0, 223_000.0, 100.0), // straddles window edge
            square(1_280_000.0, 223_000.0, 100.0), // far outside
        ];
        let index = build_index(geometries.iter());
        let envelope = envelope_around(
            Coord { x: 1_269_900.0, y: 222_900.0 },
            Coord { x: 1_270_500.0, y: 223_300.0 },
        );

        let slots = filter(&index, &envelope, 1000, |slot| &geometries[slot]);
        assert_eq!(slots, vec![0, 1]);
    }

    #[test]
    fn test_cap_truncates_in_store_order() {
        let geometries: Vec<Geometry<f64>> = (0..20)
            .map(|i| square(1_270_000.0 + (i as f64) * 10.0, 223_000.0, 5.0))
            .collect();
        let index = build_index(geometries.iter());
        let envelope = envelope_around(
            Coord { x: 1_269_000.0, y: 222_000.0 },
            Coord { x: 1_271_000.0, y: 224_000.0 },
        );

        let slots = filter(&index, &envelope, 7, |slot| &geometries[slot]);
        assert_eq!(slots, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_bbox_hit_but_no_precise_intersection() {
        // A thin diagonal triangle whose bounding box covers the window
        // corner while the geometry itself stays clear of it
        let triangle = Geometry::Polygon(Polygon::new(
            LineString::from(vec![
                Coord { x: 1_269_000.0, y: 224_000.0 },
                Coord { x: 1_269_100.0, y: 224_000.0 },
                Coord { x: 1_271_000.0, y: 226_000.0 },
                Coord { x: 1_269_000.0, y: 224_000.0 },
            ]),
            vec![],
        ));
        let geometries = vec![triangle];
        let index = build_index(geometries.iter());
        let envelope = envelope_around(
            Coord { x: 1_270_500.0, y: 224_000.0 },
            Coord { x: 1_271_000.0, y: 224_500.0 },
        );

        let slots = filter(&index, &envelope, 1000, |slot| &geometries[slot]);
        assert!(slots.is_empty());
    }
}
