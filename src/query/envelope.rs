//! Query envelope validation and reprojection
//!
//! The four bounds arrive per request in WGS84. They are validated
//! explicitly before anything touches the store: a missing, non-finite,
//! or inverted bound makes the envelope invalid, and an invalid envelope
//! yields an empty result rather than an error.

use crate::geom::crs;
use geo::{Coord, Rect};
use rstar::AABB;

/// A validated bounding-box query window
#[derive(Clone, Debug)]
pub struct QueryEnvelope {
    public_rect: Rect<f64>,
    storage_rect: Rect<f64>,
}

impl QueryEnvelope {
    /// Validate four WGS84 bounds into an envelope.
    ///
    /// Returns `None` when any bound is non-finite or when min >= max on
    /// either axis (degenerate or inverted rectangle).
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Option<Self> {
        let bounds = [min_lon, min_lat, max_lon, max_lat];
        if bounds.iter().any(|b| !b.is_finite()) {
            return None;
        }
        if min_lon >= max_lon || min_lat >= max_lat {
            return None;
        }
        let public_rect = Rect::new(
            Coord { x: min_lon, y: min_lat },
            Coord { x: max_lon, y: max_lat },
        );
        let storage_rect = crs::rect_to_storage(&public_rect);
        Some(Self {
            public_rect,
            storage_rect,
        })
    }

    /// Validate optional bounds, as they come off the request parameters
    pub fn from_params(
        min_lon: Option<f64>,
        min_lat: Option<f64>,
        max_lon: Option<f64>,
        max_lat: Option<f64>,
    ) -> Option<Self> {
        Self::new(min_lon?, min_lat?, max_lon?, max_lat?)
    }

    /// The request window in WGS84
    pub fn public_rect(&self) -> &Rect<f64> {
        &self.public_rect
    }

    /// The search rectangle in storage feet, compared against stored geometry
    pub fn storage_rect(&self) -> &Rect<f64> {
        &self.storage_rect
    }

    /// The search rectangle as an R-tree envelope
    pub fn storage_aabb(&self) -> AABB<[f64; 2]> {
        let min = self.storage_rect.min();
        let max = self.storage_rect.max();
        AABB::from_corners([min.x, min.y], [max.x, max.y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_envelope() {
        let envelope = QueryEnvelope::new(-122.36, 47.60, -122.30, 47.62).unwrap();
        assert!(envelope.storage_rect().min().x < envelope.storage_rect().max().x);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        assert!(QueryEnvelope::new(-122.30, 47.60, -122.36, 47.62).is_none());
        assert!(QueryEnvelope::new(-122.36, 47.62, -122.30, 47.60).is_none());
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        assert!(QueryEnvelope::new(-122.30, 47.60, -122.30, 47.62).is_none());
        assert!(QueryEnvelope::new(-122.36, 47.60, -122.30, 47.60).is_none());
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        assert!(QueryEnvelope::new(f64::NAN, 47.60, -122.30, 47.62).is_none());
        assert!(QueryEnvelope::new(-122.36, 47.60, f64::INFINITY, 47.62).is_none());
    }

    #[test]
    fn test_missing_params_rejected() {
        assert!(QueryEnvelope::from_params(None, Some(47.6), Some(-122.3), Some(47.62)).is_none());
        assert!(
            QueryEnvelope::from_params(Some(-122.36), Some(47.6), Some(-122.3), Some(47.62))
                .is_some()
        );
    }
}
