//! Buffer analysis handler: BufferFeature
//!
//! In-process analysis over a caller-supplied feature, independent of
//! the dataset. The input feature's id and properties are carried onto
//! the buffer feature, mirroring how the map client's buffer behaved.

use crate::geom::{buffer_geometry, DEFAULT_RADIUS_M};
use crate::service::protocol::{error_codes, Response};
use geo::Geometry;
use serde::Deserialize;

#[derive(Deserialize)]
struct BufferParams {
    feature: geojson::Feature,
    #[serde(default)]
    radius_m: Option<f64>,
}

/// Handle BufferFeature request - buffer one feature by a radius in meters
pub fn handle_buffer_feature(
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: BufferParams = match params.and_then(|p| serde_json::from_value(p).ok()) {
        Some(p) => p,
        None => {
            return Response::error(
                id,
                error_codes::INVALID_PARAMS,
                "Invalid params: expected {feature: Feature, radius_m?: number}".to_string(),
            );
        }
    };
    let radius_m = params.radius_m.unwrap_or(DEFAULT_RADIUS_M);
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Response::error(
            id,
            error_codes::INVALID_PARAMS,
            format!("Invalid radius: {}", radius_m),
        );
    }

    let geometry = params
        .feature
        .geometry
        .as_ref()
        .and_then(|g| Geometry::<f64>::try_from(g.value.clone()).ok());
    let Some(geometry) = geometry else {
        return Response::error(
            id,
            error_codes::INVALID_PARAMS,
            "Feature has no usable geometry".to_string(),
        );
    };

    let Some(buffered) = buffer_geometry(&geometry, radius_m) else {
        return Response::error(
            id,
            error_codes::INTERNAL_ERROR,
            "Buffer produced an empty geometry".to_string(),
        );
    };

    let result = geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(&buffered))),
        id: params.feature.id.clone(),
        properties: params.feature.properties.clone(),
        foreign_members: None,
    };
    match serde_json::to_value(&result) {
        Ok(value) => Response::success(id, value),
        Err(e) => Response::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize buffer feature: {}", e),
        ),
    }
}
