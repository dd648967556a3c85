//! Layer query handlers: QueryBuildings, QueryZoning, QueryParcels
//!
//! All three answer with the uniform FeatureCollection shape: populated,
//! empty (invalid or empty window), or empty-with-error (no dataset).
//! A malformed bounding box is the empty-result path, never a failure.

use crate::model::LayerKind;
use crate::query::{self, assemble, QueryEnvelope};
use crate::service::protocol::{error_codes, Response};
use crate::service::state::ServerState;
use serde::Deserialize;
use std::time::Instant;

#[derive(Debug, Default, Deserialize)]
struct BoundsParams {
    #[serde(default)]
    min_lon: Option<f64>,
    #[serde(default)]
    min_lat: Option<f64>,
    #[serde(default)]
    max_lon: Option<f64>,
    #[serde(default)]
    max_lat: Option<f64>,
}

fn layer_response(id: Option<serde_json::Value>, collection: geojson::FeatureCollection) -> Response {
    match serde_json::to_value(&collection) {
        Ok(value) => Response::success(id, value),
        Err(e) => Response::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize FeatureCollection: {}", e),
        ),
    }
}

/// Shared implementation for the three layer query methods
pub fn handle_query_layer(
    state: &ServerState,
    layer: LayerKind,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let Some(dataset) = state.dataset.as_ref() else {
        // Failure contract: keep the FeatureCollection shape with an
        // error member so the consumer still has a safe default
        return layer_response(
            id,
            assemble::error_collection("no dataset loaded; call LoadDataset first"),
        );
    };

    // Tolerate absent or non-numeric params: that is the empty-result
    // path, not a protocol error
    let params: BoundsParams = params
        .and_then(|p| serde_json::from_value(p).ok())
        .unwrap_or_default();
    let envelope = QueryEnvelope::from_params(
        params.min_lon,
        params.min_lat,
        params.max_lon,
        params.max_lat,
    );
    let Some(envelope) = envelope else {
        return layer_response(id, assemble::empty_collection());
    };

    let start = Instant::now();
    let collection = query::query_layer(dataset, layer, &envelope);
    eprintln!(
        "[Zoning Server] {:?} query: {} features in {:.2?}",
        layer,
        collection.features.len(),
        start.elapsed()
    );

    layer_response(id, collection)
}

/// Handle QueryBuildings - classified building footprints in a window
pub fn handle_query_buildings(
    state: &ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    handle_query_layer(state, LayerKind::Buildings, id, params)
}

/// Handle QueryZoning - zoning district overlay in a window
pub fn handle_query_zoning(
    state: &ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    handle_query_layer(state, LayerKind::Zoning, id, params)
}

/// Handle QueryParcels - parcel overlay in a window
pub fn handle_query_parcels(
    state: &ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    handle_query_layer(state, LayerKind::Parcels, id, params)
}
