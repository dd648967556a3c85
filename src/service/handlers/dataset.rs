//! Dataset operations: LoadDataset, Status, Close, GetMemory

use crate::model::LayerKind;
use crate::service::protocol::{error_codes, Response};
use crate::service::state::ServerState;
use crate::service::util::get_process_memory_bytes;
use crate::store::load_dataset;
use serde::Deserialize;
use std::path::Path;
use std::time::Instant;

/// Handle LoadDataset request - loads the SQLite dataset into memory
pub fn handle_load_dataset(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct LoadParams {
        file_path: String,
    }

    let params: LoadParams = match params.and_then(|p| serde_json::from_value(p).ok()) {
        Some(p) => p,
        None => {
            return Response::error(
                id,
                error_codes::INVALID_PARAMS,
                "Invalid params: expected {file_path: string}".to_string(),
            );
        }
    };

    eprintln!("[Zoning Server] Loading dataset: {}", params.file_path);
    let start = Instant::now();

    let dataset = match load_dataset(Path::new(&params.file_path)) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("[Zoning Server] Dataset load failed: {:#}", e);
            return Response::error(
                id,
                error_codes::LOAD_FAILED,
                format!("Failed to load dataset: {:#}", e),
            );
        }
    };

    let buildings = dataset.layer_len(LayerKind::Buildings);
    let districts = dataset.layer_len(LayerKind::Zoning);
    let parcels = dataset.layer_len(LayerKind::Parcels);
    let rules = dataset.rule_count();
    eprintln!(
        "[Zoning Server] Loaded {} buildings, {} districts, {} parcels, {} rules in {:.2?}",
        buildings,
        districts,
        parcels,
        rules,
        start.elapsed()
    );

    state.dataset_path = Some(params.file_path.clone());
    state.dataset = Some(dataset);

    Response::success(
        id,
        serde_json::json!({
            "status": "ok",
            "file_path": params.file_path,
            "buildings": buildings,
            "districts": districts,
            "parcels": parcels,
            "rules": rules
        }),
    )
}

/// Handle Status request - health check for the surrounding collaborator
pub fn handle_status(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    let counts = state.dataset.as_ref().map(|dataset| {
        serde_json::json!({
            "buildings": dataset.layer_len(LayerKind::Buildings),
            "districts": dataset.layer_len(LayerKind::Zoning),
            "parcels": dataset.layer_len(LayerKind::Parcels),
            "rules": dataset.rule_count()
        })
    });
    Response::success(
        id,
        serde_json::json!({
            "status": "Online",
            "dataset_loaded": state.is_loaded(),
            "dataset_path": state.dataset_path,
            "counts": counts
        }),
    )
}

/// Handle Close request - drops the dataset to free memory
pub fn handle_close(state: &mut ServerState, id: Option<serde_json::Value>) -> Response {
    let old_memory = get_process_memory_bytes().unwrap_or(0);

    state.dataset_path = None;
    state.dataset = None;

    let new_memory = get_process_memory_bytes().unwrap_or(0);
    eprintln!(
        "[Zoning Server] Close: freed {} MB",
        (old_memory as i64 - new_memory as i64) / 1024 / 1024
    );

    Response::success(
        id,
        serde_json::json!({
            "freed_bytes": old_memory.saturating_sub(new_memory)
        }),
    )
}

/// Handle GetMemory request - returns current process memory usage
pub fn handle_get_memory(id: Option<serde_json::Value>) -> Response {
    let memory_bytes = get_process_memory_bytes();
    let memory_mb = memory_bytes.map(|b| b as f64 / 1024.0 / 1024.0);
    Response::success(
        id,
        serde_json::json!({
            "memory_bytes": memory_bytes,
            "memory_mb": memory_mb
        }),
    )
}
