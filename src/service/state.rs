//! Server state management for the zoning query server

use crate::store::Dataset;

/// In-memory state: the loaded dataset snapshot and where it came from.
/// The dataset itself is read-only; requests never mutate it.
pub struct ServerState {
    pub dataset_path: Option<String>,
    pub dataset: Option<Dataset>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            dataset_path: None,
            dataset: None,
        }
    }

    /// Check if a dataset is loaded
    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
