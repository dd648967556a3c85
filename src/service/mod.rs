//! Stateless request layer for the zoning query engine
//!
//! A JSON-RPC surface over the query engine, consumed by the external
//! routing/transport collaborator. Each request is an independent
//! read-only operation against the loaded dataset snapshot; the only
//! mutations are dataset load and close.
//!
//! # Module Structure
//! - `protocol` - JSON-RPC request/response types
//! - `state` - Server state management
//! - `util` - Utility functions (process memory)
//! - `handlers` - Request handlers organized by functionality

pub mod handlers;
pub mod protocol;
pub mod state;
pub mod util;

pub use protocol::{error_codes, ErrorResponse, Request, Response};
pub use state::ServerState;
