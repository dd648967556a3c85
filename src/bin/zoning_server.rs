//! Line-delimited JSON-RPC server for the zoning query engine
//!
//! Reads one request per line from stdin and writes one response per
//! line to stdout. The transport (HTTP routing, CORS) lives in the
//! surrounding collaborator; this binary is the in-process engine
//! surface it talks to.

use std::io::{self, BufRead, Write};

use zonemap::service::handlers::{
    handle_buffer_feature, handle_close, handle_get_memory, handle_load_dataset,
    handle_query_buildings, handle_query_parcels, handle_query_zoning, handle_status,
};
use zonemap::service::protocol::{error_codes, Request, Response};
use zonemap::service::ServerState;

fn main() {
    eprintln!("[Zoning Server] Starting zoning query server...");
    let mut state = ServerState::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("[Zoning Server] Error reading stdin: {}", e);
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                eprintln!("[Zoning Server] Failed to parse request: {}", e);
                let response = Response::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Failed to parse request: {}", e),
                );
                write_response(&mut stdout, &response);
                continue;
            }
        };

        let response = match request.method.as_str() {
            "LoadDataset" => handle_load_dataset(&mut state, request.id, request.params),
            "QueryBuildings" => handle_query_buildings(&state, request.id, request.params),
            "QueryZoning" => handle_query_zoning(&state, request.id, request.params),
            "QueryParcels" => handle_query_parcels(&state, request.id, request.params),
            "BufferFeature" => handle_buffer_feature(request.id, request.params),
            "Status" => handle_status(&state, request.id),
            "GetMemory" => handle_get_memory(request.id),
            "Close" => handle_close(&mut state, request.id),
            _ => Response::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        write_response(&mut stdout, &response);
    }

    eprintln!("[Zoning Server] Shutting down...");
}

fn write_response(stdout: &mut io::Stdout, response: &Response) {
    match serde_json::to_string(response) {
        Ok(json) => {
            if writeln!(stdout, "{}", json).and_then(|_| stdout.flush()).is_err() {
                eprintln!("[Zoning Server] Failed to write response to stdout");
            }
        }
        Err(e) => {
            eprintln!("[Zoning Server] Failed to serialize response: {}", e);
        }
    }
}
