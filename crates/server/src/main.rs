mod config;
mod state;
mod transcript;

use crate::config::ServerConfig;
use crate::state::{ActionRequest, LobbyState};
use dicehall_core::RngState;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Method, Response, Server, StatusCode};
use tracing::{error, info};

fn main() {
    let config = ServerConfig::load_or_default(Path::new("config.json"));
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_filter.clone())),
        )
        .init();

    let addr = config.addr();
    let server = match Server::http(&addr) {
        Ok(server) => server,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };
    info!("dicehall server on http://{addr}");

    let state = Arc::new(Mutex::new(LobbyState::new(RngState::from_entropy())));
    // Requests are handled to completion one at a time, which is what keeps
    // engine actions serialized.
    for request in server.incoming_requests() {
        let state = state.clone();
        if let Err(err) = handle_request(request, state) {
            error!("request error: {err}");
        }
    }
}

fn handle_request(
    mut request: tiny_http::Request,
    state: Arc<Mutex<LobbyState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = request.url().to_string();
    match (request.method(), url.as_str()) {
        (&Method::Get, "/api/state") => {
            let guard = state.lock().map_err(|_| "lobby state poisoned")?;
            let document = guard.state_document(None);
            drop(guard);
            respond_json(request, &document)?;
        }
        (&Method::Post, "/api/action") => {
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body)?;
            let mut guard = state.lock().map_err(|_| "lobby state poisoned")?;
            let document = match serde_json::from_str::<ActionRequest>(&body) {
                Ok(action) => {
                    let error = guard.apply(action);
                    guard.state_document(error)
                }
                Err(err) => guard.state_document(Some(format!("malformed action: {err}"))),
            };
            drop(guard);
            respond_json(request, &document)?;
        }
        _ => {
            request.respond(Response::empty(StatusCode(404)))?;
        }
    }
    Ok(())
}

fn respond_json<T: serde::Serialize>(
    request: tiny_http::Request,
    document: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = serde_json::to_vec_pretty(document)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|_| "content-type header")?;
    request.respond(Response::from_data(body).with_header(header))?;
    Ok(())
}
