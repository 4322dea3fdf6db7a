use crate::config::Config;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::state::AppState;
use astra::Server;
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod assets;
mod comps;
mod config;
mod domain;
mod errors;
mod mapping;
mod responses;
mod router;
mod sonar;
mod state;
mod templates;
mod underwriting;

#[cfg(test)]
mod tests;

fn main() {
    init_tracing();

    // 1️⃣ Read configuration (.env first, then the process environment)
    let config = Config::from_env();

    if config.perplexity_api_key.is_none() {
        warn!("PERPLEXITY_API_KEY is not set; completion endpoints will answer 500");
    }
    if config.google_maps_api_key.is_none() {
        warn!("GOOGLE_MAPS_API_KEY is not set; /api/map-plot is disabled");
    }

    let addr: SocketAddr = match config.bind_addr().parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid listen address {}: {e}", config.bind_addr());
            std::process::exit(1);
        }
    };
    let workers = config.max_workers;

    // 2️⃣ Build the shared state (config + pooled HTTP client)
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            error!("HTTP client initialization failed: {e}");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    info!("Server listening on http://{addr}");

    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req: astra::Request, _info: astra::ConnectionInfo| {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_owned();

        let resp = match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        };

        info!(
            %method,
            %path,
            status = resp.status().as_u16(),
            elapsed = ?start.elapsed(),
            "request"
        );
        resp
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
