use crate::assets::serve_static;
use crate::comps::normalize_csv;
use crate::errors::ServerError;
use crate::mapping::{GoogleGeocoder, MapSession};
use crate::responses::{json_response, text_response, ResultResp};
use crate::sonar::SonarClient;
use crate::state::AppState;
use crate::underwriting::{self, orchestrator::parse_sales_data};
use astra::Request;
use serde_json::{json, Value};
use std::io::Read;
use std::sync::Arc;
use tracing::{error, info};

pub const LIVENESS: &str = "Perplexity Sonar API is running";

/// Uploads and JSON bodies larger than this are refused.
const MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => text_response(LIVENESS),
        ("POST", "/api/sonar") => sonar_chat(req, state),
        ("POST", "/api/arv-underwrite") => arv_underwrite(req, state),
        ("POST", "/api/comps") => normalize_comps(req),
        ("POST", "/api/map-plot") => map_plot(req, state),
        ("GET", _) => serve_static(&state.config.static_dir, &path),
        _ => Err(ServerError::NotFound),
    }
}

fn sonar_chat(req: Request, state: &AppState) -> ResultResp {
    let body = read_json(req)?;
    let client = sonar_client(state)?;

    let message = body.get("message").and_then(Value::as_str);
    let reply = underwriting::chat(&client, message)?;

    json_response(200, &json!({ "reply": reply }))
}

fn arv_underwrite(req: Request, state: &AppState) -> ResultResp {
    let body = read_json(req)?;
    let request = underwriting::parse_request(&body)?;
    let client = sonar_client(state)?;

    let result = underwriting::underwrite(&client, &request);
    let status = if result.is_success() { 200 } else { 500 };

    json_response(status, &result)
}

fn normalize_comps(req: Request) -> ResultResp {
    let bytes = read_body(req)?;
    let summary =
        normalize_csv(bytes.as_slice()).map_err(|e| ServerError::BadRequest(e.to_string()))?;

    info!(
        count = summary.count,
        dropped = summary.dropped,
        "Normalized uploaded comps"
    );

    json_response(200, &summary)
}

fn map_plot(req: Request, state: &AppState) -> ResultResp {
    let body = read_json(req)?;

    let records = parse_sales_data(body.get("sales_data").unwrap_or(&Value::Null));
    if records.is_empty() {
        return Err(ServerError::BadRequest("Please upload a CSV first.".into()));
    }
    let limit = state.config.max_plot_records;
    if records.len() > limit {
        return Err(ServerError::BadRequest(format!(
            "Too many comps to plot at once ({}, limit {limit})",
            records.len()
        )));
    }
    let subject_address = body.get("subject_address").and_then(Value::as_str);

    let geocoder = GoogleGeocoder::from_config(&state.http, &state.config).map_err(|e| {
        error!("Map plot refused: {e}");
        ServerError::Config(e.to_string())
    })?;

    let mut session = MapSession::new();
    let view = session.plot(
        &records,
        subject_address,
        Arc::new(geocoder),
        state.config.geocode_stagger,
    );

    info!(
        placed = view.markers.len(),
        skipped = view.skipped,
        "Map plot finished"
    );

    json_response(200, &view)
}

fn sonar_client(state: &AppState) -> Result<SonarClient, ServerError> {
    SonarClient::from_config(&state.http, &state.config).map_err(|e| {
        error!("Completion call refused: {e}");
        ServerError::Config(e.to_string())
    })
}

fn read_body(req: Request) -> Result<Vec<u8>, ServerError> {
    let mut body = req.into_body();
    let mut buf = Vec::new();

    body.reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Could not read request body: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("Request body too large".into()));
    }

    Ok(buf)
}

/// An empty body reads as `{}`.
fn read_json(req: Request) -> Result<Value, ServerError> {
    let bytes = read_body(req)?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| ServerError::BadRequest(format!("Invalid JSON body: {e}")))
}
