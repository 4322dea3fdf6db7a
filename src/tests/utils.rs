use crate::config::Config;
use crate::state::AppState;
use astra::{Body, Request, Response};
use http::Method;
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::io::Read;

/// App state built from the given env pairs instead of the real environment.
pub fn test_state(env: &[(&str, &str)]) -> AppState {
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = Config::from_lookup(|k| env.get(k).cloned());

    let client = Client::builder()
        .no_proxy()
        .build()
        .unwrap_or_else(|e| panic!("HTTP client init failed: {e}"));

    AppState::with_client(config, client)
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post(uri: &str, body: impl Into<Vec<u8>>) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn post_json(uri: &str, value: &serde_json::Value) -> Request {
    post(uri, value.to_string())
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).expect("response body is JSON")
}
