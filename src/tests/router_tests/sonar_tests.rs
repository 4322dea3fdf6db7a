use crate::router::handle;
use crate::tests::utils::{body_json, post, post_json, test_state};
use crate::underwriting::orchestrator::{CHAT_UPSTREAM_ERROR, DEFAULT_CHAT_MESSAGE};
use httpmock::prelude::*;
use serde_json::json;

#[test]
fn relays_reply_for_message() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .header("authorization", "Bearer pplx-test")
            .json_body(json!({
                "model": "sonar-pro",
                "messages": [{ "role": "user", "content": "Hi" }]
            }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "choices": [{ "message": { "content": "Hello from Sonar!" } }] }));
    });
    let base_url = server.base_url();
    let state = test_state(&[
        ("PERPLEXITY_API_KEY", "pplx-test"),
        ("SONAR_BASE_URL", base_url.as_str()),
        ("SONAR_MODEL", "sonar-pro"),
    ]);

    let resp = handle(post_json("/api/sonar", &json!({ "message": "Hi" })), &state)
        .expect("Failed to handle request");

    mock.assert_calls(1);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!({ "reply": "Hello from Sonar!" }));
}

#[test]
fn empty_body_uses_default_message() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions").json_body(json!({
            "model": "sonar",
            "messages": [{ "role": "user", "content": DEFAULT_CHAT_MESSAGE }]
        }));
        then.status(200)
            .json_body(json!({ "choices": [{ "message": { "content": "hey" } }] }));
    });
    let base_url = server.base_url();
    let state = test_state(&[
        ("PERPLEXITY_API_KEY", "pplx-test"),
        ("SONAR_BASE_URL", base_url.as_str()),
    ]);

    let resp = handle(post("/api/sonar", ""), &state).expect("Failed to handle request");

    mock.assert_calls(1);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!({ "reply": "hey" }));
}

#[test]
fn missing_credential_is_500() {
    let state = test_state(&[]);

    let err = handle(post_json("/api/sonar", &json!({ "message": "Hi" })), &state).unwrap_err();

    assert_eq!(err.status(), 500);
    assert_eq!(err.to_string(), "PERPLEXITY_API_KEY is not set");
}

#[test]
fn upstream_failure_is_generic() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(503).body("upstream exploded: trace id 42");
    });
    let base_url = server.base_url();
    let state = test_state(&[
        ("PERPLEXITY_API_KEY", "pplx-test"),
        ("SONAR_BASE_URL", base_url.as_str()),
    ]);

    let err = handle(post_json("/api/sonar", &json!({ "message": "Hi" })), &state).unwrap_err();

    mock.assert_calls(1);
    assert_eq!(err.status(), 500);
    assert_eq!(err.to_string(), CHAT_UPSTREAM_ERROR);
}
