use crate::router::handle;
use crate::tests::utils::{body_json, post_json, test_state};
use httpmock::prelude::*;
use serde_json::{json, Value};

fn sales(n: usize) -> Value {
    (0..n)
        .map(|i| {
            json!({
                "sale_price": 199000.0,
                "street_address": format!("{i} Pine Rd"),
                "city": "Arlington",
                "state": "TX",
                "property_url": format!("http://listings.test/{i}")
            })
        })
        .collect()
}

fn located() -> Value {
    json!({
        "status": "OK",
        "results": [{ "geometry": { "location": { "lat": 32.73, "lng": -97.11 } } }]
    })
}

#[test]
fn plots_every_geocoded_comp_and_subject() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/geocode/json")
            .query_param("key", "maps-key")
            .query_param_exists("address");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(located());
    });
    let geocode_url = server.url("/geocode/json");
    let state = test_state(&[
        ("GOOGLE_MAPS_API_KEY", "maps-key"),
        ("GEOCODE_BASE_URL", geocode_url.as_str()),
        ("GEOCODE_STAGGER_MS", "1"),
    ]);

    let body = json!({ "sales_data": sales(3), "subject_address": "9 Subject Ln, Arlington, TX" });
    let resp = handle(post_json("/api/map-plot", &body), &state).expect("Failed to handle request");

    // Three comps plus the subject, one attempt each.
    mock.assert_calls(4);
    assert_eq!(resp.status(), 200);
    let view = body_json(resp);
    assert_eq!(view["markers"].as_array().unwrap().len(), 3);
    assert_eq!(view["subject"]["kind"], "subject");
    assert_eq!(view["skipped"], 0);
    assert_eq!(view["viewport"]["north_east"]["lat"], 32.73);
}

#[test]
fn mistyped_fields_still_get_plotted() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/geocode/json")
            .query_param("address", "1 Pine Rd, Arlington, TX 76010");
        then.status(200).json_body(located());
    });
    let geocode_url = server.url("/geocode/json");
    let state = test_state(&[
        ("GOOGLE_MAPS_API_KEY", "maps-key"),
        ("GEOCODE_BASE_URL", geocode_url.as_str()),
        ("GEOCODE_STAGGER_MS", "0"),
    ]);
    let body = json!({ "sales_data": [{
        "street_address": "1 Pine Rd",
        "city": "Arlington",
        "state": "TX",
        "zip": 76010,
        "beds": 2.5,
        "sale_price": "350000"
    }] });

    let resp = handle(post_json("/api/map-plot", &body), &state).expect("Failed to handle request");

    mock.assert_calls(1);
    let view = body_json(resp);
    assert_eq!(view["markers"].as_array().unwrap().len(), 1);
    assert!(view["markers"][0]["info_html"]
        .as_str()
        .unwrap()
        .contains("$350,000"));
}

#[test]
fn failed_geocodes_are_skipped_silently() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(200)
            .json_body(json!({ "status": "ZERO_RESULTS", "results": [] }));
    });
    let geocode_url = server.url("/geocode/json");
    let state = test_state(&[
        ("GOOGLE_MAPS_API_KEY", "maps-key"),
        ("GEOCODE_BASE_URL", geocode_url.as_str()),
        ("GEOCODE_STAGGER_MS", "0"),
    ]);

    let resp = handle(post_json("/api/map-plot", &json!({ "sales_data": sales(2) })), &state)
        .expect("Failed to handle request");

    assert_eq!(resp.status(), 200);
    let view = body_json(resp);
    assert_eq!(view["markers"].as_array().unwrap().len(), 0);
    assert_eq!(view["skipped"], 2);
    assert!(view["viewport"].is_null());
}

#[test]
fn oversized_comp_lists_are_refused_before_geocoding() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(200).json_body(located());
    });
    let geocode_url = server.url("/geocode/json");
    let state = test_state(&[
        ("GOOGLE_MAPS_API_KEY", "maps-key"),
        ("GEOCODE_BASE_URL", geocode_url.as_str()),
        ("GEOCODE_STAGGER_MS", "0"),
        ("MAP_PLOT_MAX_RECORDS", "5"),
    ]);

    let err = handle(post_json("/api/map-plot", &json!({ "sales_data": sales(6) })), &state)
        .unwrap_err();

    assert_eq!(err.status(), 400);
    assert!(err.to_string().contains("limit 5"));
    mock.assert_calls(0);

    let resp = handle(post_json("/api/map-plot", &json!({ "sales_data": sales(5) })), &state)
        .expect("Failed to handle request");
    assert_eq!(resp.status(), 200);
    mock.assert_calls(5);
}

#[test]
fn requires_uploaded_comps() {
    let state = test_state(&[("GOOGLE_MAPS_API_KEY", "maps-key")]);

    let err = handle(post_json("/api/map-plot", &json!({ "sales_data": [] })), &state).unwrap_err();

    assert_eq!(err.status(), 400);
    assert_eq!(err.to_string(), "Please upload a CSV first.");
}

#[test]
fn requires_maps_credential() {
    let state = test_state(&[]);

    let err = handle(post_json("/api/map-plot", &json!({ "sales_data": sales(1) })), &state)
        .unwrap_err();

    assert_eq!(err.status(), 500);
}
