use crate::router::handle;
use crate::tests::utils::{body_json, post, test_state};

const UPLOAD: &str = "\
Sale_Price,Address,City,ST,Zipcode,Bldg_Area,Total_Bed,Total_Bath,Sale_Date,Zillow_URL
\"$350,000\",1 Oak St,Fort Worth,TX,76104,\"1,850\",3,2,2024-01-05,http://a.com|http://b.com
N/A,2 Oak St,Fort Worth,TX,,,,,,
$280000,,Fort Worth,TX,76104,1400,3,1,,
";

#[test]
fn normalizes_uploaded_csv() {
    let state = test_state(&[]);

    let resp = handle(post("/api/comps", UPLOAD), &state).expect("Failed to handle request");

    assert_eq!(resp.status(), 200);
    let body = body_json(resp);

    assert_eq!(body["count"], 2);
    assert_eq!(body["dropped"], 1);

    let first = &body["records"][0];
    assert_eq!(first["sale_price"], 350000.0);
    assert_eq!(first["street_address"], "1 Oak St");
    assert_eq!(first["zip"], "76104");
    assert_eq!(first["living_area_sqft"], 1850.0);
    assert_eq!(first["beds"], 3);
    assert_eq!(first["property_url"], "http://a.com");
    assert_eq!(first["_raw"]["Sale_Price"], "$350,000");

    let second = &body["records"][1];
    assert!(second["sale_price"].is_null());
    assert!(second["beds"].is_null());
    assert!(second["zip"].is_null());
}

#[test]
fn empty_upload_has_no_records() {
    let state = test_state(&[]);

    let resp = handle(post("/api/comps", ""), &state).expect("Failed to handle request");

    let body = body_json(resp);
    assert_eq!(body["count"], 0);
    assert_eq!(body["records"].as_array().unwrap().len(), 0);
}

#[test]
fn later_case_variant_header_fills_the_address() {
    let state = test_state(&[]);
    let upload = "address,ADDRESS,city,state\n,1 First St,Dallas,TX\n";

    let resp = handle(post("/api/comps", upload), &state).expect("Failed to handle request");

    let body = body_json(resp);
    assert_eq!(body["count"], 1);
    assert_eq!(body["records"][0]["street_address"], "1 First St");
}

#[test]
fn raw_cells_keep_upload_column_order() {
    let state = test_state(&[]);
    let upload = "Zip,Address,City,State\n76104,1 Oak St,Fort Worth,TX\n";

    let resp = handle(post("/api/comps", upload), &state).expect("Failed to handle request");

    let body = body_json(resp);
    let headers: Vec<&str> = body["records"][0]["_raw"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(headers, vec!["Zip", "Address", "City", "State"]);
}
