//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Results are compared as serialized JSON so the
//! vectors stay readable.

use love_core::http::decode_pairs;
use love_core::{HttpMethod, HttpRequest, HttpResponse, LoveClient, LoveError};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000/api";

fn client(vectors: &Value) -> LoveClient {
    LoveClient::new(vectors["api_key"].as_str().unwrap(), BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (
                arr[0].as_str().unwrap().to_string(),
                arr[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn assert_request_line(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
}

fn assert_expected_error(name: &str, err: LoveError, expected: &Value) {
    match expected.as_str().unwrap() {
        "Api" => assert!(matches!(err, LoveError::Api { .. }), "{name}: expected Api, got {err:?}"),
        "Decode" => assert!(matches!(err, LoveError::Decode(_)), "{name}: expected Decode, got {err:?}"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Get love
// ---------------------------------------------------------------------------

#[test]
fn get_love_test_vectors() {
    let raw = include_str!("../../test-vectors/get_love.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client(&vectors);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c
            .build_get_love(
                input["sender"].as_str().unwrap(),
                input["recipient"].as_str().unwrap(),
                input["limit"].as_i64().unwrap(),
            )
            .unwrap();
        assert_request_line(name, &req, expected_req);
        assert_eq!(req.query, parse_pairs(&expected_req["query"]), "{name}: query");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_get_love(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let loves = serde_json::to_value(result.unwrap()).unwrap();
            assert_eq!(loves, case["expected_result"], "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Send love
// ---------------------------------------------------------------------------

#[test]
fn send_love_test_vectors() {
    let raw = include_str!("../../test-vectors/send_love.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client(&vectors);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let expected_req = &case["expected_request"];
        let recipients: Vec<&str> = input["recipients"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_str().unwrap())
            .collect();

        // Verify build, both through the slice form and the joined form.
        let req = c.build_send_loves(
            input["sender"].as_str().unwrap(),
            &recipients,
            input["message"].as_str().unwrap(),
        );
        let joined = c.build_send_love(
            input["sender"].as_str().unwrap(),
            &recipients.join(","),
            input["message"].as_str().unwrap(),
        );
        assert_eq!(req, joined, "{name}: send_loves and send_love differ");
        assert_request_line(name, &req, expected_req);
        assert!(req.query.is_empty(), "{name}: query should be empty");
        assert_eq!(req.headers, parse_pairs(&expected_req["headers"]), "{name}: headers");
        assert_eq!(
            decode_pairs(req.body.as_deref().unwrap()),
            parse_pairs(&expected_req["form"]),
            "{name}: form"
        );

        // Verify parse
        let result = c.parse_send_love(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}

// ---------------------------------------------------------------------------
// Autocomplete
// ---------------------------------------------------------------------------

#[test]
fn autocomplete_test_vectors() {
    let raw = include_str!("../../test-vectors/autocomplete.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client(&vectors);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_autocomplete(case["input"]["term"].as_str().unwrap());
        assert_request_line(name, &req, expected_req);
        assert_eq!(req.query, parse_pairs(&expected_req["query"]), "{name}: query");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_autocomplete(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let users = serde_json::to_value(result.unwrap()).unwrap();
            assert_eq!(users, case["expected_result"], "{name}: parsed result");
        }
    }
}
