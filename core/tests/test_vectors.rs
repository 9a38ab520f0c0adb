//! Verify query rendering and status classification against the JSON test
//! vectors stored in `test-vectors/`.
//!
//! Status vectors run through a real `Endpoint` backed by a canned transport,
//! so they cover the whole classify-then-decode path.

use std::io::Cursor;
use std::sync::Arc;

use tcgdex_core::error::BoxError;
use tcgdex_core::models::{Card, CardResume};
use tcgdex_core::{ApiError, Client, Endpoint, HttpRequest, HttpResponse, Query, Transport};

/// Answers every request with the same status and body.
struct Canned {
    status: u16,
    body: String,
}

impl Transport for Canned {
    fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        Ok(HttpResponse {
            status: self.status,
            headers: Vec::new(),
            body: Box::new(Cursor::new(self.body.clone().into_bytes())),
        })
    }
}

fn apply(query: &mut Query, op: &[serde_json::Value]) {
    let arg = |i: usize| op[i].as_str().unwrap();
    let num = |i: usize| arg(i).parse::<u32>().unwrap();
    match arg(0) {
        "contains" => query.contains(arg(1), arg(2)),
        "equal" => query.equal(arg(1), arg(2)),
        "not_equal" => query.not_equal(arg(1), arg(2)),
        "not_contains" => query.not_contains(arg(1), arg(2)),
        "gte" => query.gte(arg(1), num(2)),
        "lte" => query.lte(arg(1), num(2)),
        "gt" => query.gt(arg(1), num(2)),
        "lt" => query.lt(arg(1), num(2)),
        "is_null" => query.is_null(arg(1)),
        "not_null" => query.not_null(arg(1)),
        "sort" => query.sort(arg(1), arg(2)),
        "paginate" => query.paginate(num(1), num(2)),
        other => panic!("unknown operator: {other}"),
    };
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

#[test]
fn query_test_vectors() {
    let raw = include_str!("../../test-vectors/query.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut query = Query::new();
        for op in case["ops"].as_array().unwrap() {
            apply(&mut query, op.as_array().unwrap());
        }
        assert_eq!(query.build(), case["expected"].as_str().unwrap(), "{name}: query string");
    }
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

#[test]
fn status_test_vectors() {
    let raw = include_str!("../../test-vectors/status.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let status = case["status"].as_u64().unwrap() as u16;
        let body = case["body"].as_str().unwrap().to_string();
        let client = Client::builder()
            .base_url("http://example")
            .transport(Canned {
                status,
                body: body.clone(),
            })
            .build();
        let cards: Endpoint<Card, CardResume> = Endpoint::new(Arc::new(client), "cards");

        let result = cards.get("swsh3-136");
        match case["expected"].as_str().unwrap() {
            "ok" => assert!(result.is_ok(), "{name}: expected success, got {result:?}"),
            "not_found" => assert!(
                matches!(result, Err(ApiError::NotFound)),
                "{name}: expected NotFound"
            ),
            "http" => match result {
                Err(ApiError::Http { status: got, url, body: got_body, .. }) => {
                    assert_eq!(got, status, "{name}: status");
                    assert_eq!(url, "http://example/cards/swsh3-136", "{name}: url");
                    assert_eq!(got_body, body, "{name}: body");
                }
                other => panic!("{name}: expected Http error, got {other:?}"),
            },
            "decode" => match result {
                Err(ApiError::Decode { resource, .. }) => {
                    assert_eq!(resource, "/cards/swsh3-136", "{name}: resource");
                }
                other => panic!("{name}: expected Decode error, got {other:?}"),
            },
            other => panic!("{name}: unknown expectation: {other}"),
        }
    }
}
