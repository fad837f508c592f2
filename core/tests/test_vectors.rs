//! Verify client operations against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected outbound request, a
//! simulated response (or transport error), the value the caller should get,
//! and the notifications that should be emitted. Comparing parsed JSON (not
//! raw strings) avoids false negatives from field-ordering differences.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hero_core::{
    ApiError, ClientConfig, Hero, HeroClient, HttpMethod, HttpRequest, HttpResponse,
    MessageService, NewHero, Transport,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

/// Answers every request with the case's simulated reply and remembers what
/// was sent.
struct ReplayTransport {
    reply: Result<HttpResponse, ApiError>,
    sent: Mutex<Vec<HttpRequest>>,
}

#[async_trait]
impl Transport for ReplayTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.lock().unwrap().push(request);
        self.reply.clone()
    }
}

struct Harness {
    client: HeroClient,
    transport: Arc<ReplayTransport>,
    messages: Arc<MessageService>,
}

fn harness(case: &Value) -> Harness {
    let reply = match case.get("simulated_error") {
        Some(message) => Err(ApiError::Transport(message.as_str().unwrap().to_string())),
        None => {
            let sim = &case["simulated_response"];
            Ok(HttpResponse {
                status: sim["status"].as_u64().unwrap_or(200) as u16,
                headers: Vec::new(),
                body: sim["body"].as_str().unwrap_or_default().to_string(),
            })
        }
    };
    let transport = Arc::new(ReplayTransport {
        reply,
        sent: Mutex::new(Vec::new()),
    });
    let messages = Arc::new(MessageService::new());
    let client = HeroClient::new(ClientConfig::new(BASE_URL), transport.clone(), messages.clone());
    Harness {
        client,
        transport,
        messages,
    }
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

/// Check the recorded request and notifications against the case.
fn verify(name: &str, case: &Value, h: &Harness) {
    let sent = h.transport.sent.lock().unwrap().clone();
    let expected_req = &case["expected_request"];

    if expected_req.is_null() {
        assert!(sent.is_empty(), "{name}: no request expected");
    } else {
        assert_eq!(sent.len(), 1, "{name}: exactly one request");
        let req = &sent[0];
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        match expected_req.get("body") {
            Some(body) => {
                let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&req_body, body, "{name}: body");
            }
            None => assert!(req.body.is_none(), "{name}: body should be None"),
        }
    }

    let expected_messages: Vec<String> =
        serde_json::from_value(case["expected_messages"].clone()).unwrap();
    assert_eq!(h.messages.messages(), expected_messages, "{name}: messages");
}

/// Compare an `Option<Value>` result, where `Some(Null)` and `None` differ.
fn assert_raw(name: &str, case: &Value, result: Option<Value>) {
    if case.get("expected_absent").is_some() {
        assert_eq!(result, None, "{name}: expected absent result");
    } else {
        assert_eq!(result, Some(case["expected_result"].clone()), "{name}: raw result");
    }
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_test_vectors() {
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        let h = harness(&case);

        let heroes = h.client.get_heroes().await;

        let expected: Vec<Hero> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(heroes, expected, "{name}: result");
        verify(name, &case, &h);
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_test_vectors() {
    for case in cases(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();
        let h = harness(&case);

        let hero = h.client.get_hero(id).await;

        let expected: Option<Hero> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(hero, expected, "{name}: result");
        verify(name, &case, &h);
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_test_vectors() {
    for case in cases(include_str!("../../test-vectors/search.json")) {
        let name = case["name"].as_str().unwrap();
        let term = case["input_term"].as_str().unwrap();
        let h = harness(&case);

        let heroes = h.client.search_heroes(term).await;

        let expected: Vec<Hero> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(heroes, expected, "{name}: result");
        verify(name, &case, &h);
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_test_vectors() {
    for case in cases(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: NewHero = serde_json::from_value(case["input"].clone()).unwrap();
        let h = harness(&case);

        let created = h.client.add_hero(&input).await;

        let expected: Option<Hero> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(created, expected, "{name}: result");
        verify(name, &case, &h);
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_test_vectors() {
    for case in cases(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let input: Hero = serde_json::from_value(case["input"].clone()).unwrap();
        let h = harness(&case);

        let result = h.client.update_hero(&input).await;

        assert_raw(name, &case, result);
        verify(name, &case, &h);
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_test_vectors() {
    for case in cases(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();
        let h = harness(&case);

        let result = h.client.delete_hero(id).await;

        assert_raw(name, &case, result);
        verify(name, &case, &h);
    }
}
