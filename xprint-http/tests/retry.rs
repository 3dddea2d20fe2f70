use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xprint_http::{HttpClient, HttpError, RequestOpts};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(&server.uri())
        .expect("mock base url")
        .with_backoff(Duration::from_millis(1))
}

#[tokio::test]
async fn decodes_json_and_sends_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/20"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200})))
        .expect(1)
        .mount(&server)
        .await;

    let got: Value = client_for(&server)
        .get_json("status/20", RequestOpts::default())
        .await
        .expect("json body");
    assert_eq!(got["code"], 200);
}

#[tokio::test]
async fn passes_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .and(query_param("url", "https://x.com/jack/status/20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"html": "<p>hi</p>"})))
        .expect(1)
        .mount(&server)
        .await;

    let got: Value = client_for(&server)
        .get_json(
            "oembed",
            RequestOpts {
                query: Some(vec![("url", "https://x.com/jack/status/20".into())]),
                ..Default::default()
            },
        )
        .await
        .expect("json body");
    assert_eq!(got["html"], "<p>hi</p>");
}

#[tokio::test]
async fn retries_server_errors_until_budget_is_spent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/1"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "busy"})))
        .expect(3)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .with_retries(2)
        .get_json::<Value>("status/1", RequestOpts::default())
        .await
        .expect_err("503 is exhausted");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    assert!(err.to_string().contains("busy"));
}

#[tokio::test]
async fn does_not_retry_client_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"code": 404, "message": "NOT_FOUND"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_json::<Value>("status/404", RequestOpts::default())
        .await
        .expect_err("404 fails immediately");
    assert_eq!(err.to_string(), "HTTP 404 Not Found: NOT_FOUND");
}

#[tokio::test]
async fn recovers_after_a_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/7"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let got: Value = client_for(&server)
        .get_json("status/7", RequestOpts::default())
        .await
        .expect("second attempt succeeds");
    assert_eq!(got["ok"], true);
}

#[tokio::test]
async fn reports_decode_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_json::<Value>("status/9", RequestOpts::default())
        .await
        .expect_err("body is not json");
    assert!(matches!(err, HttpError::Decode(_, ref snippet) if snippet == "not json"));
}
