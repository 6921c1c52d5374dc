//! Chained execution against a live HTTP server
//!
//! These tests verify fan-out ordering, request counts, placeholder
//! substitution on the wire and abort-on-failure behavior.

use super::{api, orchestrator};
use api_harvest::error::PipelineError;
use api_harvest::executor::{ExecutionConfig, RequestError};
use api_harvest::models::{ApiDefinition, HttpMethod};
use api_harvest::pipeline::ResultStore;

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value, expected: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

async fn received_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_fan_out_requests_follow_array_order() {
    let server = MockServer::start().await;
    let host = server.uri();

    mount_json(
        &server,
        "/users",
        json!({"data": [{"id": 1}, {"id": 2}, {"id": 3}]}),
        1,
    )
    .await;
    for id in 1..=3 {
        mount_json(
            &server,
            &format!("/users/{}/posts", id),
            json!({"data": [{"title": format!("post of {}", id)}]}),
            1,
        )
        .await;
    }

    let apis = vec![
        api("users", &host, "/users").with_mapping("id", "user_id"),
        api("posts", &host, "/users/{{users.data[*].id}}/posts")
            .depends_on("users")
            .with_mapping("data[*].title", "title"),
    ];

    let records = orchestrator(&ExecutionConfig::default())
        .run(&apis)
        .await
        .unwrap();

    assert_eq!(
        received_paths(&server).await,
        vec!["/users", "/users/1/posts", "/users/2/posts", "/users/3/posts"]
    );

    let titles: Vec<_> = records[3..].iter().map(|r| r.get("title").cloned()).collect();
    assert_eq!(
        titles,
        vec![
            Some(json!("post of 1")),
            Some(json!("post of 2")),
            Some(json!("post of 3"))
        ]
    );
}

#[tokio::test]
async fn test_fan_out_element_missing_field_keeps_placeholder() {
    let server = MockServer::start().await;
    let host = server.uri();

    mount_json(
        &server,
        "/users",
        json!({"data": [{"id": 1}, {"name": "no id"}, {"id": 3}]}),
        1,
    )
    .await;
    mount_json(&server, "/users/1/x", json!({"data": {"ok": 1}}), 1).await;
    mount_json(&server, "/users/3/x", json!({"data": {"ok": 3}}), 1).await;
    mount_json(&server, "/users//x", json!({}), 0).await;
    // Anything else, including the unsubstituted placeholder path.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": 0}})))
        .with_priority(10)
        .expect(1)
        .mount(&server)
        .await;

    let apis = vec![
        api("users", &host, "/users"),
        api("details", &host, "/users/{{users.data[*].id}}/x")
            .depends_on("users")
            .with_mapping("ok", "ok"),
    ];

    let records = orchestrator(&ExecutionConfig::default())
        .run(&apis)
        .await
        .unwrap();

    let paths = received_paths(&server).await;
    assert_eq!(paths.len(), 4);
    assert_eq!(paths[1], "/users/1/x");
    assert!(paths[2].contains("users.data[*].id"), "got {}", paths[2]);
    assert_eq!(paths[3], "/users/3/x");

    let ok: Vec<_> = records[3..].iter().map(|r| r.get("ok").cloned()).collect();
    assert_eq!(ok, vec![Some(json!(1)), Some(json!(0)), Some(json!(3))]);
}

#[tokio::test]
async fn test_substitution_in_parameters_headers_and_body() {
    let server = MockServer::start().await;
    let host = server.uri();

    mount_json(&server, "/session", json!({"data": {"token": "abc", "team": 7}}), 1).await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(query_param("team", "7"))
        .and(header("X-Client", "harvest"))
        .and(body_json(json!({"token": "abc", "limit": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"hit": "x"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let apis = vec![
        api("session", &host, "/session"),
        ApiDefinition::new("search", HttpMethod::POST, &host, "/search")
            .depends_on("session")
            .with_parameter("team", "{{session.data.team}}")
            .with_header("X-Client", "harvest")
            .with_body(json!({"token": "{{session.data.token}}", "limit": 10}))
            .with_mapping("hit", "hit"),
    ];

    let records = orchestrator(&ExecutionConfig::default())
        .run(&apis)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].get("hit"), Some(&json!("x")));
}

#[tokio::test]
async fn test_failure_names_the_definition_and_stops_the_run() {
    let server = MockServer::start().await;
    let host = server.uri();

    mount_json(&server, "/users", json!({"data": [{"id": 1}, {"id": 2}, {"id": 3}]}), 1).await;
    mount_json(&server, "/users/1", json!({"data": {"name": "Ada"}}), 1).await;
    Mock::given(method("GET"))
        .and(path("/users/2"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(&server, "/users/3", json!({}), 0).await;
    mount_json(&server, "/audit", json!({}), 0).await;

    let apis = vec![
        api("users", &host, "/users").with_mapping("id", "id"),
        api("details", &host, "/users/{{users.data[*].id}}")
            .depends_on("users")
            .with_mapping("name", "name"),
        api("audit", &host, "/audit"),
    ];

    let mut store = ResultStore::new();
    let mut records = Vec::new();
    let err = orchestrator(&ExecutionConfig::default())
        .run_into(&apis, &mut store, &mut records)
        .await
        .unwrap_err();

    assert_eq!(err.api_id(), Some("details"));
    assert_eq!(
        err,
        PipelineError::Request {
            api_id: "details".to_string(),
            iteration: Some(1),
            source: RequestError::HttpStatus {
                status: 404,
                body: "not found".to_string()
            },
        }
    );
    assert_eq!(records.len(), 4);
    assert!(store.contains("details"));
}

#[tokio::test]
async fn test_store_keeps_first_fan_out_response() {
    let server = MockServer::start().await;
    let host = server.uri();

    mount_json(&server, "/ids", json!({"data": ["a", "b"]}), 1).await;
    mount_json(&server, "/items/a", json!({"data": {"id": "a"}}), 1).await;
    mount_json(&server, "/items/b", json!({"data": {"id": "b"}}), 1).await;
    mount_json(&server, "/last", json!({"data": []}), 1).await;

    let apis = vec![
        api("ids", &host, "/ids"),
        api("items", &host, "/items/{{ids.data[*]}}").depends_on("ids"),
        api("last", &host, "/last"),
    ];

    let mut store = ResultStore::new();
    let mut records = Vec::new();
    orchestrator(&ExecutionConfig::default())
        .run_into(&apis, &mut store, &mut records)
        .await
        .unwrap();

    assert_eq!(store.get("items"), Some(&json!({"data": {"id": "a"}})));
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_text_response_is_mapped_whole() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/motd"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello, world"))
        .mount(&server)
        .await;

    let apis = vec![api("motd", &server.uri(), "/motd").with_mapping("data[*]", "message")];

    let records = orchestrator(&ExecutionConfig::default())
        .run(&apis)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("message"), Some(&json!("hello, world")));
}

#[tokio::test]
async fn test_configured_timeout_aborts_slow_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let apis = vec![api("slow", &server.uri(), "/slow")];

    let err = orchestrator(&ExecutionConfig::with_timeout(1))
        .run(&apis)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Request {
            source: RequestError::Timeout,
            ..
        }
    ));
}
