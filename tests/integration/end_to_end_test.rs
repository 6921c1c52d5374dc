//! End-to-end workflow tests
//!
//! Configuration file on disk → pipeline run against a mock server → CSV.

use api_harvest::config::{load_config, ConfigError};
use api_harvest::error::PipelineError;
use api_harvest::formatter::TabularSerializer;
use api_harvest::pipeline::harvest;

use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes `content` as `config.yaml` in `dir`.
fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).expect("Failed to write config");
    config_path
}

async fn blog_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("userId", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Hello, world", "userId": 1},
            {"id": 2, "title": "Second \"take\"", "userId": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    for (post, comments) in [
        (1, json!([{"email": "a@example.com"}, {"email": "b@example.com"}])),
        (2, json!([{"email": "c@example.com"}])),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/posts/{}/comments", post)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": comments })))
            .expect(1)
            .mount(&server)
            .await;
    }

    server
}

#[tokio::test]
async fn test_config_file_to_csv() {
    let server = blog_server().await;
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("report.csv");

    let config_path = write_config(
        &temp_dir,
        &format!(
            r#"
output: {output}
timeout: 5
apis:
  - id: posts
    name: Posts of user 1
    method: get
    host: {host}
    url: /posts
    parameters:
      userId: 1
    mapping:
      - source: id
        target: post_id
      - source: title
        target: title
  - id: comments
    method: GET
    host: {host}
    url: /posts/{{{{posts.data[*].id}}}}/comments
    previousApiId: posts
    mapping:
      - from: data[*].email
        to: email
"#,
            output = output.display(),
            host = server.uri()
        ),
    );

    let config = load_config(&config_path).unwrap();
    assert_eq!(config.output, output);

    let records = harvest(&config).await.unwrap();
    let csv = TabularSerializer::new(config.delimiter).serialize(&records);
    fs::write(&config.output, &csv).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "post_id,title,email\n\
         1,\"Hello, world\",\n\
         2,\"Second \"\"take\"\"\",\n\
         ,,a@example.com\n\
         ,,b@example.com\n\
         ,,c@example.com"
    );
}

#[tokio::test]
async fn test_semicolon_delimiter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"name": "a;b", "n": 1}]})),
        )
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        &format!(
            r#"
delimiter: ";"
apis:
  - id: tags
    method: GET
    url: {host}/tags
    mapping:
      - {{ source: name, target: name }}
      - {{ source: n, target: count }}
"#,
            host = server.uri()
        ),
    );

    let config = load_config(&config_path).unwrap();
    let records = harvest(&config).await.unwrap();

    assert_eq!(
        TabularSerializer::new(config.delimiter).serialize(&records),
        "name;count\n\"a;b\";1"
    );
}

#[tokio::test]
async fn test_invalid_config_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        &format!(
            r#"
apis:
  - id: a
    method: GET
    host: {host}
    url: /a
    mapping: []
  - id: a
    method: GET
    host: {host}
    url: /b
    mapping: []
"#,
            host = server.uri()
        ),
    );

    let err: PipelineError = load_config(&config_path).unwrap_err().into();
    assert_eq!(
        err,
        PipelineError::Config(ConfigError::DuplicateId("a".to_string()))
    );
}

#[tokio::test]
async fn test_unreachable_host_reports_network_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        r#"
apis:
  - id: nowhere
    method: GET
    host: http://127.0.0.1:9
    url: /
    mapping: []
"#,
    );

    let config = load_config(&config_path).unwrap();
    let err = harvest(&config).await.unwrap_err();

    assert_eq!(err.api_id(), Some("nowhere"));
    assert!(err.to_string().starts_with("API 'nowhere' failed"));
}
