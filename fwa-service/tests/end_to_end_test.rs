//! Full stack: real listener, OpenAI provider, stubbed completion API.

mod common;

use common::TestApp;
use fwa_service::config::FwaConfig;
use fwa_service::startup::Application;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(vars: &[(&str, String)]) -> FwaConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    FwaConfig::from_lookup(CoreConfig { port: 0 }, |key| vars.get(key).cloned())
        .expect("Failed to build config")
}

async fn spawn(config: FwaConfig) -> TestApp {
    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    TestApp::run(app, None).await
}

#[tokio::test]
async fn analysis_flows_through_openai_provider() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-e2e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": "HIGH risk: excessive imaging frequency" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 6 }
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = spawn(config(&[
        ("OPENAI_API_KEY", "sk-e2e".to_string()),
        ("OPENAI_BASE_URL", format!("{}/v1", upstream.uri())),
    ]))
    .await;

    let response = reqwest::Client::new()
        .post(app.url("/analyze-fraud"))
        .json(&json!({ "text": "Patient billed for 50 consecutive daily MRI scans" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({
            "input_text": "Patient billed for 50 consecutive daily MRI scans",
            "analysis": "HIGH risk: excessive imaging frequency",
            "status": "success"
        })
    );
}

#[tokio::test]
async fn upstream_rejection_is_not_retried() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached" }
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = spawn(config(&[
        ("OPENAI_API_KEY", "sk-e2e".to_string()),
        ("OPENAI_BASE_URL", upstream.uri()),
    ]))
    .await;

    let response = reqwest::Client::new()
        .post(app.url("/analyze-fraud"))
        .json(&json!({ "text": "Lab panel ordered daily" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["detail"],
        "Error analyzing text: Rate limited: Rate limit reached"
    );
}

#[tokio::test]
async fn missing_key_fails_without_contacting_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = spawn(config(&[("OPENAI_BASE_URL", upstream.uri())])).await;

    let response = reqwest::Client::new()
        .post(app.url("/analyze-fraud"))
        .json(&json!({ "text": "Routine visit" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["detail"], "OpenAI API key not configured");
}
