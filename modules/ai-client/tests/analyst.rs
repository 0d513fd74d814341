use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ai_client::ContractAnalyst;

#[tokio::test]
async fn returns_the_assistant_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Summary: a supply agreement." },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyst = ContractAnalyst::new("test-key", None).with_base_url(&server.uri());
    let analysis = analyst
        .analyze("Supply agreement, expires 2025-10-05.")
        .await
        .unwrap();

    assert_eq!(analysis, "Summary: a supply agreement.");
}

#[tokio::test]
async fn model_override_is_sent_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "model": "gpt-4o" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyst = ContractAnalyst::new("test-key", Some("gpt-4o")).with_base_url(&server.uri());
    analyst.analyze("text").await.unwrap();
}

#[tokio::test]
async fn api_error_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided" }
        })))
        .mount(&server)
        .await;

    let analyst = ContractAnalyst::new("bad-key", None).with_base_url(&server.uri());
    let err = analyst.analyze("text").await.unwrap_err();

    assert!(err.to_string().contains("401"));
}
