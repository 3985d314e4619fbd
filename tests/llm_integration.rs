//! Integration tests for the OpenAI and Gemini clients using wiremock.

use skycast::LlmError;
use skycast::llm::{ChatModel, CompletionRequest, GeminiClient, KnowledgeModel, OpenAiClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

fn generated(parts: &[&str]) -> serde_json::Value {
    let parts: Vec<_> = parts.iter().map(|t| serde_json::json!({"text": t})).collect();
    serde_json::json!({"candidates": [{"content": {"role": "model", "parts": parts}}]})
}

#[tokio::test]
async fn test_openai_json_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o",
            "temperature": 0.0,
            "response_format": {"type": "json_object"},
            "messages": [
                {"role": "system", "content": "You are a precise JSON classifier."},
                {"role": "user", "content": "weather in Paris"}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(r#"{"intent": "weather", "city": "Paris"}"#)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("sk-test", &mock_server.uri(), "gpt-4o");
    let request = CompletionRequest::new("weather in Paris")
        .with_system("You are a precise JSON classifier.")
        .with_temperature(0.0)
        .json();

    let reply = client.complete(request).await.unwrap();
    assert_eq!(reply, r#"{"intent": "weather", "city": "Paris"}"#);
}

#[tokio::test]
async fn test_openai_with_model_switches_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({"model": "gpt-4o-mini"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Two sentences.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        OpenAiClient::with_base_url("sk-test", &mock_server.uri(), "gpt-4o").with_model("gpt-4o-mini");
    assert_eq!(client.model(), "gpt-4o-mini");

    let reply = client.complete(CompletionRequest::new("summarize")).await.unwrap();
    assert_eq!(reply, "Two sentences.");
}

#[tokio::test]
async fn test_openai_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("sk-test", &mock_server.uri(), "gpt-4o");
    let err = client.complete(CompletionRequest::new("hi")).await.unwrap_err();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_openai_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("sk-test", &mock_server.uri(), "gpt-4o");
    let err = client.complete(CompletionRequest::new("hi")).await.unwrap_err();
    assert_eq!(
        err,
        LlmError::Api {
            status: 500,
            message: "boom".to_string()
        }
    );
}

#[tokio::test]
async fn test_openai_empty_choices() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("sk-test", &mock_server.uri(), "gpt-4o");
    let err = client.complete(CompletionRequest::new("hi")).await.unwrap_err();
    assert_eq!(err, LlmError::EmptyResponse);
}

#[tokio::test]
async fn test_gemini_file_search_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "g-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": "How do cyclones form?"}]}],
            "tools": [{"fileSearch": {"fileSearchStoreNames": ["fileSearchStores/docs"]}}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(generated(&["Cyclones form ", "over warm water."])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("g-key", &mock_server.uri(), "gemini-test");
    let text = client
        .generate("How do cyclones form?", Some("fileSearchStores/docs"))
        .await
        .unwrap();
    assert_eq!(text, "Cyclones form over warm water.");
}

#[tokio::test]
async fn test_gemini_plain_request_has_no_tools() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generated(&["Hello!"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("g-key", &mock_server.uri(), "gemini-test");
    client.generate("hello", None).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("tools").is_none());
}

#[tokio::test]
async fn test_gemini_quota_error_in_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("g-key", &mock_server.uri(), "gemini-test");
    let err = client.generate("anything", None).await.unwrap_err();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_gemini_blank_candidate_is_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generated(&["  "])))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::with_base_url("g-key", &mock_server.uri(), "gemini-test");
    let err = client.generate("anything", None).await.unwrap_err();
    assert_eq!(err, LlmError::EmptyResponse);
}
