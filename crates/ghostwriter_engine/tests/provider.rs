use ghostwriter_engine::{GenerationClient, ProviderError, ProviderSettings};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GenerationClient {
    let settings = ProviderSettings {
        base_url: server.uri(),
        ..ProviderSettings::default()
    };
    GenerationClient::new(settings).expect("client")
}

#[tokio::test]
async fn model_resolution_prefers_the_fast_tier() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("x-goog-api-key", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {
                    "name": "models/gemini-2.0-pro",
                    "supportedGenerationMethods": ["generateContent"]
                },
                {
                    "name": "models/gemini-2.0-flash",
                    "supportedGenerationMethods": ["generateContent"]
                }
            ]
        })))
        .mount(&server)
        .await;

    let model = client_for(&server)
        .resolve_model("secret-key")
        .await
        .expect("model");
    assert_eq!(model, "gemini-2.0-flash");
}

#[tokio::test]
async fn model_resolution_falls_back_to_any_generating_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {
                    "name": "models/gemini-2.0-flash",
                    "supportedGenerationMethods": ["countTokens"]
                },
                {
                    "name": "models/gemini-2.0-pro",
                    "supportedGenerationMethods": ["generateContent"]
                }
            ]
        })))
        .mount(&server)
        .await;

    let model = client_for(&server).resolve_model("k").await.expect("model");
    assert_eq!(model, "gemini-2.0-pro");
}

#[tokio::test]
async fn model_resolution_fails_when_nothing_generates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {
                    "name": "models/embedding-001",
                    "supportedGenerationMethods": ["embedContent"]
                }
            ]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).resolve_model("k").await.unwrap_err();
    assert!(matches!(err, ProviderError::NoUsableModel));
}

#[tokio::test]
async fn rejected_credential_is_reported_as_invalid_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).resolve_model("bad").await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidApiKey));
}

#[tokio::test]
async fn generation_returns_the_trimmed_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "secret-key"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {
                    "content": {
                        "parts": [{ "text": "  hey, sounds like a great project!  " }]
                    }
                }
            ]
        })))
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .generate("secret-key", "gemini-2.0-flash", "prompt")
        .await
        .expect("reply");
    assert_eq!(reply, "hey, sounds like a great project!");
}

#[tokio::test]
async fn provider_error_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "quota exceeded" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate("k", "gemini-2.0-flash", "prompt")
        .await
        .unwrap_err();
    match err {
        ProviderError::Api(message) => assert_eq!(message, "quota exceeded"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_candidate_list_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate("k", "gemini-2.0-flash", "prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse));
}
