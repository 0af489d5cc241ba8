use std::sync::mpsc;
use std::time::Duration;

use ghostwriter_engine::{EngineConfig, EngineHandle, InsertDispatch, WorkflowEvent};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SELECTION: &str = "this selection is thirty chars";

fn page_html() -> String {
    format!(
        "<html><body><p>{}</p><textarea></textarea></body></html>",
        "a".repeat(150)
    )
}

fn recv(events: &mpsc::Receiver<WorkflowEvent>) -> WorkflowEvent {
    events
        .recv_timeout(Duration::from_secs(10))
        .expect("engine event")
}

#[test]
fn full_workflow_against_mock_servers() {
    // The runtime stays alive for the whole test; the mock servers run on
    // its worker threads while the engine drives its own runtime.
    let runtime = tokio::runtime::Runtime::new().expect("test runtime");
    let (page_server, provider_server) = runtime.block_on(async {
        let page_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/post"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(page_html(), "text/html; charset=utf-8"),
            )
            .mount(&page_server)
            .await;

        let provider_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [
                    {
                        "name": "models/gemini-2.0-flash",
                        "supportedGenerationMethods": ["generateContent"]
                    }
                ]
            })))
            .mount(&provider_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "happy to help, ping me" }] } }
                ]
            })))
            .mount(&provider_server)
            .await;

        (page_server, provider_server)
    });

    let mut config = EngineConfig::for_page(format!("{}/post", page_server.uri()));
    config.provider.base_url = provider_server.uri();
    config.inject_delay = Duration::from_millis(10);
    let (engine, events) = EngineHandle::new(config);

    match recv(&events) {
        WorkflowEvent::PageLoaded { result: Ok(meta) } => {
            assert_eq!(meta.byte_len, page_html().len() as u64);
        }
        other => panic!("expected page load, got {other:?}"),
    }

    // The declaratively loaded agent answers the first probe.
    engine.probe();
    assert_eq!(recv(&events), WorkflowEvent::ProbeFinished { alive: true });

    // After a navigation-style unload nothing answers until re-injection.
    engine.unload_agent();
    engine.probe();
    assert_eq!(recv(&events), WorkflowEvent::ProbeFinished { alive: false });

    engine.extract();
    match recv(&events) {
        WorkflowEvent::ExtractFinished { result: Err(message) } => {
            assert!(message.contains("unreachable"));
        }
        other => panic!("expected unreachable extract, got {other:?}"),
    }

    engine.inject_agent();
    assert_eq!(recv(&events), WorkflowEvent::AgentInjected { success: true });

    // Selection wins over the scanned paragraph.
    engine.set_selection(Some(SELECTION.to_string()));
    engine.extract();
    match recv(&events) {
        WorkflowEvent::ExtractFinished { result: Ok(scanned) } => {
            assert_eq!(scanned.text, SELECTION);
            assert_eq!(scanned.method.as_deref(), Some("highlight"));
        }
        other => panic!("expected extraction, got {other:?}"),
    }

    // Without a selection the paragraph is auto-detected.
    engine.set_selection(None);
    engine.extract();
    match recv(&events) {
        WorkflowEvent::ExtractFinished { result: Ok(scanned) } => {
            assert_eq!(scanned.method.as_deref(), Some("auto-detect"));
            assert_eq!(scanned.text.len(), 150);
        }
        other => panic!("expected extraction, got {other:?}"),
    }

    engine.generate("a post body", "casual", "secret-key");
    match recv(&events) {
        WorkflowEvent::GenerateFinished { result: Ok(reply) } => {
            assert_eq!(reply, "happy to help, ping me");
        }
        other => panic!("expected generation, got {other:?}"),
    }

    engine.insert("happy to help, ping me");
    match recv(&events) {
        WorkflowEvent::InsertFinished {
            dispatch: InsertDispatch::Delivered { method },
        } => assert_eq!(method.as_deref(), Some("textarea")),
        other => panic!("expected insertion, got {other:?}"),
    }
}

#[test]
fn page_load_failure_is_reported_and_fatal() {
    let runtime = tokio::runtime::Runtime::new().expect("test runtime");
    let page_server = runtime.block_on(async {
        let page_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&page_server)
            .await;
        page_server
    });

    let mut config = EngineConfig::for_page(format!("{}/gone", page_server.uri()));
    config.inject_delay = Duration::from_millis(10);
    let (_engine, events) = EngineHandle::new(config);

    match recv(&events) {
        WorkflowEvent::PageLoaded { result: Err(message) } => {
            assert!(message.contains("http status 404"));
        }
        other => panic!("expected load failure, got {other:?}"),
    }
}
