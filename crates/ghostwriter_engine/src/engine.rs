use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use agent_logging::{agent_info, agent_warn};
use ghostwriter_page::{handle_request, AgentRequest, AgentResponse, PageDocument};

use crate::decode::decode_html;
use crate::fetch::{FetchSettings, HttpPageFetcher, PageFetcher};
use crate::provider::{GenerationClient, ProviderSettings};
use crate::types::{InsertDispatch, PageMeta, ScannedText, WorkflowEvent};

const AGENT_UNREACHABLE: &str = "page agent unreachable";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub page_url: String,
    pub fetch: FetchSettings,
    pub provider: ProviderSettings,
    /// Pause between injecting the agent and declaring its handler
    /// registered; the next message must not outrun the injection.
    pub inject_delay: Duration,
}

impl EngineConfig {
    pub fn for_page(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            fetch: FetchSettings::default(),
            provider: ProviderSettings::default(),
            inject_delay: Duration::from_millis(100),
        }
    }
}

enum EngineCommand {
    Probe,
    InjectAgent,
    Extract,
    Generate {
        text: String,
        tone: String,
        api_key: String,
    },
    Insert {
        text: String,
    },
    SetSelection(Option<String>),
    UnloadAgent,
}

/// Handle to the engine thread. Commands run strictly in the order they
/// were sent; each finished command emits at most one event.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> (Self, mpsc::Receiver<WorkflowEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_engine(config, cmd_rx, event_tx));

        (Self { cmd_tx }, event_rx)
    }

    pub fn probe(&self) {
        self.send(EngineCommand::Probe);
    }

    pub fn inject_agent(&self) {
        self.send(EngineCommand::InjectAgent);
    }

    pub fn extract(&self) {
        self.send(EngineCommand::Extract);
    }

    pub fn generate(
        &self,
        text: impl Into<String>,
        tone: impl Into<String>,
        api_key: impl Into<String>,
    ) {
        self.send(EngineCommand::Generate {
            text: text.into(),
            tone: tone.into(),
            api_key: api_key.into(),
        });
    }

    pub fn insert(&self, text: impl Into<String>) {
        self.send(EngineCommand::Insert { text: text.into() });
    }

    /// Mirrors the user selecting (or deselecting) text on the page.
    pub fn set_selection(&self, selection: Option<String>) {
        self.send(EngineCommand::SetSelection(selection));
    }

    /// Drops the page agent, as a navigation would.
    pub fn unload_agent(&self) {
        self.send(EngineCommand::UnloadAgent);
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

/// The loaded page and whether an agent is currently registered on it. The
/// page itself survives agent unload/reload, exactly like a real page
/// surviving a content-script re-injection.
struct PageHost {
    page: PageDocument,
    agent_loaded: bool,
}

impl PageHost {
    fn new(page: PageDocument) -> Self {
        Self {
            page,
            agent_loaded: true,
        }
    }

    fn deliver(&mut self, request: AgentRequest) -> Option<AgentResponse> {
        if !self.agent_loaded {
            return None;
        }
        Some(handle_request(&mut self.page, request))
    }
}

fn run_engine(
    config: EngineConfig,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<WorkflowEvent>,
) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");

    let fetcher = HttpPageFetcher::new(config.fetch.clone());
    let mut host = match runtime.block_on(load_page(&fetcher, &config.page_url)) {
        Ok((page, meta)) => {
            agent_info!(
                "Loaded page {} ({} bytes, {})",
                meta.final_url,
                meta.byte_len,
                meta.encoding
            );
            let _ = event_tx.send(WorkflowEvent::PageLoaded { result: Ok(meta) });
            PageHost::new(page)
        }
        Err(message) => {
            agent_warn!("Failed to load page {}: {}", config.page_url, message);
            let _ = event_tx.send(WorkflowEvent::PageLoaded {
                result: Err(message),
            });
            return;
        }
    };

    let client = match GenerationClient::new(config.provider.clone()) {
        Ok(client) => client,
        Err(err) => {
            agent_warn!("Failed to build provider client: {}", err);
            return;
        }
    };

    while let Ok(command) = cmd_rx.recv() {
        let event =
            runtime.block_on(run_command(&mut host, &client, config.inject_delay, command));
        if let Some(event) = event {
            if event_tx.send(event).is_err() {
                break;
            }
        }
    }
}

async fn load_page(
    fetcher: &HttpPageFetcher,
    url: &str,
) -> Result<(PageDocument, PageMeta), String> {
    let output = fetcher.fetch(url).await.map_err(|err| err.to_string())?;
    let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref())
        .map_err(|err| err.to_string())?;
    let meta = PageMeta {
        final_url: output.metadata.final_url,
        encoding: decoded.encoding_label,
        byte_len: output.metadata.byte_len,
    };
    Ok((PageDocument::parse(&decoded.html), meta))
}

async fn run_command(
    host: &mut PageHost,
    client: &GenerationClient,
    inject_delay: Duration,
    command: EngineCommand,
) -> Option<WorkflowEvent> {
    match command {
        EngineCommand::Probe => {
            let alive = host
                .deliver(AgentRequest::Ping)
                .is_some_and(|response| response.success);
            Some(WorkflowEvent::ProbeFinished { alive })
        }
        EngineCommand::InjectAgent => {
            // The freshly injected handler needs a beat to register before
            // the next message is sent.
            tokio::time::sleep(inject_delay).await;
            host.agent_loaded = true;
            agent_info!("Page agent re-injected");
            Some(WorkflowEvent::AgentInjected { success: true })
        }
        EngineCommand::Extract => {
            let result = match host.deliver(AgentRequest::ScanPage) {
                None => Err(AGENT_UNREACHABLE.to_string()),
                Some(response) if response.success => match response.text {
                    Some(text) => Ok(ScannedText {
                        text,
                        method: response.method,
                    }),
                    None => Err("scan returned no text".to_string()),
                },
                Some(response) => {
                    Err(response.error.unwrap_or_else(|| "scan failed".to_string()))
                }
            };
            Some(WorkflowEvent::ExtractFinished { result })
        }
        EngineCommand::Generate {
            text,
            tone,
            api_key,
        } => {
            let result = client
                .draft_reply(&api_key, &text, &tone)
                .await
                .map_err(|err| err.to_string());
            Some(WorkflowEvent::GenerateFinished { result })
        }
        EngineCommand::Insert { text } => {
            let dispatch = match host.deliver(AgentRequest::Ghostwrite { text }) {
                None => InsertDispatch::Unreachable,
                Some(response) if response.success => InsertDispatch::Delivered {
                    method: response.method,
                },
                Some(response) => InsertDispatch::Rejected(
                    response
                        .error
                        .unwrap_or_else(|| "insertion failed".to_string()),
                ),
            };
            Some(WorkflowEvent::InsertFinished { dispatch })
        }
        EngineCommand::SetSelection(selection) => {
            host.page.set_selection(selection);
            None
        }
        EngineCommand::UnloadAgent => {
            host.agent_loaded = false;
            None
        }
    }
}
