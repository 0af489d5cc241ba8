use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use agent_logging::agent_info;
use ghostwriter_core::{Effect, InsertDelivery, Msg, ScanMethod, ScannedText};
use ghostwriter_engine::{EngineHandle, InsertDispatch, WorkflowEvent};

use crate::app::AppEvent;
use crate::{persistence, render};

/// Executes effects from the state machine: engine commands for everything
/// page- or provider-facing, direct writes for the preference store.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    prefs_path: PathBuf,
}

impl EffectRunner {
    pub(crate) fn new(engine: EngineHandle, prefs_path: PathBuf) -> Self {
        Self { engine, prefs_path }
    }

    pub(crate) fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SaveSettings { api_key, tone } => {
                    persistence::save_settings(&self.prefs_path, &api_key, &tone);
                }
                Effect::Probe => self.engine.probe(),
                Effect::InjectAgent => self.engine.inject_agent(),
                Effect::Extract => self.engine.extract(),
                Effect::Generate {
                    text,
                    tone,
                    api_key,
                } => {
                    agent_info!("Requesting completion, post_len={}", text.len());
                    self.engine.generate(text, tone, api_key);
                }
                Effect::DeliverInsertion { text } => self.engine.insert(text),
                Effect::SaveReply { reply } => {
                    persistence::save_reply(&self.prefs_path, &reply);
                }
                Effect::ClearSavedReply => persistence::clear_reply(&self.prefs_path),
                Effect::CopyReply { text } => render::print_copied(&text),
            }
        }
    }
}

/// Bridges engine events into popup messages on a background thread.
pub(crate) fn spawn_event_bridge(
    event_rx: mpsc::Receiver<WorkflowEvent>,
    tx: mpsc::Sender<AppEvent>,
) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            let Some(msg) = map_event(event) else { continue };
            if tx.send(AppEvent::Msg(msg)).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: WorkflowEvent) -> Option<Msg> {
    match event {
        // The startup sequence consumes page load directly.
        WorkflowEvent::PageLoaded { .. } => None,
        WorkflowEvent::ProbeFinished { alive } => Some(Msg::ProbeFinished { alive }),
        WorkflowEvent::AgentInjected { success } => Some(Msg::AgentInjected { success }),
        WorkflowEvent::ExtractFinished { result } => {
            Some(Msg::ExtractFinished(result.map(map_scanned)))
        }
        WorkflowEvent::GenerateFinished { result } => Some(Msg::GenerateFinished(result)),
        WorkflowEvent::InsertFinished { dispatch } => {
            Some(Msg::InsertFinished(map_dispatch(dispatch)))
        }
    }
}

fn map_scanned(scanned: ghostwriter_engine::ScannedText) -> ScannedText {
    let method = match scanned.method.as_deref() {
        Some("highlight") => ScanMethod::Highlight,
        _ => ScanMethod::AutoDetect,
    };
    ScannedText {
        text: scanned.text,
        method,
    }
}

fn map_dispatch(dispatch: InsertDispatch) -> InsertDelivery {
    match dispatch {
        InsertDispatch::Delivered { .. } => InsertDelivery::Delivered,
        InsertDispatch::Rejected(message) => InsertDelivery::Rejected(message),
        InsertDispatch::Unreachable => InsertDelivery::Unreachable,
    }
}
