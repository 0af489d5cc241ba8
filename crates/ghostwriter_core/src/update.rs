use crate::{
    truncate::{truncate_post_text, truncate_reply},
    AppState, Effect, Flash, InjectionScreen, InsertDelivery, Msg, Phase, SignatureScreen,
    WorkflowError,
};

/// Pure update function over the default injection screen.
pub fn update(state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    update_with_screen(state, msg, &SignatureScreen)
}

/// Pure update function: applies a message to state and returns any effects.
/// The screen decides whether scanned text may reach the provider.
pub fn update_with_screen(
    mut state: AppState,
    msg: Msg,
    screen: &dyn InjectionScreen,
) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PrefsLoaded(prefs) => {
            if !prefs.api_key.is_empty() {
                state.set_api_key(prefs.api_key);
            }
            if !prefs.tone.is_empty() {
                state.set_tone(prefs.tone);
            }
            // A persisted reply reopens the popup in action mode.
            if let Some(reply) = prefs.last_reply.filter(|reply| !reply.is_empty()) {
                state.set_reply(Some(reply));
                state.set_phase(Phase::Ready);
            }
            Vec::new()
        }
        Msg::ApiKeyEdited(api_key) => {
            state.set_api_key(api_key);
            Vec::new()
        }
        Msg::ToneSelected(tone) => {
            state.set_tone(tone);
            Vec::new()
        }
        Msg::GenerateClicked => {
            if state.phase() != Phase::Idle {
                return (state, Vec::new());
            }
            if state.api_key().trim().is_empty() {
                state.set_error(WorkflowError::MissingApiKey);
                return (state, Vec::new());
            }
            state.clear_error();
            state.clear_flash();
            state.set_phase(Phase::Connecting { retried: false });
            vec![
                Effect::SaveSettings {
                    api_key: state.api_key().to_string(),
                    tone: state.tone().to_string(),
                },
                Effect::Probe,
            ]
        }
        Msg::ProbeFinished { alive } => match state.phase() {
            Phase::Connecting { retried } => {
                if alive {
                    state.set_phase(Phase::Extracting);
                    vec![Effect::Extract]
                } else if !retried {
                    state.set_phase(Phase::Connecting { retried: true });
                    vec![Effect::InjectAgent]
                } else {
                    // Injection already ran; extraction proceeds regardless.
                    state.set_phase(Phase::Extracting);
                    vec![Effect::Extract]
                }
            }
            _ => Vec::new(),
        },
        Msg::AgentInjected { .. } => match state.phase() {
            // One attempt only: move on whether or not injection took.
            Phase::Connecting { .. } => {
                state.set_phase(Phase::Extracting);
                vec![Effect::Extract]
            }
            Phase::Inserting { .. } => match state.reply() {
                Some(reply) => vec![Effect::DeliverInsertion {
                    text: reply.to_string(),
                }],
                None => {
                    state.set_phase(Phase::Idle);
                    Vec::new()
                }
            },
            _ => Vec::new(),
        },
        Msg::ExtractFinished(result) => {
            if state.phase() != Phase::Extracting {
                return (state, Vec::new());
            }
            match result {
                Ok(scanned) => match screen.flag(&scanned.text) {
                    Some(phrase) => {
                        state.set_phase(Phase::Idle);
                        state.set_error(WorkflowError::Blocked { phrase });
                        Vec::new()
                    }
                    None => {
                        state.set_phase(Phase::Generating);
                        vec![Effect::Generate {
                            text: truncate_post_text(&scanned.text),
                            tone: state.tone().to_string(),
                            api_key: state.api_key().to_string(),
                        }]
                    }
                },
                Err(_) => {
                    state.set_phase(Phase::Idle);
                    state.set_error(WorkflowError::NoTextFound);
                    Vec::new()
                }
            }
        }
        Msg::GenerateFinished(result) => {
            if state.phase() != Phase::Generating {
                return (state, Vec::new());
            }
            match result {
                Ok(raw) => {
                    let reply = truncate_reply(&raw);
                    state.set_reply(Some(reply.clone()));
                    state.set_phase(Phase::Ready);
                    vec![Effect::SaveReply { reply }]
                }
                Err(message) => {
                    state.set_phase(Phase::Idle);
                    state.set_error(WorkflowError::GenerationFailed(message));
                    Vec::new()
                }
            }
        }
        Msg::CopyClicked => match (state.phase(), state.reply()) {
            (Phase::Ready, Some(reply)) => {
                let text = reply.to_string();
                state.set_flash(Flash::Copied);
                vec![Effect::CopyReply { text }]
            }
            _ => Vec::new(),
        },
        Msg::InsertClicked => match (state.phase(), state.reply()) {
            (Phase::Ready, Some(reply)) => {
                let text = reply.to_string();
                state.clear_error();
                state.set_phase(Phase::Inserting { retried: false });
                vec![Effect::DeliverInsertion { text }]
            }
            _ => Vec::new(),
        },
        Msg::InsertFinished(delivery) => match state.phase() {
            Phase::Inserting { retried } => match delivery {
                InsertDelivery::Delivered => {
                    state.set_phase(Phase::Ready);
                    state.set_flash(Flash::Inserted);
                    Vec::new()
                }
                InsertDelivery::Unreachable if !retried => {
                    state.set_phase(Phase::Inserting { retried: true });
                    vec![Effect::InjectAgent]
                }
                InsertDelivery::Unreachable => {
                    state.set_phase(Phase::Ready);
                    state.set_error(WorkflowError::InsertFailed(
                        "the page could not be reached".to_string(),
                    ));
                    Vec::new()
                }
                InsertDelivery::Rejected(message) => {
                    state.set_phase(Phase::Ready);
                    state.set_error(WorkflowError::InsertFailed(message));
                    Vec::new()
                }
            },
            _ => Vec::new(),
        },
        Msg::ResetClicked => {
            if state.phase() != Phase::Ready {
                return (state, Vec::new());
            }
            state.set_reply(None);
            state.clear_error();
            state.clear_flash();
            state.set_phase(Phase::Idle);
            vec![Effect::ClearSavedReply]
        }
        Msg::Tick => {
            state.clear_flash();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
