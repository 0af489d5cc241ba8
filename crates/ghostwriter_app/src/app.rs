use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use agent_logging::{agent_info, get_workflow_seq, set_workflow_seq};
use anyhow::{bail, Context};
use ghostwriter_core::{update, AppState, Msg};
use ghostwriter_engine::{EngineConfig, EngineHandle, WorkflowEvent};
use url::Url;

use crate::cli::Args;
use crate::effects::{self, EffectRunner};
use crate::{persistence, render};

/// Interval at which transient acknowledgments expire.
const TICK_INTERVAL: Duration = Duration::from_secs(2);

const STARTUP_TIMEOUT: Duration = Duration::from_secs(60);

/// One unit of input for the popup loop: a state-machine message, or a
/// page-side action that bypasses the popup entirely.
#[derive(Debug, PartialEq)]
pub(crate) enum AppEvent {
    Msg(Msg),
    Select(Option<String>),
    Unload,
    Quit,
}

pub(crate) fn run(args: Args) -> anyhow::Result<()> {
    let url = Url::parse(&args.url).context("invalid page url")?;
    let prefs_path = args.prefs.clone().unwrap_or_else(persistence::default_path);

    let (engine, event_rx) = EngineHandle::new(EngineConfig::for_page(url.as_str()));
    match event_rx.recv_timeout(STARTUP_TIMEOUT) {
        Ok(WorkflowEvent::PageLoaded { result: Ok(meta) }) => {
            agent_info!("Operating on {}", meta.final_url);
            println!("Loaded {} ({} bytes)", meta.final_url, meta.byte_len);
        }
        Ok(WorkflowEvent::PageLoaded {
            result: Err(message),
        }) => bail!("could not load page: {message}"),
        Ok(other) => bail!("unexpected engine event during startup: {other:?}"),
        Err(err) => bail!("engine did not come up: {err}"),
    }

    if args.select.is_some() {
        engine.set_selection(args.select.clone());
    }

    let (tx, rx) = mpsc::channel();
    effects::spawn_event_bridge(event_rx, tx.clone());
    spawn_stdin_reader(tx.clone());
    spawn_ticker(tx);

    let runner = EffectRunner::new(engine.clone(), prefs_path.clone());
    let mut state = AppState::new();

    // Popup-open sequence: restore persisted preferences before any input.
    let (seeded, startup_effects) = update(
        std::mem::take(&mut state),
        Msg::PrefsLoaded(persistence::load_prefs(&prefs_path)),
    );
    state = seeded;
    runner.run(startup_effects);
    state.consume_dirty();
    render::draw(&state.view());

    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Msg(msg) => {
                if matches!(msg, Msg::GenerateClicked) {
                    set_workflow_seq(get_workflow_seq() + 1);
                    agent_info!("Workflow {} triggered", get_workflow_seq());
                }
                let (next, effects) = update(std::mem::take(&mut state), msg);
                state = next;
                runner.run(effects);
                if state.consume_dirty() {
                    render::draw(&state.view());
                }
            }
            AppEvent::Select(selection) => {
                engine.set_selection(selection);
                println!("(selection updated)");
            }
            AppEvent::Unload => {
                engine.unload_agent();
                println!("(page agent unloaded)");
            }
            AppEvent::Quit => break,
        }
    }

    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    let _ = tx.send(AppEvent::Quit);
                    break;
                }
                Ok(_) => {
                    let Some(event) = parse_command(line.trim()) else {
                        println!(
                            "(unknown command; try: generate, copy, insert, reset, \
                             tone <name>, key <value>, select <text>, unselect, quit)"
                        );
                        continue;
                    };
                    let quitting = matches!(event, AppEvent::Quit);
                    if tx.send(event).is_err() || quitting {
                        break;
                    }
                }
            }
        }
    });
}

fn spawn_ticker(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while tx.send(AppEvent::Msg(Msg::Tick)).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });
}

fn parse_command(line: &str) -> Option<AppEvent> {
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    match command {
        "" => Some(AppEvent::Msg(Msg::NoOp)),
        "generate" | "g" => Some(AppEvent::Msg(Msg::GenerateClicked)),
        "copy" => Some(AppEvent::Msg(Msg::CopyClicked)),
        "insert" | "i" => Some(AppEvent::Msg(Msg::InsertClicked)),
        "reset" => Some(AppEvent::Msg(Msg::ResetClicked)),
        "tone" if !rest.is_empty() => Some(AppEvent::Msg(Msg::ToneSelected(rest.to_string()))),
        "key" if !rest.is_empty() => Some(AppEvent::Msg(Msg::ApiKeyEdited(rest.to_string()))),
        "select" if !rest.is_empty() => Some(AppEvent::Select(Some(rest.to_string()))),
        "unselect" => Some(AppEvent::Select(None)),
        "unload" => Some(AppEvent::Unload),
        "quit" | "q" => Some(AppEvent::Quit),
        _ => None,
    }
}
