use std::fs;
use std::path::{Path, PathBuf};

use agent_logging::{agent_error, agent_info, agent_warn};
use chrono::Utc;
use ghostwriter_core::PrefsSnapshot;
use ghostwriter_engine::AtomicFileWriter;
use serde::{Deserialize, Serialize};

const PREFS_FILENAME: &str = ".ghostwriter_prefs.ron";

/// On-disk shape of the preference store. Flat key/value bag with
/// last-write-wins semantics; nothing here is synchronized off the device.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedPrefs {
    api_key: String,
    last_tone: String,
    last_reply: Option<String>,
    saved_utc: Option<String>,
}

pub(crate) fn default_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(PREFS_FILENAME)
}

/// Loads preferences for the popup-open sequence. Missing or unreadable
/// files degrade to defaults; a broken store never blocks the popup.
pub(crate) fn load_prefs(path: &Path) -> PrefsSnapshot {
    let prefs = read_prefs(path);
    PrefsSnapshot {
        api_key: prefs.api_key,
        tone: prefs.last_tone,
        last_reply: prefs.last_reply,
    }
}

pub(crate) fn save_settings(path: &Path, api_key: &str, tone: &str) {
    let mut prefs = read_prefs(path);
    prefs.api_key = api_key.to_string();
    prefs.last_tone = tone.to_string();
    write_prefs(path, prefs);
}

pub(crate) fn save_reply(path: &Path, reply: &str) {
    let mut prefs = read_prefs(path);
    prefs.last_reply = Some(reply.to_string());
    write_prefs(path, prefs);
}

pub(crate) fn clear_reply(path: &Path) {
    let mut prefs = read_prefs(path);
    if prefs.last_reply.take().is_some() {
        write_prefs(path, prefs);
    }
}

fn read_prefs(path: &Path) -> PersistedPrefs {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return PersistedPrefs::default();
        }
        Err(err) => {
            agent_warn!("Failed to read preferences from {:?}: {}", path, err);
            return PersistedPrefs::default();
        }
    };

    match ron::from_str(&content) {
        Ok(prefs) => {
            agent_info!("Loaded preferences from {:?}", path);
            prefs
        }
        Err(err) => {
            agent_warn!("Failed to parse preferences from {:?}: {}", path, err);
            PersistedPrefs::default()
        }
    }
}

fn write_prefs(path: &Path, mut prefs: PersistedPrefs) {
    prefs.saved_utc = Some(Utc::now().to_rfc3339());

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&prefs, pretty) {
        Ok(text) => text,
        Err(err) => {
            agent_error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
        agent_error!("Preference path {:?} has no file name", path);
        return;
    };
    let mut dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    if dir.as_os_str().is_empty() {
        dir = PathBuf::from(".");
    }

    let writer = AtomicFileWriter::new(dir);
    if let Err(err) = writer.write(filename, &content) {
        agent_error!("Failed to write preferences to {:?}: {}", path, err);
    }
}
