use crate::state::{AppState, Flash, Phase, WorkflowError};

/// Render-ready projection of the popup state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupViewModel {
    pub phase: Phase,
    pub tone: String,
    pub has_api_key: bool,
    /// Reply text shown in the output box, if any.
    pub output: Option<String>,
    pub status_line: String,
    /// True once a reply is ready: copy/insert/reset replace generate.
    pub show_reply_actions: bool,
    pub dirty: bool,
}

impl PopupViewModel {
    pub(crate) fn from_state(state: &AppState) -> Self {
        Self {
            phase: state.phase(),
            tone: state.tone().to_string(),
            has_api_key: !state.api_key().trim().is_empty(),
            output: state.reply().map(ToOwned::to_owned),
            status_line: status_line(state),
            show_reply_actions: matches!(state.phase(), Phase::Ready | Phase::Inserting { .. }),
            dirty: state.is_dirty(),
        }
    }
}

fn status_line(state: &AppState) -> String {
    if let Some(flash) = state.flash() {
        return match flash {
            Flash::Copied => "Copied.".to_string(),
            Flash::Inserted => "Inserted into the page.".to_string(),
        };
    }
    if let Some(error) = state.last_error() {
        return match error {
            WorkflowError::MissingApiKey => "Error: API key missing.".to_string(),
            WorkflowError::NoTextFound => {
                "No text found. Highlight the post text on the page and try again.".to_string()
            }
            WorkflowError::Blocked { phrase } => {
                format!("Blocked: the scanned text contains \"{phrase}\" and was not sent.")
            }
            WorkflowError::GenerationFailed(message) => format!("Error: {message}"),
            WorkflowError::InsertFailed(message) => format!("Insert failed: {message}"),
        };
    }
    match state.phase() {
        Phase::Idle => "Ready to scan.".to_string(),
        Phase::Connecting { retried: false } => "Connecting to page...".to_string(),
        Phase::Connecting { retried: true } => "Reconnecting to page...".to_string(),
        Phase::Extracting => "Scanning page...".to_string(),
        Phase::Generating => "Drafting reply...".to_string(),
        Phase::Ready => "Done!".to_string(),
        Phase::Inserting { .. } => "Inserting into page...".to_string(),
    }
}
