use crate::view_model::PopupViewModel;

/// Default tone used until the user picks one or preferences restore it.
pub(crate) const DEFAULT_TONE: &str = "friendly";

/// Where the popup is inside one user-triggered workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Probing the page agent; `retried` is set once re-injection ran.
    Connecting {
        retried: bool,
    },
    Extracting,
    Generating,
    /// A reply is on screen; copy/insert/reset are available.
    Ready,
    /// Delivering the reply to the page agent; `retried` as above.
    Inserting {
        retried: bool,
    },
}

/// Everything that can go wrong inside one workflow. None of these are
/// fatal; each returns the machine to a re-triggerable phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    MissingApiKey,
    NoTextFound,
    Blocked { phrase: String },
    GenerationFailed(String),
    InsertFailed(String),
}

/// Transient acknowledgment shown after a copy or insert, cleared on tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Copied,
    Inserted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    phase: Phase,
    api_key: String,
    tone: String,
    reply: Option<String>,
    last_error: Option<WorkflowError>,
    flash: Option<Flash>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            api_key: String::new(),
            tone: DEFAULT_TONE.to_string(),
            reply: None,
            last_error: None,
            flash: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PopupViewModel {
        PopupViewModel::from_state(self)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn tone(&self) -> &str {
        &self.tone
    }

    pub fn reply(&self) -> Option<&str> {
        self.reply.as_deref()
    }

    pub fn last_error(&self) -> Option<&WorkflowError> {
        self.last_error.as_ref()
    }

    pub fn flash(&self) -> Option<Flash> {
        self.flash
    }

    /// Returns the dirty flag and clears it; the frontend renders when true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.mark_dirty();
    }

    pub(crate) fn set_api_key(&mut self, api_key: String) {
        self.api_key = api_key;
        self.mark_dirty();
    }

    pub(crate) fn set_tone(&mut self, tone: String) {
        self.tone = tone;
        self.mark_dirty();
    }

    pub(crate) fn set_reply(&mut self, reply: Option<String>) {
        self.reply = reply;
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, error: WorkflowError) {
        self.last_error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.last_error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_flash(&mut self, flash: Flash) {
        self.flash = Some(flash);
        self.mark_dirty();
    }

    /// Clears a pending flash; returns whether one was showing.
    pub(crate) fn clear_flash(&mut self) -> bool {
        if self.flash.take().is_some() {
            self.mark_dirty();
            true
        } else {
            false
        }
    }
}
