/// Preferences read from the device-local store when the popup opens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrefsSnapshot {
    pub api_key: String,
    pub tone: String,
    pub last_reply: Option<String>,
}

/// How the page agent located the candidate text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMethod {
    /// The user's own selection was long enough to use verbatim.
    Highlight,
    /// A block element passed the post-body heuristic.
    AutoDetect,
}

/// A successful extraction as reported back by the page agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedText {
    pub text: String,
    pub method: ScanMethod,
}

/// Outcome of handing a reply to the page agent for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertDelivery {
    /// The agent wrote the text into an editable target.
    Delivered,
    /// The agent did not answer; the page may have navigated away.
    Unreachable,
    /// The agent answered but found no editable target.
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Persisted preferences loaded at popup open.
    PrefsLoaded(PrefsSnapshot),
    /// User edited the API key field.
    ApiKeyEdited(String),
    /// User picked a tone for the reply.
    ToneSelected(String),
    /// User triggered the primary generate action.
    GenerateClicked,
    /// Liveness probe round trip finished.
    ProbeFinished { alive: bool },
    /// The page agent finished (re-)injecting into the page.
    AgentInjected { success: bool },
    /// The page agent answered the scan request.
    ExtractFinished(Result<ScannedText, String>),
    /// The provider call finished.
    GenerateFinished(Result<String, String>),
    /// User asked for the reply on the clipboard.
    CopyClicked,
    /// User asked for the reply to be written into the page.
    InsertClicked,
    /// The insertion request came back from the page agent.
    InsertFinished(InsertDelivery),
    /// User cleared the popup back to its initial state.
    ResetClicked,
    /// UI tick to expire transient acknowledgments.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
