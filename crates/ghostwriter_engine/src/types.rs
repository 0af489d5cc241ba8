use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Summary of the page the engine loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub final_url: String,
    pub encoding: String,
    pub byte_len: u64,
}

/// A successful scan as it travels from the page agent to the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedText {
    pub text: String,
    pub method: Option<String>,
}

/// Outcome of delivering an insertion request to the page agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertDispatch {
    Delivered { method: Option<String> },
    Rejected(String),
    Unreachable,
}

/// Events emitted by the engine thread, one per finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    PageLoaded { result: Result<PageMeta, String> },
    ProbeFinished { alive: bool },
    AgentInjected { success: bool },
    ExtractFinished { result: Result<ScannedText, String> },
    GenerateFinished { result: Result<String, String> },
    InsertFinished { dispatch: InsertDispatch },
}
