//! Ghostwriter page agent: DOM heuristics and the page message protocol.
//!
//! The agent answers three requests against a parsed page: a liveness ping,
//! a scan for candidate post text, and a "ghostwrite" insertion into the
//! best editable element. Every failure crosses the protocol boundary as a
//! structured response, never as a panic.
mod agent;
mod extract;
mod insert;
mod page;
mod protocol;
mod visibility;

pub use agent::handle_request;
pub use extract::{
    scan_page, Extraction, ScanMethod, MAX_POST_LEN, MIN_POST_LEN, MIN_SELECTION_LEN,
    NO_POST_MESSAGE,
};
pub use insert::{
    find_target, ghostwrite, InsertReceipt, PageEvent, TextSurface, HIGHLIGHT_MS,
    NO_TARGET_MESSAGE,
};
pub use page::PageDocument;
pub use protocol::{AgentRequest, AgentResponse};
pub use visibility::is_visible;
