//! Ghostwriter engine: IO pipeline and effect execution.
mod decode;
mod engine;
mod fetch;
mod persist;
mod prompt;
mod provider;
mod types;

pub use decode::{decode_html, DecodeError, DecodedPage};
pub use engine::{EngineConfig, EngineHandle};
pub use fetch::{FetchSettings, HttpPageFetcher, PageFetcher};
pub use persist::{ensure_store_dir, AtomicFileWriter, PersistError};
pub use prompt::build_prompt;
pub use provider::{GenerationClient, ProviderError, ProviderSettings};
pub use types::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, InsertDispatch, PageMeta, ScannedText,
    WorkflowEvent,
};
