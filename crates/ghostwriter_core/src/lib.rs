//! Ghostwriter core: pure popup state machine and view-model helpers.
mod effect;
mod msg;
mod screen;
mod state;
mod truncate;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{InsertDelivery, Msg, PrefsSnapshot, ScanMethod, ScannedText};
pub use screen::{InjectionScreen, SignatureScreen};
pub use state::{AppState, Flash, Phase, WorkflowError};
pub use truncate::{truncate_post_text, truncate_reply, POST_TEXT_CAP, REPLY_DISPLAY_CAP};
pub use update::{update, update_with_screen};
pub use view_model::PopupViewModel;
