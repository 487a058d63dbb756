//! The interactive session core: state, events and the controller that
//! folds one into the other.

mod controller;
mod event;
mod keymap;
mod state;
mod transcript;
mod viewport;

pub use controller::Controller;
pub use event::{AppEvent, Command, Deadline, Generation, PendingRequest, RequestKind};
pub use keymap::{Action, KEY_HINTS, TranslateTarget, action_for};
pub use state::{INPUT_CHAR_LIMIT, Language, Mode, Session, SessionConfig};
pub use transcript::{Entry, EntryKind, Transcript};
pub use viewport::{RESERVED_FOOTER, ViewLine, Viewport, wrap_line};
