//! The interactive chat session: terminal lifecycle and the event loop that
//! drives the controller.

mod session;
mod ui;

pub use session::ChatSession;
