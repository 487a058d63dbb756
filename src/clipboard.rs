//! System clipboard access.
//!
//! Reads are synchronous snapshots taken when a request is composed; writes
//! are fire-and-forget. Failures are logged and otherwise ignored.

use std::sync::{Arc, Mutex};
use tracing::warn;

pub trait Clipboard: Send + Sync {
    /// Whether clipboard-dependent commands can work at all.
    fn is_available(&self) -> bool {
        true
    }

    fn read(&self) -> Option<String>;

    fn write(&self, text: &str);
}

/// The desktop clipboard via `arboard`.
///
/// The handle is kept for the whole session: on X11 the copied text is only
/// served while its owner is alive.
pub struct SystemClipboard {
    inner: Mutex<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, arboard::Error> {
        Ok(Self {
            inner: Mutex::new(arboard::Clipboard::new()?),
        })
    }
}

impl Clipboard for SystemClipboard {
    fn read(&self) -> Option<String> {
        let Ok(mut clipboard) = self.inner.lock() else {
            return None;
        };
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(arboard::Error::ContentNotAvailable) => None,
            Err(e) => {
                warn!("Clipboard read failed: {e}");
                None
            }
        }
    }

    fn write(&self, text: &str) {
        let Ok(mut clipboard) = self.inner.lock() else {
            return;
        };
        if let Err(e) = clipboard.set_text(text.to_string()) {
            warn!("Clipboard write failed: {e}");
        }
    }
}

/// Stand-in used when the system clipboard could not be opened.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn is_available(&self) -> bool {
        false
    }

    fn read(&self) -> Option<String> {
        None
    }

    fn write(&self, _text: &str) {}
}

/// Opens the system clipboard, degrading to [`NoClipboard`] on failure.
pub fn open() -> Arc<dyn Clipboard> {
    match SystemClipboard::new() {
        Ok(clipboard) => Arc::new(clipboard),
        Err(e) => {
            warn!("Clipboard unavailable, clipboard commands disabled: {e}");
            Arc::new(NoClipboard)
        }
    }
}

/// In-memory clipboard for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: Mutex::new(Some(text.to_string())),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&self) -> Option<String> {
        self.text.lock().ok().and_then(|text| text.clone())
    }

    fn write(&self, text: &str) {
        if let Ok(mut slot) = self.text.lock() {
            *slot = Some(text.to_string());
        }
    }
}
