//! Clipboard access for layout copy/paste.
//!
//! [`SystemClipboard`] wraps `arboard` and opens a fresh handle per call, so
//! a missing display server only fails the operation that needed it.
//! [`MemoryClipboard`] keeps text in-process for headless hosts and tests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
}

/// Text transport used by the controller's copy/paste toolbar actions.
pub trait LayoutClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError>;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Try to create a backend handle to detect availability.
    pub fn available() -> bool {
        arboard::Clipboard::new().is_ok()
    }
}

impl LayoutClipboard for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        let mut cb = arboard::Clipboard::new()?;
        cb.get_text().map_err(ClipboardError::from)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut cb = arboard::Clipboard::new()?;
        cb.set_text(text.to_owned()).map_err(ClipboardError::from)
    }
}

/// In-process clipboard. Reading before any write yields an empty string.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: String,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl LayoutClipboard for MemoryClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        Ok(self.text.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = text.to_owned();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_round_trips_text() {
        let mut cb = MemoryClipboard::new();
        assert_eq!(cb.read_text().unwrap(), "");
        cb.write_text("{\"version\":1}").unwrap();
        assert_eq!(cb.text(), "{\"version\":1}");
    }
}
