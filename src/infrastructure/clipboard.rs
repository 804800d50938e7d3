//! Clipboard access.
//!
//! The make-public action copies the new public links. Terminals receive them
//! through the OSC 52 escape sequence, tests use [`MemoryClipboard`].

use crate::domain::error::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::io::Write;

/// Destination for copied text.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text could not be delivered.
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Clipboard that keeps the last copied text in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    copies: usize,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of copy calls.
    #[must_use]
    pub const fn copies(&self) -> usize {
        self.copies
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        self.copies += 1;
        Ok(())
    }
}

/// Clipboard that writes an OSC 52 sequence to a terminal.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<()> {
        let encoded = BASE64.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{encoded}\x07")?;
        self.out.flush()?;
        tracing::debug!(bytes = text.len(), "copied to terminal clipboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_keeps_last_copy() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.copy("a").unwrap();
        clipboard.copy("b").unwrap();
        assert_eq!(clipboard.contents(), Some("b"));
        assert_eq!(clipboard.copies(), 2);
    }

    #[test]
    fn osc52_wraps_base64_payload() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.copy("hi").unwrap();
        assert_eq!(clipboard.into_inner(), b"\x1b]52;c;aGk=\x07".to_vec());
    }
}
