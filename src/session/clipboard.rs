//! Clipboard backends.
//!
//! The primary backend writes an OSC 52 escape sequence so the terminal
//! emulator places the text on the system clipboard. When the output is not a
//! terminal the copy lands in an in-process register instead.

use std::cell::RefCell;
use std::io::{IsTerminal, Write};
use std::rc::Rc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Result, TempMailError};

/// Something that can hold copied text.
pub trait Clipboard {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Replace the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Terminal clipboard via OSC 52 (`ESC ] 52 ; c ; <base64> BEL`).
pub struct Osc52Clipboard<W: Write> {
    out: W,
    is_terminal: bool,
}

impl Osc52Clipboard<std::io::Stdout> {
    /// Write to the process's stdout. Fails on every copy when stdout is not a terminal.
    pub fn stdout() -> Self {
        let out = std::io::stdout();
        let is_terminal = out.is_terminal();
        Self { out, is_terminal }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    /// Write the sequence to an arbitrary sink, treated as a terminal.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            is_terminal: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// The escape sequence that sets the clipboard to `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        if !self.is_terminal {
            return Err(TempMailError::clipboard(self.name(), "output is not a terminal"));
        }
        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(TempMailError::Terminal)
    }
}

/// In-process clipboard register. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct InternalClipboard {
    contents: Rc<RefCell<Option<String>>>,
}

impl InternalClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text copied here.
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for InternalClipboard {
    fn name(&self) -> &'static str {
        "internal"
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_osc52_writes_to_sink() {
        let mut cb = Osc52Clipboard::with_writer(Vec::new());
        cb.set_text("a@b.c").expect("copy");
        let written = String::from_utf8(cb.into_inner()).expect("utf8");
        assert_eq!(written, osc52_sequence("a@b.c"));
    }

    #[test]
    fn test_internal_shares_contents() {
        let cb = InternalClipboard::new();
        let mut writer = cb.clone();
        assert!(cb.contents().is_none());
        writer.set_text("secret").expect("copy");
        assert_eq!(cb.contents().as_deref(), Some("secret"));
    }
}
