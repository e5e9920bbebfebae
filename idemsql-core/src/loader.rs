//! Script loading with byte-for-byte fidelity.
//!
//! The loader performs no transformation. The decoded text is the original
//! file content, so [`Script::as_bytes`] is what the backup receives.

use std::path::Path;

use serde::Serialize;

use crate::error::{IdemError, Result};

/// Dominant line-ending convention of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineEnding {
    /// Every terminated line ends with `\n`.
    Lf,
    /// Every terminated line ends with `\r\n`.
    CrLf,
    /// Both conventions occur.
    Mixed,
    /// The script has no line terminator at all.
    None,
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "LF"),
            LineEnding::CrLf => write!(f, "CRLF"),
            LineEnding::Mixed => write!(f, "mixed"),
            LineEnding::None => write!(f, "none"),
        }
    }
}

/// One physical line: its content and the terminator that followed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line content without the terminator.
    pub content: &'a str,
    /// `"\n"`, `"\r\n"`, or `""` for an unterminated final line.
    pub ending: &'a str,
}

/// Split text into lines, keeping each line's own terminator.
///
/// Concatenating `content + ending` over all lines reproduces the input.
pub fn split_lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.split_inclusive('\n').map(|piece| {
        if let Some(content) = piece.strip_suffix("\r\n") {
            Line {
                content,
                ending: "\r\n",
            }
        } else if let Some(content) = piece.strip_suffix('\n') {
            Line {
                content,
                ending: "\n",
            }
        } else {
            Line {
                content: piece,
                ending: "",
            }
        }
    })
}

/// A SQL script held in memory for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    text: String,
    line_ending: LineEnding,
}

impl Script {
    /// Wrap already-decoded text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_ending = detect_line_ending(&text);
        Self { text, line_ending }
    }

    /// Decode raw file bytes. Fails with `ScanError` if they are not UTF-8.
    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self> {
        let text = String::from_utf8(bytes).map_err(|e| IdemError::ScanError {
            path: path.to_path_buf(),
            offset: e.utf8_error().valid_up_to(),
        })?;
        Ok(Self::new(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The exact bytes the script was decoded from.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> {
        split_lines(&self.text)
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

fn detect_line_ending(text: &str) -> LineEnding {
    let mut lf = false;
    let mut crlf = false;
    for line in split_lines(text) {
        match line.ending {
            "\r\n" => crlf = true,
            "\n" => lf = true,
            _ => {}
        }
        if lf && crlf {
            return LineEnding::Mixed;
        }
    }
    match (lf, crlf) {
        (true, false) => LineEnding::Lf,
        (false, true) => LineEnding::CrLf,
        _ => LineEnding::None,
    }
}

/// Read a script from disk.
pub fn load(path: &Path) -> Result<Script> {
    let bytes = std::fs::read(path).map_err(|source| IdemError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loaded script; path={}, bytes={}", path.display(), bytes.len());
    Script::from_bytes(path, bytes)
}
