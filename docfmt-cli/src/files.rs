//! Reading and writing Python source files
//!
//!     Files are decoded with the encoding Python itself would pick: a UTF-8 byte-order
//!     mark wins, then a coding cookie on one of the first two lines, then UTF-8. The
//!     same encoding is used when the formatted text (and its backup) is written back.

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

static CODING_COOKIE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)^[ \t\x0C]*#.*?coding[:=][ \t]*([-\w.]+)").unwrap());
static BLANK_OR_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)^[ \t\x0C]*(?:[#\r\n]|$)").unwrap());

#[derive(Debug, Error)]
pub enum FileError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("invalid {encoding} data at byte {offset}")]
    Decode {
        encoding: SourceEncoding,
        offset: usize,
    },

    #[error("{found:?} cannot be encoded as {encoding}")]
    Encode {
        encoding: SourceEncoding,
        found: char,
    },
}

/// Encodings a source file can be read and written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    /// UTF-8 with a leading byte-order mark
    Utf8Sig,
    Latin1,
    Ascii,
}

impl SourceEncoding {
    /// Resolve a coding cookie name the way Python normalizes it.
    pub fn from_name(name: &str) -> Result<Self, FileError> {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" | "u8" | "utf" => Ok(Self::Utf8),
            "utf-8-sig" | "utf8-sig" => Ok(Self::Utf8Sig),
            "latin-1" | "latin1" | "l1" | "iso-8859-1" | "iso8859-1" | "iso-latin-1" => {
                Ok(Self::Latin1)
            }
            "ascii" | "us-ascii" | "646" => Ok(Self::Ascii),
            _ => Err(FileError::UnsupportedEncoding(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Sig => "utf-8-sig",
            Self::Latin1 => "latin-1",
            Self::Ascii => "ascii",
        }
    }

    /// Decode raw file contents. A byte-order mark is stripped for `Utf8Sig`.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, FileError> {
        match self {
            Self::Utf8 | Self::Utf8Sig => {
                let bytes = match self {
                    Self::Utf8Sig => bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes),
                    _ => bytes,
                };
                String::from_utf8(bytes.to_vec()).map_err(|e| FileError::Decode {
                    encoding: *self,
                    offset: e.utf8_error().valid_up_to(),
                })
            }
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(FileError::Decode {
                    encoding: *self,
                    offset,
                }),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
        }
    }

    /// Encode text for writing. `Utf8Sig` restores the byte-order mark.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, FileError> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Utf8Sig => Ok([UTF8_BOM, text.as_bytes()].concat()),
            Self::Latin1 | Self::Ascii => {
                let limit = if *self == Self::Latin1 { 0xFF } else { 0x7F };
                text.chars()
                    .map(|c| match u8::try_from(u32::from(c)) {
                        Ok(byte) if u32::from(byte) <= limit => Ok(byte),
                        _ => Err(FileError::Encode {
                            encoding: *self,
                            found: c,
                        }),
                    })
                    .collect()
            }
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the encoding of raw source bytes.
pub fn detect_encoding(bytes: &[u8]) -> Result<SourceEncoding, FileError> {
    if bytes.starts_with(UTF8_BOM) {
        return Ok(SourceEncoding::Utf8Sig);
    }

    let mut lines = bytes.split_inclusive(|&b| b == b'\n');
    let Some(first) = lines.next() else {
        return Ok(SourceEncoding::Utf8);
    };
    if let Some(name) = coding_cookie(first) {
        return SourceEncoding::from_name(&name);
    }
    // The cookie may sit on line 2 only when line 1 carries no code
    if BLANK_OR_COMMENT.is_match(first) {
        if let Some(name) = lines.next().and_then(coding_cookie) {
            return SourceEncoding::from_name(&name);
        }
    }
    Ok(SourceEncoding::Utf8)
}

fn coding_cookie(line: &[u8]) -> Option<String> {
    let captures = CODING_COOKIE.captures(line)?;
    let name = captures.get(1)?;
    Some(String::from_utf8_lossy(name.as_bytes()).into_owned())
}

/// A decoded source file and the encoding it was read with.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub text: String,
    pub encoding: SourceEncoding,
}

impl SourceFile {
    pub fn read(path: &Path) -> Result<Self, FileError> {
        let bytes = fs::read(path)?;
        let encoding = detect_encoding(&bytes)?;
        let text = encoding.decode(&bytes)?;
        Ok(Self { text, encoding })
    }

    /// Write `text` to `path` in this file's encoding.
    pub fn write_as(&self, path: &Path, text: &str) -> Result<(), FileError> {
        let bytes = self.encoding.encode(text)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// `<path><suffix>`, e.g. `module.py.backup`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
