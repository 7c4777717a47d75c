//! Defines the parse error and its location.
use std::fmt;

/// Row/column location within the source JSON document (1-indexed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// 1-indexed line number in the input stream.
    pub(crate) line: u32,
    /// 1-indexed column number in the input stream.
    pub(crate) column: u32,
}

impl Location {
    /// Sentinel value meaning "location unknown".
    ///
    /// Used when a precise position is not available at error creation time.
    pub const UNKNOWN: Self = Self { line: 0, column: 0 };

    /// Create a new location record.
    ///
    /// Arguments:
    /// - `line`: 1-indexed line.
    /// - `column`: 1-indexed column.
    ///
    /// Called by:
    /// - The byte reader, which is the only component tracking positions.
    pub(crate) const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// serde_yaml/serde_json-compatible line information.
    pub fn line(&self) -> u64 {
        self.line as u64
    }

    /// serde_yaml/serde_json-compatible column information.
    pub fn column(&self) -> u64 {
        self.column as u64
    }
}

/// Parse error. Every variant except [`Error::Io`] carries the source
/// location where the offending byte was read.
///
/// The first error reported by any scanner aborts the parse; scanners return
/// immediately and the driver propagates, so an `Error` value always
/// describes the earliest problem in the input.
#[derive(Debug)]
pub enum Error {
    /// `/` was not followed by `*` or another `/`.
    InvalidCommentFormat { location: Location },
    /// End of input inside a `/* ... */` comment.
    CommentNotTerminated { location: Location },
    /// A `\u` escape contained a non-hexadecimal digit.
    InvalidHexCharacter { location: Location },
    /// A decoded codepoint cannot be represented, even by the extended
    /// 5-/6-byte UTF-8 forms this parser emits.
    InvalidUnicodeCharacter { codepoint: u32, location: Location },
    /// End of input inside a quoted string.
    QuotedStringNotTerminated { location: Location },
    /// Unsupported escape, or a broken surrogate pair.
    InvalidEscapedCharacter { location: Location },
    /// A sign or leading letter did not develop into a number,
    /// `Infinity` or `NaN`.
    NotANumber { location: Location },
    /// A bare-word token (`true`, `false`, `null`, `NaN`, `Infinity`)
    /// was started but not completed.
    ExpectedToken {
        token: &'static str,
        location: Location,
    },
    /// A byte that cannot start any JSON token.
    UnexpectedCharacter { byte: u8, location: Location },
    /// `,` outside a container, or in a position where no comma is due.
    UnexpectedComma { location: Location },
    /// `:` anywhere except between a key and its value.
    UnexpectedColon { location: Location },
    /// `]` with no matching open array in the right state.
    UnexpectedArrayClose { location: Location },
    /// `}` with no matching open object in the right state.
    UnexpectedHashClose { location: Location },
    /// A value arrived while the container expected something else,
    /// e.g. a string where a colon was due.
    Expected {
        expected: &'static str,
        found: &'static str,
        location: Location,
    },
    /// End of input with an array still open.
    ArrayNotTerminated { location: Location },
    /// End of input with an object still open.
    HashNotTerminated { location: Location },
    /// Container nesting exceeded [`crate::Options::max_depth`].
    DepthExceeded { location: Location },
    /// A second top-level value in a single-document API.
    MultipleDocuments { location: Location },
    /// Unexpected I/O error. This may happen only when parsing from a reader.
    Io { cause: std::io::Error },
}

impl Error {
    /// If the error has a known location, return it.
    ///
    /// Returns:
    /// - `Some(Location)` when coordinates are known; `None` otherwise.
    ///
    /// Used by:
    /// - Callers that want to surface precise positions to users.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::InvalidCommentFormat { location }
            | Error::CommentNotTerminated { location }
            | Error::InvalidHexCharacter { location }
            | Error::InvalidUnicodeCharacter { location, .. }
            | Error::QuotedStringNotTerminated { location }
            | Error::InvalidEscapedCharacter { location }
            | Error::NotANumber { location }
            | Error::ExpectedToken { location, .. }
            | Error::UnexpectedCharacter { location, .. }
            | Error::UnexpectedComma { location }
            | Error::UnexpectedColon { location }
            | Error::UnexpectedArrayClose { location }
            | Error::UnexpectedHashClose { location }
            | Error::Expected { location, .. }
            | Error::ArrayNotTerminated { location }
            | Error::HashNotTerminated { location }
            | Error::DepthExceeded { location }
            | Error::MultipleDocuments { location } => {
                if location != &Location::UNKNOWN {
                    Some(*location)
                } else {
                    None
                }
            }
            Error::Io { .. } => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCommentFormat { location } => {
                fmt_with_location(f, "invalid comment format", location)
            }
            Error::CommentNotTerminated { location } => {
                fmt_with_location(f, "comment not terminated", location)
            }
            Error::InvalidHexCharacter { location } => {
                fmt_with_location(f, "invalid hex character", location)
            }
            Error::InvalidUnicodeCharacter {
                codepoint,
                location,
            } => fmt_with_location(
                f,
                &format!("invalid Unicode character U+{codepoint:X}"),
                location,
            ),
            Error::QuotedStringNotTerminated { location } => {
                fmt_with_location(f, "quoted string not terminated", location)
            }
            Error::InvalidEscapedCharacter { location } => {
                fmt_with_location(f, "invalid escaped character", location)
            }
            Error::NotANumber { location } => {
                fmt_with_location(f, "not a number or other value", location)
            }
            Error::ExpectedToken { token, location } => {
                fmt_with_location(f, &format!("expected {token}"), location)
            }
            Error::UnexpectedCharacter { byte, location } => fmt_with_location(
                f,
                &format!("unexpected character '{}'", byte_display(*byte)),
                location,
            ),
            Error::UnexpectedComma { location } => {
                fmt_with_location(f, "unexpected comma", location)
            }
            Error::UnexpectedColon { location } => {
                fmt_with_location(f, "unexpected colon", location)
            }
            Error::UnexpectedArrayClose { location } => {
                fmt_with_location(f, "unexpected array close", location)
            }
            Error::UnexpectedHashClose { location } => {
                fmt_with_location(f, "unexpected hash close", location)
            }
            Error::Expected {
                expected,
                found,
                location,
            } => fmt_with_location(f, &format!("expected {expected}, not {found}"), location),
            Error::ArrayNotTerminated { location } => {
                fmt_with_location(f, "Array not terminated", location)
            }
            Error::HashNotTerminated { location } => {
                fmt_with_location(f, "Hash/Object not terminated", location)
            }
            Error::DepthExceeded { location } => {
                fmt_with_location(f, "nesting depth limit exceeded", location)
            }
            Error::MultipleDocuments { location } => fmt_with_location(
                f,
                "multiple JSON documents detected; use from_multiple or from_multiple_with_options",
                location,
            ),
            Error::Io { cause } => write!(f, "IO error: {cause}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(cause: std::io::Error) -> Self {
        Error::Io { cause }
    }
}

/// Printable form of the offending byte for `unexpected character` messages.
fn byte_display(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        (byte as char).to_string()
    } else {
        format!("\\x{byte:02x}")
    }
}

/// Print a message optionally suffixed with "at line X, column Y".
///
/// Arguments:
/// - `f`: destination formatter.
/// - `msg`: main text.
/// - `location`: position to attach if known.
///
/// Returns:
/// - `fmt::Result` as required by `Display`.
fn fmt_with_location(f: &mut fmt::Formatter<'_>, msg: &str, location: &Location) -> fmt::Result {
    if location != &Location::UNKNOWN {
        write!(
            f,
            "{msg} at line {}, column {}",
            location.line, location.column
        )
    } else {
        write!(f, "{msg}")
    }
}
