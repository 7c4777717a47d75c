//! The parse driver.
//!
//! A flat dispatch loop over the next non-whitespace byte; nesting lives in
//! an explicit frame stack, never in the call stack, so document depth does
//! not grow recursion. Only the string and number scanners are leaf
//! routines.
//!
//! Errors propagate with `?` the moment any scanner reports one, which
//! makes abort cooperative and first-error-wins by construction. The loop
//! itself exits cleanly on the end-of-input sentinel even with containers
//! still open; diagnosing those is the entry point's job
//! ([`Parser::finish`]), keeping the driver composable.

use crate::error::Error;
use crate::handler::Handler;
use crate::num::{self, NumInfo};
use crate::options::Options;
use crate::reader::Reader;
use crate::stack::{Expect, Frame, Key};
use crate::strings;

/// Run a complete parse over `input`, delivering every completed top-level
/// value through `handler.add_value` (and friends).
///
/// With `many` unset, a second top-level value is a
/// [`Error::MultipleDocuments`] error. Returns the number of top-level
/// values delivered.
pub(crate) fn parse<H: Handler>(
    input: &[u8],
    options: &Options,
    handler: &mut H,
    many: bool,
) -> Result<usize, Error> {
    let mut parser = Parser {
        reader: Reader::new(input),
        stack: Vec::new(),
        handler,
        options,
        roots: 0,
        many,
    };
    parser.handler.parse_start();
    let result = parser.drive().and_then(|()| parser.finish());
    parser.handler.parse_done();
    result.map(|()| parser.roots)
}

/// Bytes that can open a top-level value.
fn is_value_start(b: u8) -> bool {
    matches!(
        b,
        b'[' | b'{' | b'"' | b'-' | b'+' | b'0'..=b'9' | b'I' | b'N' | b't' | b'f' | b'n'
    )
}

struct Parser<'a, 'h, H: Handler> {
    reader: Reader<'a>,
    stack: Vec<Frame<'a, H::Value>>,
    handler: &'h mut H,
    options: &'h Options,
    /// Completed top-level values so far.
    roots: usize,
    /// Whether more than one top-level value is permitted.
    many: bool,
}

impl<'a, H: Handler> Parser<'a, '_, H> {
    fn drive(&mut self) -> Result<(), Error> {
        loop {
            let b = self.reader.next_non_white();
            match b {
                0 => return Ok(()),
                b'/' => self.skip_comment()?,
                b',' => self.comma()?,
                b':' => self.colon()?,
                b']' => self.end_array()?,
                b'}' => self.end_hash()?,
                _ if is_value_start(b) && self.root_blocked() => {
                    return Err(Error::MultipleDocuments {
                        location: self.reader.location(),
                    });
                }
                b'[' => self.start_array()?,
                b'{' => self.start_hash()?,
                b'"' => self.string()?,
                b'-' | b'+' | b'0'..=b'9' | b'I' | b'N' => self.number(b)?,
                b't' => {
                    if !self.reader.expect(b"rue") {
                        return Err(Error::ExpectedToken {
                            token: "true",
                            location: self.reader.location(),
                        });
                    }
                    let value = self.handler.bool_value(true);
                    self.add_value(value, "a boolean")?;
                }
                b'f' => {
                    if !self.reader.expect(b"alse") {
                        return Err(Error::ExpectedToken {
                            token: "false",
                            location: self.reader.location(),
                        });
                    }
                    let value = self.handler.bool_value(false);
                    self.add_value(value, "a boolean")?;
                }
                b'n' => self.null_or_nan()?,
                _ => {
                    return Err(Error::UnexpectedCharacter {
                        byte: b,
                        location: self.reader.location(),
                    });
                }
            }
        }
    }

    /// Termination diagnostics, run after the driver loop exits cleanly.
    fn finish(&self) -> Result<(), Error> {
        match self.stack.last() {
            None => Ok(()),
            Some(frame) if frame.next.in_array() => Err(Error::ArrayNotTerminated {
                location: self.reader.location(),
            }),
            Some(_) => Err(Error::HashNotTerminated {
                location: self.reader.location(),
            }),
        }
    }

    /// True when a fresh top-level value may not start: single-document
    /// mode with one root already delivered.
    fn root_blocked(&self) -> bool {
        !self.many && self.roots > 0 && self.stack.is_empty()
    }

    // ---------------- containers ----------------

    fn start_array(&mut self) -> Result<(), Error> {
        self.guard_depth()?;
        let value = self.handler.start_array();
        self.stack.push(Frame::array(value));
        Ok(())
    }

    fn start_hash(&mut self) -> Result<(), Error> {
        self.guard_depth()?;
        let value = self.handler.start_hash();
        self.stack.push(Frame::hash(value));
        Ok(())
    }

    fn guard_depth(&self) -> Result<(), Error> {
        if self.stack.len() >= self.options.max_depth {
            return Err(Error::DepthExceeded {
                location: self.reader.location(),
            });
        }
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), Error> {
        let closeable = matches!(
            self.stack.last().map(|f| f.next),
            Some(Expect::ArrayNew | Expect::ArrayComma)
        );
        if !closeable {
            return Err(Error::UnexpectedArrayClose {
                location: self.reader.location(),
            });
        }
        if let Some(mut frame) = self.stack.pop() {
            self.handler.end_array(&mut frame.value);
            self.add_value(frame.value, "an array")?;
        }
        Ok(())
    }

    fn end_hash(&mut self) -> Result<(), Error> {
        let closeable = matches!(
            self.stack.last().map(|f| f.next),
            Some(Expect::HashNew | Expect::HashComma)
        );
        if !closeable {
            return Err(Error::UnexpectedHashClose {
                location: self.reader.location(),
            });
        }
        if let Some(mut frame) = self.stack.pop() {
            self.handler.end_hash(&mut frame.value);
            self.add_value(frame.value, "a hash")?;
        }
        Ok(())
    }

    // ---------------- separators ----------------

    fn comma(&mut self) -> Result<(), Error> {
        if let Some(frame) = self.stack.last_mut() {
            match frame.next {
                Expect::ArrayComma => {
                    frame.next = Expect::ArrayElement;
                    return Ok(());
                }
                Expect::HashComma => {
                    frame.next = Expect::HashKey;
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(Error::UnexpectedComma {
            location: self.reader.location(),
        })
    }

    fn colon(&mut self) -> Result<(), Error> {
        if let Some(frame) = self.stack.last_mut() {
            if frame.next == Expect::HashColon {
                frame.next = Expect::HashValue;
                return Ok(());
            }
        }
        Err(Error::UnexpectedColon {
            location: self.reader.location(),
        })
    }

    // ---------------- values ----------------

    /// Bind a completed value into the parent frame, or deliver it as a
    /// root. `found` names the value kind for diagnostics.
    fn add_value(&mut self, value: H::Value, found: &'static str) -> Result<(), Error> {
        match self.stack.last_mut() {
            None => {
                self.handler.add_value(value);
                self.roots += 1;
                Ok(())
            }
            Some(frame) => match frame.next {
                Expect::ArrayNew | Expect::ArrayElement => {
                    self.handler.array_append_value(&mut frame.value, value);
                    frame.next = Expect::ArrayComma;
                    Ok(())
                }
                Expect::HashValue => {
                    // A key is always pending in this state.
                    if let Some(key) = frame.key.take() {
                        self.handler
                            .hash_set_value(&mut frame.value, key.as_bytes(), value);
                    }
                    frame.next = Expect::HashComma;
                    Ok(())
                }
                next => Err(Error::Expected {
                    expected: next.as_str(),
                    found,
                    location: self.reader.location(),
                }),
            },
        }
    }

    fn string(&mut self) -> Result<(), Error> {
        let s = strings::read_quoted(&mut self.reader)?;
        match self.stack.last_mut() {
            None => {
                self.handler.add_cstr(s.as_bytes());
                self.roots += 1;
                Ok(())
            }
            Some(frame) => match frame.next {
                Expect::ArrayNew | Expect::ArrayElement => {
                    self.handler.array_append_cstr(&mut frame.value, s.as_bytes());
                    frame.next = Expect::ArrayComma;
                    Ok(())
                }
                Expect::HashNew | Expect::HashKey => {
                    frame.key = Some(Key::from_str(s));
                    frame.next = Expect::HashColon;
                    Ok(())
                }
                Expect::HashValue => {
                    if let Some(key) = frame.key.take() {
                        self.handler
                            .hash_set_cstr(&mut frame.value, key.as_bytes(), s.as_bytes());
                    }
                    frame.next = Expect::HashComma;
                    Ok(())
                }
                next => Err(Error::Expected {
                    expected: next.as_str(),
                    found: "a string",
                    location: self.reader.location(),
                }),
            },
        }
    }

    fn number(&mut self, first: u8) -> Result<(), Error> {
        let info = num::read_number(&mut self.reader, first, self.options)?;
        self.deliver_num(&info)
    }

    fn deliver_num(&mut self, info: &NumInfo<'_>) -> Result<(), Error> {
        match self.stack.last_mut() {
            None => {
                self.handler.add_num(info);
                self.roots += 1;
                Ok(())
            }
            Some(frame) => match frame.next {
                Expect::ArrayNew | Expect::ArrayElement => {
                    self.handler.array_append_num(&mut frame.value, info);
                    frame.next = Expect::ArrayComma;
                    Ok(())
                }
                Expect::HashValue => {
                    if let Some(key) = frame.key.take() {
                        self.handler
                            .hash_set_num(&mut frame.value, key.as_bytes(), info);
                    }
                    frame.next = Expect::HashComma;
                    Ok(())
                }
                next => Err(Error::Expected {
                    expected: next.as_str(),
                    found: "a number",
                    location: self.reader.location(),
                }),
            },
        }
    }

    /// `n` is ambiguous: `null`, or the head of a lenient bare `NaN`.
    fn null_or_nan(&mut self) -> Result<(), Error> {
        match self.reader.get() {
            b'u' => {
                if !self.reader.expect(b"ll") {
                    return Err(Error::ExpectedToken {
                        token: "null",
                        location: self.reader.location(),
                    });
                }
                let value = self.handler.null_value();
                self.add_value(value, "null")
            }
            b'a' => {
                let last = self.reader.get();
                if last != b'N' && last != b'n' {
                    return Err(Error::ExpectedToken {
                        token: "NaN",
                        location: self.reader.location(),
                    });
                }
                let end = self.reader.offset();
                let info = NumInfo::nan(self.reader.slice(end - 3, end));
                self.deliver_num(&info)
            }
            _ => Err(Error::ExpectedToken {
                token: "null",
                location: self.reader.location(),
            }),
        }
    }

    // ---------------- comments (lenient extension) ----------------

    /// The leading `/` has been consumed.
    fn skip_comment(&mut self) -> Result<(), Error> {
        match self.reader.get() {
            b'*' => {
                let mut prev = 0u8;
                loop {
                    let b = self.reader.get();
                    if b == 0 {
                        return Err(Error::CommentNotTerminated {
                            location: self.reader.location(),
                        });
                    }
                    if prev == b'*' && b == b'/' {
                        return Ok(());
                    }
                    prev = b;
                }
            }
            b'/' => loop {
                match self.reader.get() {
                    0 | b'\n' | b'\x0c' => return Ok(()),
                    _ => {}
                }
            },
            _ => Err(Error::InvalidCommentFormat {
                location: self.reader.location(),
            }),
        }
    }
}
