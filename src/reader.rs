//! Byte source feeding the scanners.
//!
//! The reader works over a fully materialized `&[u8]` and hands out borrowed
//! subslices of it. The "protection window" of the original streaming design
//! degenerates here to plain index ranges: a slice of the input is stable for
//! the whole parse, so zero-copy string delivery needs no extra machinery.
//!
//! End of input is modeled with a `0` sentinel byte, never with an error: a
//! raw NUL inside the stream terminates it the same way running off the end
//! does. Escaped NULs (`\u0000`) never pass through here; the escape decoder
//! produces them directly in its own buffer.

use crate::error::Location;

/// Whitespace set skipped between tokens: space, tab, CR, LF, form feed.
#[inline]
fn is_white(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x0c')
}

pub(crate) struct Reader<'a> {
    input: &'a [u8],
    /// Index of the next byte to return.
    pos: usize,
    /// 1-indexed position of the next byte to return.
    line: u32,
    column: u32,
    /// Position of the most recently returned byte, for error reporting
    /// and single-step backup.
    prev_line: u32,
    prev_column: u32,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            prev_line: 1,
            prev_column: 1,
        }
    }

    /// Next byte, or `0` at end of input. A raw NUL byte in the input also
    /// reads as end of input and is not consumed.
    pub(crate) fn get(&mut self) -> u8 {
        self.prev_line = self.line;
        self.prev_column = self.column;
        if self.pos >= self.input.len() {
            return 0;
        }
        let b = self.input[self.pos];
        if b == 0 {
            return 0;
        }
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        b
    }

    /// Next non-whitespace byte, or `0` at end of input.
    pub(crate) fn next_non_white(&mut self) -> u8 {
        loop {
            let b = self.get();
            if !is_white(b) {
                return b;
            }
        }
    }

    /// Consume exactly the bytes of `s`. Returns `false` on the first
    /// mismatch, leaving the reader just past the offending byte.
    pub(crate) fn expect(&mut self, s: &[u8]) -> bool {
        for &want in s {
            if self.get() != want {
                return false;
            }
        }
        true
    }

    /// Un-read the byte most recently returned by [`Reader::get`].
    ///
    /// Single-step only, and only valid after a `get` that returned a
    /// non-zero byte. The number scanner uses this to push back the byte
    /// that terminated a literal so the driver dispatches on it.
    pub(crate) fn backup(&mut self) {
        self.pos -= 1;
        self.line = self.prev_line;
        self.column = self.prev_column;
    }

    /// Index of the next byte to return.
    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    /// Borrowed window of the input. Callers hold on to offsets from
    /// [`Reader::offset`] and slice later; the slice stays valid for the
    /// whole parse.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    /// Location of the most recently returned byte (1-indexed).
    pub(crate) fn location(&self) -> Location {
        Location::new(self.prev_line, self.prev_column)
    }
}
