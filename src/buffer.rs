use crate::constants::{LineEnding, CR, LF};
use bytes::{Bytes, BytesMut};

/// One logical line of the body with its terminator stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    pub(crate) content: Bytes,
    pub(crate) ending: LineEnding,
    /// The head of this line was already relayed, so it can't be a boundary.
    pub(crate) continued: bool,
}

/// Turns arbitrarily sized chunks into complete lines.
///
/// Whatever trails the last LF stays in `buf` as the carry-over fragment and is
/// joined with the next chunk. `scanned` counts the leading bytes of `buf` that
/// are already known to hold no LF, so a long fragment is searched only once.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    buf: BytesMut,
    scanned: usize,
    continued: bool,
}

impl LineBuffer {
    pub fn new() -> Self {
        LineBuffer::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Pops the next complete line.
    ///
    /// CR stripping happens here, on the joined buffer, so a CR that ended one
    /// chunk and the LF that started the next still form a single CRLF.
    pub fn next_line(&mut self) -> Option<Line> {
        let idx = match memchr::memchr(LF, &self.buf[self.scanned..]) {
            Some(rel_idx) => self.scanned + rel_idx,
            None => {
                self.scanned = self.buf.len();
                return None;
            }
        };

        let mut content = self.buf.split_to(idx + 1);
        content.truncate(idx);
        self.scanned = 0;

        let ending = if content.last() == Some(&CR) {
            content.truncate(idx - 1);
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };

        Some(Line {
            content: content.freeze(),
            ending,
            continued: std::mem::take(&mut self.continued),
        })
    }

    /// Releases the carry-over fragment as a final, unterminated line.
    pub fn take_remaining(&mut self) -> Option<Line> {
        if self.buf.is_empty() {
            return None;
        }

        self.scanned = 0;

        Some(Line {
            content: self.buf.split().freeze(),
            ending: LineEnding::None,
            continued: std::mem::take(&mut self.continued),
        })
    }

    /// Splits off the head of the carry-over fragment ahead of its LF.
    ///
    /// A trailing CR is kept back since it may pair with an LF in the next chunk.
    /// Whatever completes the line afterwards is flagged as `continued`.
    pub fn drain_partial(&mut self) -> Bytes {
        let keep = if self.buf.last() == Some(&CR) { 1 } else { 0 };
        let head = self.buf.split_to(self.buf.len() - keep).freeze();

        self.scanned = self.buf.len();
        if !head.is_empty() {
            self.continued = true;
        }

        head
    }

    pub fn fragment(&self) -> &[u8] {
        &self.buf
    }

    pub fn is_continued(&self) -> bool {
        self.continued
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.scanned = 0;
        self.continued = false;
    }
}
