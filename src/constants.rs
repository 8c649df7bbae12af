pub(crate) const DEFAULT_FORM_SIZE: usize = 8;

/// A carry-over fragment of the file part longer than this is relayed before
/// its line ends, as long as it can no longer become a boundary line.
pub(crate) const LINE_FLUSH_THRESHOLD: usize = 8 * 1024;

pub(crate) const BOUNDARY_EXT: &str = "--";
pub(crate) const CR: u8 = b'\r';
pub(crate) const LF: u8 = b'\n';
pub(crate) const CRLF: &str = "\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineEnding {
    CrLf,
    Lf,
    /// The unterminated tail of the body, released at end of stream.
    None,
}

impl LineEnding {
    pub(crate) fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::CrLf => CRLF.as_bytes(),
            LineEnding::Lf => &CRLF.as_bytes()[1..],
            LineEnding::None => &[],
        }
    }
}
