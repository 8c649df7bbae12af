use bytes::BytesMut;
use std::fmt::{self, Display, Formatter};

/// The position of a [`Parser`](crate::Parser) in the multipart grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Skipping the preamble up to the first boundary.
    FindingFirstBoundary,
    /// Reading the header lines of a part.
    ReadingFieldHeaders,
    /// Collecting or relaying the body of a part.
    ReadingFieldData,
    /// The closing boundary was seen; the rest of the input is epilogue.
    End,
    /// Terminal. Further input is ignored.
    Done,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::FindingFirstBoundary => "finding the first boundary",
            Stage::ReadingFieldHeaders => "reading field headers",
            Stage::ReadingFieldData => "reading field data",
            Stage::End => "past the closing boundary",
            Stage::Done => "done",
        };

        f.write_str(s)
    }
}

/// What is known about the part currently being read.
#[derive(Debug, Default)]
pub(crate) struct PartState {
    pub(crate) field_name: Option<String>,
    pub(crate) file_name: Option<String>,
    pub(crate) content_type: Option<mime::Mime>,
    pub(crate) value: Option<BytesMut>,
    pub(crate) is_file: bool,
}
