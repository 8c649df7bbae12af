use crate::Stage;
use derive_more::Display;

/// A grammar irregularity met while parsing the body.
///
/// In the default lenient mode these are collected and parsing goes on, see
/// [`Parser::diagnostics`](crate::Parser::diagnostics). In strict mode the first
/// one aborts the parse as [`Error::MalformedBody`](crate::Error::MalformedBody).
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[non_exhaustive]
pub enum Diagnostic {
    /// A part header line without a `:` separator. It was ignored.
    #[display(fmt = "part header without colon: {:?}", line)]
    MissingColon { line: String },

    /// A part header whose name or value isn't valid HTTP. A bad name drops the
    /// line; a bad `Content-Disposition` value is still read for `name` and
    /// `filename`.
    #[display(fmt = "invalid part header: {:?}", line)]
    InvalidHeader { line: String },

    /// A non-file part had no `name` in its `Content-Disposition`, so its value
    /// was dropped.
    #[display(fmt = "part without a field name")]
    UnnamedPart,

    /// The body ended before the closing boundary was seen.
    #[display(fmt = "body ended before the closing boundary while {}", stage)]
    IncompleteStream { stage: Stage },
}
