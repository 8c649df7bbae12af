use std::fmt::{self, Debug, Display, Formatter};

use derive_more::Display;

use crate::Diagnostic;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A set of errors that can occur while filtering an upload stream and in other
/// operations.
#[derive(Display)]
#[non_exhaustive]
pub enum Error {
    /// The body broke the multipart grammar while running in
    /// [strict](crate::Config::strict) mode.
    #[display(fmt = "malformed multipart body: {}", _0)]
    MalformedBody(Diagnostic),

    /// The body ended before the closing boundary, in strict mode.
    #[display(fmt = "incomplete multipart stream")]
    IncompleteStream,

    /// Reading the upstream body failed.
    #[display(fmt = "stream read failed: {}", _0)]
    StreamReadFailed(BoxError),

    /// The `Content-Type` header is not `multipart/form-data`.
    #[display(fmt = "Content-Type is not multipart/form-data")]
    NoMultipart,

    /// Failed to convert the `Content-Type` to [`mime::Mime`] type.
    #[display(fmt = "Failed to convert Content-Type to `mime::Mime` type: {}", _0)]
    DecodeContentType(mime::FromStrError),

    /// No boundary found in `Content-Type` header.
    #[display(fmt = "multipart boundary not found in Content-Type")]
    NoBoundary,

    /// Failed to decode the collected form as `JSON` in
    /// [`Form::json`](crate::Form::json).
    #[cfg(feature = "json")]
    #[cfg_attr(nightly, doc(cfg(feature = "json")))]
    #[display(fmt = "failed to decode form fields as JSON: {}", _0)]
    DecodeJson(serde_json::Error),
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::StreamReadFailed(err) => Some(err.as_ref()),
            Error::DecodeContentType(err) => Some(err),
            #[cfg(feature = "json")]
            Error::DecodeJson(err) => Some(err),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string().eq(&other.to_string())
    }
}

impl Eq for Error {}

impl From<Diagnostic> for Error {
    fn from(diagnostic: Diagnostic) -> Self {
        match diagnostic {
            Diagnostic::IncompleteStream { .. } => Error::IncompleteStream,
            diagnostic => Error::MalformedBody(diagnostic),
        }
    }
}
