//! A streaming `multipart/form-data` upload filter.
//!
//! The filter sits between a request body and whatever consumes it. It splits
//! the body into parts as the chunks arrive, collects ordinary fields into a
//! [`Form`] and hands the content of a single, configured file field to the
//! consumer without ever buffering it. Everything else (part headers,
//! boundaries, other fields) is held back from the consumer.
//!
//! [`UploadFilter`] wraps any [`Stream`](futures_util::stream::Stream) of body
//! chunks. [`Parser`] is the same machinery without any I/O, fed one chunk at a
//! time.
//!
//! # Examples
//!
//! ```
//! use upload_filter::{Config, UploadFilter};
//! use bytes::Bytes;
//! use std::convert::Infallible;
//! use futures_util::stream::iter;
//!
//! # async fn run() {
//! let chunks = vec![
//!     "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nMy ",
//!     "trip\r\n--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"a.jpg\"\r\n\r\n",
//!     "JPEG...\r\n--X-BOUNDARY--\r\n",
//! ];
//! let stream = iter(chunks.into_iter().map(|chunk| Result::<Bytes, Infallible>::Ok(Bytes::from(chunk))));
//!
//! let config = Config::new().file_field("photo");
//! let mut filter = UploadFilter::new(stream, Some("multipart/form-data; boundary=X-BOUNDARY"), config);
//!
//! while let Some(chunk) = filter.chunk().await.unwrap() {
//!     println!("{} bytes of the photo", chunk.len());
//! }
//!
//! assert!(filter.is_complete());
//! assert_eq!(filter.form().get("title"), Some("My trip"));
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(run());
//! ```
//!
//! # Features
//!
//! - `json`: [`Form::json`] deserializes the collected fields.
//! - `tokio-io`: [`UploadFilter::with_reader`] reads from a `tokio` `AsyncRead`.
//! - `log`: parsing progress and skipped irregularities are logged through `log`.

#![cfg_attr(nightly, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub use bytes;

#[cfg(feature = "log")]
macro_rules! trace {
    ($($t:tt)*) => (log::trace!($($t)*));
}

#[cfg(feature = "log")]
macro_rules! debug {
    ($($t:tt)*) => (log::debug!($($t)*));
}

#[cfg(feature = "log")]
macro_rules! warn {
    ($($t:tt)*) => (log::warn!($($t)*));
}

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($t:tt)*) => {{
        if false {
            let _ = format_args!($($t)*);
        }
    }};
}

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($t:tt)*) => {{
        if false {
            let _ = format_args!($($t)*);
        }
    }};
}

#[cfg(not(feature = "log"))]
macro_rules! warn {
    ($($t:tt)*) => {{
        if false {
            let _ = format_args!($($t)*);
        }
    }};
}

pub use config::Config;
pub use diagnostic::Diagnostic;
pub use error::Error;
pub use field::FileInfo;
pub use filter::UploadFilter;
pub use form::Form;
pub use parser::Parser;
pub use state::Stage;

mod boundary;
mod buffer;
mod config;
mod constants;
mod content_disposition;
mod diagnostic;
mod error;
mod field;
mod filter;
mod form;
mod helpers;
mod parser;
mod state;

/// A Result type often returned from methods that can have `upload-filter` errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Parses the `Content-Type` header to extract the boundary value.
///
/// The boundary is returned verbatim; case matters when matching it against the
/// body.
///
/// # Examples
///
/// ```
/// let content_type = "multipart/form-data; boundary=ABCDEFG";
///
/// assert_eq!(upload_filter::parse_boundary(content_type), Ok("ABCDEFG".to_owned()));
/// ```
pub fn parse_boundary<T: AsRef<str>>(content_type: T) -> Result<String> {
    let m = content_type
        .as_ref()
        .parse::<mime::Mime>()
        .map_err(Error::DecodeContentType)?;

    if !(m.type_() == mime::MULTIPART && m.subtype() == mime::FORM_DATA) {
        return Err(Error::NoMultipart);
    }

    m.get_param(mime::BOUNDARY)
        .map(|name| name.as_str().to_owned())
        .ok_or(Error::NoBoundary)
}
