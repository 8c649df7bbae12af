use crate::{Config, Diagnostic, FileInfo, Form, Parser, Stage};
use bytes::{Bytes, BytesMut};
use futures_util::stream::{Stream, TryStreamExt};
use http::header::{self, HeaderMap};
use std::pin::Pin;
use std::task::{Context, Poll};
#[cfg(feature = "tokio-io")]
use {tokio::io::AsyncRead, tokio_util::io::ReaderStream};

type BodyStream<'r> = Pin<Box<dyn Stream<Item = crate::Result<Bytes>> + Send + 'r>>;

enum Mode {
    Parse(Parser),
    /// The body isn't an upload this filter handles and goes through unchanged.
    Passthrough(Form),
}

/// Filters a `multipart/form-data` request body down to the content of its file
/// field.
///
/// The filter is a [`Stream`] of the file field's bytes: headers, boundaries and
/// every other field are held back. The other fields are collected into a
/// [`Form`], available through [`form`](UploadFilter::form) once the stream has
/// been drained. Only one line of the file is held in memory at a time.
///
/// A body that isn't `multipart/form-data`, has no boundary, or is filtered
/// without a configured [file field](Config::file_field) is passed through
/// unchanged.
///
/// # Examples
///
/// ```
/// use upload_filter::{Config, UploadFilter};
/// use bytes::Bytes;
/// use std::convert::Infallible;
/// use futures_util::stream::once;
///
/// # async fn run() {
/// let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nabcd\r\n--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"upload\"; filename=\"a.txt\"\r\n\r\nHello\r\n--X-BOUNDARY--\r\n";
/// let stream = once(async move { Result::<Bytes, Infallible>::Ok(Bytes::from(data)) });
/// let config = Config::new().file_field("upload");
/// let mut filter = UploadFilter::new(stream, Some("multipart/form-data; boundary=X-BOUNDARY"), config);
///
/// let file = filter.bytes().await.unwrap();
///
/// assert_eq!(&file[..], b"Hello\r\n");
/// assert_eq!(filter.form().get("title"), Some("abcd"));
/// assert!(filter.is_complete());
/// # }
/// # tokio::runtime::Runtime::new().unwrap().block_on(run());
/// ```
pub struct UploadFilter<'r> {
    stream: BodyStream<'r>,
    mode: Mode,
    eof: bool,
    content_length: Option<u64>,
    bytes_read: u64,
}

impl<'r> UploadFilter<'r> {
    /// Constructs a filter for a body with the given `Content-Type`.
    ///
    /// Falls back to passthrough when `content_type` is missing, isn't
    /// `multipart/form-data` or carries no boundary, and when `config` names no
    /// file field.
    pub fn new<S, O, E>(stream: S, content_type: Option<&str>, config: Config) -> Self
    where
        S: Stream<Item = Result<O, E>> + Send + 'r,
        O: Into<Bytes> + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + 'r,
    {
        let boundary = match (content_type, &config.file_field) {
            (Some(content_type), Some(_)) => match crate::parse_boundary(content_type) {
                Ok(boundary) => Some(boundary),
                Err(err) => {
                    debug!("passing the body through: {}", err);
                    None
                }
            },
            _ => {
                debug!("passing the body through: no content type or file field");
                None
            }
        };

        let mode = match boundary {
            Some(boundary) => Mode::Parse(Parser::new(boundary, config)),
            None => Mode::Passthrough(Form::default()),
        };

        UploadFilter::with_mode(stream, mode)
    }

    /// Constructs a filter from the request headers, reading `Content-Type` and
    /// using `Content-Length` as a size hint.
    pub fn from_headers<S, O, E>(stream: S, headers: &HeaderMap, config: Config) -> Self
    where
        S: Stream<Item = Result<O, E>> + Send + 'r,
        O: Into<Bytes> + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + 'r,
    {
        let content_type = headers.get(header::CONTENT_TYPE).and_then(|val| val.to_str().ok());
        let content_length = headers
            .get(header::CONTENT_LENGTH)
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.trim().parse::<u64>().ok());

        let mut filter = UploadFilter::new(stream, content_type, config);
        filter.content_length = content_length;
        filter
    }

    /// Constructs a parsing filter for an already known boundary.
    ///
    /// Unlike [`new`](UploadFilter::new) this never passes the body through, even
    /// without a file field; every part then ends up in the [`Form`].
    pub fn with_boundary<S, O, E, B>(stream: S, boundary: B, config: Config) -> Self
    where
        S: Stream<Item = Result<O, E>> + Send + 'r,
        O: Into<Bytes> + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + 'r,
        B: Into<String>,
    {
        UploadFilter::with_mode(stream, Mode::Parse(Parser::new(boundary, config)))
    }

    /// Constructs a filter over an [`AsyncRead`] body with the given
    /// `Content-Type`.
    ///
    /// # Optional
    ///
    /// This requires the optional `tokio-io` feature to be enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use upload_filter::{Config, UploadFilter};
    ///
    /// # async fn run() {
    /// let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"upload\"\r\n\r\nabcd\r\n--X-BOUNDARY--\r\n";
    /// let reader = data.as_bytes();
    /// let config = Config::new().file_field("upload");
    /// let mut filter = UploadFilter::with_reader(reader, Some("multipart/form-data; boundary=X-BOUNDARY"), config);
    ///
    /// while let Some(chunk) = filter.chunk().await.unwrap() {
    ///     println!("Chunk: {:?}", chunk);
    /// }
    /// # }
    /// # tokio::runtime::Runtime::new().unwrap().block_on(run());
    /// ```
    #[cfg(feature = "tokio-io")]
    #[cfg_attr(nightly, doc(cfg(feature = "tokio-io")))]
    pub fn with_reader<R>(reader: R, content_type: Option<&str>, config: Config) -> Self
    where
        R: AsyncRead + Unpin + Send + 'r,
    {
        let stream = ReaderStream::new(reader);
        UploadFilter::new(stream, content_type, config)
    }

    fn with_mode<S, O, E>(stream: S, mode: Mode) -> Self
    where
        S: Stream<Item = Result<O, E>> + Send + 'r,
        O: Into<Bytes> + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + 'r,
    {
        let stream = stream
            .map_ok(Into::<Bytes>::into)
            .map_err(|err| crate::Error::StreamReadFailed(err.into()));

        UploadFilter {
            stream: Box::pin(stream),
            mode,
            eof: false,
            content_length: None,
            bytes_read: 0,
        }
    }

    /// Yields the next chunk of file content, or `None` at the end of the body.
    pub async fn chunk(&mut self) -> crate::Result<Option<Bytes>> {
        self.try_next().await
    }

    /// Drains the rest of the body and returns the remaining file content.
    pub async fn bytes(&mut self) -> crate::Result<Bytes> {
        let mut buf = BytesMut::new();

        while let Some(bytes) = self.chunk().await? {
            buf.extend_from_slice(&bytes);
        }

        Ok(buf.freeze())
    }

    /// Returns `true` if the body is passed through without parsing.
    pub fn is_passthrough(&self) -> bool {
        matches!(self.mode, Mode::Passthrough(_))
    }

    /// The fields collected so far. Always empty in passthrough mode.
    pub fn form(&self) -> &Form {
        match &self.mode {
            Mode::Parse(parser) => parser.form(),
            Mode::Passthrough(form) => form,
        }
    }

    pub fn into_form(self) -> Form {
        match self.mode {
            Mode::Parse(parser) => parser.into_form(),
            Mode::Passthrough(form) => form,
        }
    }

    pub fn file_info(&self) -> Option<&FileInfo> {
        match &self.mode {
            Mode::Parse(parser) => parser.file_info(),
            Mode::Passthrough(_) => None,
        }
    }

    /// The parser stage, or `None` in passthrough mode.
    pub fn stage(&self) -> Option<Stage> {
        match &self.mode {
            Mode::Parse(parser) => Some(parser.stage()),
            Mode::Passthrough(_) => None,
        }
    }

    /// Returns `true` once a parsed body reached its closing boundary.
    ///
    /// A stream that ended while this is still `false` carried a truncated
    /// upload. Passthrough bodies are complete once their stream ended.
    pub fn is_complete(&self) -> bool {
        match &self.mode {
            Mode::Parse(parser) => parser.is_done(),
            Mode::Passthrough(_) => self.eof,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match &self.mode {
            Mode::Parse(parser) => parser.diagnostics(),
            Mode::Passthrough(_) => &[],
        }
    }

    /// The declared `Content-Length` when built with
    /// [`from_headers`](UploadFilter::from_headers).
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    fn end_of_body(&mut self) -> Poll<Option<crate::Result<Bytes>>> {
        self.eof = true;

        if let Some(expected) = self.content_length {
            if expected != self.bytes_read {
                debug!(
                    "body ended after {} bytes, Content-Length was {}",
                    self.bytes_read, expected
                );
            }
        }

        let parser = match &mut self.mode {
            Mode::Parse(parser) => parser,
            Mode::Passthrough(_) => return Poll::Ready(None),
        };

        match parser.finish() {
            Ok(bytes) if bytes.is_empty() => Poll::Ready(None),
            Ok(bytes) => Poll::Ready(Some(Ok(bytes))),
            Err(err) => Poll::Ready(Some(Err(err))),
        }
    }
}

impl<'r> Stream for UploadFilter<'r> {
    type Item = crate::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if this.eof {
                return Poll::Ready(None);
            }

            if let Mode::Parse(parser) = &this.mode {
                if parser.is_done() {
                    this.eof = true;
                    return Poll::Ready(None);
                }
            }

            let chunk = match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => chunk,
                Poll::Ready(Some(Err(err))) => {
                    this.eof = true;
                    return Poll::Ready(Some(Err(err)));
                }
                Poll::Ready(None) => return this.end_of_body(),
                Poll::Pending => return Poll::Pending,
            };

            this.bytes_read += chunk.len() as u64;

            let output = match &mut this.mode {
                Mode::Parse(parser) => match parser.feed(&chunk) {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        this.eof = true;
                        return Poll::Ready(Some(Err(err)));
                    }
                },
                Mode::Passthrough(_) => chunk,
            };

            if !output.is_empty() {
                return Poll::Ready(Some(Ok(output)));
            }
        }
    }
}
