use crate::boundary::{Boundary, BoundaryKind};
use crate::buffer::{Line, LineBuffer};
use crate::constants::{self, LineEnding};
use crate::content_disposition::ContentDisposition;
use crate::helpers;
use crate::state::{PartState, Stage};
use crate::{Config, Diagnostic, FileInfo, Form};
use bytes::{Bytes, BytesMut};
use http::header;

/// A sans-IO `multipart/form-data` parser that collects ordinary fields and
/// relays the configured file field.
///
/// Chunks may be split anywhere. Every call to [`feed`](Parser::feed) returns the
/// file bytes that became available; ordinary fields end up in the
/// [`Form`](crate::Form) once their part is closed.
///
/// # Examples
///
/// ```
/// use upload_filter::{Config, Parser};
///
/// let mut parser = Parser::new("X-BOUNDARY", Config::new().file_field("upload"));
///
/// let mut file = Vec::new();
/// for chunk in [
///     &b"--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nHoliday\r\n--X-BOUN"[..],
///     &b"DARY\r\nContent-Disposition: form-data; name=\"upload\"; filename=\"a.txt\"\r\n\r\n"[..],
///     &b"Hello\r\n--X-BOUNDARY--\r\n"[..],
/// ] {
///     file.extend_from_slice(&parser.feed(chunk).unwrap());
/// }
/// file.extend_from_slice(&parser.finish().unwrap());
///
/// assert!(parser.is_done());
/// assert_eq!(parser.form().get("title"), Some("Holiday"));
/// assert_eq!(parser.file_info().and_then(|info| info.file_name()), Some("a.txt"));
/// assert_eq!(file, b"Hello\r\n");
/// ```
#[derive(Debug)]
pub struct Parser {
    lines: LineBuffer,
    boundary: Boundary,
    stage: Stage,
    part: PartState,
    form: Form,
    config: Config,
    output: BytesMut,
    pending_line_break: Option<LineEnding>,
    file_info: Option<FileInfo>,
    diagnostics: Vec<Diagnostic>,
    finished: bool,
}

impl Parser {
    /// Creates a parser for a body delimited by `boundary`, as found in the
    /// `Content-Type` header (see [`parse_boundary`](crate::parse_boundary)).
    pub fn new<B: Into<String>>(boundary: B, config: Config) -> Parser {
        Parser {
            lines: LineBuffer::new(),
            boundary: Boundary::new(boundary),
            stage: Stage::FindingFirstBoundary,
            part: PartState::default(),
            form: Form::with_capacity(config.form_size),
            config,
            output: BytesMut::new(),
            pending_line_break: None,
            file_info: None,
            diagnostics: Vec::new(),
            finished: false,
        }
    }

    /// Feeds the next chunk of the body and returns the file bytes it completed.
    ///
    /// The returned bytes may be empty. Once the closing boundary has been seen
    /// the rest of the chunk and any later chunk are ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> crate::Result<Bytes> {
        if self.stage == Stage::Done {
            return Ok(Bytes::new());
        }

        self.lines.push(chunk);

        while let Some(line) = self.lines.next_line() {
            if let Err(err) = self.process_line(line) {
                self.output.clear();
                return Err(err);
            }

            if self.stage == Stage::End {
                break;
            }
        }

        self.close_if_ended();
        self.relay_long_line();

        Ok(self.output.split().freeze())
    }

    /// Signals the end of the body and returns the last file bytes, if any.
    ///
    /// A body that ended before its closing boundary leaves the parser short of
    /// [`Stage::Done`]. That is recorded as [`Diagnostic::IncompleteStream`], or
    /// returned as [`Error::IncompleteStream`](crate::Error::IncompleteStream) in
    /// strict mode.
    ///
    /// Calls after the first return empty bytes.
    pub fn finish(&mut self) -> crate::Result<Bytes> {
        if self.finished {
            return Ok(Bytes::new());
        }
        self.finished = true;

        if let Some(line) = self.lines.take_remaining() {
            if let Err(err) = self.process_line(line) {
                self.output.clear();
                return Err(err);
            }
        }

        self.close_if_ended();

        if self.stage != Stage::Done {
            if let Some(line_break) = self.pending_line_break.take() {
                self.output.extend_from_slice(line_break.as_bytes());
            }

            let stage = self.stage;
            if let Err(err) = self.report(Diagnostic::IncompleteStream { stage }) {
                self.output.clear();
                return Err(err);
            }
        }

        Ok(self.output.split().freeze())
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns `true` once the closing boundary has been seen.
    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    pub fn boundary(&self) -> &str {
        self.boundary.token()
    }

    /// The ordinary fields closed so far.
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn into_form(self) -> Form {
        self.form
    }

    /// Metadata of the most recent file part, once its headers have been read.
    pub fn file_info(&self) -> Option<&FileInfo> {
        self.file_info.as_ref()
    }

    /// Irregularities skipped over in lenient mode.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn process_line(&mut self, line: Line) -> crate::Result<()> {
        let kind = if line.continued {
            BoundaryKind::NotBoundary
        } else {
            self.boundary.classify(&line.content)
        };

        match self.stage {
            Stage::FindingFirstBoundary => {
                if kind == BoundaryKind::PartBoundary {
                    trace!("found the first boundary");
                    self.stage = Stage::ReadingFieldHeaders;
                }
            }
            Stage::ReadingFieldHeaders => {
                if line.content.is_empty() {
                    self.start_body();
                } else {
                    self.read_header(&line.content)?;
                }
            }
            Stage::ReadingFieldData => match kind {
                BoundaryKind::PartBoundary => {
                    self.end_body()?;
                    self.stage = Stage::ReadingFieldHeaders;
                }
                BoundaryKind::FinalBoundary => {
                    self.end_body()?;
                    self.stage = Stage::End;
                }
                BoundaryKind::NotBoundary => self.write_body(line),
            },
            Stage::End | Stage::Done => {}
        }

        Ok(())
    }

    fn read_header(&mut self, line: &[u8]) -> crate::Result<()> {
        let (name, value) = match helpers::parse_header_line(line) {
            Ok(header) => header,
            Err(diagnostic) => return self.report(diagnostic),
        };

        // A bad value is reported but still searched for the part's name.
        if let Err(diagnostic) = helpers::check_header_value(line, value) {
            self.report(diagnostic)?;
        }

        if name == header::CONTENT_DISPOSITION {
            let disposition = ContentDisposition::parse(value);

            if let Some(field_name) = disposition.field_name {
                self.part.is_file = self.config.is_file_field(&field_name);
                self.part.field_name = Some(field_name);
            }
            self.part.file_name = disposition.file_name;
        } else if name == header::CONTENT_TYPE {
            self.part.content_type = std::str::from_utf8(value)
                .ok()
                .and_then(|val| val.parse::<mime::Mime>().ok());
        }

        Ok(())
    }

    fn start_body(&mut self) {
        self.stage = Stage::ReadingFieldData;
        self.pending_line_break = None;

        if self.part.is_file {
            debug!("relaying file field {:?}", self.part.field_name);

            self.file_info = Some(FileInfo {
                name: self.part.field_name.clone(),
                file_name: self.part.file_name.take(),
                content_type: self.part.content_type.take(),
            });
        }
    }

    fn write_body(&mut self, line: Line) {
        if self.part.is_file {
            self.relay(&line.content);

            if self.config.trim_final_line_break {
                self.pending_line_break = Some(line.ending);
            } else {
                self.output.extend_from_slice(line.ending.as_bytes());
            }
        } else {
            // Line breaks inside an ordinary field are dropped.
            self.part
                .value
                .get_or_insert_with(BytesMut::new)
                .extend_from_slice(&line.content);
        }
    }

    fn relay(&mut self, content: &[u8]) {
        if let Some(line_break) = self.pending_line_break.take() {
            self.output.extend_from_slice(line_break.as_bytes());
        }
        self.output.extend_from_slice(content);
    }

    fn end_body(&mut self) -> crate::Result<()> {
        let part = std::mem::take(&mut self.part);
        self.pending_line_break = None;

        if part.is_file {
            return Ok(());
        }

        match part.field_name {
            Some(name) => {
                let value = part
                    .value
                    .map(|value| String::from_utf8_lossy(&value).into_owned())
                    .unwrap_or_default();

                trace!("collected field {:?} ({} bytes)", name, value.len());
                self.form.insert(name, value);
                Ok(())
            }
            None => self.report(Diagnostic::UnnamedPart),
        }
    }

    fn close_if_ended(&mut self) {
        if self.stage == Stage::End {
            debug!("reached the closing boundary, {} fields collected", self.form.len());
            self.lines.clear();
            self.stage = Stage::Done;
        }
    }

    /// Relays the head of an overlong file line before its LF arrives.
    fn relay_long_line(&mut self) {
        if self.stage != Stage::ReadingFieldData || !self.part.is_file {
            return;
        }

        let fragment = self.lines.fragment();
        if fragment.len() <= constants::LINE_FLUSH_THRESHOLD {
            return;
        }
        if !self.lines.is_continued() && self.boundary.may_start(fragment) {
            return;
        }

        let head = self.lines.drain_partial();
        self.relay(&head);
    }

    fn report(&mut self, diagnostic: Diagnostic) -> crate::Result<()> {
        if self.config.strict {
            return Err(diagnostic.into());
        }

        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn run(parser: &mut Parser, chunks: &[&[u8]]) -> crate::Result<Vec<u8>> {
        let mut file = Vec::new();
        for chunk in chunks {
            file.extend_from_slice(&parser.feed(chunk)?);
        }
        file.extend_from_slice(&parser.finish()?);
        Ok(file)
    }

    fn file_config() -> Config {
        Config::new().file_field("f")
    }

    #[test]
    fn test_single_field() {
        let mut parser = Parser::new("XYZ", file_config());
        let file = run(
            &mut parser,
            &[b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nhello\r\n--XYZ--\r\n"],
        )
        .unwrap();

        assert!(file.is_empty());
        assert!(parser.is_done());
        assert_eq!(parser.form().len(), 1);
        assert_eq!(parser.form().get("a"), Some("hello"));
        assert!(parser.diagnostics().is_empty());
    }

    #[test]
    fn test_file_field_is_relayed() {
        let mut parser = Parser::new("XYZ", file_config());
        let file = run(
            &mut parser,
            &[b"--XYZ\r\nContent-Disposition: form-data; name=\"f\"\r\n\r\nline1\r\nline2\r\n--XYZ--\r\n"],
        )
        .unwrap();

        assert!(parser.is_done());
        assert!(parser.form().is_empty());
        assert_eq!(file, b"line1\r\nline2\r\n");
        assert_eq!(parser.file_info().and_then(|info| info.name()), Some("f"));
    }

    #[test]
    fn test_file_field_matches_case_insensitively() {
        let mut parser = Parser::new("XYZ", file_config());
        let file = run(
            &mut parser,
            &[b"--XYZ\r\nContent-Disposition: form-data; name=\"F\"\r\n\r\ndata\r\n--XYZ--\r\n"],
        )
        .unwrap();

        assert_eq!(file, b"data\r\n");
        assert!(parser.form().is_empty());
    }

    #[test]
    fn test_boundary_split_across_chunks() {
        let mut parser = Parser::new("XYZ", file_config());
        run(
            &mut parser,
            &[
                b"--XY",
                b"Z\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nhello\r\n--XYZ--\r\n",
            ],
        )
        .unwrap();

        assert!(parser.is_done());
        assert_eq!(parser.form().get("a"), Some("hello"));
    }

    #[test]
    fn test_multi_line_value_is_concatenated() {
        let mut parser = Parser::new("XYZ", file_config());
        run(
            &mut parser,
            &[b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nfoo\r\nbar\r\n--XYZ--\r\n"],
        )
        .unwrap();

        assert_eq!(parser.form().get("a"), Some("foobar"));
    }

    #[test]
    fn test_field_names_match_case_insensitively() {
        let mut parser = Parser::new("XYZ", file_config());
        run(
            &mut parser,
            &[b"--XYZ\r\nContent-Disposition: form-data; name=\"Name\"\r\n\r\none\r\n--XYZ\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\ntwo\r\n--XYZ--\r\n"],
        )
        .unwrap();

        assert_eq!(parser.form().len(), 1);
        assert_eq!(parser.form().get("Name"), Some("two"));
        assert_eq!(parser.form().get("NAME"), Some("two"));
    }

    #[test]
    fn test_last_field_with_same_name_wins() {
        let mut parser = Parser::new("XYZ", file_config());
        run(
            &mut parser,
            &[b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\none\r\n--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\ntwo\r\n--XYZ--\r\n"],
        )
        .unwrap();

        assert_eq!(parser.form().len(), 1);
        assert_eq!(parser.form().get("a"), Some("two"));
    }

    #[test]
    fn test_empty_value() {
        let mut parser = Parser::new("XYZ", file_config());
        run(
            &mut parser,
            &[b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\n--XYZ--\r\n"],
        )
        .unwrap();

        assert_eq!(parser.form().get("a"), Some(""));
    }

    #[test]
    fn test_mixed_parts_with_preamble_and_epilogue() {
        let body: &[u8] = b"This is the preamble.\r\n--XYZ\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nHoliday\r\n--XYZ\r\nContent-Disposition: form-data; name=\"f\"; filename=\"notes.txt\"\r\nContent-Type: text/plain\r\n\r\nday one\nday two\r\n--XYZ\r\nContent-Disposition: form-data; name=\"place\"\r\n\r\nBeach\r\n--XYZ--\r\nThis is the epilogue.\r\n--XYZ\r\n";

        let mut parser = Parser::new("XYZ", file_config());
        let file = run(&mut parser, &[body]).unwrap();

        assert!(parser.is_done());
        assert_eq!(file, b"day one\nday two\r\n");
        assert_eq!(parser.form().len(), 2);
        assert_eq!(parser.form().get("title"), Some("Holiday"));
        assert_eq!(parser.form().get("place"), Some("Beach"));

        let info = parser.file_info().unwrap();
        assert_eq!(info.file_name(), Some("notes.txt"));
        assert_eq!(info.content_type(), Some(&mime::TEXT_PLAIN));
    }

    #[test]
    fn test_output_is_independent_of_chunking() {
        let mut body = b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nfoo\r\nbar\r\n--XYZ\r\nContent-Disposition: form-data; name=\"f\"\r\n\r\n".to_vec();
        body.extend(std::iter::repeat(b'x').take(constants::LINE_FLUSH_THRESHOLD + 100));
        body.extend_from_slice(b"\r\nshort\rline\n--XYZ-x\r\n\r\n--XYZ--\r\n");

        let mut parser = Parser::new("XYZ", file_config());
        let expected = run(&mut parser, &[&body[..]]).unwrap();
        let expected_form = parser.into_form();

        let mut expected_file = vec![b'x'; constants::LINE_FLUSH_THRESHOLD + 100];
        expected_file.extend_from_slice(b"\r\nshort\rline\n--XYZ-x\r\n\r\n");
        assert_eq!(expected, expected_file);
        assert_eq!(expected_form.get("a"), Some("foobar"));

        for size in [1, 2, 3, 7, 64, 1000, 4096, 9000] {
            let chunks = body.chunks(size).collect::<Vec<_>>();
            let mut parser = Parser::new("XYZ", file_config());
            let file = run(&mut parser, &chunks).unwrap();

            assert!(parser.is_done(), "chunk size {}", size);
            assert_eq!(file, expected, "chunk size {}", size);
            assert_eq!(parser.into_form(), expected_form, "chunk size {}", size);
        }
    }

    #[test]
    fn test_long_line_is_relayed_before_its_end() {
        let mut parser = Parser::new("XYZ", file_config());
        parser
            .feed(b"--XYZ\r\nContent-Disposition: form-data; name=\"f\"\r\n\r\n")
            .unwrap();

        let long = vec![b'a'; constants::LINE_FLUSH_THRESHOLD + 1];
        assert_eq!(&parser.feed(&long).unwrap()[..], &long[..]);

        // The rest of that line must not be mistaken for a boundary.
        let rest = parser.feed(b"--XYZ\r\nmore\r\n--XYZ--\r\n").unwrap();
        assert_eq!(&rest[..], b"--XYZ\r\nmore\r\n");
        assert!(parser.is_done());
    }

    #[test]
    fn test_long_boundary_prefix_is_held_back() {
        let mut parser = Parser::new("XYZ", file_config());
        parser
            .feed(b"--XYZ\r\nContent-Disposition: form-data; name=\"f\"\r\n\r\n")
            .unwrap();

        let mut padded = b"--XYZ".to_vec();
        padded.extend(std::iter::repeat(b' ').take(constants::LINE_FLUSH_THRESHOLD));
        assert!(parser.feed(&padded).unwrap().is_empty());

        assert!(parser.feed(b"\r\n").unwrap().is_empty());
        assert_eq!(parser.stage(), Stage::ReadingFieldHeaders);
    }

    #[test]
    fn test_crlf_split_across_chunks_in_file() {
        let mut parser = Parser::new("XYZ", file_config());
        let file = run(
            &mut parser,
            &[
                b"--XYZ\r\nContent-Disposition: form-data; name=\"f\"\r\n\r\nab\r",
                b"\ncd\r",
                b"\n--XYZ--\r\n",
            ],
        )
        .unwrap();

        assert_eq!(file, b"ab\r\ncd\r\n");
    }

    #[test]
    fn test_trim_final_line_break() {
        let config = file_config().trim_final_line_break(true);
        let mut parser = Parser::new("XYZ", config);
        let file = run(
            &mut parser,
            &[
                b"--XYZ\r\nContent-Disposition: form-data; name=\"f\"\r\n\r\nline1\r\n",
                b"line2\r",
                b"\n--XYZ--\r\n",
            ],
        )
        .unwrap();

        assert_eq!(file, b"line1\r\nline2");
    }

    #[test]
    fn test_done_is_terminal() {
        let mut parser = Parser::new("XYZ", file_config());
        parser
            .feed(b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nhello\r\n--XYZ--\r\n")
            .unwrap();
        assert!(parser.is_done());

        let more = parser
            .feed(b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nchanged\r\n--XYZ--\r\n")
            .unwrap();

        assert!(more.is_empty());
        assert_eq!(parser.form().get("a"), Some("hello"));
        assert!(parser.finish().unwrap().is_empty());
        assert!(parser.diagnostics().is_empty());
    }

    #[test]
    fn test_closing_boundary_without_line_break() {
        let mut parser = Parser::new("XYZ", file_config());
        run(
            &mut parser,
            &[b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nhello\r\n--XYZ--"],
        )
        .unwrap();

        assert!(parser.is_done());
        assert_eq!(parser.form().get("a"), Some("hello"));
    }

    #[test]
    fn test_truncated_body() {
        let body: &[u8] = b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\ndone\r\n--XYZ\r\nContent-Disposition: form-data; name=\"b\"\r\n\r\nhalf";

        let mut parser = Parser::new("XYZ", file_config());
        run(&mut parser, &[body]).unwrap();

        assert!(!parser.is_done());
        assert_eq!(parser.stage(), Stage::ReadingFieldData);
        assert_eq!(parser.form().get("a"), Some("done"));
        assert!(!parser.form().contains("b"));
        assert_eq!(
            parser.diagnostics(),
            &[Diagnostic::IncompleteStream {
                stage: Stage::ReadingFieldData
            }]
        );

        let mut parser = Parser::new("XYZ", file_config().strict(true));
        assert_eq!(run(&mut parser, &[body]), Err(Error::IncompleteStream));
    }

    #[test]
    fn test_missing_colon_is_skipped_in_lenient_mode() {
        let body: &[u8] =
            b"--XYZ\r\nContent-Disposition form-data\r\n\r\nlost\r\n--XYZ\r\nContent-Disposition: form-data; name=\"b\"\r\n\r\nkept\r\n--XYZ--\r\n";

        let mut parser = Parser::new("XYZ", file_config());
        run(&mut parser, &[body]).unwrap();

        assert!(parser.is_done());
        assert_eq!(parser.form().len(), 1);
        assert_eq!(parser.form().get("b"), Some("kept"));
        assert_eq!(
            parser.diagnostics(),
            &[
                Diagnostic::MissingColon {
                    line: "Content-Disposition form-data".to_owned()
                },
                Diagnostic::UnnamedPart,
            ]
        );
    }

    #[test]
    fn test_missing_colon_fails_in_strict_mode() {
        let mut parser = Parser::new("XYZ", file_config().strict(true));
        let err = parser.feed(b"--XYZ\r\nContent-Disposition form-data\r\n\r\n").unwrap_err();

        assert_eq!(
            err,
            Error::MalformedBody(Diagnostic::MissingColon {
                line: "Content-Disposition form-data".to_owned()
            })
        );
    }

    #[test]
    fn test_invalid_header_is_skipped_in_lenient_mode() {
        let body: &[u8] =
            b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\nBad Header: x\r\n\r\nkept\r\n--XYZ--\r\n";

        let mut parser = Parser::new("XYZ", file_config());
        run(&mut parser, &[body]).unwrap();

        assert!(parser.is_done());
        assert_eq!(parser.form().get("a"), Some("kept"));
        assert_eq!(
            parser.diagnostics(),
            &[Diagnostic::InvalidHeader {
                line: "Bad Header: x".to_owned()
            }]
        );
    }

    #[test]
    fn test_invalid_header_fails_in_strict_mode() {
        let mut parser = Parser::new("XYZ", file_config().strict(true));
        let err = parser
            .feed(b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\nBad Header: x\r\n\r\n")
            .unwrap_err();

        assert_eq!(
            err,
            Error::MalformedBody(Diagnostic::InvalidHeader {
                line: "Bad Header: x".to_owned()
            })
        );
    }

    #[test]
    fn test_file_with_control_byte_in_filename_is_relayed() {
        let body: &[u8] =
            b"--XYZ\r\nContent-Disposition: form-data; name=\"f\"; filename=\"a\x7fb.txt\"\r\n\r\nsecret file\r\n--XYZ--\r\n";

        let mut parser = Parser::new("XYZ", file_config());
        let file = run(&mut parser, &[body]).unwrap();

        assert_eq!(file, b"secret file\r\n");
        assert!(parser.form().is_empty());
        assert_eq!(
            parser.file_info().and_then(|info| info.file_name()),
            Some("a\u{7f}b.txt")
        );
        assert_eq!(
            parser.diagnostics(),
            &[Diagnostic::InvalidHeader {
                line: "Content-Disposition: form-data; name=\"f\"; filename=\"a\u{7f}b.txt\"".to_owned()
            }]
        );
    }

    #[test]
    fn test_finish_reports_truncation_once() {
        let body: &[u8] = b"--XYZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nhalf";

        let mut parser = Parser::new("XYZ", file_config());
        parser.feed(body).unwrap();
        parser.finish().unwrap();
        assert!(parser.finish().unwrap().is_empty());
        assert_eq!(parser.diagnostics().len(), 1);

        let mut parser = Parser::new("XYZ", file_config().strict(true));
        parser.feed(body).unwrap();
        assert_eq!(parser.finish(), Err(Error::IncompleteStream));
        assert!(parser.finish().unwrap().is_empty());
    }

    #[test]
    fn test_closing_boundary_before_first_part_is_preamble() {
        let mut parser = Parser::new("XYZ", file_config());
        run(&mut parser, &[b"--XYZ--\r\n"]).unwrap();

        assert_eq!(parser.stage(), Stage::FindingFirstBoundary);
        assert!(parser.form().is_empty());
    }

    #[test]
    fn test_without_file_field_everything_is_collected() {
        let mut parser = Parser::new("XYZ", Config::new());
        let file = run(
            &mut parser,
            &[b"--XYZ\r\nContent-Disposition: form-data; name=\"f\"\r\n\r\nline1\r\n--XYZ--\r\n"],
        )
        .unwrap();

        assert!(file.is_empty());
        assert_eq!(parser.form().get("f"), Some("line1"));
        assert!(parser.file_info().is_none());
    }
}
