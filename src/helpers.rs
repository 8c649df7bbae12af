use crate::Diagnostic;
use http::header::{HeaderName, HeaderValue};

/// Splits a part header line into its name and raw value.
///
/// Only a missing `:` or a name that isn't a valid header name is an error. The
/// value is returned as sent, see [`check_header_value`].
pub(crate) fn parse_header_line(line: &[u8]) -> Result<(HeaderName, &[u8]), Diagnostic> {
    let colon = memchr::memchr(b':', line).ok_or_else(|| Diagnostic::MissingColon {
        line: String::from_utf8_lossy(line).into_owned(),
    })?;

    let name = HeaderName::from_bytes(trim_end(&line[..colon])).map_err(|_| invalid_header(line))?;
    let value = trim_end(trim_start(&line[colon + 1..]));

    Ok((name, value))
}

/// Reports a value that isn't valid in an HTTP header.
pub(crate) fn check_header_value(line: &[u8], value: &[u8]) -> Result<(), Diagnostic> {
    HeaderValue::from_bytes(value)
        .map(|_| ())
        .map_err(|_| invalid_header(line))
}

fn invalid_header(line: &[u8]) -> Diagnostic {
    Diagnostic::InvalidHeader {
        line: String::from_utf8_lossy(line).into_owned(),
    }
}

pub(crate) fn trim_start(mut s: &[u8]) -> &[u8] {
    while let Some((first, rest)) = s.split_first() {
        if !first.is_ascii_whitespace() {
            break;
        }
        s = rest;
    }
    s
}

pub(crate) fn trim_end(mut s: &[u8]) -> &[u8] {
    while let Some((last, rest)) = s.split_last() {
        if !last.is_ascii_whitespace() {
            break;
        }
        s = rest;
    }
    s
}
