use crate::helpers::{trim_end, trim_start};

/// The parameters of a part's `Content-Disposition` header that matter here.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ContentDisposition {
    pub(crate) field_name: Option<String>,
    pub(crate) file_name: Option<String>,
}

impl ContentDisposition {
    /// Parses a header value such as `form-data; name="f"; filename="a.txt"`.
    ///
    /// Parameter names match case-insensitively. Values are either quoted
    /// strings, with `\` escaping the next byte, or bare tokens.
    pub fn parse(value: &[u8]) -> ContentDisposition {
        let mut disposition = ContentDisposition::default();

        // Skip the disposition type.
        let mut rest = match memchr::memchr(b';', value) {
            Some(idx) => &value[idx + 1..],
            None => return disposition,
        };

        while !rest.is_empty() {
            rest = trim_start(rest);

            let eq = match memchr::memchr2(b'=', b';', rest) {
                Some(idx) if rest[idx] == b'=' => idx,
                Some(idx) => {
                    rest = &rest[idx + 1..];
                    continue;
                }
                None => break,
            };

            let key = trim_end(&rest[..eq]);
            let (param, remaining) = read_param_value(&rest[eq + 1..]);
            rest = remaining;

            if key.eq_ignore_ascii_case(b"name") {
                disposition.field_name = Some(param);
            } else if key.eq_ignore_ascii_case(b"filename") {
                disposition.file_name = Some(param);
            }
        }

        disposition
    }
}

/// Reads one parameter value and returns it with whatever follows the next `;`.
fn read_param_value(input: &[u8]) -> (String, &[u8]) {
    let input = trim_start(input);

    if input.first() != Some(&b'"') {
        let end = memchr::memchr(b';', input).unwrap_or(input.len());
        let value = String::from_utf8_lossy(trim_end(&input[..end])).into_owned();
        return (value, input.get(end + 1..).unwrap_or(&[]));
    }

    let mut value = Vec::new();
    let mut idx = 1;

    while idx < input.len() {
        match input[idx] {
            b'"' => {
                idx += 1;
                break;
            }
            b'\\' if idx + 1 < input.len() => {
                value.push(input[idx + 1]);
                idx += 2;
            }
            b => {
                value.push(b);
                idx += 1;
            }
        }
    }

    let rest = &input[idx..];
    let rest: &[u8] = match memchr::memchr(b';', rest) {
        Some(semi) => &rest[semi + 1..],
        None => &[],
    };

    (String::from_utf8_lossy(&value).into_owned(), rest)
}
