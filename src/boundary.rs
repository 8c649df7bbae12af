use crate::constants::{BOUNDARY_EXT, CR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoundaryKind {
    NotBoundary,
    PartBoundary,
    FinalBoundary,
}

/// The part delimiter `--<token>` of one multipart body.
#[derive(Debug, Clone)]
pub(crate) struct Boundary {
    token: String,
    delimiter: Vec<u8>,
}

impl Boundary {
    pub fn new<B: Into<String>>(token: B) -> Self {
        let token = token.into();
        let delimiter = [BOUNDARY_EXT.as_bytes(), token.as_bytes()].concat();

        Boundary { token, delimiter }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Classifies a line that has its terminator already stripped.
    ///
    /// A boundary line is `--<token>` or `--<token>--` and nothing else, except
    /// for RFC 2046 transport padding: trailing spaces and tabs are accepted, so
    /// `--<token>-- ` still closes the body. Any other trailing byte makes the
    /// line ordinary data.
    pub fn classify(&self, line: &[u8]) -> BoundaryKind {
        let delimiter_len = self.delimiter.len();

        if line.len() < delimiter_len || line[..delimiter_len] != self.delimiter[..] {
            return BoundaryKind::NotBoundary;
        }

        let (kind, padding) = if line.len() >= delimiter_len + BOUNDARY_EXT.len()
            && &line[delimiter_len..delimiter_len + BOUNDARY_EXT.len()] == BOUNDARY_EXT.as_bytes()
        {
            (
                BoundaryKind::FinalBoundary,
                &line[delimiter_len + BOUNDARY_EXT.len()..],
            )
        } else {
            (BoundaryKind::PartBoundary, &line[delimiter_len..])
        };

        if padding.iter().all(|b| *b == b' ' || *b == b'\t') {
            kind
        } else {
            BoundaryKind::NotBoundary
        }
    }

    /// Returns `false` once `fragment` can no longer grow into a boundary line.
    pub fn may_start(&self, fragment: &[u8]) -> bool {
        let len = fragment.len().min(self.delimiter.len());
        if fragment[..len] != self.delimiter[..len] {
            return false;
        }
        if fragment.len() <= self.delimiter.len() {
            return true;
        }

        // A CR may still be followed by the LF ending the line.
        let fragment = match fragment.split_last() {
            Some((&CR, head)) => head,
            _ => fragment,
        };

        &fragment[self.delimiter.len()..] == b"-" || self.classify(fragment) != BoundaryKind::NotBoundary
    }
}
