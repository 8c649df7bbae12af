use crate::constants;

/// Settings for one upload filter or parser.
///
/// # Examples
///
/// ```
/// use upload_filter::Config;
///
/// let config = Config::new()
///     .file_field("upload")
///     .form_size(16)
///     .strict(true);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) file_field: Option<String>,
    pub(crate) form_size: usize,
    pub(crate) strict: bool,
    pub(crate) trim_final_line_break: bool,
}

impl Config {
    /// Creates a config with no file field, a form table sized for 8 fields and
    /// lenient parsing.
    pub fn new() -> Config {
        Config::default()
    }

    /// Sets the name of the field whose content is relayed instead of being
    /// collected into the [`Form`](crate::Form). Matched case-insensitively.
    ///
    /// An [`UploadFilter`](crate::UploadFilter) without a file field passes the
    /// body through untouched.
    pub fn file_field<N: Into<String>>(mut self, name: N) -> Config {
        self.file_field = Some(name.into());
        self
    }

    /// Sets the number of form fields to reserve room for up front.
    pub fn form_size(mut self, size: usize) -> Config {
        self.form_size = size;
        self
    }

    /// Fails on the first grammar irregularity instead of recording it as a
    /// [`Diagnostic`](crate::Diagnostic) and carrying on.
    pub fn strict(mut self, strict: bool) -> Config {
        self.strict = strict;
        self
    }

    /// Drops the line break that precedes the boundary closing the file part.
    ///
    /// That line break belongs to the delimiter, not to the file. It is relayed
    /// unless this is set.
    pub fn trim_final_line_break(mut self, trim: bool) -> Config {
        self.trim_final_line_break = trim;
        self
    }

    pub(crate) fn is_file_field(&self, field_name: &str) -> bool {
        self.file_field
            .as_deref()
            .map_or(false, |file_field| file_field.eq_ignore_ascii_case(field_name))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file_field: None,
            form_size: constants::DEFAULT_FORM_SIZE,
            strict: false,
            trim_final_line_break: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_file_field() {
        let config = Config::new().file_field("Upload");

        assert!(config.is_file_field("upload"));
        assert!(config.is_file_field("UPLOAD"));
        assert!(!config.is_file_field("uploads"));
        assert!(!Config::new().is_file_field("upload"));
    }
}
