/// Metadata of the part being relayed as the file field.
///
/// Only the file part gets its headers captured this way; ordinary fields only
/// contribute their name and value to the [`Form`](crate::Form).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileInfo {
    pub(crate) name: Option<String>,
    pub(crate) file_name: Option<String>,
    pub(crate) content_type: Option<mime::Mime>,
}

impl FileInfo {
    /// The field name from the part's `Content-Disposition` header.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The `filename` parameter of the part's `Content-Disposition` header.
    ///
    /// This is the name the client chose and is not sanitized in any way.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The part's `Content-Type` header, if present and parseable.
    pub fn content_type(&self) -> Option<&mime::Mime> {
        self.content_type.as_ref()
    }
}
