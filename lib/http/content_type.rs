use crate::http::headers::Header;

/// Common MIME types.
/// Text types carry a UTF-8 charset, which is what the built-in responders
/// emit.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Content<'a> {
    /// HTML - `text/html`
    HTML,
    /// TXT - `text/plain`
    TXT,
    /// CSV - `text/csv`
    CSV,
    /// JSON - `application/json`
    JSON,
    /// XML - `application/xml`
    XML,
    /// Raw bytes - `application/octet-stream`
    OCTET,
    /// Custom Content Type
    Custom(&'a str),
}

impl Content<'_> {
    /// Get Content as a MIME Type.
    pub fn as_type(&self) -> &str {
        match self {
            Content::HTML => "text/html; charset=utf-8",
            Content::TXT => "text/plain; charset=utf-8",
            Content::CSV => "text/csv; charset=utf-8",
            Content::JSON => "application/json; charset=utf-8",
            Content::XML => "application/xml; charset=utf-8",
            Content::OCTET => "application/octet-stream",
            Content::Custom(i) => i,
        }
    }
}

impl From<Content<'_>> for Header {
    fn from(content: Content) -> Header {
        Header::new("Content-Type", content.as_type())
    }
}
