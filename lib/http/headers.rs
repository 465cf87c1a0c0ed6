//! HTTP headers.
//! Names compare case-insensitively on lookup but are emitted with the case
//! they were written with.

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

/// An HTTP header.
/// Has a name and a value.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Header {
    /// Header name, emitted as written.
    pub name: String,

    /// Header value.
    pub value: String,
}

/// An ordered collection of [`Header`]s.
/// Repeated names are allowed (`Set-Cookie` relies on this); [`Headers::get`]
/// returns the first match.
#[derive(Debug, Clone, Default)]
pub struct Headers(pub(crate) Vec<Header>);

impl Header {
    /// Make a new header from a name and a value.
    /// ## Example
    /// ```
    /// # use gale::Header;
    /// let header = Header::new("Content-Type", "text/html");
    /// ```
    pub fn new(name: impl AsRef<str>, value: impl AsRef<str>) -> Header {
        Header {
            name: name.as_ref().to_owned(),
            value: value.as_ref().to_owned(),
        }
    }
}

impl Headers {
    /// Create a new empty header collection.
    pub fn new() -> Headers {
        Headers(Vec::new())
    }

    /// Checks if a header with the given name exists (case-insensitive).
    pub fn has(&self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        self.0.iter().any(|h| h.name.eq_ignore_ascii_case(name))
    }

    /// Gets the value of the first header with the given name
    /// (case-insensitive).
    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        let name = name.as_ref();
        self.0
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Iterates over the values of every header with the given name.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.0
            .iter()
            .filter(move |h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Appends a header.
    pub fn push(&mut self, header: Header) {
        self.0.push(header);
    }

    /// Appends a header built from a name and a value.
    pub fn add(&mut self, name: impl AsRef<str>, value: impl AsRef<str>) {
        self.0.push(Header::new(name, value));
    }

    /// Replaces the value of the first header with the given name, or appends
    /// a new header if none exists.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl AsRef<str>) {
        let name = name.as_ref();
        match self
            .0
            .iter_mut()
            .find(|h| h.name.eq_ignore_ascii_case(name))
        {
            Some(header) => header.value = value.as_ref().to_owned(),
            None => self.add(name, value),
        }
    }
}

impl Deref for Headers {
    type Target = Vec<Header>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Headers {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Header>> for Headers {
    fn from(headers: Vec<Header>) -> Headers {
        Headers(headers)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

#[cfg(test)]
mod test {
    use super::{Header, Headers};

    #[test]
    fn test_case_insensitive_lookup() {
        let mut headers = Headers::new();
        headers.push(Header::new("Content-Type", "text/plain"));

        assert_eq!(headers.get("content-type"), Some("text/plain"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/plain"));
        assert!(headers.has("Content-type"));
        assert!(!headers.has("Content-Length"));
        // Written case is preserved for emission.
        assert_eq!(headers[0].name, "Content-Type");
    }

    #[test]
    fn test_repeated_names() {
        let mut headers = Headers::new();
        headers.add("Set-Cookie", "a=1");
        headers.add("Set-Cookie", "b=2");

        assert_eq!(headers.get("set-cookie"), Some("a=1"));
        assert_eq!(headers.get_all("set-cookie").count(), 2);
    }

    #[test]
    fn test_set_replaces_first() {
        let mut headers = Headers::new();
        headers.add("X-Test", "1");
        headers.set("x-test", "2");
        headers.set("X-Other", "3");

        assert_eq!(headers.get("X-Test"), Some("2"));
        assert_eq!(headers.get("X-Other"), Some("3"));
        assert_eq!(headers.len(), 2);
    }
}
