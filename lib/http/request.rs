use std::{fmt, str::FromStr};

use crate::http::{cookie::CookieJar, headers::Headers, method::Method, query::Query};

/// An HTTP request, as delivered by a transport.
/// Header names are matched case-insensitively; the path is matched exactly
/// as delivered (normalisation and percent-decoding are the transport's
/// concern).
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method.
    pub method: Method,

    /// The full request target, including the query string.
    pub url: String,

    /// The path portion of the url.
    pub path: String,

    /// The parsed query string.
    pub query: Query,

    /// Request headers.
    pub headers: Headers,

    /// Raw request body.
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Create a request from the shape a transport delivers.
    /// The query string is split off `url` and parsed.
    pub fn new(
        method: Method,
        url: impl Into<String>,
        headers: Headers,
        body: Vec<u8>,
    ) -> HttpRequest {
        let url = url.into();
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (
                path.to_owned(),
                Query::from_str(query).unwrap_or_else(|_| Query::new_empty()),
            ),
            None => (url.clone(), Query::new_empty()),
        };

        HttpRequest {
            method,
            url,
            path,
            query,
            headers,
            body,
        }
    }

    /// Shorthand for a bodyless GET request.
    /// Mostly useful in tests and examples.
    pub fn get(url: impl Into<String>) -> HttpRequest {
        HttpRequest::new(Method::GET, url, Headers::new(), Vec::new())
    }

    /// Shorthand for a POST request with a body.
    pub fn post(url: impl Into<String>, body: impl Into<Vec<u8>>) -> HttpRequest {
        HttpRequest::new(Method::POST, url, Headers::new(), body.into())
    }

    /// Builder-style header attachment.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> HttpRequest {
        self.headers.add(name, value);
        self
    }

    /// Gets the value of the first header with the given name
    /// (case-insensitive).
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers.get(name)
    }

    /// Get the request body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Parse the `Cookie` header into a jar.
    /// Prefer [`RequestEvent::cookie`](crate::RequestEvent::cookie) inside
    /// handlers, which parses once and caches.
    pub fn cookies(&self) -> CookieJar {
        match self.headers.get("Cookie") {
            Some(value) => CookieJar::from_header(value),
            None => CookieJar::new(),
        }
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

#[cfg(test)]
mod test {
    use super::HttpRequest;

    #[test]
    fn test_url_split() {
        let req = HttpRequest::get("/search?q=weather&page=2");
        assert_eq!(req.path, "/search");
        assert_eq!(req.query.get("q"), Some("weather"));
        assert_eq!(req.query.get("page"), Some("2"));
        assert_eq!(req.url, "/search?q=weather&page=2");
    }

    #[test]
    fn test_no_query() {
        let req = HttpRequest::get("/plain");
        assert_eq!(req.path, "/plain");
        assert!(!req.query.has("q"));
    }

    #[test]
    fn test_request_cookies() {
        let req = HttpRequest::get("/").with_header("Cookie", "a=1; b=2");
        assert_eq!(req.cookies().get("b"), Some("2"));
    }
}
