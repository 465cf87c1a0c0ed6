use crate::http::{
    content_type::Content,
    cookie::SetCookie,
    headers::{Header, Headers},
    status::Status,
};

/// An HTTP response under construction.
///
/// Every request carries one of these as the mutable `res` side of its
/// [`RequestEvent`](crate::RequestEvent): middleware and handlers may set the
/// status, add headers and queue cookies on it at any point. A fully built
/// `HttpResponse` is also a [`Responder`](crate::Responder) in its own right,
/// for handlers that want complete control.
///
/// Default status is 200 with no headers, cookies or body.
/// ## Example
/// ```
/// # use gale::{HttpResponse, Status, SetCookie};
/// let response = HttpResponse::new()
///     .status(Status::Created)
///     .header("X-Request-Id", "17")
///     .cookie(SetCookie::new("session", "0xCAFE"))
///     .text("created!");
/// ```
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status code.
    pub status: Status,

    /// Response headers.
    pub headers: Headers,

    /// Cookies to be serialised into `Set-Cookie` headers when the response
    /// is materialised.
    pub cookies: Vec<SetCookie>,

    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new blank response: status 200, no headers, no body.
    pub fn new() -> HttpResponse {
        HttpResponse {
            status: Status::Ok,
            headers: Headers::new(),
            cookies: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Set the status of the response.
    /// This accepts [`Status`] as well as a [`u16`].
    pub fn status(self, status: impl Into<Status>) -> HttpResponse {
        HttpResponse {
            status: status.into(),
            ..self
        }
    }

    /// Add a header to the response.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> HttpResponse {
        self.headers.add(name, value);
        self
    }

    /// Add a list of headers to the response.
    pub fn headers(mut self, headers: impl IntoIterator<Item = Header>) -> HttpResponse {
        self.headers.extend(headers);
        self
    }

    /// Set a Content-Type on the response with a [`Content`] enum.
    pub fn content(mut self, content: Content) -> HttpResponse {
        self.headers.push(content.into());
        self
    }

    /// Queue a cookie on the response.
    /// It is turned into a `Set-Cookie` header when the response is
    /// materialised.
    pub fn cookie(mut self, cookie: SetCookie) -> HttpResponse {
        self.cookies.push(cookie);
        self
    }

    /// Queue a list of cookies on the response.
    pub fn cookies(mut self, cookies: impl IntoIterator<Item = SetCookie>) -> HttpResponse {
        self.cookies.extend(cookies);
        self
    }

    /// Queue a cookie deletion: the named cookie is sent back empty with
    /// `Max-Age=0`.
    pub fn delete_cookie(self, name: impl AsRef<str>) -> HttpResponse {
        self.cookie(SetCookie::expired(name))
    }

    /// Set UTF-8 text as the response body, with a `text/plain` content type.
    pub fn text(mut self, text: impl std::fmt::Display) -> HttpResponse {
        self.body = text.to_string().into_bytes();
        self.content(Content::TXT)
    }

    /// Set HTML as the response body, with a `text/html` content type.
    pub fn html(mut self, html: impl std::fmt::Display) -> HttpResponse {
        self.body = html.to_string().into_bytes();
        self.content(Content::HTML)
    }

    /// Set a JSON value as the response body, with an `application/json`
    /// content type.
    pub fn json(mut self, value: serde_json::Value) -> HttpResponse {
        self.body = value.to_string().into_bytes();
        self.content(Content::JSON)
    }

    /// Set raw bytes as the response body.
    /// No content type is added.
    pub fn bytes(mut self, bytes: impl Into<Vec<u8>>) -> HttpResponse {
        self.body = bytes.into();
        self
    }
}

impl Default for HttpResponse {
    fn default() -> HttpResponse {
        HttpResponse::new()
    }
}
