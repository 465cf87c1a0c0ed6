//! The responder protocol.
//!
//! Whatever a handler returns must implement [`Responder`], a two-step
//! contract: [`options`](Responder::options) stamps the status and headers
//! onto the response, then [`output`](Responder::output) appends the
//! serialised body. The orchestrator runs both when the response is
//! materialised, after the middleware chain has returned.
//!
//! Built-in responders:
//!
//! | Value          | Content-Type                      | Body            |
//! | -------------- | --------------------------------- | --------------- |
//! | [`Text`]       | `text/plain; charset=utf-8`       | UTF-8 text      |
//! | [`Html`]       | `text/html; charset=utf-8`        | UTF-8 text      |
//! | [`Json`]       | `application/json; charset=utf-8` | canonical JSON  |
//! | [`Bytes`]      | `application/octet-stream`        | raw bytes       |
//! | [`Empty`]      | (none)                            | (none)          |
//! | `HttpResponse` | caller-controlled                 | caller-provided |
//!
//! A Content-Type is only proposed when the body is non-empty, and an
//! existing Content-Type always wins: middleware that sets one first keeps
//! it.

use std::fmt::Display;

use serde::Serialize;

use crate::{
    error::{Error, Result},
    http::{content_type::Content, response::HttpResponse},
};

/// Maps a handler's return value onto the response.
pub trait Responder: Send + Sync {
    /// Set the status and headers of the response.
    /// Called before [`Responder::output`].
    fn options(&self, res: &mut HttpResponse) {
        let _ = res;
    }

    /// Append the serialised body to the buffer.
    fn output(&self, buf: &mut Vec<u8>) {
        let _ = buf;
    }
}

/// A plain text responder.
/// ## Example
/// ```
/// # use gale::Text;
/// let responder = Text::new(format!("id: {}", 42));
/// ```
pub struct Text(pub String);

/// An HTML responder.
pub struct Html(pub String);

/// A JSON responder, emitting the canonical serialisation of its value.
/// ## Example
/// ```
/// # use gale::Json;
/// # use serde_json::json;
/// let responder = Json(json!({ "id": 42 }));
/// ```
pub struct Json(pub serde_json::Value);

/// A raw bytes responder.
pub struct Bytes(pub Vec<u8>);

/// A responder with no body.
/// Leaves the status and headers as the handler and middleware set them.
pub struct Empty;

impl Text {
    /// Build from anything displayable.
    pub fn new(text: impl Display) -> Text {
        Text(text.to_string())
    }
}

impl Html {
    /// Build from anything displayable.
    pub fn new(html: impl Display) -> Html {
        Html(html.to_string())
    }
}

impl Json {
    /// Serialise any [`Serialize`] value into a JSON responder.
    /// Fails as a handler error if the value cannot be represented as JSON.
    pub fn from_serialize(value: impl Serialize) -> Result<Json> {
        serde_json::to_value(value)
            .map(Json)
            .map_err(Error::handler)
    }
}

/// Proposes a Content-Type unless one is already set.
fn propose_content(res: &mut HttpResponse, content: Content) {
    if !res.headers.has("Content-Type") {
        res.headers.push(content.into());
    }
}

impl Responder for Text {
    fn options(&self, res: &mut HttpResponse) {
        if !self.0.is_empty() {
            propose_content(res, Content::TXT);
        }
    }

    fn output(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.0.as_bytes());
    }
}

impl Responder for Html {
    fn options(&self, res: &mut HttpResponse) {
        if !self.0.is_empty() {
            propose_content(res, Content::HTML);
        }
    }

    fn output(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.0.as_bytes());
    }
}

impl Responder for Json {
    fn options(&self, res: &mut HttpResponse) {
        propose_content(res, Content::JSON);
    }

    fn output(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.0.to_string().as_bytes());
    }
}

impl Responder for Bytes {
    fn options(&self, res: &mut HttpResponse) {
        if !self.0.is_empty() {
            propose_content(res, Content::OCTET);
        }
    }

    fn output(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.0);
    }
}

impl Responder for Empty {}

impl Responder for () {}

impl Responder for String {
    fn options(&self, res: &mut HttpResponse) {
        if !self.is_empty() {
            propose_content(res, Content::TXT);
        }
    }

    fn output(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }
}

impl Responder for &'static str {
    fn options(&self, res: &mut HttpResponse) {
        if !self.is_empty() {
            propose_content(res, Content::TXT);
        }
    }

    fn output(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }
}

/// The fully caller-controlled responder: status, headers, cookies and body
/// come straight from the value. The first-writer rule still protects a
/// Content-Type set by middleware.
impl Responder for HttpResponse {
    fn options(&self, res: &mut HttpResponse) {
        res.status = self.status;
        for header in self.headers.iter() {
            if header.name.eq_ignore_ascii_case("Content-Type") && res.headers.has("Content-Type")
            {
                continue;
            }
            res.headers.push(header.clone());
        }
        res.cookies.extend(self.cookies.iter().cloned());
    }

    fn output(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.body);
    }
}

impl Responder for Box<dyn Responder> {
    fn options(&self, res: &mut HttpResponse) {
        (**self).options(res);
    }

    fn output(&self, buf: &mut Vec<u8>) {
        (**self).output(buf);
    }
}
