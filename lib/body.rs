//! Typed request bodies.
//!
//! A [`FromBody`] implementation is the ability to produce a value from a
//! request's raw body and headers. Handlers reach it through
//! [`RequestEvent::body`](crate::RequestEvent::body):
//!
//! ```
//! # use gale::{error::Result, App, Routes, Text};
//! # let mut app = App::new();
//! app.post("/echo", |event| {
//!     let text = event.body::<String>()?;
//!     Ok(Text::new(text))
//! });
//! ```
//!
//! User types get a body reader by implementing [`FromBody`], typically on
//! top of the JSON reader:
//!
//! ```
//! # use gale::{body::FromBody, error::BodyError, HttpRequest};
//! # use serde::Deserialize;
//! #[derive(Deserialize)]
//! struct NewUser {
//!     name: String,
//! }
//!
//! impl FromBody for NewUser {
//!     fn from_request(req: &HttpRequest) -> Result<Self, BodyError> {
//!         let value = serde_json::Value::from_request(req)?;
//!         serde_json::from_value(value).map_err(|e| BodyError::InvalidJson(e.to_string()))
//!     }
//! }
//! ```

use crate::{error::BodyError, http::request::HttpRequest};

/// Deserialises a request body into `Self`.
pub trait FromBody: Sized {
    /// Produce a value from the request's raw body and headers.
    fn from_request(req: &HttpRequest) -> Result<Self, BodyError>;
}

/// A request body decoded by Content-Type.
///
/// `application/json` bodies become [`HttpBody::Json`], `text/plain` and
/// `text/html` become [`HttpBody::Text`], anything else (including a missing
/// Content-Type) stays [`HttpBody::Bytes`].
#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    /// A UTF-8 text body.
    Text(String),
    /// A parsed JSON body.
    Json(serde_json::Value),
    /// A raw body.
    Bytes(Vec<u8>),
}

impl FromBody for String {
    fn from_request(req: &HttpRequest) -> Result<Self, BodyError> {
        String::from_utf8(req.body.clone()).map_err(|_| BodyError::InvalidText)
    }
}

impl FromBody for Vec<u8> {
    fn from_request(req: &HttpRequest) -> Result<Self, BodyError> {
        Ok(req.body.clone())
    }
}

impl FromBody for serde_json::Value {
    fn from_request(req: &HttpRequest) -> Result<Self, BodyError> {
        let text = std::str::from_utf8(&req.body).map_err(|_| BodyError::InvalidJsonCharset)?;
        serde_json::from_str(text).map_err(|e| BodyError::InvalidJson(e.to_string()))
    }
}

impl FromBody for HttpBody {
    fn from_request(req: &HttpRequest) -> Result<Self, BodyError> {
        let content_type = req.header("Content-Type").unwrap_or_default();
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();

        Ok(match mime {
            "application/json" => HttpBody::Json(serde_json::Value::from_request(req)?),
            "text/plain" | "text/html" => HttpBody::Text(String::from_request(req)?),
            _ => HttpBody::Bytes(req.body.clone()),
        })
    }
}
