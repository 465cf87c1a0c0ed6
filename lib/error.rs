//! Errors that can occur while registering routes, decoding request bodies
//! and handling requests.

use std::fmt::Display;

/// Alias of `Result` with the error type defaulting to gale's [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Anything that can go wrong inside gale.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error while setting the server up.
    /// These are raised before the first request is accepted.
    #[error(transparent)]
    Startup(#[from] StartupError),

    /// Error while decoding a request body.
    /// The default policy turns these into a 400 response.
    #[error(transparent)]
    Body(#[from] BodyError),

    /// Error while parsing raw request HTTP.
    /// Only produced by the built-in TCP transport.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// IO errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other failure raised by a route handler or middleware.
    /// The default policy turns these into a 500 response.
    #[error("{0}")]
    Handler(String),
}

/// Errors raised while building the route table.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum StartupError {
    /// `**` segments consume the rest of the path, so nothing may follow them.
    #[error("`**` must be the last segment of a route path: `{route}`")]
    TailNotLast {
        /// The offending route template.
        route: String,
    },

    /// A `:` segment with nothing after the colon.
    #[error("route parameter must have a name: `{route}`")]
    EmptyParam {
        /// The offending route template.
        route: String,
    },
}

/// Errors raised while decoding a request body into a typed value.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BodyError {
    /// The body is not valid UTF-8 but a text view was requested.
    #[error("request body is not valid utf-8")]
    InvalidText,

    /// The body is not valid UTF-8 but a JSON value was requested.
    #[error("json request body is not valid utf-8")]
    InvalidJsonCharset,

    /// The body is valid UTF-8 but not valid JSON.
    #[error("invalid json request body: {0}")]
    InvalidJson(String),
}

/// Errors raised while parsing the raw HTTP of a request.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No request line found in the request.
    #[error("no request line")]
    NoRequestLine,

    /// No method found in the request line.
    #[error("no method in request line")]
    NoMethod,

    /// The method is not one gale knows about.
    #[error("invalid method in request line")]
    InvalidMethod,

    /// No path found in the request line.
    #[error("no path in request line")]
    NoPath,

    /// No HTTP version found in the request line.
    #[error("no version in request line")]
    NoVersion,

    /// A header line without a `:` separator.
    #[error("invalid header line")]
    InvalidHeader,
}

impl Error {
    /// Wraps any displayable value as a handler error.
    /// Useful with [`Result::map_err`] inside route handlers:
    /// ```
    /// # use gale::error::{Error, Result};
    /// # fn lookup() -> std::result::Result<u32, &'static str> { Err("nope") }
    /// # fn handler() -> Result<u32> {
    /// let user = lookup().map_err(Error::handler)?;
    /// # Ok(user)
    /// # }
    /// ```
    pub fn handler(msg: impl Display) -> Error {
        Error::Handler(msg.to_string())
    }
}
