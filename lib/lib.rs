#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Current version of gale.
#[doc(hidden)]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod trace;

pub mod body;
pub mod error;
pub mod router;
pub mod transport;
pub mod ws;

mod app;
mod event;
mod group;
mod handle;
mod http;
mod internal;
mod middleware;
mod responder;

#[doc(inline)]
pub use self::{
    app::{App, Routes, ServerConfig},
    body::{FromBody, HttpBody},
    error::Error,
    event::RequestEvent,
    group::RouteGroup,
    http::{
        content_type::Content,
        cookie,
        cookie::{Cookie, CookieJar, SameSite, SetCookie},
        headers::{Header, Headers},
        method::Method,
        query::Query,
        request::HttpRequest,
        response::HttpResponse,
        status::Status,
    },
    middleware::{HandlerOutput, MiddlewareEntry, Next},
    responder::{Bytes, Empty, Html, Json, Responder, Text},
    ws::{Hub, Peer, WsEvent, WsMessage},
};

/// The prelude is a collection of types and traits that are commonly used in
/// most gale applications.
pub mod prelude {
    pub use crate::{
        error::{self, Error},
        trace::Level,
        App, Bytes, Content, Cookie, CookieJar, Empty, Header, Headers, Html, HttpBody,
        HttpRequest, HttpResponse, Hub, Json, Method, Next, Peer, Query, RequestEvent, Responder,
        RouteGroup, Routes, SetCookie, Status, Text, WsEvent, WsMessage,
    };
}

#[cfg(feature = "extensions")]
pub mod extensions;

#[cfg(test)]
mod tests;
