//! The request lifecycle.
//!
//! For every transport request the orchestrator builds a [`RequestEvent`],
//! runs the middleware chain (which bottoms out in the route dispatcher),
//! and materialises whatever responder comes back: `options` first, then the
//! queued cookies become `Set-Cookie` headers, then `output` fills the body
//! buffer. Body decode failures become a 400, any other handler error a 500;
//! the middleware chain is not re-entered for either.

use crate::{
    app::App,
    error::Error,
    event::RequestEvent,
    http::{content_type::Content, request::HttpRequest, response::HttpResponse, status::Status},
    middleware::{HandlerOutput, Next},
    responder::Responder,
    router::store::RouteStore,
};

/// A fixed status-and-text responder, used for the built-in error responses.
struct StatusText(Status, &'static str);

/// Route-miss responder: 404 `text/plain` "Not Found".
const NOT_FOUND: StatusText = StatusText(Status::NotFound, "Not Found");
/// Body-decode-failure responder: 400 `text/plain` "Invalid body".
const INVALID_BODY: StatusText = StatusText(Status::BadRequest, "Invalid body");
/// Uncaught-handler-failure responder: 500 `text/plain` "Internal Server Error".
const SERVER_ERROR: StatusText =
    StatusText(Status::InternalServerError, "Internal Server Error");

impl Responder for StatusText {
    fn options(&self, res: &mut HttpResponse) {
        res.status = self.0;
        if !res.headers.has("Content-Type") {
            res.headers.push(Content::TXT.into());
        }
    }

    fn output(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.1.as_bytes());
    }
}

impl App {
    /// Handle one request end to end, producing the response to emit.
    ///
    /// This is the entry point transports call; it can also be called
    /// directly with a hand-built [`HttpRequest`] to exercise an app in
    /// tests without binding a socket.
    pub fn handle(&self, req: HttpRequest) -> HttpResponse {
        trace!(Level::Debug, "Handling {} {}", req.method, req.path);

        let mut event = RequestEvent::new(req);
        let chain = Next {
            rest: &self.middlewares,
            store: &self.store,
        };

        let responder: Box<dyn Responder> = match chain.run(&mut event) {
            Ok(responder) => responder,
            Err(Error::Body(err)) => {
                trace!(Level::Warn, "Bad request body for {}: {}", event.req, err);
                Box::new(INVALID_BODY)
            }
            Err(err) => {
                trace!(Level::Error, "Handler error for {}: {}", event.req, err);
                Box::new(SERVER_ERROR)
            }
        };

        materialise(event, &*responder)
    }
}

/// The terminal step of the middleware chain: look the route up, run its
/// handler, or produce the 404 responder.
pub(crate) fn dispatch(store: &RouteStore, event: &mut RequestEvent) -> HandlerOutput {
    match store.find(event.req.method, &event.req.path) {
        Some((handler, params)) => {
            event.params = params;
            handler(event)
        }
        None => {
            trace!(
                Level::Debug,
                "No route for {} {}",
                event.req.method,
                event.req.path
            );
            // Stamped here as well so middleware post-processing sees the
            // status before `options` runs.
            event.res.status = Status::NotFound;
            Ok(Box::new(NOT_FOUND))
        }
    }
}

/// Turn the event and its responder into the final response:
/// `options`, then cookies, then `output`.
fn materialise(mut event: RequestEvent, responder: &dyn Responder) -> HttpResponse {
    responder.options(&mut event.res);

    for cookie in event.res.cookies.drain(..) {
        let header = cookie.to_string();
        event.res.headers.add("Set-Cookie", header);
    }

    let mut buf = Vec::new();
    responder.output(&mut buf);
    event.res.body = buf;

    trace!(
        Level::Debug,
        "Response {} ({} byte body)",
        event.res.status,
        event.res.body.len()
    );
    event.res
}
