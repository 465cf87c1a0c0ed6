//! Crate-level tests exercising whole apps through [`App::handle`], without
//! binding sockets.

#[cfg(feature = "extensions")]
mod cors;
mod responder;
mod store;
mod ws;

use crate::{App, HttpRequest, HttpResponse};

/// Run a request through an app and return the materialised response.
pub(crate) fn run(app: &App, req: HttpRequest) -> HttpResponse {
    app.handle(req)
}

/// Run a request and return the response body as text.
pub(crate) fn body_of(app: &App, req: HttpRequest) -> String {
    String::from_utf8(run(app, req).body).unwrap()
}
