//! The middleware engine.
//!
//! Middleware wrap the route dispatcher in an onion: each layer receives the
//! request event and a [`Next`] continuation, does its pre-processing, calls
//! `next.run(event)` to run the layers (and eventually the route handler)
//! inside it, then post-processes the responder on the way back out. A layer
//! can also short-circuit by returning its own responder without calling
//! `next`.
//!
//! ```
//! # use gale::{App, Routes, trace, trace::Level};
//! # let mut app = App::new();
//! app.use_middleware(|event, next| {
//!     trace!(Level::Info, "> {} {}", event.req.method, event.req.path);
//!     let responder = next.run(event)?;
//!     trace!(Level::Info, "< {}", event.res.status);
//!     Ok(responder)
//! });
//! ```
//!
//! Each entry is scoped to a base path: the layer only runs for requests
//! whose path starts with it (the empty prefix matches everything). Layers
//! run in registration order; a merged group's layers are appended after the
//! parent's.

use std::sync::Arc;

use crate::{
    error::Result, event::RequestEvent, handle, responder::Responder, router::store::RouteStore,
};

/// What handlers and middleware produce: a boxed responder, or an error for
/// the orchestrator to map onto an error response.
pub type HandlerOutput = Result<Box<dyn Responder>>;

/// A middleware function, boxed for storage.
pub(crate) type MiddlewareFn =
    Arc<dyn Fn(&mut RequestEvent, Next) -> HandlerOutput + Send + Sync>;

/// One registered middleware layer.
pub struct MiddlewareEntry {
    /// The layer only runs for requests whose path starts with this prefix.
    pub base_path: String,

    pub(crate) func: MiddlewareFn,
}

/// The continuation passed to each middleware layer.
/// Running it executes the remaining layers and the terminal route
/// dispatcher, yielding their responder.
pub struct Next<'a> {
    pub(crate) rest: &'a [MiddlewareEntry],
    pub(crate) store: &'a RouteStore,
}

impl MiddlewareEntry {
    pub(crate) fn new(
        base_path: impl Into<String>,
        func: impl Fn(&mut RequestEvent, Next) -> HandlerOutput + Send + Sync + 'static,
    ) -> MiddlewareEntry {
        MiddlewareEntry {
            base_path: base_path.into(),
            func: Arc::new(func),
        }
    }
}

impl<'a> Next<'a> {
    /// Run the rest of the chain.
    /// Layers whose base path does not prefix the request path are skipped;
    /// after the last layer the route dispatcher runs, producing either the
    /// matched handler's responder or a 404.
    pub fn run(self, event: &mut RequestEvent) -> HandlerOutput {
        match self.rest.split_first() {
            Some((entry, rest)) => {
                let next = Next {
                    rest,
                    store: self.store,
                };

                if event.req.path.starts_with(&entry.base_path) {
                    (entry.func)(event, next)
                } else {
                    next.run(event)
                }
            }
            None => handle::dispatch(self.store, event),
        }
    }
}
