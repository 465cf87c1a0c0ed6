//! Route groups.
//!
//! A group is a transient registration scope: routes, middleware and
//! WebSocket handlers accumulate under a shared path prefix, then merge into
//! the parent in one step. Groups nest.
//!
//! ```
//! # use gale::{error::Result, App, Routes, Text};
//! # let mut app = App::new();
//! app.group("/api", |api| {
//!     api.use_middleware(|event, next| next.run(event));
//!     api.get("/users", |_| Ok(Text::new("[]")));
//!     api.group("/admin", |admin| {
//!         admin.get("/stats", |_| Ok(Text::new("{}")));
//!     });
//! });
//! // Registered: GET /api/users, GET /api/admin/stats
//! ```

use std::collections::HashMap;

use crate::{
    app::{join_path, Routes},
    error::Result,
    event::RequestEvent,
    http::method::Method,
    middleware::{HandlerOutput, MiddlewareEntry, Next},
    responder::Responder,
    router::store::{into_handler, RouteStore},
    ws::{Peer, WsEvent, WsHandler},
};

/// A transient builder accumulating routes and middleware under a common
/// prefix. See the [module docs](self).
pub struct RouteGroup {
    pub(crate) base_path: String,
    pub(crate) store: RouteStore,
    pub(crate) middlewares: Vec<MiddlewareEntry>,
    pub(crate) ws_routes: HashMap<String, WsHandler>,
}

impl RouteGroup {
    pub(crate) fn new(base_path: String) -> RouteGroup {
        RouteGroup {
            base_path,
            store: RouteStore::new(),
            middlewares: Vec::new(),
            ws_routes: HashMap::new(),
        }
    }

    /// Merge everything this group accumulated into a parent's tables.
    /// Merging an empty group changes nothing.
    pub(crate) fn merge_into(
        self,
        store: &mut RouteStore,
        middlewares: &mut Vec<MiddlewareEntry>,
        ws_routes: &mut HashMap<String, WsHandler>,
    ) {
        trace!(
            Level::Info,
            "Merging group {} ({} route(s), {} middleware(s))",
            self.base_path,
            self.store.len(),
            self.middlewares.len()
        );

        store.merge(self.store);
        middlewares.extend(self.middlewares);
        ws_routes.extend(self.ws_routes);
    }
}

impl Routes for RouteGroup {
    fn on<R: Responder + 'static>(
        &mut self,
        method: Method,
        path: &str,
        handler: impl Fn(&mut RequestEvent) -> Result<R> + Send + Sync + 'static,
    ) -> &mut Self {
        let full = join_path(&self.base_path, path);
        trace!(Level::Info, "Adding route {} {}", method, full);
        self.store
            .register(method, &full, into_handler(handler))
            .unwrap_or_else(|e| panic!("error creating route: {e}"));
        self
    }

    fn use_middleware_at(
        &mut self,
        path: &str,
        middleware: impl Fn(&mut RequestEvent, Next) -> HandlerOutput + Send + Sync + 'static,
    ) -> &mut Self {
        let base = if path.is_empty() {
            self.base_path.clone()
        } else {
            join_path(&self.base_path, path)
        };
        self.middlewares.push(MiddlewareEntry::new(base, middleware));
        self
    }

    fn ws(
        &mut self,
        path: &str,
        handler: impl Fn(&Peer, WsEvent) + Send + Sync + 'static,
    ) -> &mut Self {
        let full = join_path(&self.base_path, path);
        trace!(Level::Info, "Adding WS route {}", full);
        self.ws_routes.insert(full, std::sync::Arc::new(handler));
        self
    }

    fn group(&mut self, prefix: &str, configure: impl FnOnce(&mut RouteGroup)) -> &mut Self {
        let mut group = RouteGroup::new(join_path(&self.base_path, prefix));
        configure(&mut group);
        group.merge_into(&mut self.store, &mut self.middlewares, &mut self.ws_routes);
        self
    }
}
