//! The application facade.
//!
//! An [`App`] aggregates the route store, the middleware chain, the
//! WebSocket route table and the pub/sub [`Hub`]. Declare everything, then
//! hand it to a transport with [`App::serve`]; the tables are frozen from
//! that point on and served without locks.

use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use crate::{
    error::Result,
    event::RequestEvent,
    http::method::Method,
    middleware::{HandlerOutput, MiddlewareEntry, Next},
    responder::Responder,
    router::{
        pattern::normalize_template,
        store::{into_handler, RouteStore},
    },
    transport::{tcp::TcpTransport, Transport},
    ws::{Hub, Peer, PeerSession, WsConnection, WsEvent, WsHandler},
    RouteGroup,
};

/// Settings consumed by the built-in TCP transport.
pub struct ServerConfig {
    /// Address to listen on.
    pub host: IpAddr,

    /// Worker threads handling requests.
    pub workers: usize,

    /// Whether to serve multiple requests per connection.
    pub keep_alive: bool,

    /// Read/write deadline for sockets.
    /// On timeout the connection is treated as closed by the client.
    pub socket_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            workers: 16,
            keep_alive: true,
            socket_timeout: None,
        }
    }
}

/// Defines an application.
///
/// ## Example
/// ```rust,no_run
/// # use gale::prelude::*;
/// let mut app = App::new();
///
/// app.get("/hello", |_| Ok(Text::new("hi")));
///
/// app.serve(8080).unwrap();
/// ```
pub struct App {
    pub(crate) base_path: String,
    pub(crate) store: RouteStore,
    pub(crate) middlewares: Vec<MiddlewareEntry>,
    pub(crate) ws_routes: HashMap<String, WsHandler>,

    /// The WebSocket pub/sub hub.
    /// Clone it out to publish from anywhere.
    pub hub: Hub,

    /// Transport settings.
    pub config: ServerConfig,
}

/// Generates the per-method sugar over [`Routes::on`].
macro_rules! route_shorthands {
    {$($(#[$attr:meta])* $name:ident => $method:ident),*} => {
        $(
            $(#[$attr])*
            fn $name<R: Responder + 'static>(
                &mut self,
                path: &str,
                handler: impl Fn(&mut RequestEvent) -> Result<R> + Send + Sync + 'static,
            ) -> &mut Self
            where
                Self: Sized,
            {
                self.on(Method::$method, path, handler)
            }
        )*
    };
}

/// The registration surface shared by [`App`] and [`RouteGroup`]: routes,
/// middleware, WebSocket handlers and nested groups.
pub trait Routes {
    /// Register a handler for a method and path.
    /// The path may contain `:name` parameters, `*` wildcards and a trailing
    /// `**` (see [`router::pattern`](crate::router::pattern)).
    ///
    /// Registering the same method and path twice overrides the first
    /// handler. Panics on an invalid path template: a misconfigured server
    /// must not start.
    /// ## Example
    /// ```
    /// # use gale::{App, Method, Routes, Text};
    /// # let mut server = App::new();
    /// server.on(Method::GET, "/greet/:name", |event| {
    ///     let name = event.param("name").unwrap();
    ///     Ok(Text::new(format!("Hello, {name}!")))
    /// });
    /// ```
    fn on<R: Responder + 'static>(
        &mut self,
        method: Method,
        path: &str,
        handler: impl Fn(&mut RequestEvent) -> Result<R> + Send + Sync + 'static,
    ) -> &mut Self;

    /// Append a middleware layer scoped under `path` (relative to the
    /// implementor's base path). Layers run in registration order.
    fn use_middleware_at(
        &mut self,
        path: &str,
        middleware: impl Fn(&mut RequestEvent, Next) -> HandlerOutput + Send + Sync + 'static,
    ) -> &mut Self;

    /// Register a WebSocket handler at a path.
    /// The handler receives `Open` once, any number of `Message`s, then
    /// `Close` once.
    fn ws(
        &mut self,
        path: &str,
        handler: impl Fn(&Peer, WsEvent) + Send + Sync + 'static,
    ) -> &mut Self;

    /// Open a registration scope under `prefix`, then merge it back in.
    /// Calling `group` twice with the same prefix is fine and additive.
    fn group(&mut self, prefix: &str, configure: impl FnOnce(&mut RouteGroup)) -> &mut Self;

    /// Append a middleware layer that runs on every request.
    fn use_middleware(
        &mut self,
        middleware: impl Fn(&mut RequestEvent, Next) -> HandlerOutput + Send + Sync + 'static,
    ) -> &mut Self
    where
        Self: Sized,
    {
        self.use_middleware_at("", middleware)
    }

    /// Register a handler that runs on every method.
    /// Exact-method routes always win over it during lookup.
    fn all<R: Responder + 'static>(
        &mut self,
        path: &str,
        handler: impl Fn(&mut RequestEvent) -> Result<R> + Send + Sync + 'static,
    ) -> &mut Self
    where
        Self: Sized,
    {
        self.on(Method::ANY, path, handler)
    }

    route_shorthands! {
        /// Register a GET route.
        /// ## Example
        /// ```
        /// # use gale::{App, Routes, Text};
        /// # let mut server = App::new();
        /// server.get("/hello", |_| Ok(Text::new("hi")));
        /// ```
        get => GET,
        /// Register a POST route.
        post => POST,
        /// Register a PUT route.
        put => PUT,
        /// Register a PATCH route.
        patch => PATCH,
        /// Register a DELETE route.
        delete => DELETE,
        /// Register a HEAD route.
        head => HEAD,
        /// Register an OPTIONS route.
        options => OPTIONS,
        /// Register a TRACE route.
        trace => TRACE,
        /// Register a CONNECT route.
        connect => CONNECT
    }
}

impl App {
    /// Construct an empty app with no base path.
    pub fn new() -> App {
        App::with_base_path("")
    }

    /// Construct an empty app whose routes, middleware and WebSocket
    /// handlers all live under `base_path`.
    pub fn with_base_path(base_path: impl AsRef<str>) -> App {
        let base_path = match base_path.as_ref() {
            "" => String::new(),
            path => normalize_template(path),
        };

        App {
            base_path,
            store: RouteStore::new(),
            middlewares: Vec::new(),
            ws_routes: HashMap::new(),
            hub: Hub::new(),
            config: ServerConfig::default(),
        }
    }

    /// Set the address the built-in transport listens on.
    pub fn host(mut self, host: impl Into<IpAddr>) -> App {
        self.config.host = host.into();
        self
    }

    /// Set the number of worker threads.
    pub fn workers(mut self, workers: usize) -> App {
        self.config.workers = workers;
        self
    }

    /// Enable or disable HTTP keep-alive.
    pub fn keep_alive(mut self, keep_alive: bool) -> App {
        self.config.keep_alive = keep_alive;
        self
    }

    /// Set the socket read/write deadline.
    pub fn socket_timeout(mut self, timeout: Duration) -> App {
        self.config.socket_timeout = Some(timeout);
        self
    }

    /// Every registered `(method, path)` mapping, in registration order.
    /// ## Example
    /// ```
    /// # use gale::{App, Routes, Text};
    /// # let mut app = App::new();
    /// app.get("/a", |_| Ok(Text::new("a")));
    /// for (method, path) in app.routes() {
    ///     println!("{method} {path}");
    /// }
    /// ```
    pub fn routes(&self) -> impl Iterator<Item = (Method, &str)> {
        self.store.mappings()
    }

    /// Whether a WebSocket handler is registered at `path`.
    /// Transports check this before accepting an upgrade.
    pub fn has_ws_route(&self, path: &str) -> bool {
        self.ws_routes.contains_key(path)
    }

    /// Accept a WebSocket upgrade at `path`.
    ///
    /// Registers a peer with the hub and delivers `Open` to the route's
    /// handler. Returns `None` if no WebSocket route exists at `path`. The
    /// transport keeps the returned session, feeds inbound frames to
    /// [`PeerSession::message`] and calls [`PeerSession::close`] when the
    /// connection ends.
    pub fn upgrade(&self, path: &str, conn: Arc<dyn WsConnection>) -> Option<PeerSession> {
        let handler = self.ws_routes.get(path)?.clone();
        let id = self.hub.register(conn.clone());
        let peer = Peer {
            id,
            conn,
            hub: self.hub.clone(),
        };

        Some(PeerSession::open(peer, handler))
    }

    /// Serve the app on the built-in TCP transport.
    /// This is blocking.
    pub fn serve(self, port: u16) -> Result<()> {
        self.serve_with(port, TcpTransport)
    }

    /// Serve the app on a custom [`Transport`].
    /// This is blocking.
    pub fn serve_with(self, port: u16, transport: impl Transport) -> Result<()> {
        let addr = SocketAddr::new(self.config.host, port);
        trace!(
            Level::Info,
            "Starting server [{}] ({} worker(s))",
            addr,
            self.config.workers
        );

        let app = Arc::new(self);
        transport.run(app, addr)?;

        trace!(Level::Info, "Server stopped");
        Ok(())
    }
}

impl Default for App {
    fn default() -> App {
        App::new()
    }
}

impl Routes for App {
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
        self.ws_routes.insert(full, Arc::new(handler));
        self
    }

    fn group(&mut self, prefix: &str, configure: impl FnOnce(&mut RouteGroup)) -> &mut Self {
        let mut group = RouteGroup::new(join_path(&self.base_path, prefix));
        configure(&mut group);
        group.merge_into(&mut self.store, &mut self.middlewares, &mut self.ws_routes);
        self
    }
}

/// Joins a (possibly empty) base path with a route path, guaranteeing the
/// result starts with a slash.
pub(crate) fn join_path(base: &str, path: &str) -> String {
    if base.is_empty() {
        normalize_template(path)
    } else {
        format!("{base}{}", normalize_template(path))
    }
}
