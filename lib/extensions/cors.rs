//! Cross-origin resource sharing.
//!
//! Adds the `Access-Control-*` response headers to every request in scope
//! and short-circuits `OPTIONS` preflights with an empty 204, without
//! invoking the route handler.

use crate::{
    event::RequestEvent,
    http::{method::Method, response::HttpResponse, status::Status},
    middleware::{HandlerOutput, Next},
};

/// The CORS middleware.
///
/// Every option defaults to its most permissive value; restrict what you
/// need with the builder methods, then attach it with
/// [`use_middleware`](crate::Routes::use_middleware) or
/// [`use_middleware_at`](crate::Routes::use_middleware_at).
/// ## Example
/// ```
/// # use gale::{extensions::Cors, App, Routes};
/// # let mut app = App::new();
/// app.use_middleware_at(
///     "/api",
///     Cors::new()
///         .origin("https://example.com")
///         .methods("GET, POST")
///         .credentials(true)
///         .middleware(),
/// );
/// ```
pub struct Cors {
    /// Value of `Access-Control-Allow-Origin`.
    origin: String,

    /// Value of `Access-Control-Allow-Methods`.
    methods: String,

    /// Value of `Access-Control-Allow-Headers`.
    allow_headers: String,

    /// Value of `Access-Control-Expose-Headers`.
    expose_headers: String,

    /// Whether to send `Access-Control-Allow-Credentials: true`.
    credentials: bool,

    /// Value of `Access-Control-Max-Age`, in seconds.
    max_age: u64,
}

impl Cors {
    /// Make a new CORS middleware with the default settings:
    /// everything allowed, no credentials, preflight results cacheable for a
    /// day.
    pub fn new() -> Cors {
        Cors {
            origin: "*".to_owned(),
            methods: "*".to_owned(),
            allow_headers: "*".to_owned(),
            expose_headers: "*".to_owned(),
            credentials: false,
            max_age: 86400,
        }
    }

    /// Set the allowed origin.
    pub fn origin(self, origin: impl AsRef<str>) -> Cors {
        Cors {
            origin: origin.as_ref().to_owned(),
            ..self
        }
    }

    /// Set the allowed methods.
    pub fn methods(self, methods: impl AsRef<str>) -> Cors {
        Cors {
            methods: methods.as_ref().to_owned(),
            ..self
        }
    }

    /// Set the allowed request headers.
    pub fn allow_headers(self, allow_headers: impl AsRef<str>) -> Cors {
        Cors {
            allow_headers: allow_headers.as_ref().to_owned(),
            ..self
        }
    }

    /// Set the response headers exposed to scripts.
    pub fn expose_headers(self, expose_headers: impl AsRef<str>) -> Cors {
        Cors {
            expose_headers: expose_headers.as_ref().to_owned(),
            ..self
        }
    }

    /// Allow credentialed requests.
    pub fn credentials(self, credentials: bool) -> Cors {
        let mut new = self;
        new.credentials = credentials;
        new
    }

    /// Set how long preflight results may be cached, in seconds.
    pub fn max_age(self, max_age: u64) -> Cors {
        let mut new = self;
        new.max_age = max_age;
        new
    }

    /// Turn the configuration into a middleware layer.
    pub fn middleware(
        self,
    ) -> impl Fn(&mut RequestEvent, Next) -> HandlerOutput + Send + Sync + 'static {
        move |event, next| {
            self.apply_headers(event);

            // A preflight never reaches the route handler.
            if event.req.method == Method::OPTIONS
                && event.req.headers.has("Access-Control-Request-Method")
            {
                trace!(
                    Level::Debug,
                    "CORS preflight short-circuit for {}",
                    event.req.path
                );
                return Ok(Box::new(HttpResponse::new().status(Status::NoContent)));
            }

            next.run(event)
        }
    }

    fn apply_headers(&self, event: &mut RequestEvent) {
        let headers = &mut event.res.headers;
        headers.add("Access-Control-Allow-Origin", &self.origin);
        headers.add("Access-Control-Allow-Methods", &self.methods);
        headers.add("Access-Control-Allow-Headers", &self.allow_headers);
        headers.add("Access-Control-Expose-Headers", &self.expose_headers);
        headers.add("Access-Control-Max-Age", self.max_age.to_string());
        if self.credentials {
            headers.add("Access-Control-Allow-Credentials", "true");
        }
    }
}

impl Default for Cors {
    fn default() -> Cors {
        Cors::new()
    }
}
