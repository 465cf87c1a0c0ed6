//! The route store.
//!
//! Routes live in one of two indexes: literal paths go into a
//! method → path → handler map served in O(1), templated paths go into a
//! method → ordered list of compiled patterns scanned in insertion order.
//! A flat registry of every mapping is kept alongside for introspection.
//!
//! Lookup precedence: literal match on the exact method, literal match on the
//! wildcard method, templated match on the exact method, templated match on
//! the wildcard method. The first templated pattern to match wins within each
//! list.

use std::{collections::HashMap, sync::Arc};

use crate::{
    error::StartupError,
    event::RequestEvent,
    http::method::Method,
    middleware::HandlerOutput,
    router::pattern::PathPattern,
};

/// A route handler, boxed for storage.
/// Built from the user's closure at registration.
pub(crate) type Handler = Arc<dyn Fn(&mut RequestEvent) -> HandlerOutput + Send + Sync>;

/// Erases a handler's concrete responder type for storage.
pub(crate) fn into_handler<R: crate::responder::Responder + 'static>(
    handler: impl Fn(&mut RequestEvent) -> crate::error::Result<R> + Send + Sync + 'static,
) -> Handler {
    Arc::new(move |event| handler(event).map(|r| Box::new(r) as _))
}

/// The dual-index route registry.
#[derive(Default)]
pub struct RouteStore {
    /// Literal paths: method → full path → handler.
    literal: HashMap<Method, HashMap<String, Handler>>,

    /// Templated paths: method → (pattern, handler), scanned in insertion
    /// order.
    templated: HashMap<Method, Vec<(PathPattern, Handler)>>,

    /// Every registered mapping, for route listings.
    all_mappings: Vec<(Method, String)>,
}

impl RouteStore {
    /// Create a new empty store.
    pub fn new() -> RouteStore {
        RouteStore::default()
    }

    /// Compile `path` and file the handler under the right index.
    /// Registering the same method and path again overrides the previous
    /// handler.
    pub(crate) fn register(
        &mut self,
        method: Method,
        path: &str,
        handler: Handler,
    ) -> Result<(), StartupError> {
        let pattern = PathPattern::new(path)?;
        let path = pattern.raw().to_owned();

        if pattern.is_literal() {
            trace!(Level::Debug, "Route {} {} is static", method, path);
            let previous = self
                .literal
                .entry(method)
                .or_default()
                .insert(path.clone(), handler);
            if previous.is_some() {
                trace!(Level::Debug, "Overriding route {} {}", method, path);
            }
        } else {
            trace!(Level::Debug, "Route {} {} is dynamic", method, path);
            let routes = self.templated.entry(method).or_default();
            match routes.iter_mut().find(|(p, _)| p.raw() == path) {
                Some(slot) => {
                    trace!(Level::Debug, "Overriding route {} {}", method, path);
                    slot.1 = handler;
                }
                None => routes.push((pattern, handler)),
            }
        }

        if !self.all_mappings.iter().any(|(m, p)| *m == method && *p == path) {
            self.all_mappings.push((method, path));
        }

        Ok(())
    }

    /// Find the handler for a request, together with any captured path
    /// parameters.
    pub(crate) fn find(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(Handler, HashMap<String, String>)> {
        if let Some(handler) = self.literal.get(&method).and_then(|map| map.get(path)) {
            trace!(Level::Debug, "Static route matched {} {}", method, path);
            return Some((handler.clone(), HashMap::new()));
        }

        if let Some(handler) = self.literal.get(&Method::ANY).and_then(|map| map.get(path)) {
            trace!(Level::Debug, "Static route matched * {}", path);
            return Some((handler.clone(), HashMap::new()));
        }

        for method in [method, Method::ANY] {
            for (pattern, handler) in self.templated.get(&method).into_iter().flatten() {
                if let Some(params) = pattern.matches(path) {
                    trace!(
                        Level::Debug,
                        "Dynamic route {} matched {} {}",
                        pattern,
                        method,
                        path
                    );
                    return Some((handler.clone(), params));
                }
            }
        }

        None
    }

    /// Move every route of `other` into this store.
    /// `other`'s templated routes are appended after the existing ones, so
    /// insertion order within each method is preserved.
    /// Merging an empty store is a no-op.
    pub(crate) fn merge(&mut self, other: RouteStore) {
        for (method, routes) in other.literal {
            self.literal.entry(method).or_default().extend(routes);
        }

        for (method, routes) in other.templated {
            self.templated.entry(method).or_default().extend(routes);
        }

        for mapping in other.all_mappings {
            if !self.all_mappings.contains(&mapping) {
                self.all_mappings.push(mapping);
            }
        }
    }

    /// Every registered `(method, path)` pair, in registration order.
    pub fn mappings(&self) -> impl Iterator<Item = (Method, &str)> {
        self.all_mappings.iter().map(|(m, p)| (*m, p.as_str()))
    }

    /// The number of registered mappings.
    pub fn len(&self) -> usize {
        self.all_mappings.len()
    }

    /// True if no routes have been registered.
    pub fn is_empty(&self) -> bool {
        self.all_mappings.is_empty()
    }
}
