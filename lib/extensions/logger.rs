//! Log handled requests.

use crate::{
    event::RequestEvent,
    middleware::{HandlerOutput, Next},
    trace::Level,
};

/// A middleware that logs each request with the response status known once
/// the inner layers return.
///
/// Output goes through gale's [`trace`](crate::trace) system at the
/// configured level (default [`Level::Info`]), so an installed
/// [`Logger`](crate::trace::Logger) sink picks these lines up too.
/// ## Example
/// ```
/// # use gale::{extensions::Logger, App, Routes};
/// # let mut app = App::new();
/// app.use_middleware(Logger::new().middleware());
/// ```
pub struct Logger {
    level: Level,
}

impl Logger {
    /// Make a new request logger, logging at [`Level::Info`].
    pub fn new() -> Logger {
        Logger { level: Level::Info }
    }

    /// Set the level the requests are logged at.
    pub fn level(self, level: Level) -> Logger {
        Logger { level }
    }

    /// Turn the configuration into a middleware layer.
    pub fn middleware(
        self,
    ) -> impl Fn(&mut RequestEvent, Next) -> HandlerOutput + Send + Sync + 'static {
        move |event, next| {
            let result = next.run(event);

            match &result {
                Ok(_) => {
                    #[cfg(feature = "tracing")]
                    if crate::trace::log_enabled(self.level) {
                        crate::trace::_log(
                            self.level,
                            format_args!(
                                "{} {} -> {}",
                                event.req.method, event.req.path, event.res.status
                            ),
                        );
                    }
                }
                Err(err) => {
                    trace!(
                        Level::Error,
                        "{} {} -> error: {}",
                        event.req.method,
                        event.req.path,
                        err
                    );
                }
            }

            result
        }
    }
}

impl Default for Logger {
    fn default() -> Logger {
        Logger::new()
    }
}
