//! The transport seam.
//!
//! The core never touches sockets directly: a [`Transport`] accepts
//! connections, translates them into [`HttpRequest`](crate::HttpRequest)
//! values, calls [`App::handle`](crate::App::handle), and emits the returned
//! response. WebSocket-capable transports route upgrades through
//! [`App::upgrade`](crate::App::upgrade).
//!
//! The bundled [`TcpTransport`] serves plain HTTP/1.1 (with WebSocket
//! upgrades) over the standard library's TCP listener; TLS or alternative
//! stacks can be plugged in by implementing the trait.

use std::{net::SocketAddr, sync::Arc};

use crate::{app::App, error::Result};

pub mod tcp;

pub use tcp::TcpTransport;

/// An HTTP/WebSocket transport the core runs on top of.
pub trait Transport {
    /// Accept connections on `addr` and handle them with `app` until the
    /// transport shuts down.
    fn run(&self, app: Arc<App>, addr: SocketAddr) -> Result<()>;
}
