//! WebSocket support: the upgrade handshake, per-peer channel subscriptions
//! and publish/subscribe broadcast through the [`Hub`].
//!
//! Register a WebSocket route with [`ws`](crate::Routes::ws); the handler is
//! delivered [`WsEvent::Open`] exactly once, then zero or more
//! [`WsEvent::Message`]s, then [`WsEvent::Close`] exactly once.
//!
//! ```
//! # use gale::{App, Routes, WsEvent, WsMessage};
//! # let mut app = App::new();
//! app.ws("/chat", |peer, event| match event {
//!     WsEvent::Open => {
//!         peer.subscribe("lobby");
//!         peer.send("welcome!");
//!     }
//!     WsEvent::Message(WsMessage::Text(msg)) => peer.publish("lobby", msg),
//!     WsEvent::Message(WsMessage::Binary(_)) => peer.send("binary is not supported"),
//!     WsEvent::Close => {}
//! });
//! ```

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use sha1::{Digest, Sha1};

mod frame;
mod hub;
mod peer;

pub(crate) use frame::{opcode, Frame};
pub use hub::Hub;
pub use peer::{Peer, PeerSession, WsConnection};

/// The GUID appended to `Sec-WebSocket-Key` when deriving the accept key,
/// from RFC 6455.
const WS_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// A message travelling over a WebSocket, in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsMessage {
    /// A text frame.
    Text(String),
    /// A binary frame.
    Binary(Vec<u8>),
}

/// Events delivered to a WebSocket route handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsEvent {
    /// The peer has connected.
    /// Delivered exactly once, before any messages.
    Open,
    /// The peer sent a frame.
    Message(WsMessage),
    /// The connection has closed.
    /// Delivered exactly once; afterwards the peer is gone from the hub.
    Close,
}

/// A WebSocket route handler.
pub type WsHandler = Arc<dyn Fn(&Peer, WsEvent) + Send + Sync>;

/// Derives the `Sec-WebSocket-Accept` value for an upgrade response from the
/// request's `Sec-WebSocket-Key`.
/// ## Example
/// ```
/// # use gale::ws::accept_key;
/// // The example key from RFC 6455 §1.3.
/// assert_eq!(
///     accept_key("dGhlIHNhbXBsZSBub25jZQ=="),
///     "s3pPLMBiTxaQ9kYGzzhZRbK+xOo="
/// );
/// ```
pub fn accept_key(key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    hasher.update(WS_GUID.as_bytes());
    BASE64.encode(hasher.finalize())
}
