use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::ws::{Hub, WsEvent, WsHandler, WsMessage};

/// The send/close half of a WebSocket connection, implemented by the
/// transport that owns the physical socket.
///
/// Sends are best-effort: implementations swallow (or log) delivery errors,
/// the hub never sees them.
pub trait WsConnection: Send + Sync {
    /// Enqueue a frame to this peer.
    fn send(&self, msg: WsMessage);

    /// Close the underlying connection.
    fn close(&self);
}

/// One connected WebSocket client.
///
/// The transport holds the physical connection; the hub knows the peer by
/// its id. Handlers use the peer to send frames, manage channel
/// subscriptions and publish.
#[derive(Clone)]
pub struct Peer {
    pub(crate) id: u64,
    pub(crate) conn: Arc<dyn WsConnection>,
    pub(crate) hub: Hub,
}

impl Peer {
    /// The hub-assigned id of this peer.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Sends text to this peer.
    pub fn send(&self, msg: impl fmt::Display) {
        self.conn.send(WsMessage::Text(msg.to_string()));
    }

    /// Sends binary data to this peer.
    pub fn send_binary(&self, data: Vec<u8>) {
        self.conn.send(WsMessage::Binary(data));
    }

    /// Subscribes this peer to a channel, creating it if needed.
    pub fn subscribe(&self, channel: impl AsRef<str>) {
        self.hub.subscribe(self.id, channel.as_ref());
    }

    /// Unsubscribes this peer from a channel.
    pub fn unsubscribe(&self, channel: impl AsRef<str>) {
        self.hub.unsubscribe(self.id, channel.as_ref());
    }

    /// Publishes text to every subscriber of a channel, this peer included
    /// if subscribed.
    pub fn publish(&self, channel: impl AsRef<str>, msg: impl fmt::Display) {
        self.hub
            .publish_message(channel.as_ref(), WsMessage::Text(msg.to_string()), None);
    }

    /// Publishes text to every subscriber of a channel except this peer.
    pub fn publish_others(&self, channel: impl AsRef<str>, msg: impl fmt::Display) {
        self.hub.publish_message(
            channel.as_ref(),
            WsMessage::Text(msg.to_string()),
            Some(self.id),
        );
    }

    /// Closes the connection.
    /// The transport will surface the close back through the session, which
    /// delivers [`WsEvent::Close`] and removes the peer from the hub.
    pub fn close(&self) {
        self.conn.close();
    }
}

impl fmt::Debug for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peer").field("id", &self.id).finish()
    }
}

/// The transport-facing driver for one peer.
///
/// Created by [`App::upgrade`](crate::App::upgrade) (which delivers
/// [`WsEvent::Open`]); the transport feeds inbound frames through
/// [`PeerSession::message`] and reports the connection's end with
/// [`PeerSession::close`]. `Close` is delivered exactly once even if the
/// session is closed repeatedly, and dropping the session closes it.
pub struct PeerSession {
    peer: Peer,
    handler: WsHandler,
    closed: AtomicBool,
}

impl PeerSession {
    /// Register the peer and deliver `Open`.
    pub(crate) fn open(peer: Peer, handler: WsHandler) -> PeerSession {
        trace!(Level::Debug, "[WS] Peer #{} open", peer.id);
        handler(&peer, WsEvent::Open);
        PeerSession {
            peer,
            handler,
            closed: AtomicBool::new(false),
        }
    }

    /// The peer this session drives.
    pub fn peer(&self) -> &Peer {
        &self.peer
    }

    /// Deliver an inbound frame to the handler.
    /// Frames arriving after the close are dropped.
    pub fn message(&self, msg: WsMessage) {
        if self.closed.load(Ordering::Relaxed) {
            return;
        }

        (self.handler)(&self.peer, WsEvent::Message(msg));
    }

    /// Deliver `Close` and remove the peer from the hub.
    /// Only the first call has any effect.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::Relaxed) {
            return;
        }

        trace!(Level::Debug, "[WS] Peer #{} closed", self.peer.id);
        (self.handler)(&self.peer, WsEvent::Close);
        self.peer.hub.unregister(self.peer.id);
    }
}

impl Drop for PeerSession {
    fn drop(&mut self) {
        self.close();
    }
}
