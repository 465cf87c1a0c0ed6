//! The pub/sub hub.
//!
//! Tracks connected peers and their channel subscriptions. Membership is
//! mutated under a single lock so that a peer is in a channel's member set
//! exactly when the channel is in the peer's subscription set; message
//! dispatch happens outside the lock on a snapshot of the members.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::Arc,
};

use parking_lot::Mutex;

use crate::ws::{peer::WsConnection, WsMessage};

/// The WebSocket pub/sub hub.
/// One lives on every [`App`](crate::App); handles to it are cheap clones.
#[derive(Clone, Default)]
pub struct Hub {
    inner: Arc<Mutex<HubInner>>,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    peers: HashMap<u64, PeerEntry>,
    channels: HashMap<String, HashSet<u64>>,
}

struct PeerEntry {
    conn: Arc<dyn WsConnection>,
    subscriptions: HashSet<String>,
}

impl Hub {
    /// Create a new empty hub.
    pub fn new() -> Hub {
        Hub::default()
    }

    /// Send a text message to every peer subscribed to `channel`.
    /// Delivery is best-effort: a failing peer does not stop delivery to the
    /// others.
    pub fn publish(&self, channel: impl AsRef<str>, msg: impl fmt::Display) {
        self.publish_message(channel.as_ref(), WsMessage::Text(msg.to_string()), None);
    }

    /// Send a binary message to every peer subscribed to `channel`.
    pub fn publish_binary(&self, channel: impl AsRef<str>, data: Vec<u8>) {
        self.publish_message(channel.as_ref(), WsMessage::Binary(data), None);
    }

    /// The number of connected peers.
    pub fn peer_count(&self) -> usize {
        self.inner.lock().peers.len()
    }

    /// The number of peers subscribed to `channel`.
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.inner
            .lock()
            .channels
            .get(channel)
            .map(|members| members.len())
            .unwrap_or(0)
    }

    /// Whether the peer with the given id is subscribed to `channel`.
    pub fn is_subscribed(&self, peer_id: u64, channel: &str) -> bool {
        self.inner
            .lock()
            .channels
            .get(channel)
            .is_some_and(|members| members.contains(&peer_id))
    }

    /// Broadcast to a channel, optionally excluding one peer.
    /// The member list is snapshotted under the lock, the sends happen
    /// outside it.
    pub(crate) fn publish_message(&self, channel: &str, msg: WsMessage, except: Option<u64>) {
        let targets: Vec<Arc<dyn WsConnection>> = {
            let inner = self.inner.lock();
            match inner.channels.get(channel) {
                Some(members) => members
                    .iter()
                    .filter(|id| Some(**id) != except)
                    .filter_map(|id| inner.peers.get(id).map(|entry| entry.conn.clone()))
                    .collect(),
                None => return,
            }
        };

        trace!(
            Level::Debug,
            "[WS] Publishing to {} peer(s) on `{}`",
            targets.len(),
            channel
        );
        for conn in targets {
            conn.send(msg.clone());
        }
    }

    /// Register a new peer, returning its hub-assigned id.
    pub(crate) fn register(&self, conn: Arc<dyn WsConnection>) -> u64 {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.peers.insert(
            id,
            PeerEntry {
                conn,
                subscriptions: HashSet::new(),
            },
        );

        trace!(Level::Debug, "[WS] Peer #{id} registered");
        id
    }

    /// Remove a peer from every channel it subscribed to, then from the peer
    /// table. Removing an unknown peer is a no-op.
    pub(crate) fn unregister(&self, id: u64) {
        let mut inner = self.inner.lock();
        let Some(entry) = inner.peers.remove(&id) else {
            return;
        };

        for channel in entry.subscriptions {
            if let Some(members) = inner.channels.get_mut(&channel) {
                members.remove(&id);
                if members.is_empty() {
                    inner.channels.remove(&channel);
                }
            }
        }

        trace!(Level::Debug, "[WS] Peer #{id} unregistered");
    }

    /// Add a peer to a channel, creating the channel if needed.
    /// Both sides of the membership are updated under one lock.
    pub(crate) fn subscribe(&self, id: u64, channel: &str) {
        let mut inner = self.inner.lock();
        if let Some(entry) = inner.peers.get_mut(&id) {
            entry.subscriptions.insert(channel.to_owned());
            inner
                .channels
                .entry(channel.to_owned())
                .or_default()
                .insert(id);
            trace!(Level::Debug, "[WS] Peer #{id} subscribed to `{channel}`");
        }
    }

    /// Remove a peer from a channel; the channel itself is dropped once
    /// empty.
    pub(crate) fn unsubscribe(&self, id: u64, channel: &str) {
        let mut inner = self.inner.lock();
        if let Some(entry) = inner.peers.get_mut(&id) {
            entry.subscriptions.remove(channel);
        }

        if let Some(members) = inner.channels.get_mut(channel) {
            members.remove(&id);
            if members.is_empty() {
                inner.channels.remove(channel);
            }
        }

        trace!(Level::Debug, "[WS] Peer #{id} unsubscribed from `{channel}`");
    }
}

impl fmt::Debug for Hub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Hub")
            .field("peers", &inner.peers.len())
            .field("channels", &inner.channels.len())
            .finish()
    }
}
