//! Hub membership and broadcast behavior, driven through mock connections.

use std::sync::{Arc, Mutex};

use crate::{
    ws::{PeerSession, WsConnection},
    App, Routes, WsEvent, WsMessage,
};

/// A connection that records everything sent to it.
#[derive(Default)]
struct MockConn {
    sent: Mutex<Vec<WsMessage>>,
    closed: Mutex<bool>,
}

impl WsConnection for MockConn {
    fn send(&self, msg: WsMessage) {
        self.sent.lock().unwrap().push(msg);
    }

    fn close(&self) {
        *self.closed.lock().unwrap() = true;
    }
}

impl MockConn {
    fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| match m {
                WsMessage::Text(t) => Some(t.clone()),
                WsMessage::Binary(_) => None,
            })
            .collect()
    }
}

/// An app whose `/ws` handler subscribes every peer to `room`.
fn chat_app() -> App {
    let mut app = App::new();
    app.ws("/ws", |peer, event| {
        if event == WsEvent::Open {
            peer.subscribe("room");
        }
    });
    app
}

fn connect(app: &App) -> (Arc<MockConn>, PeerSession) {
    let conn = Arc::new(MockConn::default());
    let session = app.upgrade("/ws", conn.clone()).unwrap();
    (conn, session)
}

#[test]
fn test_upgrade_requires_a_route() {
    let app = chat_app();
    assert!(app.has_ws_route("/ws"));
    assert!(!app.has_ws_route("/nope"));
    assert!(app.upgrade("/nope", Arc::new(MockConn::default())).is_none());
}

#[test]
fn test_fan_out() {
    let app = chat_app();
    let (conn_a, session_a) = connect(&app);
    let (conn_b, _session_b) = connect(&app);

    assert_eq!(app.hub.peer_count(), 2);
    assert_eq!(app.hub.subscriber_count("room"), 2);

    app.hub.publish("room", "hi");
    assert_eq!(conn_a.texts(), ["hi"]);
    assert_eq!(conn_b.texts(), ["hi"]);

    // After A closes, only B hears the next publish.
    session_a.close();
    app.hub.publish("room", "bye");
    assert_eq!(conn_a.texts(), ["hi"]);
    assert_eq!(conn_b.texts(), ["hi", "bye"]);
}

#[test]
fn test_subscription_invariants() {
    let app = chat_app();
    let (_conn, session) = connect(&app);
    let peer = session.peer().clone();

    assert!(app.hub.is_subscribed(peer.id(), "room"));

    peer.unsubscribe("room");
    assert!(!app.hub.is_subscribed(peer.id(), "room"));
    // The emptied channel is gone entirely.
    assert_eq!(app.hub.subscriber_count("room"), 0);

    peer.subscribe("other");
    session.close();
    assert!(!app.hub.is_subscribed(peer.id(), "other"));
    assert_eq!(app.hub.peer_count(), 0);
}

#[test]
fn test_publish_includes_publisher() {
    let app = chat_app();
    let (conn_a, session_a) = connect(&app);
    let (conn_b, _session_b) = connect(&app);

    session_a.peer().publish("room", "from-a");
    assert_eq!(conn_a.texts(), ["from-a"]);
    assert_eq!(conn_b.texts(), ["from-a"]);

    session_a.peer().publish_others("room", "not-to-me");
    assert_eq!(conn_a.texts(), ["from-a"]);
    assert_eq!(conn_b.texts(), ["from-a", "not-to-me"]);
}

#[test]
fn test_publish_to_unknown_channel_is_noop() {
    let app = chat_app();
    let (conn, _session) = connect(&app);

    app.hub.publish("ghost-town", "anyone?");
    assert!(conn.texts().is_empty());
}

#[test]
fn test_event_sequence() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let log = events.clone();

    let mut app = App::new();
    app.ws("/events", move |_, event| {
        log.lock().unwrap().push(event);
    });

    let session = app
        .upgrade("/events", Arc::new(MockConn::default()))
        .unwrap();
    session.message(WsMessage::Text("one".into()));
    session.message(WsMessage::Binary(vec![2]));
    session.close();
    // A second close is swallowed, as are frames arriving after it.
    session.close();
    session.message(WsMessage::Text("late".into()));

    assert_eq!(
        *events.lock().unwrap(),
        [
            WsEvent::Open,
            WsEvent::Message(WsMessage::Text("one".into())),
            WsEvent::Message(WsMessage::Binary(vec![2])),
            WsEvent::Close,
        ]
    );
}

#[test]
fn test_dropping_session_closes_peer() {
    let app = chat_app();
    let (_conn, session) = connect(&app);
    assert_eq!(app.hub.peer_count(), 1);

    drop(session);
    assert_eq!(app.hub.peer_count(), 0);
}

#[test]
fn test_send_binary() {
    let app = chat_app();
    let (conn, session) = connect(&app);

    session.peer().send_binary(vec![1, 2, 3]);
    app.hub.publish_binary("room", vec![4]);

    let sent = conn.sent.lock().unwrap();
    assert_eq!(
        *sent,
        [WsMessage::Binary(vec![1, 2, 3]), WsMessage::Binary(vec![4])]
    );
}
