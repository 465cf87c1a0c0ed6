//! Behavior of the built-in responders during materialisation.

use serde_json::json;

use super::run;
use crate::{
    App, Bytes, Empty, Html, HttpRequest, HttpResponse, Json, Routes, SetCookie, Status, Text,
};

#[test]
fn test_text_responder() {
    let mut app = App::new();
    app.get("/", |_| Ok(Text::new("plain")));

    let res = run(&app, HttpRequest::get("/"));
    assert_eq!(
        res.headers.get("Content-Type"),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(res.body, b"plain");
}

#[test]
fn test_html_responder() {
    let mut app = App::new();
    app.get("/", |_| Ok(Html::new("<p>hi</p>")));

    let res = run(&app, HttpRequest::get("/"));
    assert_eq!(
        res.headers.get("Content-Type"),
        Some("text/html; charset=utf-8")
    );
    assert_eq!(res.body, b"<p>hi</p>");
}

#[test]
fn test_json_responder_canonical_bytes() {
    let mut app = App::new();
    app.get("/", |_| Ok(Json(json!({"b": 2, "a": 1}))));

    let res = run(&app, HttpRequest::get("/"));
    assert_eq!(
        res.headers.get("Content-Type"),
        Some("application/json; charset=utf-8")
    );
    assert_eq!(res.body, br#"{"a":1,"b":2}"#);
}

#[test]
fn test_json_from_serialize() {
    #[derive(serde::Serialize)]
    struct Payload {
        id: u32,
    }

    let mut app = App::new();
    app.get("/", |_| Json::from_serialize(Payload { id: 7 }));

    let res = run(&app, HttpRequest::get("/"));
    assert_eq!(res.body, br#"{"id":7}"#);
}

#[test]
fn test_bytes_responder() {
    let mut app = App::new();
    app.get("/", |_| Ok(Bytes(vec![1, 2, 3])));

    let res = run(&app, HttpRequest::get("/"));
    assert_eq!(
        res.headers.get("Content-Type"),
        Some("application/octet-stream")
    );
    assert_eq!(res.body, [1, 2, 3]);
}

#[test]
fn test_empty_responder() {
    let mut app = App::new();
    app.get("/", |_| Ok(Empty));

    let res = run(&app, HttpRequest::get("/"));
    assert_eq!(res.status, Status::Ok);
    assert!(res.headers.get("Content-Type").is_none());
    assert!(res.body.is_empty());
}

#[test]
fn test_empty_text_sets_no_content_type() {
    let mut app = App::new();
    app.get("/", |_| Ok(Text::new("")));

    let res = run(&app, HttpRequest::get("/"));
    assert!(res.headers.get("Content-Type").is_none());
}

#[test]
fn test_first_content_type_writer_wins() {
    let mut app = App::new();
    app.use_middleware(|event, next| {
        event.res.headers.add("Content-Type", "application/xml");
        next.run(event)
    });
    app.get("/", |_| Ok(Json(json!({"a": 1}))));

    let res = run(&app, HttpRequest::get("/"));
    // The middleware's header survives; the JSON body is still emitted.
    assert_eq!(res.headers.get("Content-Type"), Some("application/xml"));
    assert_eq!(res.headers.get_all("Content-Type").count(), 1);
    assert_eq!(res.body, br#"{"a":1}"#);
}

#[test]
fn test_full_response_responder() {
    let mut app = App::new();
    app.get("/", |_| {
        Ok(HttpResponse::new()
            .status(Status::Created)
            .header("X-Custom", "yes")
            .cookie(SetCookie::new("made", "1"))
            .text("created"))
    });

    let res = run(&app, HttpRequest::get("/"));
    assert_eq!(res.status, Status::Created);
    assert_eq!(res.headers.get("X-Custom"), Some("yes"));
    assert_eq!(res.headers.get("Set-Cookie"), Some("made=1"));
    assert_eq!(
        res.headers.get("Content-Type"),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(res.body, b"created");
}

#[test]
fn test_handler_status_survives_materialisation() {
    let mut app = App::new();
    app.get("/", |event| {
        event.res.status = Status::Accepted;
        Ok(Text::new("queued"))
    });

    let res = run(&app, HttpRequest::get("/"));
    assert_eq!(res.status, Status::Accepted);
}

#[test]
fn test_string_responder() {
    let mut app = App::new();
    app.get("/", |_| Ok("just a str"));

    let res = run(&app, HttpRequest::get("/"));
    assert_eq!(res.body, b"just a str");
    assert_eq!(
        res.headers.get("Content-Type"),
        Some("text/plain; charset=utf-8")
    );
}
