//! CORS middleware behavior.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use super::run;
use crate::{extensions::Cors, App, HttpRequest, Method, Routes, Status, Text};

#[test]
fn test_preflight_short_circuits() {
    let invoked = Arc::new(AtomicBool::new(false));
    let mut app = App::new();

    app.use_middleware_at("/api", Cors::new().middleware());
    let flag = invoked.clone();
    app.post("/api/data", move |_| {
        flag.store(true, Ordering::Relaxed);
        Ok(Text::new("stored"))
    });

    let req = HttpRequest::new(Method::OPTIONS, "/api/data", Default::default(), Vec::new())
        .with_header("Access-Control-Request-Method", "POST");
    let res = run(&app, req);

    assert_eq!(res.status, Status::NoContent);
    assert!(res.body.is_empty());
    assert_eq!(res.headers.get("Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(res.headers.get("Access-Control-Allow-Methods"), Some("*"));
    assert_eq!(res.headers.get("Access-Control-Max-Age"), Some("86400"));
    assert!(!invoked.load(Ordering::Relaxed));
}

#[test]
fn test_plain_options_is_not_a_preflight() {
    let mut app = App::new();
    app.use_middleware(Cors::new().middleware());
    app.options("/thing", |_| Ok(Text::new("options!")));

    // No Access-Control-Request-Method header, so the route runs.
    let req = HttpRequest::new(Method::OPTIONS, "/thing", Default::default(), Vec::new());
    let res = run(&app, req);
    assert_eq!(res.status, Status::Ok);
    assert_eq!(res.body, b"options!");
    assert_eq!(res.headers.get("Access-Control-Allow-Origin"), Some("*"));
}

#[test]
fn test_headers_added_to_normal_requests() {
    let mut app = App::new();
    app.use_middleware(
        Cors::new()
            .origin("https://example.com")
            .credentials(true)
            .max_age(600)
            .middleware(),
    );
    app.get("/data", |_| Ok(Text::new("data")));

    let res = run(&app, HttpRequest::get("/data"));
    assert_eq!(res.status, Status::Ok);
    assert_eq!(res.body, b"data");
    assert_eq!(
        res.headers.get("Access-Control-Allow-Origin"),
        Some("https://example.com")
    );
    assert_eq!(
        res.headers.get("Access-Control-Allow-Credentials"),
        Some("true")
    );
    assert_eq!(res.headers.get("Access-Control-Max-Age"), Some("600"));
}

#[test]
fn test_scoped_cors_leaves_other_paths_alone() {
    let mut app = App::new();
    app.use_middleware_at("/api", Cors::new().middleware());
    app.get("/plain", |_| Ok(Text::new("plain")));

    let res = run(&app, HttpRequest::get("/plain"));
    assert!(res.headers.get("Access-Control-Allow-Origin").is_none());
}
