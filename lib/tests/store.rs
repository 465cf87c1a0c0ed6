//! Lookup precedence and merge behavior of the route store.

use super::{body_of, run};
use crate::{App, HttpRequest, Method, Routes, Status, Text};

#[test]
fn test_literal_lookup_has_no_params() {
    let mut app = App::new();
    app.get("/exact/path", |event| {
        assert!(event.params().is_empty());
        Ok(Text::new("exact"))
    });

    assert_eq!(body_of(&app, HttpRequest::get("/exact/path")), "exact");
}

#[test]
fn test_insertion_order_breaks_ties() {
    let mut app = App::new();
    app.get("/t/:first", |_| Ok(Text::new("first")));
    app.get("/t/:second", |_| Ok(Text::new("second")));

    // Both templates match; the earlier registration wins.
    assert_eq!(body_of(&app, HttpRequest::get("/t/x")), "first");
}

#[test]
fn test_earlier_templates_scanned_first() {
    let mut app = App::new();
    app.get("/a/:x/c", |_| Ok(Text::new("one")));
    app.get("/a/b/:y", |_| Ok(Text::new("two")));

    // Matches the first pattern even though the second also fits.
    assert_eq!(body_of(&app, HttpRequest::get("/a/b/c")), "one");
    // Only the second pattern fits here.
    assert_eq!(body_of(&app, HttpRequest::get("/a/b/d")), "two");
}

#[test]
fn test_lookup_precedence() {
    // literal[method] > literal[*] > templated[method] > templated[*]
    let mut app = App::new();
    app.all("/x", |_| Ok(Text::new("literal-any")));
    app.get("/:t", |_| Ok(Text::new("templated-get")));
    app.all("/:t", |_| Ok(Text::new("templated-any")));
    app.get("/x", |_| Ok(Text::new("literal-get")));

    assert_eq!(body_of(&app, HttpRequest::get("/x")), "literal-get");

    // No literal GET: the wildcard-method literal wins over templates.
    let mut app = App::new();
    app.all("/x", |_| Ok(Text::new("literal-any")));
    app.get("/:t", |_| Ok(Text::new("templated-get")));
    assert_eq!(body_of(&app, HttpRequest::get("/x")), "literal-any");

    // No literals: the exact-method template wins over the wildcard one.
    let mut app = App::new();
    app.all("/:t", |_| Ok(Text::new("templated-any")));
    app.get("/:t", |_| Ok(Text::new("templated-get")));
    assert_eq!(body_of(&app, HttpRequest::get("/x")), "templated-get");
    // Other methods fall through to the wildcard template.
    assert_eq!(
        body_of(&app, HttpRequest::post("/x", Vec::new())),
        "templated-any"
    );
}

#[test]
fn test_wildcard_method_matches_everything() {
    let mut app = App::new();
    app.all("/any", |event| Ok(Text::new(event.req.method.to_string())));

    assert_eq!(body_of(&app, HttpRequest::get("/any")), "GET");
    assert_eq!(body_of(&app, HttpRequest::post("/any", Vec::new())), "POST");
}

#[test]
fn test_duplicate_registration_overrides() {
    let mut app = App::new();
    app.get("/dup", |_| Ok(Text::new("old")));
    app.get("/dup", |_| Ok(Text::new("new")));
    assert_eq!(body_of(&app, HttpRequest::get("/dup")), "new");
    assert_eq!(app.routes().count(), 1);

    // Same for templated routes, keeping their original scan position.
    let mut app = App::new();
    app.get("/d/:a", |_| Ok(Text::new("old")));
    app.get("/d/:b", |_| Ok(Text::new("tail")));
    app.get("/d/:a", |_| Ok(Text::new("new")));
    assert_eq!(body_of(&app, HttpRequest::get("/d/x")), "new");
}

#[test]
fn test_method_isolation() {
    let mut app = App::new();
    app.get("/thing", |_| Ok(Text::new("got")));

    assert_eq!(
        run(&app, HttpRequest::post("/thing", Vec::new())).status,
        Status::NotFound
    );
}

#[test]
fn test_merged_group_routes_resolve() {
    let mut app = App::new();
    app.group("/api", |api| {
        api.get("/:t", |_| Ok(Text::new("inner")));
    });
    // Appended after the merged group's routes, so it scans second.
    app.get("/api/*", |_| Ok(Text::new("outer")));

    assert_eq!(body_of(&app, HttpRequest::get("/api/users")), "inner");

    let routes: Vec<_> = app.routes().collect();
    assert_eq!(
        routes,
        [(Method::GET, "/api/:t"), (Method::GET, "/api/*")]
    );
}
