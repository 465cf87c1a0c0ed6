use std::collections::HashMap;

use crate::{
    body::FromBody,
    error::Result,
    http::{cookie::CookieJar, request::HttpRequest, response::HttpResponse},
};

/// Everything a handler needs for one request: the request itself, the
/// response being built, and the captured path parameters.
///
/// Created by the orchestrator per incoming request and released once the
/// response has been emitted.
/// ## Example
/// ```
/// # use gale::{error::Result, App, Routes, Text};
/// # let mut app = App::new();
/// app.get("/greet/:name", |event| {
///     let name = event.param("name").unwrap().to_owned();
///     event.res.headers.add("X-Greeted", &name);
///     Ok(Text::new(format!("Hello, {name}!")))
/// });
/// ```
pub struct RequestEvent {
    /// The request being handled.
    pub req: HttpRequest,

    /// The response being built.
    /// The final responder's `options` are applied on top of this once the
    /// middleware chain returns.
    pub res: HttpResponse,

    /// Captured path parameters.
    /// `:name` captures appear under `name`, `*` and `**` captures under the
    /// reserved key `_`.
    pub(crate) params: HashMap<String, String>,

    /// Cookie jar, parsed from the `Cookie` header on first use.
    cookies: Option<CookieJar>,
}

impl RequestEvent {
    pub(crate) fn new(req: HttpRequest) -> RequestEvent {
        RequestEvent {
            req,
            res: HttpResponse::new(),
            params: HashMap::new(),
            cookies: None,
        }
    }

    /// Gets a path parameter by name.
    /// `*` and `**` captures are found under `"_"`.
    pub fn param(&self, name: impl AsRef<str>) -> Option<&str> {
        self.params.get(name.as_ref()).map(|x| x.as_str())
    }

    /// All captured path parameters.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Gets the value of a request cookie by name.
    /// The `Cookie` header is parsed on the first call and cached.
    pub fn cookie(&mut self, name: &str) -> Option<&str> {
        self.cookies().get(name)
    }

    /// The request's cookie jar, parsed on first use.
    pub fn cookies(&mut self) -> &CookieJar {
        if self.cookies.is_none() {
            self.cookies = Some(self.req.cookies());
        }

        self.cookies.as_ref().unwrap()
    }

    /// Decode the request body into `T`.
    /// The default policy turns an uncaught [`BodyError`](crate::error::BodyError)
    /// into a 400 response, but handlers may catch it and respond however
    /// they like.
    pub fn body<T: FromBody>(&self) -> Result<T> {
        Ok(T::from_request(&self.req)?)
    }
}

#[cfg(test)]
mod test {
    use super::RequestEvent;
    use crate::http::request::HttpRequest;

    #[test]
    fn test_cookie_parsed_once() {
        let req = HttpRequest::get("/").with_header("Cookie", "session=77");
        let mut event = RequestEvent::new(req);

        assert_eq!(event.cookie("session"), Some("77"));
        // Mutating the request header after the first parse has no effect.
        event.req.headers.set("Cookie", "session=88");
        assert_eq!(event.cookie("session"), Some("77"));
    }

    #[test]
    fn test_typed_body() {
        let req = HttpRequest::post("/", r#"{"ok": true}"#);
        let event = RequestEvent::new(req);
        let value: serde_json::Value = event.body().unwrap();
        assert_eq!(value["ok"], true);
    }
}
