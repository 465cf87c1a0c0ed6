//! Cookies!
//! This module provides a simple interface for reading request cookies and
//! setting response cookies with their attributes.

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

/// Represents a cookie sent by the client in the `Cookie` header.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,

    /// Cookie value.
    pub value: String,
}

/// Represents a `Set-Cookie` response header.
/// Has more information than a plain [`Cookie`]: expiry, scope and security
/// attributes.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct SetCookie {
    /// Base cookie.
    pub cookie: Cookie,

    /// Cookie Max-Age.
    /// Number of seconds until the cookie expires.
    /// A zero or negative number will expire the cookie immediately.
    pub max_age: Option<i64>,

    /// Cookie expiry as an HTTP date string.
    /// `Max-Age` has precedence when both are set.
    pub expires: Option<String>,

    /// Path where the cookie is valid.
    pub path: Option<String>,

    /// Cookie domain.
    pub domain: Option<String>,

    /// Only send the cookie over HTTPS.
    pub secure: bool,

    /// Forbid JavaScript access to the cookie.
    pub http_only: bool,

    /// Cross-site sending policy.
    /// `SameSite=None` requires `Secure`; the serialiser emits `Secure`
    /// alongside it regardless of the [`SetCookie::secure`] flag.
    pub same_site: Option<SameSite>,
}

/// Values of the `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum SameSite {
    /// Sent on same-site requests and top-level navigations.
    Lax,
    /// Only sent on same-site requests.
    Strict,
    /// Sent on all requests.
    /// Requires the cookie to also be `Secure`.
    None,
}

/// A collection of [`Cookie`]s parsed from a `Cookie` request header.
#[derive(Debug, Clone, Default)]
pub struct CookieJar(pub(crate) Vec<Cookie>);

impl Cookie {
    /// Make a new cookie from a name and a value.
    /// ## Example
    /// ```
    /// # use gale::Cookie;
    /// let cookie = Cookie::new("name", "value");
    /// ```
    pub fn new(name: impl AsRef<str>, value: impl AsRef<str>) -> Cookie {
        Cookie {
            name: name.as_ref().to_owned(),
            value: value.as_ref().to_owned(),
        }
    }
}

impl SetCookie {
    /// Make a new SetCookie from a name and a value.
    /// All attributes start unset.
    /// ## Example
    /// ```
    /// # use gale::SetCookie;
    /// let cookie = SetCookie::new("name", "value");
    /// ```
    pub fn new(name: impl AsRef<str>, value: impl AsRef<str>) -> SetCookie {
        SetCookie {
            cookie: Cookie::new(name, value),
            max_age: None,
            expires: None,
            path: None,
            domain: None,
            secure: false,
            http_only: false,
            same_site: None,
        }
    }

    /// Make a SetCookie that deletes the named cookie: empty value and
    /// `Max-Age=0`.
    /// ## Example
    /// ```
    /// # use gale::SetCookie;
    /// let cookie = SetCookie::expired("session").path("/");
    /// assert_eq!(cookie.to_string(), "session=; Max-Age=0; Path=/");
    /// ```
    pub fn expired(name: impl AsRef<str>) -> SetCookie {
        SetCookie::new(name, "").max_age(0)
    }

    /// Set the Max-Age field of a SetCookie.
    /// This is the number of seconds the cookie should be valid for.
    pub fn max_age(self, max_age: i64) -> SetCookie {
        SetCookie {
            max_age: Some(max_age),
            ..self
        }
    }

    /// Set the Expires field of a SetCookie to an HTTP date string.
    pub fn expires(self, expires: impl AsRef<str>) -> SetCookie {
        SetCookie {
            expires: Some(expires.as_ref().to_owned()),
            ..self
        }
    }

    /// Set the Path field of a SetCookie.
    pub fn path(self, path: impl AsRef<str>) -> SetCookie {
        SetCookie {
            path: Some(path.as_ref().to_owned()),
            ..self
        }
    }

    /// Set the Domain field of a SetCookie.
    pub fn domain(self, domain: impl AsRef<str>) -> SetCookie {
        SetCookie {
            domain: Some(domain.as_ref().to_owned()),
            ..self
        }
    }

    /// Set the Secure field of a SetCookie.
    pub fn secure(self, secure: bool) -> SetCookie {
        let mut new = self;
        new.secure = secure;
        new
    }

    /// Set the HttpOnly field of a SetCookie.
    pub fn http_only(self, http_only: bool) -> SetCookie {
        let mut new = self;
        new.http_only = http_only;
        new
    }

    /// Set the SameSite field of a SetCookie.
    pub fn same_site(self, same_site: SameSite) -> SetCookie {
        let mut new = self;
        new.same_site = Some(same_site);
        new
    }
}

impl CookieJar {
    /// Create a new empty cookie jar.
    pub fn new() -> CookieJar {
        CookieJar(Vec::new())
    }

    /// Parse a `Cookie` request header value into a jar.
    /// Splits on `;`, trims whitespace and splits each piece on the first
    /// `=`. Malformed pieces are silently ignored, and later values with the
    /// same name override earlier ones.
    /// ## Example
    /// ```
    /// # use gale::cookie::CookieJar;
    /// let jar = CookieJar::from_header("name=value; name2=value2");
    /// assert_eq!(jar.get("name2"), Some("value2"));
    /// ```
    pub fn from_header(value: &str) -> CookieJar {
        let mut jar = CookieJar::new();
        for piece in value.split(';') {
            let (name, value) = match piece.split_once('=') {
                Some(i) => (i.0.trim(), i.1.trim()),
                None => continue,
            };

            match jar.0.iter_mut().find(|c| c.name == name) {
                Some(cookie) => cookie.value = value.to_owned(),
                None => jar.0.push(Cookie::new(name, value)),
            }
        }

        jar
    }

    /// Check if the jar contains a cookie with the given name.
    pub fn has(&self, name: &str) -> bool {
        self.iter().any(|i| i.name == name)
    }

    /// Gets the value of a cookie with the given name.
    /// If the specified cookie does not exist, None is returned.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|i| i.name == name)
            .map(|x| x.value.as_str())
    }

    /// Gets a reference to the [`Cookie`] struct of a cookie with the given
    /// name.
    pub fn get_cookie(&self, name: &str) -> Option<&Cookie> {
        self.iter().find(|i| i.name == name)
    }
}

impl Deref for CookieJar {
    type Target = Vec<Cookie>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CookieJar {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl fmt::Display for SetCookie {
    /// Serialises to a `Set-Cookie` header value.
    /// Attributes are emitted in the order `Max-Age`, `Expires`, `Path`,
    /// `Domain`, `Secure`, `HttpOnly`, `SameSite`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.cookie.name, self.cookie.value)?;

        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={max_age}")?;
        }

        if let Some(expires) = &self.expires {
            write!(f, "; Expires={expires}")?;
        }

        if let Some(path) = &self.path {
            write!(f, "; Path={path}")?;
        }

        if let Some(domain) = &self.domain {
            write!(f, "; Domain={domain}")?;
        }

        if self.secure || self.same_site == Some(SameSite::None) {
            f.write_str("; Secure")?;
        }

        if self.http_only {
            f.write_str("; HttpOnly")?;
        }

        if let Some(same_site) = self.same_site {
            write!(f, "; SameSite={same_site}")?;
        }

        Ok(())
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        })
    }
}

#[cfg(test)]
mod test {
    use super::{CookieJar, SameSite, SetCookie};

    #[test]
    fn test_cookie_parse() {
        let jar = CookieJar::from_header("name=value; name2=value2; name3=value3");
        assert_eq!(jar.len(), 3);
        assert_eq!(jar.get("name"), Some("value"));
        assert_eq!(jar.get("name2"), Some("value2"));
        assert_eq!(jar.get("name3"), Some("value3"));
    }

    #[test]
    fn test_ignore_malformed_pieces() {
        let jar = CookieJar::from_header("name=value; name2 value2; name3=value3;");
        assert_eq!(jar.len(), 2);
        assert_eq!(jar.get("name"), Some("value"));
        assert_eq!(jar.get("name2"), None);
        assert_eq!(jar.get("name3"), Some("value3"));
    }

    #[test]
    fn test_later_value_wins() {
        let jar = CookieJar::from_header("name=first; name=second");
        assert_eq!(jar.len(), 1);
        assert_eq!(jar.get("name"), Some("second"));
    }

    #[test]
    fn test_serialise_attribute_order() {
        let cookie = SetCookie::new("id", "42")
            .same_site(SameSite::Lax)
            .http_only(true)
            .domain("example.com")
            .path("/api")
            .expires("Wed, 21 Oct 2026 07:28:00 GMT")
            .max_age(3600)
            .secure(true);

        assert_eq!(
            cookie.to_string(),
            "id=42; Max-Age=3600; Expires=Wed, 21 Oct 2026 07:28:00 GMT; \
             Path=/api; Domain=example.com; Secure; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_same_site_none_forces_secure() {
        let cookie = SetCookie::new("id", "42").same_site(SameSite::None);
        assert_eq!(cookie.to_string(), "id=42; Secure; SameSite=None");
    }

    #[test]
    fn test_round_trip() {
        let set = SetCookie::new("session", "0xCAFE");
        let jar = CookieJar::from_header(&set.to_string());
        assert_eq!(jar.get("session"), Some("0xCAFE"));
    }
}
