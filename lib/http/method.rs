use std::{fmt, str::FromStr};

/// HTTP request methods, plus the wildcard [`ANY`](Method::ANY) used when
/// registering routes that answer every method.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum Method {
    /// Fetch a resource.
    GET,

    /// Submit data to a resource, usually creating something.
    POST,

    /// Replace a resource with the request body.
    PUT,

    /// Remove a resource.
    DELETE,

    /// Apply a partial update to a resource.
    PATCH,

    /// Fetch the headers a GET would produce, without the body.
    HEAD,

    /// Ask what a resource supports. CORS preflights arrive as OPTIONS.
    OPTIONS,

    /// Echo the request back, for diagnostics.
    TRACE,

    /// Open a tunnel through a proxy.
    CONNECT,

    /// The wildcard method.
    /// Routes registered under it match any request method, but always rank
    /// below exact-method routes during lookup. Written `*` in listings;
    /// never the method of a real request.
    ANY,
}

impl Method {
    /// Every method, wildcard last.
    pub const ALL: [Method; 10] = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::HEAD,
        Method::OPTIONS,
        Method::TRACE,
        Method::CONNECT,
        Method::ANY,
    ];

    /// The wire spelling of the method.
    /// ## Example
    /// ```rust
    /// # use gale::Method;
    /// assert_eq!(Method::GET.as_str(), "GET");
    /// assert_eq!(Method::ANY.as_str(), "*");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::TRACE => "TRACE",
            Method::CONNECT => "CONNECT",
            Method::ANY => "*",
        }
    }

    /// Whether this is the wildcard method used by [`ANY`](Method::ANY)
    /// routes.
    pub fn is_wildcard(&self) -> bool {
        *self == Method::ANY
    }
}

impl FromStr for Method {
    type Err = ();

    /// Parse a method from its wire spelling, ignoring case.
    /// The wildcard is spelled `*`.
    /// ## Examples
    /// ```rust
    /// # use std::str::FromStr;
    /// # use gale::Method;
    /// assert!(Method::from_str("GET").unwrap() == Method::GET);
    /// assert!(Method::from_str("connect").unwrap() == Method::CONNECT);
    /// assert!(Method::from_str("*").unwrap() == Method::ANY);
    /// assert!(Method::from_str("BREW") == Err(()));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for Method {
    /// Writes the same spelling [`Method::as_str`] returns.
    ///
    /// ```rust
    /// # use gale::Method;
    /// assert_eq!("GET", Method::GET.to_string());
    /// assert_eq!("*", Method::ANY.to_string());
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
