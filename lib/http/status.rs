//! HTTP status codes.
//! Most functions that accept a [`Status`] will also accept any [`u16`] value,
//! converting it to a `Status::Custom` if it is not a known status code.

macro_rules! status {
    {
        $(
            $(#[$attr:meta])*
            $name:ident => $status:literal, $reason:literal
        ),*
    } => {
        /// HTTP status codes.
        ///
        /// Used to indicate the status of an HTTP response.
        /// Note: Methods that accept a [`Status`] will also accept any [`u16`]
        /// value, converting it to a [`Status::Custom`] if it is not a known
        /// status code.
        ///
        /// From <https://developer.mozilla.org/en-US/docs/Web/HTTP/Status>
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Status {
            $(
                #[doc = concat!("**", $status, " ", $reason, "**")]
                ///
                $(#[$attr])*
                $name
            ),*,
            /// Custom status code.
            /// Only used when the status code is not a known HTTP status code.
            Custom(u16)
        }

        impl Status {
            /// Gets the actual HTTP status code for the status.
            pub fn code(&self) -> u16 {
                match self {
                    $(Status::$name => $status),*,
                    Status::Custom(x) => *x
                }
            }

            /// Gets the default reason phrase for the status.
            pub fn reason_phrase(&self) -> &str {
                match self.code() {
                    $($status => $reason),*,
                    _ => "OK"
                }
            }
        }

        impl From<u16> for Status {
            fn from(code: u16) -> Self {
                match code {
                    $($status => Status::$name),*,
                    x => Status::Custom(x)
                }
            }
        }
    };
}

status! {
    // == Informational ==

    /// Indicates that everything so far is OK and that the client should
    /// continue with the request or ignore it if it is already finished.
    Continue           => 100, "Continue",
    /// Indicates a protocol to which the server switches.
    /// The protocol is specified in the Upgrade request header received from
    /// a client.
    SwitchingProtocols => 101, "Switching Protocols",

    // == Success ==

    /// The request succeeded.
    Ok                  => 200, "OK",
    /// The request succeeded, and a new resource was created as a result.
    Created             => 201, "Created",
    /// The request has been received but not yet acted upon.
    Accepted            => 202, "Accepted",
    /// There is no content to send for this request.
    NoContent           => 204, "No Content",
    /// Used in response to a range request when the client has requested a
    /// part or parts of a resource.
    PartialContent      => 206, "Partial Content",

    // == Redirection ==

    /// The URL of the requested resource has been changed permanently.
    MovedPermanently    => 301, "Moved Permanently",
    /// The URI of the requested resource has been changed temporarily.
    Found               => 302, "Found",
    /// Directs the client to get the requested resource at another URI with
    /// a GET request.
    SeeOther            => 303, "See Other",
    /// Tells the client the response has not been modified, so it can
    /// continue to use its cached version.
    NotModified         => 304, "Not Modified",
    /// Like `302 Found`, but the method used must not be changed.
    TemporaryRedirect   => 307, "Temporary Redirect",
    /// Like `301 Moved Permanently`, but the method used must not be changed.
    PermanentRedirect   => 308, "Permanent Redirect",

    // == Client Error ==

    /// The server cannot process the request due to a client error.
    BadRequest          => 400, "Bad Request",
    /// The client must authenticate itself to get the requested response.
    Unauthorized        => 401, "Unauthorized",
    /// The client does not have access rights to the content.
    Forbidden           => 403, "Forbidden",
    /// The server cannot find the requested resource.
    NotFound            => 404, "Not Found",
    /// The request method is known by the server but is not supported by the
    /// target resource.
    MethodNotAllowed    => 405, "Method Not Allowed",
    /// No content matching the criteria given by the user agent was found.
    NotAcceptable       => 406, "Not Acceptable",
    /// The server would like to shut down this unused connection.
    RequestTimeout      => 408, "Request Timeout",
    /// The request conflicts with the current state of the server.
    Conflict            => 409, "Conflict",
    /// The requested content has been permanently deleted from the server.
    Gone                => 410, "Gone",
    /// The Content-Length header field is required but not defined.
    LengthRequired      => 411, "Length Required",
    /// The request body is larger than limits defined by the server.
    PayloadTooLarge     => 413, "Payload Too Large",
    /// The URI requested by the client is longer than the server is willing
    /// to interpret.
    UriTooLong          => 414, "URI Too Long",
    /// The media format of the requested data is not supported by the server.
    UnsupportedMediaType => 415, "Unsupported Media Type",
    /// The server refuses the attempt to brew coffee with a teapot.
    ImATeapot           => 418, "I'm a teapot",
    /// The user has sent too many requests in a given amount of time.
    TooManyRequests     => 429, "Too Many Requests",

    // == Server Error ==

    /// The server has encountered a situation it does not know how to handle.
    InternalServerError => 500, "Internal Server Error",
    /// The request method is not supported by the server.
    NotImplemented      => 501, "Not Implemented",
    /// The server, while working as a gateway, got an invalid response.
    BadGateway          => 502, "Bad Gateway",
    /// The server is not ready to handle the request.
    ServiceUnavailable  => 503, "Service Unavailable",
    /// The server, while working as a gateway, did not get a response in time.
    GatewayTimeout      => 504, "Gateway Timeout",
    /// The HTTP version used in the request is not supported by the server.
    HttpVersionNotSupported => 505, "HTTP Version Not Supported"
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod test {
    use super::Status;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(Status::from(404), Status::NotFound);
        assert_eq!(Status::NotFound.code(), 404);
        assert_eq!(Status::NotFound.reason_phrase(), "Not Found");
        assert_eq!(Status::from(299), Status::Custom(299));
        assert_eq!(Status::Custom(299).code(), 299);
        assert_eq!(Status::Custom(299).reason_phrase(), "OK");
    }
}
