//! Parsing of raw HTTP/1.1 request data.

use std::str::FromStr;

use crate::{
    error::{ParseError, Result},
    http::{headers::Header, method::Method},
    Error,
};

/// Parse a request line (`GET /path HTTP/1.1`) into its method and target.
pub(crate) fn parse_request_line(line: &str) -> Result<(Method, String)> {
    let mut parts = line.split_whitespace();

    let raw_method = match parts.next() {
        Some(i) => i,
        None => return Err(Error::Parse(ParseError::NoMethod)),
    };
    let method =
        Method::from_str(raw_method).map_err(|_| Error::Parse(ParseError::InvalidMethod))?;

    let url = match parts.next() {
        Some(i) => i.to_owned(),
        None => return Err(Error::Parse(ParseError::NoPath)),
    };

    if parts.next().is_none() {
        return Err(Error::Parse(ParseError::NoVersion));
    }

    Ok((method, url))
}

/// Parse one header line (`Name: value`).
pub(crate) fn parse_header_line(line: &str) -> Result<Header> {
    match line.split_once(':') {
        Some((name, value)) => Ok(Header::new(name.trim(), value.trim())),
        None => Err(Error::Parse(ParseError::InvalidHeader)),
    }
}

#[cfg(test)]
mod test {
    use super::{parse_header_line, parse_request_line};
    use crate::{error::ParseError, Error, Method};

    #[test]
    fn test_parse_request_line() {
        let (method, url) = parse_request_line("GET /a/b?c=1 HTTP/1.1").unwrap();
        assert_eq!(method, Method::GET);
        assert_eq!(url, "/a/b?c=1");
    }

    #[test]
    fn test_parse_request_line_errors() {
        assert!(matches!(
            parse_request_line(""),
            Err(Error::Parse(ParseError::NoMethod))
        ));
        assert!(matches!(
            parse_request_line("BREW / HTTP/1.1"),
            Err(Error::Parse(ParseError::InvalidMethod))
        ));
        assert!(matches!(
            parse_request_line("GET"),
            Err(Error::Parse(ParseError::NoPath))
        ));
        assert!(matches!(
            parse_request_line("GET /"),
            Err(Error::Parse(ParseError::NoVersion))
        ));
    }

    #[test]
    fn test_parse_header_line() {
        let header = parse_header_line("Content-Type: text/plain").unwrap();
        assert_eq!(header.name, "Content-Type");
        assert_eq!(header.value, "text/plain");

        // Values may themselves contain colons.
        let header = parse_header_line("Host: localhost:8080").unwrap();
        assert_eq!(header.value, "localhost:8080");

        assert!(parse_header_line("no separator").is_err());
    }
}
