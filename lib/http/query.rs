//! The query string of a request URL.
//! Percent-decoding is the transport's concern; values are stored as
//! delivered.

use std::{fmt, str::FromStr};

/// A collection of query parameters, parsed from the `?key=value&...` tail of
/// a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    /// Create a new empty query.
    pub fn new_empty() -> Query {
        Query(Vec::new())
    }

    /// Gets the value of the first parameter with the given name.
    /// ## Example
    /// ```
    /// # use std::str::FromStr;
    /// # use gale::Query;
    /// let query = Query::from_str("name=tux&age=20").unwrap();
    /// assert_eq!(query.get("name"), Some("tux"));
    /// assert_eq!(query.get("nose"), None);
    /// ```
    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        let name = name.as_ref();
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Checks if a parameter with the given name exists.
    pub fn has(&self, name: impl AsRef<str>) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over the `(name, value)` pairs in order of appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for Query {
    type Err = ();

    /// Parses a raw query string.
    /// Pieces without an `=` become parameters with an empty value.
    fn from_str(raw: &str) -> Result<Query, Self::Err> {
        if raw.is_empty() {
            return Ok(Query::new_empty());
        }

        let mut out = Vec::new();
        for piece in raw.split('&') {
            match piece.split_once('=') {
                Some((key, value)) => out.push((key.to_owned(), value.to_owned())),
                None => out.push((piece.to_owned(), String::new())),
            }
        }

        Ok(Query(out))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.0 {
            if !first {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::Query;

    #[test]
    fn test_query_parse() {
        let query = Query::from_str("a=1&b=2&flag").unwrap();
        assert_eq!(query.get("a"), Some("1"));
        assert_eq!(query.get("b"), Some("2"));
        assert_eq!(query.get("flag"), Some(""));
        assert_eq!(query.get("c"), None);
    }

    #[test]
    fn test_empty_query() {
        let query = Query::from_str("").unwrap();
        assert_eq!(query, Query::new_empty());
        assert!(!query.has("a"));
    }
}
