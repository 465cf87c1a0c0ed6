//! Route path templates and matching.
//!
//! There are 4 types of segments that can be used to make up a path.
//!
//! | Name      | Syntax  | Description                                                               |
//! | --------- | :-----: | ------------------------------------------------------------------------- |
//! | Literal   | `...`   | A literal segment that must match exactly.                                |
//! | Parameter | `:name` | Matches any single non-empty segment, captured under `name`.              |
//! | Wildcard  | `*`     | Matches any single non-empty segment, captured under the reserved key `_`.|
//! | Tail      | `**`    | Matches the rest of the path (zero or more segments, slashes included),   |
//! |           |         | captured under `_`. Must be the last segment.                             |
//!
//! ## Examples
//! | Route              | Explanation                                                          |
//! | ------------------ | -------------------------------------------------------------------- |
//! | `/hello/world`     | Matches `/hello/world` exactly.                                      |
//! | `/greet/:name`     | Matches `/greet/tux`, capturing `name = "tux"`. Not `/greet/`.       |
//! | `/static/*`        | Matches `/static/app.css` but not `/static/css/app.css`.             |
//! | `/files/**`        | Matches `/files`, `/files/a` and `/files/a/b.txt`.                   |
//! | `/**`              | Matches any path. Useful for 404 pages.                              |

use std::collections::HashMap;

use crate::error::StartupError;

/// A compiled route path template.
/// Request paths can be matched against it with [`PathPattern::matches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

/// A segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// A literal segment that must match exactly.
    Literal(String),
    /// A named parameter matching any single non-empty segment.
    Param(String),
    /// An anonymous parameter matching any single non-empty segment.
    Wildcard,
    /// Matches the rest of the path, regardless of its contents.
    Tail,
}

/// Parameter names captured by `*` and `**` segments.
pub const WILDCARD_PARAM: &str = "_";

impl PathPattern {
    /// Compile a raw template string into a `PathPattern`.
    /// A leading `/` is added if missing; nothing else is normalised.
    ///
    /// Fails if a `**` segment is not last, or a `:` parameter has no name.
    pub fn new(template: &str) -> Result<PathPattern, StartupError> {
        let raw = normalize_template(template);
        let mut segments = Vec::new();

        for part in raw.split('/') {
            segments.push(Segment::from_part(part, &raw)?);
        }

        if let Some(tail) = segments
            .iter()
            .position(|s| *s == Segment::Tail)
        {
            if tail != segments.len() - 1 {
                return Err(StartupError::TailNotLast { route: raw });
            }
        }

        Ok(PathPattern { raw, segments })
    }

    /// The template string this pattern was compiled from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True iff every segment is a literal.
    /// Literal patterns are served from the route store's O(1) index.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Try to match a request path against this pattern.
    /// Returns the captured parameters on success: `:name` captures under
    /// `name`, `*` and `**` under [`WILDCARD_PARAM`].
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').collect();
        let has_tail = self.segments.last() == Some(&Segment::Tail);

        // A tail consumes zero or more segments, everything else is
        // positional.
        if has_tail {
            if parts.len() < self.segments.len() - 1 {
                return None;
            }
        } else if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(text) => {
                    if parts[i] != text {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if parts[i].is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), parts[i].to_owned());
                }
                Segment::Wildcard => {
                    if parts[i].is_empty() {
                        return None;
                    }
                    params.insert(WILDCARD_PARAM.to_owned(), parts[i].to_owned());
                }
                Segment::Tail => {
                    params.insert(WILDCARD_PARAM.to_owned(), parts[i..].join("/"));
                    return Some(params);
                }
            }
        }

        Some(params)
    }
}

impl Segment {
    /// Classify one `/`-delimited part of a template.
    fn from_part(part: &str, route: &str) -> Result<Segment, StartupError> {
        if part == "**" {
            return Ok(Segment::Tail);
        }

        if part == "*" {
            return Ok(Segment::Wildcard);
        }

        if let Some(name) = part.strip_prefix(':') {
            if name.is_empty() {
                return Err(StartupError::EmptyParam {
                    route: route.to_owned(),
                });
            }
            return Ok(Segment::Param(name.to_owned()));
        }

        Ok(Segment::Literal(part.to_owned()))
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Makes a template start with a slash.
pub(crate) fn normalize_template(template: &str) -> String {
    if template.starts_with('/') {
        template.to_owned()
    } else {
        format!("/{template}")
    }
}

#[cfg(test)]
mod test {
    use super::PathPattern;
    use std::collections::HashMap;

    macro_rules! result {
        [] => {
            Some(HashMap::<String, String>::new())
        };
        [$($key:tt => $val:tt),*] => {
            {
                let mut map = HashMap::<String, String>::new();
                $(
                    map.insert($key.to_string(), $val.to_string());
                )*
                Some(map)
            }
        };
    }

    macro_rules! match_tests {
        {$(#[test($test_name:ident)] $($path:literal => [$($test:literal => $result:expr),+]),+),*} => {
            $(
                #[test]
                fn $test_name() {
                    $(
                        let pattern = PathPattern::new($path).unwrap();
                        $(
                            let res = pattern.matches($test);
                            let expected: Option<HashMap<String, String>> = $result;
                            assert_eq!(
                                res, expected,
                                "`{}`.matches(`{}`)", $path, $test
                            );
                        )*
                    )+
                }
            )*
        };
    }

    match_tests! {
        #[test(literal_1)]
        "/" => [
            "/"  => result![],
            "/a" => None,
            ""   => None
        ],
        #[test(literal_2)]
        "/send-2" => [
            "/send-2"  => result![],
            "/send-2/" => None,
            "/"        => None
        ],
        #[test(literal_trailing)]
        "/hello/" => [
            "/hello/" => result![],
            "/hello"  => None
        ],
        #[test(params_1)]
        "/greet/:name" => [
            "/greet/tux"     => result!["name" => "tux"],
            "/greet/"        => None,
            "/greet"         => None,
            "/greet/a/b"     => None
        ],
        #[test(params_2)]
        "/users/:id/posts/:pid" => [
            "/users/42/posts/7" => result!["id" => "42", "pid" => "7"],
            "/users/42/posts"   => None,
            "/users//posts/7"   => None
        ],
        #[test(wildcard_1)]
        "/static/*" => [
            "/static/app.css"     => result!["_" => "app.css"],
            "/static/"            => None,
            "/static/css/app.css" => None
        ],
        #[test(tail_1)]
        "/files/**" => [
            "/files"         => result!["_" => ""],
            "/files/"        => result!["_" => ""],
            "/files/a"       => result!["_" => "a"],
            "/files/a/b.txt" => result!["_" => "a/b.txt"],
            "/filesx"        => None
        ],
        #[test(tail_2)]
        "/**" => [
            "/"          => result!["_" => ""],
            "/any/thing" => result!["_" => "any/thing"]
        ],
        #[test(mixed)]
        "/api/:version/files/**" => [
            "/api/v1/files/a/b" => result!["version" => "v1", "_" => "a/b"],
            "/api/v1/files"     => result!["version" => "v1", "_" => ""],
            "/api//files/a"     => None
        ]
    }

    #[test]
    fn test_is_literal() {
        assert!(PathPattern::new("/a/b/c").unwrap().is_literal());
        assert!(PathPattern::new("/").unwrap().is_literal());
        assert!(!PathPattern::new("/a/:b").unwrap().is_literal());
        assert!(!PathPattern::new("/a/*").unwrap().is_literal());
        assert!(!PathPattern::new("/a/**").unwrap().is_literal());
    }

    #[test]
    fn test_mixed_segment_is_literal_text() {
        // `*` and `:` only have meaning as whole segments.
        let pattern = PathPattern::new("/a*b/c:d").unwrap();
        assert!(pattern.is_literal());
        assert!(pattern.matches("/a*b/c:d").is_some());
        assert!(pattern.matches("/axb/cd").is_none());
    }

    #[test]
    fn test_leading_slash_added() {
        let pattern = PathPattern::new("hello").unwrap();
        assert_eq!(pattern.raw(), "/hello");
        assert!(pattern.matches("/hello").is_some());
    }

    #[test]
    fn test_tail_not_last_rejected() {
        assert!(PathPattern::new("/files/**/nope").is_err());
        assert!(PathPattern::new("/**/a").is_err());
    }

    #[test]
    fn test_empty_param_rejected() {
        assert!(PathPattern::new("/greet/:").is_err());
    }
}
