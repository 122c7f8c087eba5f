//! Path pattern parsing and segment matching.

use crate::MalformedRouteTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Matches exactly this text.
    Literal(String),
    /// `:name`, matches any single segment.
    Param(String),
    /// `*`, matches the whole remainder of the path, including an
    /// empty remainder. Only valid as the final segment.
    CatchAll,
}

/// A parsed route path pattern.
///
/// Patterns are slash-separated segments. A segment is a literal
/// (`users`), a single-segment parameter (`:id`), or a trailing `*`
/// that swallows any remainder. Top-level patterns are written with a
/// leading slash (`/login`); child patterns are relative (`settings`).
///
/// # Example
///
/// ```
/// use waygate_route::RoutePattern;
///
/// let pattern = RoutePattern::parse("/users/:id").unwrap();
/// assert_eq!(pattern.to_string(), "/users/:id");
/// assert!(!pattern.is_catch_all());
///
/// assert!(RoutePattern::parse("/a/*/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRouteTable::InvalidPattern`] for an empty
    /// pattern, an empty segment (`//`), a parameter without a name
    /// (`:`), or a `*` anywhere but the final segment.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, MalformedRouteTable> {
        let raw = raw.as_ref();
        let invalid = |reason: &str| MalformedRouteTable::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("pattern is empty"));
        }

        let trimmed = raw.trim_matches('/');
        let mut segments = Vec::new();
        if !trimmed.is_empty() {
            for (i, part) in trimmed.split('/').enumerate() {
                if i > 0 && part.is_empty() {
                    return Err(invalid("empty segment"));
                }
                let segment = if part == "*" {
                    Segment::CatchAll
                } else if let Some(name) = part.strip_prefix(':') {
                    if name.is_empty() {
                        return Err(invalid("parameter segment has no name"));
                    }
                    Segment::Param(name.to_string())
                } else {
                    Segment::Literal(part.to_string())
                };
                segments.push(segment);
            }
        }

        let catch_alls = segments
            .iter()
            .filter(|s| matches!(s, Segment::CatchAll))
            .count();
        if catch_alls > 1 || (catch_alls == 1 && !matches!(segments.last(), Some(Segment::CatchAll)))
        {
            return Err(invalid("'*' is only allowed as the final segment"));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns `true` if the final segment is a `*` wildcard.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll))
    }

    /// Number of parsed segments.
    pub(crate) fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Matches this pattern against the front of `path_segments`.
    ///
    /// Returns the number of path segments consumed, or `None` if the
    /// pattern does not match. A trailing `*` consumes the whole
    /// remainder.
    pub(crate) fn match_prefix(&self, path_segments: &[&str]) -> Option<usize> {
        let mut consumed = 0;
        for segment in &self.segments {
            match segment {
                Segment::CatchAll => return Some(path_segments.len()),
                Segment::Literal(text) => {
                    if path_segments.get(consumed) != Some(&text.as_str()) {
                        return None;
                    }
                    consumed += 1;
                }
                Segment::Param(_) => {
                    path_segments.get(consumed)?;
                    consumed += 1;
                }
            }
        }
        Some(consumed)
    }

    /// Canonical text form used for duplicate detection: segments
    /// re-joined under a leading slash, parameters as `:name`.
    pub(crate) fn canonical_suffix(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.clone(),
                Segment::Param(name) => format!(":{name}"),
                Segment::CatchAll => "*".to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for RoutePattern {
    type Error = MalformedRouteTable;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<RoutePattern> for String {
    fn from(pattern: RoutePattern) -> Self {
        pattern.raw
    }
}
