//! Route table validation errors.
//!
//! All variants are detected when the table is built, at application
//! start. Nothing in this module is produced per navigation.

use thiserror::Error;

/// The declared route table cannot be used.
///
/// Fatal at startup: a process with a malformed table must not begin
/// serving navigations, so there is no recovery path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRouteTable {
    /// Two descriptors resolve to the same full path.
    #[error("duplicate route path '{path}'")]
    DuplicatePath {
        /// The full path both descriptors claim.
        path: String,
    },

    /// More than one catch-all descriptor is declared.
    #[error("more than one catch-all route ('{first}' and '{second}')")]
    MultipleCatchAll {
        /// Full path of the first catch-all seen.
        first: String,
        /// Full path of the conflicting one.
        second: String,
    },

    /// A catch-all descriptor declares children. The wildcard already
    /// swallows the whole remainder, so children could never match.
    #[error("catch-all route '{path}' cannot have children")]
    CatchAllWithChildren {
        /// Full path of the offending catch-all.
        path: String,
    },

    /// A catch-all descriptor is nested under another route.
    #[error("catch-all route '{path}' must be declared at the top level")]
    NestedCatchAll {
        /// Full path of the offending catch-all.
        path: String,
    },

    /// A pattern string could not be parsed.
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as written.
        pattern: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl MalformedRouteTable {
    /// Stable machine-readable code for logging and assertions.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicatePath { .. } => "ROUTE_DUPLICATE_PATH",
            Self::MultipleCatchAll { .. } => "ROUTE_MULTIPLE_CATCH_ALL",
            Self::CatchAllWithChildren { .. } => "ROUTE_CATCH_ALL_WITH_CHILDREN",
            Self::NestedCatchAll { .. } => "ROUTE_NESTED_CATCH_ALL",
            Self::InvalidPattern { .. } => "ROUTE_INVALID_PATTERN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_path() {
        let err = MalformedRouteTable::DuplicatePath {
            path: "/login".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/login"), "got: {msg}");
        assert_eq!(err.code(), "ROUTE_DUPLICATE_PATH");
    }

    #[test]
    fn codes_are_upper_snake() {
        let errors = [
            MalformedRouteTable::DuplicatePath {
                path: "/".to_string(),
            },
            MalformedRouteTable::MultipleCatchAll {
                first: "/*".to_string(),
                second: "/files/*".to_string(),
            },
            MalformedRouteTable::CatchAllWithChildren {
                path: "/*".to_string(),
            },
            MalformedRouteTable::NestedCatchAll {
                path: "/admin/*".to_string(),
            },
            MalformedRouteTable::InvalidPattern {
                pattern: "".to_string(),
                reason: "pattern is empty".to_string(),
            },
        ];
        for err in errors {
            let code = err.code();
            assert!(code.starts_with("ROUTE_"), "got: {code}");
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'),
                "got: {code}"
            );
        }
    }
}
