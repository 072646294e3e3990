//! Type pattern compilation and signal-type validation.
//!
//! A pattern addresses hierarchical dotted signal types:
//!
//! ```text
//! pattern := segment ("." segment)*
//! segment := literal | "*" | "**"
//! literal := 1*( lowercase / digit / "_" )
//! ```
//!
//! `*` matches exactly one segment, `**` matches zero or more; at most
//! one `**` may appear per pattern. Wildcards may sit in any position,
//! including first, last, and as the sole segment.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::RoutingError;

/// Longest signal type accepted at match time.
const MAX_TYPE_LEN: usize = 256;

/// A single segment matcher in a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Matches exactly the given string.
    Literal(String),
    /// `*` - matches exactly one segment.
    Single,
    /// `**` - matches zero or more segments.
    Multi,
}

impl Segment {
    /// Specificity weight: literal > `*` > `**`.
    pub(crate) fn weight(&self) -> u8 {
        match self {
            Self::Literal(_) => 2,
            Self::Single => 1,
            Self::Multi => 0,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.write_str(s),
            Self::Single => f.write_str("*"),
            Self::Multi => f.write_str("**"),
        }
    }
}

/// A compiled route pattern.
///
/// # Examples
///
/// ```
/// use signet_router::TypePattern;
///
/// let p = TypePattern::parse("user.*.created").unwrap();
/// assert_eq!(p.to_string(), "user.*.created");
/// assert_eq!(p.segments().len(), 3);
///
/// assert!(TypePattern::parse("user..created").is_err());
/// assert!(TypePattern::parse("a.**.b.**").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypePattern {
    segments: Vec<Segment>,
}

impl TypePattern {
    /// Compiles a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InvalidPattern`] when the pattern is
    /// empty, contains an empty segment, contains more than one `**`,
    /// or a segment carries characters outside `[a-z0-9_]` once the
    /// wildcard tokens are recognized.
    pub fn parse(pattern: &str) -> Result<Self, RoutingError> {
        if pattern.is_empty() {
            return Err(RoutingError::InvalidPattern(
                "pattern must be non-empty".into(),
            ));
        }

        let mut segments = Vec::new();
        let mut multi_seen = false;

        for raw in pattern.split('.') {
            let segment = match raw {
                "" => {
                    return Err(RoutingError::InvalidPattern(format!(
                        "empty segment in \"{pattern}\""
                    )))
                }
                "*" => Segment::Single,
                "**" => {
                    if multi_seen {
                        return Err(RoutingError::InvalidPattern(format!(
                            "at most one \"**\" segment allowed in \"{pattern}\""
                        )));
                    }
                    multi_seen = true;
                    Segment::Multi
                }
                literal => {
                    if !is_literal(literal) {
                        return Err(RoutingError::InvalidPattern(format!(
                            "invalid segment \"{raw}\" in \"{pattern}\""
                        )));
                    }
                    Segment::Literal(literal.to_string())
                }
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// The compiled segment matchers, left to right.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Specificity vector: per-segment weights, literal > `*` > `**`.
    ///
    /// Compared lexicographically left to right; on a shared prefix the
    /// longer pattern ranks higher.
    pub(crate) fn rank(&self) -> Vec<u8> {
        self.segments.iter().map(Segment::weight).collect()
    }
}

impl fmt::Display for TypePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Validates a signal type and splits it into segments.
///
/// Types are stricter than patterns: no wildcards, every segment
/// `[a-z0-9_]+`, total length bounded.
///
/// # Errors
///
/// Returns [`RoutingError::InvalidType`] naming the problem.
pub(crate) fn split_type(signal_type: &str) -> Result<Vec<&str>, RoutingError> {
    if signal_type.is_empty() {
        return Err(RoutingError::InvalidType("type must be non-empty".into()));
    }
    if signal_type.len() > MAX_TYPE_LEN {
        return Err(RoutingError::InvalidType(format!(
            "type exceeds {MAX_TYPE_LEN} characters"
        )));
    }

    let segments: Vec<&str> = signal_type.split('.').collect();
    for segment in &segments {
        if segment.is_empty() {
            return Err(RoutingError::InvalidType(format!(
                "empty segment in \"{signal_type}\""
            )));
        }
        if !is_literal(segment) {
            return Err(RoutingError::InvalidType(format!(
                "invalid segment \"{segment}\" in \"{signal_type}\""
            )));
        }
    }
    Ok(segments)
}

fn is_literal(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
