//! Handling of unrecognized free-text tokens.

use std::str::FromStr;

/// What to do with a day or transport-kind token that is not recognized.
///
/// Older timetable files contain hand-typed tokens, and the historical
/// behavior was to guess rather than fail: an unknown day becomes its
/// first two letters and an unknown kind becomes a bus. `Lenient` keeps
/// that behavior; `Reject` reports the token as an error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPolicy {
    /// Fall back to the historical guess
    #[default]
    Lenient,
    /// Refuse unrecognized tokens
    Reject,
}

impl TokenPolicy {
    /// Returns true for [`TokenPolicy::Reject`].
    pub fn is_strict(self) -> bool {
        self == TokenPolicy::Reject
    }

    /// `Reject` when `strict` is set, `Lenient` otherwise.
    pub fn strict_if(strict: bool) -> Self {
        if strict {
            TokenPolicy::Reject
        } else {
            TokenPolicy::Lenient
        }
    }
}

/// Error returned when parsing an invalid policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid token policy {0:?}: expected \"lenient\" or \"reject\"")]
pub struct InvalidTokenPolicy(String);

impl FromStr for TokenPolicy {
    type Err = InvalidTokenPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" | "0" | "false" | "" => Ok(TokenPolicy::Lenient),
            "reject" | "strict" | "1" | "true" => Ok(TokenPolicy::Reject),
            _ => Err(InvalidTokenPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lenient() {
        assert_eq!(TokenPolicy::default(), TokenPolicy::Lenient);
        assert!(!TokenPolicy::default().is_strict());
    }

    #[test]
    fn parse_names() {
        assert_eq!("lenient".parse(), Ok(TokenPolicy::Lenient));
        assert_eq!("REJECT".parse(), Ok(TokenPolicy::Reject));
        assert_eq!("true".parse(), Ok(TokenPolicy::Reject));
        assert_eq!("0".parse(), Ok(TokenPolicy::Lenient));
        assert!("maybe".parse::<TokenPolicy>().is_err());
    }

    #[test]
    fn strict_if() {
        assert_eq!(TokenPolicy::strict_if(true), TokenPolicy::Reject);
        assert_eq!(TokenPolicy::strict_if(false), TokenPolicy::Lenient);
    }
}
