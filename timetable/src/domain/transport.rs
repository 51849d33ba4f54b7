//! Transport kinds and vehicles.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::TokenPolicy;

/// Error returned when parsing an unknown transport kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport kind {0:?}: expected автобус, троллейбус or трамвай")]
pub struct UnknownTransportKind(pub String);

/// The kind of vehicle serving a route.
///
/// Each kind carries its own naming table: the Russian display name used in
/// timetable files, a short prefix for route badges and an English alias.
///
/// # Examples
///
/// ```
/// use timetable::domain::TransportKind;
///
/// let kind = TransportKind::parse("Tram").unwrap();
/// assert_eq!(kind, TransportKind::Tram);
/// assert_eq!(kind.display_name(), "трамвай");
/// assert_eq!(kind.short_name(), "Тм");
///
/// assert!(TransportKind::parse("ferry").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Bus,
    Trolleybus,
    Tram,
}

impl TransportKind {
    /// All kinds in canonical order.
    pub fn all() -> [TransportKind; 3] {
        [
            TransportKind::Bus,
            TransportKind::Trolleybus,
            TransportKind::Tram,
        ]
    }

    /// Russian name, as written to timetable files.
    pub fn display_name(self) -> &'static str {
        match self {
            TransportKind::Bus => "автобус",
            TransportKind::Trolleybus => "троллейбус",
            TransportKind::Tram => "трамвай",
        }
    }

    /// Short prefix used in route badges ("А5", "Тб12").
    pub fn short_name(self) -> &'static str {
        match self {
            TransportKind::Bus => "А",
            TransportKind::Trolleybus => "Тб",
            TransportKind::Tram => "Тм",
        }
    }

    /// English alias.
    pub fn english_name(self) -> &'static str {
        match self {
            TransportKind::Bus => "bus",
            TransportKind::Trolleybus => "trolleybus",
            TransportKind::Tram => "tram",
        }
    }

    /// Parse a Russian or English kind name, ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|kind| lower == kind.display_name() || lower == kind.english_name())
    }

    /// Parse a kind name under the given policy.
    ///
    /// Under [`TokenPolicy::Lenient`] an unknown name becomes
    /// [`TransportKind::Bus`].
    pub fn from_name(name: &str, policy: TokenPolicy) -> Result<Self, UnknownTransportKind> {
        match (Self::parse(name), policy) {
            (Some(kind), _) => Ok(kind),
            (None, TokenPolicy::Lenient) => Ok(TransportKind::Bus),
            (None, TokenPolicy::Reject) => Err(UnknownTransportKind(name.to_string())),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TransportKind {
    type Err = UnknownTransportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s, TokenPolicy::Reject)
    }
}

/// A vehicle line: its kind plus the number painted on it.
///
/// The number doubles as the route number used everywhere else to identify
/// a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Vehicle {
    pub kind: TransportKind,
    pub id: u32,
}

impl Vehicle {
    /// Create a vehicle.
    pub fn new(kind: TransportKind, id: u32) -> Self {
        Self { kind, id }
    }

    /// Long name, e.g. "автобус №5".
    pub fn full_name(&self) -> String {
        format!("{} №{}", self.kind.display_name(), self.id)
    }

    /// Badge name, e.g. "А5".
    pub fn short_name(&self) -> String {
        format!("{}{}", self.kind.short_name(), self.id)
    }
}
