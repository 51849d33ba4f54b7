//! Domain error types.
//!
//! These errors represent violated preconditions on existing state: a
//! route or stop that is not there, or a route built in the wrong order.
//! Input validation failures live in [`crate::validation`].

use super::StopId;

/// Domain-level errors for lookups and route construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// No schedule carries this route number
    #[error("route {0} not found")]
    RouteNotFound(u32),

    /// No stop with this name on the route
    #[error("stop {0:?} not found on route")]
    StopNotFound(String),

    /// Stop handle does not belong to the registry
    #[error("unknown stop id {0}")]
    UnknownStop(StopId),

    /// Route built out of order or with missing data
    #[error("invalid route configuration: {0}")]
    InvalidRouteConfiguration(&'static str),
}
