//! Error types for routing operations.

use thiserror::Error;

/// Errors that can occur during routing-table operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// Route index out of bounds for the table.
    #[error("No route at index {index} (table holds {len})")]
    RouteIndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of routes in the table.
        len: usize,
    },
}

/// Result type for routing operations.
pub type Result<T> = std::result::Result<T, RoutingError>;
