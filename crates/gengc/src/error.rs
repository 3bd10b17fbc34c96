//! Error Module - gengc Error Types
//!
//! Defines all error types returned by the collector.
//!
//! # Error Categories
//!
//! ## Caller Errors
//! - `InvalidSize` - Zero-byte allocation or region budget
//! - `DanglingReference` - Edge, root, or weak handle naming an unknown object
//! - `UnknownWeakHandle` - Handle that was never issued
//! - `InvalidCollectionLevel` - Collection level outside 0..=2
//!
//! ## Policy Errors
//! - `BudgetExceeded` - Allocation rejected inside a no-collection region
//! - `InvalidState` - No-collection region started twice or ended while inactive
//! - `NoFinalizer` - Re-registration for an object without a finalizer
//!
//! ## Configuration Errors
//! - `Configuration` - Invalid `GcConfig`
//!
//! Every error is returned before any collector state is touched, so a
//! rejected call leaves the object table, generations, and counters as they
//! were.

use crate::config::ConfigError;
use crate::object::{ObjectId, WeakHandle};
use thiserror::Error;

/// Main error type for all collector operations
///
/// # Examples
///
/// ```rust
/// use gengc::{Collector, GcError};
///
/// let mut gc = Collector::with_defaults();
/// match gc.allocate(0, false) {
///     Err(GcError::InvalidSize { size }) => assert_eq!(size, 0),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GcError {
    /// Allocation size (or region budget) must be positive
    ///
    /// **When returned:** `allocate(0, ..)` or `start_no_collection_region(0)`
    #[error("Invalid size: {size} bytes (must be > 0)")]
    InvalidSize { size: usize },

    /// Reference to an object identity the table does not hold
    ///
    /// **When returned:** the object was never allocated or has been
    /// reclaimed.
    #[error("Dangling reference to {id}")]
    DanglingReference { id: ObjectId },

    /// Weak handle that was never issued by this collector
    #[error("Unknown weak handle {handle}")]
    UnknownWeakHandle { handle: WeakHandle },

    /// Allocation would exceed the declared no-collection region budget
    ///
    /// **Recovery strategy:** end the region (`end_no_collection_region`)
    /// and retry, or declare a larger budget.
    #[error("No-collection region budget exceeded: requested {requested} bytes, remaining {remaining} bytes")]
    BudgetExceeded { requested: usize, remaining: usize },

    /// Collection level outside {0, 1, 2}
    #[error("Invalid collection level {level} (max generation is {max})")]
    InvalidCollectionLevel { level: u8, max: u8 },

    /// Latency state machine misuse
    ///
    /// **Example scenario:** ending a no-collection region that was never
    /// started.
    #[error("Invalid state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    /// Finalization re-registration for an object with no finalizer
    #[error("{id} has no finalizer to re-register")]
    NoFinalizer { id: ObjectId },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl GcError {
    /// Check if this error was caused by a bad argument from the caller
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            GcError::InvalidSize { .. }
                | GcError::DanglingReference { .. }
                | GcError::UnknownWeakHandle { .. }
                | GcError::InvalidCollectionLevel { .. }
        )
    }

    /// Check if this error comes from the latency policy or finalization rules
    pub fn is_policy_rejection(&self) -> bool {
        matches!(
            self,
            GcError::BudgetExceeded { .. } | GcError::InvalidState { .. } | GcError::NoFinalizer { .. }
        )
    }
}

/// Result type alias for collector operations
pub type Result<T> = std::result::Result<T, GcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GcError::BudgetExceeded {
            requested: 100,
            remaining: 10,
        };
        assert_eq!(
            err.to_string(),
            "No-collection region budget exceeded: requested 100 bytes, remaining 10 bytes"
        );

        let err = GcError::InvalidCollectionLevel { level: 3, max: 2 };
        assert!(err.to_string().contains("level 3"));
    }

    #[test]
    fn test_error_classification() {
        assert!(GcError::InvalidSize { size: 0 }.is_caller_error());
        assert!(GcError::DanglingReference { id: ObjectId(7) }.is_caller_error());
        assert!(!GcError::BudgetExceeded { requested: 1, remaining: 0 }.is_caller_error());
        assert!(GcError::BudgetExceeded { requested: 1, remaining: 0 }.is_policy_rejection());
        assert!(GcError::NoFinalizer { id: ObjectId(1) }.is_policy_rejection());
    }

    #[test]
    fn test_config_error_conversion() {
        let err: GcError = ConfigError::InvalidThreshold("zero".to_string()).into();
        assert!(matches!(err, GcError::Configuration(_)));
    }
}
