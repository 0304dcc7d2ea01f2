//! Error types.
//!
//! All errors the engine can raise are represented by the `StatError` enum.
//! Note what is deliberately *not* an error: removing an unknown or stale
//! modifier handle is a defined no-op, because effect-expiry races (an
//! effect removing itself twice, or after a bulk clear) are expected.

use thiserror::Error;

/// Errors raised during strategy configuration or modifier translation.
///
/// # Examples
///
/// ```rust
/// use statmod::{Bounds, StatError};
///
/// let err = Bounds::new(10.0, 0.0).unwrap_err();
/// assert!(matches!(err, StatError::InvalidBounds { .. }));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatError {
    /// A bounded strategy was configured with `min > max` (or a
    /// non-comparable bound). Construction is rejected, never silently
    /// clamped to an empty range.
    #[error("invalid bounds: min {min} is greater than max {max}")]
    InvalidBounds { min: f64, max: f64 },

    /// A percent cap must be a finite number.
    #[error("invalid percent cap: {0}")]
    InvalidPercentCap(f64),

    /// A declarative modifier definition could not be translated into a
    /// typed modifier for the target property's value type.
    #[error("invalid modifier definition: {0}")]
    InvalidDef(String),
}
