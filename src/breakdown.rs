//! Computation breakdown for debugging.
//!
//! Contains the `Breakdown` type, a read-only snapshot of one computation:
//! the final value plus which modifiers applied and which were filtered
//! out, and why.

use serde::{Deserialize, Serialize};

/// A snapshot of one property computation with full filtering detail.
///
/// Produced by [`StatProperty::breakdown`](crate::StatProperty::breakdown).
/// Descriptions come from [`Modifier::description`](crate::Modifier::description)
/// and are listed in resolution order (priority descending, insertion order
/// on ties).
///
/// # Examples
///
/// ```rust
/// use statmod::{Modifier, NumericPipeline, OwnerId, StatProperty};
/// use std::sync::Arc;
///
/// let mut speed = StatProperty::new(100.0, Arc::new(NumericPipeline));
/// speed.add_modifier(Modifier::base_add(10.0), OwnerId::new());
///
/// let breakdown = speed.breakdown();
/// assert_eq!(breakdown.value, 110.0);
/// assert_eq!(breakdown.applied.len(), 1);
/// assert!(breakdown.cancelled.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown<T> {
    /// The final computed value.
    pub value: T,

    /// The base value the computation started from.
    pub base: T,

    /// Modifiers the strategy consumed, in resolution order.
    pub applied: Vec<String>,

    /// Modifiers dropped by the cancellation pass.
    pub cancelled: Vec<String>,

    /// Modifiers dropped by context gating.
    pub inactive: Vec<String>,
}
