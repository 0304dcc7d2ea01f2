//! Calculation strategies.
//!
//! A strategy is a pure function `(base, ordered_modifiers) -> final`,
//! stateless and shareable across every property of the same stat. The
//! staged numeric pipeline applies operations grouped by stage:
//!
//! ```text
//! override -> base-add -> percent-add (summed, one multiply) -> final-multiply
//! ```
//!
//! Percent bonuses are summed before a single multiply, so they commute;
//! final multipliers apply one by one in priority order, so they do not
//! (×0 on stun must be able to floor the result).

use crate::error::StatError;
use crate::modifier::{Modifier, ModifierOp};
use crate::numeric::{StatNumeric, StatValue};

/// A pure calculation over a base value and the resolved modifier list.
///
/// Strategies hold configuration only, never per-property state; one
/// instance is typically shared (via `Arc`) by every property of the same
/// stat.
pub trait CalcStrategy<T>: Send + Sync {
    /// Reduce the ordered, filtered modifier list against the base value.
    ///
    /// With an empty list the result must be the deterministic identity for
    /// the strategy (the base value, modulo numeric conversion).
    fn calculate(&self, base: &T, modifiers: &[&Modifier<T>]) -> T;
}

/// Run the staged pipeline in f64, honoring an optional cap on the summed
/// percent bonus.
fn run_stages<T: StatNumeric>(
    base: &T,
    modifiers: &[&Modifier<T>],
    percent_cap: Option<f64>,
) -> f64 {
    let mut value = base.to_f64();

    // Overrides replace the running value before any stage; the list is in
    // priority order, so the first override wins.
    for m in modifiers {
        if let ModifierOp::Override(v) = m.op() {
            value = v.to_f64();
            break;
        }
    }

    for m in modifiers {
        if let ModifierOp::BaseAdd(delta) = m.op() {
            value += delta.to_f64();
        }
    }

    let mut percent_sum = 0.0;
    for m in modifiers {
        if let ModifierOp::PercentAdd(pct) = m.op() {
            percent_sum += pct;
        }
    }
    if let Some(cap) = percent_cap {
        percent_sum = percent_sum.min(cap);
    }
    value *= 1.0 + percent_sum;

    // Integer stats round here, once, not per modifier.
    value = T::round_intermediate(value);

    for m in modifiers {
        if let ModifierOp::FinalMultiply(factor) = m.op() {
            value *= factor;
        }
    }

    value
}

/// The staged numeric pipeline for continuously-valued stats.
///
/// # Examples
///
/// ```rust
/// use statmod::{CalcStrategy, Modifier, NumericPipeline};
///
/// let flat = Modifier::base_add(10.0);
/// let pct = Modifier::percent_add(0.5);
/// let result = NumericPipeline.calculate(&100.0, &[&flat, &pct]);
/// assert_eq!(result, 165.0); // (100 + 10) * 1.5
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericPipeline;

impl<T: StatNumeric> CalcStrategy<T> for NumericPipeline {
    fn calculate(&self, base: &T, modifiers: &[&Modifier<T>]) -> T {
        T::from_f64(run_stages(base, modifiers, None))
    }
}

/// Override-by-highest-priority for discrete or enum-like stats.
///
/// The highest-priority override modifier supplies the value directly;
/// with none present the base value passes through unchanged. Staged
/// operations are inert under this strategy (they belong to the numeric
/// pipeline).
///
/// # Examples
///
/// ```rust
/// use statmod::{CalcStrategy, Modifier, OverrideStrategy};
///
/// let forced = Modifier::override_with(3i32).with_priority(10);
/// let weaker = Modifier::override_with(7i32).with_priority(1);
/// assert_eq!(OverrideStrategy.calculate(&0, &[&forced, &weaker]), 3);
/// assert_eq!(OverrideStrategy.calculate(&0, &[]), 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OverrideStrategy;

impl<T: StatValue> CalcStrategy<T> for OverrideStrategy {
    fn calculate(&self, base: &T, modifiers: &[&Modifier<T>]) -> T {
        for m in modifiers {
            if let Some(v) = m.op().override_value() {
                return v.clone();
            }
        }
        base.clone()
    }
}

/// A closed interval the bounded pipeline clamps into.
///
/// Either bound may be absent. Construction with `min > max` is rejected
/// (`StatError::InvalidBounds`), never normalized or silently clamped to an
/// empty range.
///
/// # Examples
///
/// ```rust
/// use statmod::Bounds;
///
/// let both = Bounds::new(0.0, 100.0).unwrap();
/// let floor_only = Bounds::with_min(0.0);
/// let cap_only = Bounds::with_max(0.75);
///
/// assert!(Bounds::new(100.0, 0.0).is_err());
/// # let _ = (both, floor_only, cap_only);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bounds<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T: StatNumeric> Bounds<T> {
    /// Create bounds with both ends. Fails if `min > max` or the bounds
    /// don't compare (NaN).
    pub fn new(min: T, max: T) -> Result<Self, StatError> {
        if !(min <= max) {
            return Err(StatError::InvalidBounds {
                min: min.to_f64(),
                max: max.to_f64(),
            });
        }
        Ok(Self {
            min: Some(min),
            max: Some(max),
        })
    }

    /// A lower bound only.
    pub fn with_min(min: T) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// An upper bound only.
    pub fn with_max(max: T) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// No bounds at all; clamping is a no-op.
    pub fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// The lower bound, if any.
    pub fn min(&self) -> Option<T> {
        self.min
    }

    /// The upper bound, if any.
    pub fn max(&self) -> Option<T> {
        self.max
    }

    fn clamp(&self, value: T) -> T {
        let mut result = value;
        if let Some(min) = self.min {
            if result < min {
                result = min;
            }
        }
        if let Some(max) = self.max {
            if result > max {
                result = max;
            }
        }
        result
    }
}

/// The staged numeric pipeline plus final clamping and an optional cap on
/// the summed percent bonus.
///
/// The two limits are independent: the percent cap restrains stacking
/// percent buffs before the stage-two multiply, the bounds clamp the final
/// result after every stage has run.
///
/// # Examples
///
/// ```rust
/// use statmod::{BoundedPipeline, Bounds, CalcStrategy, Modifier};
///
/// let strategy = BoundedPipeline::new(Bounds::new(0.0, 200.0).unwrap())
///     .with_percent_cap(0.5)
///     .unwrap();
///
/// // +80% summed percent is capped at +50%.
/// let a = Modifier::percent_add(0.3);
/// let b = Modifier::percent_add(0.5);
/// assert_eq!(strategy.calculate(&100.0, &[&a, &b]), 150.0);
///
/// // And the final result never escapes the bounds.
/// let burst = Modifier::final_multiply(10.0);
/// assert_eq!(strategy.calculate(&100.0, &[&burst]), 200.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BoundedPipeline<T> {
    bounds: Bounds<T>,
    percent_cap: Option<f64>,
}

impl<T: StatNumeric> BoundedPipeline<T> {
    /// Create a bounded pipeline clamping into the given bounds.
    pub fn new(bounds: Bounds<T>) -> Self {
        Self {
            bounds,
            percent_cap: None,
        }
    }

    /// Convenience constructor with both bounds.
    pub fn clamped(min: T, max: T) -> Result<Self, StatError> {
        Ok(Self::new(Bounds::new(min, max)?))
    }

    /// Cap the summed percent bonus before the stage-two multiply. Fails
    /// for a non-finite cap.
    pub fn with_percent_cap(mut self, cap: f64) -> Result<Self, StatError> {
        if !cap.is_finite() {
            return Err(StatError::InvalidPercentCap(cap));
        }
        self.percent_cap = Some(cap);
        Ok(self)
    }

    /// The configured bounds.
    pub fn bounds(&self) -> &Bounds<T> {
        &self.bounds
    }

    /// The configured percent cap, if any.
    pub fn percent_cap(&self) -> Option<f64> {
        self.percent_cap
    }
}

impl<T: StatNumeric> CalcStrategy<T> for BoundedPipeline<T> {
    fn calculate(&self, base: &T, modifiers: &[&Modifier<T>]) -> T {
        let value = T::from_f64(run_stages(base, modifiers, self.percent_cap));
        self.bounds.clamp(value)
    }
}
