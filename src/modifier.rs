//! Modifier value objects.
//!
//! A [`Modifier`] is immutable once built: a signed priority, a
//! modification operation, and four tag sets. Construction is chainable,
//! starting from one of the per-operation constructors:
//!
//! ```rust
//! use statmod::Modifier;
//!
//! let stun = Modifier::<f64>::final_multiply(0.0)
//!     .with_priority(999)
//!     .effect_tag("stun");
//! assert_eq!(stun.priority(), 999);
//! ```

use crate::numeric::StatNumeric;
use crate::tag::{Tag, TagSet};

/// The modification a modifier performs, as a closed set of operations.
///
/// For numeric stats the variant doubles as the pipeline stage the
/// operation is declared for; for discrete stats only [`Override`] is
/// meaningful and the rest are inert.
///
/// [`Override`]: ModifierOp::Override
#[derive(Debug, Clone, PartialEq)]
pub enum ModifierOp<T> {
    /// Add a flat delta during the base-add stage.
    BaseAdd(T),
    /// Contribute a fractional bonus (0.10 for +10%) to the percent stage.
    ///
    /// All percent bonuses are summed first and the running value is
    /// multiplied once by `(1 + sum)`, so +10% and +20% always combine to
    /// +30% regardless of order.
    PercentAdd(f64),
    /// Multiply the running value during the final stage, in priority
    /// order. This stage is order-sensitive on purpose (×2 on critical,
    /// ×0 on stun).
    FinalMultiply(f64),
    /// Replace the value outright.
    Override(T),
}

impl<T> ModifierOp<T> {
    /// The replacement value, if this is an override operation.
    pub fn override_value(&self) -> Option<&T> {
        match self {
            ModifierOp::Override(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: StatNumeric> ModifierOp<T> {
    /// Apply this operation to a running value in isolation.
    ///
    /// This is the single-modifier interpretation; the staged pipeline
    /// groups operations by stage instead of calling this in sequence, so
    /// percent bonuses can be summed before multiplying.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statmod::ModifierOp;
    ///
    /// assert_eq!(ModifierOp::BaseAdd(10.0).apply(100.0), 110.0);
    /// assert_eq!(ModifierOp::PercentAdd(0.5).apply(100.0), 150.0);
    /// assert_eq!(ModifierOp::FinalMultiply(2.0).apply(100.0), 200.0);
    /// assert_eq!(ModifierOp::Override(42.0).apply(100.0), 42.0);
    /// ```
    pub fn apply(&self, current: T) -> T {
        match self {
            ModifierOp::BaseAdd(delta) => T::from_f64(current.to_f64() + delta.to_f64()),
            ModifierOp::PercentAdd(pct) => T::from_f64(current.to_f64() * (1.0 + pct)),
            ModifierOp::FinalMultiply(factor) => T::from_f64(current.to_f64() * factor),
            ModifierOp::Override(value) => *value,
        }
    }
}

impl<T: std::fmt::Debug> ModifierOp<T> {
    fn describe(&self) -> String {
        match self {
            ModifierOp::BaseAdd(delta) => format!("+{:?}", delta),
            ModifierOp::PercentAdd(pct) => format!("+{:.1}%", pct * 100.0),
            ModifierOp::FinalMultiply(factor) => format!("×{:.2}", factor),
            ModifierOp::Override(value) => format!("override({:?})", value),
        }
    }
}

/// A tagged, prioritized modification of a stat's value.
///
/// Immutable once created: the builder methods consume `self`, and a
/// property copies the modifier into its own storage on insertion, so the
/// original can be dropped freely.
///
/// # Examples
///
/// ```rust
/// use statmod::Modifier;
///
/// // An ice debuff that marks the entity "frozen" and contributes the
/// // "chilled" condition other modifiers may require.
/// let ice: Modifier<f64> = Modifier::percent_add(-0.30)
///     .with_priority(10)
///     .effect_tag("frozen")
///     .grants_context("chilled");
///
/// // A fire buff that thaws: suppresses anything tagged "frozen".
/// let fire: Modifier<f64> = Modifier::base_add(5.0).cancels_tag("frozen");
///
/// assert!(ice.effect_tags().contains_str("frozen"));
/// assert!(fire.cancels_effect_tags().contains_str("frozen"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier<T> {
    op: ModifierOp<T>,
    priority: i32,
    effect_tags: TagSet,
    cancels_effect_tags: TagSet,
    context_tags: TagSet,
    required_context_tags: TagSet,
}

impl<T> Modifier<T> {
    /// Create a modifier from an explicit operation, with priority 0 and no
    /// tags.
    pub fn from_op(op: ModifierOp<T>) -> Self {
        Self {
            op,
            priority: 0,
            effect_tags: TagSet::new(),
            cancels_effect_tags: TagSet::new(),
            context_tags: TagSet::new(),
            required_context_tags: TagSet::new(),
        }
    }

    /// A flat delta applied during the base-add stage.
    pub fn base_add(delta: T) -> Self {
        Self::from_op(ModifierOp::BaseAdd(delta))
    }

    /// A fractional bonus summed into the percent stage (0.10 for +10%).
    pub fn percent_add(pct: f64) -> Self {
        Self::from_op(ModifierOp::PercentAdd(pct))
    }

    /// A multiplier applied during the final stage, in priority order.
    pub fn final_multiply(factor: f64) -> Self {
        Self::from_op(ModifierOp::FinalMultiply(factor))
    }

    /// An outright replacement of the value.
    pub fn override_with(value: T) -> Self {
        Self::from_op(ModifierOp::Override(value))
    }

    /// Set the priority. Higher priorities resolve and apply first; ties
    /// keep insertion order.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Add an effect tag describing what this modifier is.
    pub fn effect_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.effect_tags.insert(tag);
        self
    }

    /// Add several effect tags.
    pub fn effect_tags_from<I, G>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<Tag>,
    {
        for tag in tags {
            self.effect_tags.insert(tag);
        }
        self
    }

    /// Suppress every modifier carrying the given effect tag.
    pub fn cancels_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.cancels_effect_tags.insert(tag);
        self
    }

    /// Contribute a context tag to the active-condition set once this
    /// modifier survives cancellation.
    pub fn grants_context(mut self, tag: impl Into<Tag>) -> Self {
        self.context_tags.insert(tag);
        self
    }

    /// Require at least one of the given context tags to be active for this
    /// modifier to apply. Calling this repeatedly accumulates alternatives,
    /// any one of which satisfies the requirement.
    pub fn requires_context(mut self, tag: impl Into<Tag>) -> Self {
        self.required_context_tags.insert(tag);
        self
    }

    /// The modification operation.
    pub fn op(&self) -> &ModifierOp<T> {
        &self.op
    }

    /// The priority. Higher applies first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Tags describing what this modifier is.
    pub fn effect_tags(&self) -> &TagSet {
        &self.effect_tags
    }

    /// Effect tags of other modifiers this one suppresses.
    pub fn cancels_effect_tags(&self) -> &TagSet {
        &self.cancels_effect_tags
    }

    /// Context tags this modifier contributes once it survives cancellation.
    pub fn context_tags(&self) -> &TagSet {
        &self.context_tags
    }

    /// Context tags this modifier requires (any one suffices). Empty means
    /// always eligible.
    pub fn required_context_tags(&self) -> &TagSet {
        &self.required_context_tags
    }
}

impl<T: std::fmt::Debug> Modifier<T> {
    /// Human-readable description for breakdowns and logging.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statmod::Modifier;
    ///
    /// let m: Modifier<f64> = Modifier::percent_add(0.5).with_priority(3);
    /// assert_eq!(m.description(), "+50.0% @3");
    /// ```
    pub fn description(&self) -> String {
        let mut desc = format!("{} @{}", self.op.describe(), self.priority);
        if !self.effect_tags.is_empty() {
            let tags: Vec<&str> = self.effect_tags.iter().map(|t| t.as_str()).collect();
            desc.push_str(&format!(" [{}]", tags.join(", ")));
        }
        desc
    }
}
