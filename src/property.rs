//! The modifiable property container.
//!
//! A [`StatProperty`] owns a base value, a bag of modifier applications,
//! and a cached computed value. Reads recompute lazily; mutations
//! recompute eagerly so they can report whether the observable value
//! actually changed (the change notification; adding and removing a
//! net-zero modifier reports `false` both times).
//!
//! All operations run to completion on the caller's thread. Structural
//! mutation during a resolution pass is impossible by construction: every
//! mutating method takes `&mut self`, so the borrow checker rejects
//! reentrant mutation at compile time.

use crate::breakdown::Breakdown;
use crate::ids::{ModifierHandle, ModifierId, OwnerId, PropertyId};
use crate::modifier::Modifier;
use crate::numeric::StatValue;
use crate::resolve::resolve_entries;
use crate::strategy::CalcStrategy;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// One modifier application inside a property.
///
/// Wraps the modifier with the identity of whoever applied it, the unique
/// id handles refer to, and the insertion sequence used for deterministic
/// tie-breaking.
pub(crate) struct ModifierEntry<T> {
    pub(crate) id: ModifierId,
    pub(crate) owner: OwnerId,
    pub(crate) seq: u64,
    pub(crate) modifier: Modifier<T>,
}

/// A stat value with a dynamic set of modifiers and a cached result.
///
/// The computed value is a pure function of `(base, entries, strategy)`;
/// the cache only short-circuits recomputation, never changes the result.
/// The strategy is injected at construction and fixed for the property's
/// lifetime; share one instance across every property of the same stat.
///
/// # Examples
///
/// ```rust
/// use statmod::{Modifier, NumericPipeline, OwnerId, StatProperty};
/// use std::sync::Arc;
///
/// let mut speed = StatProperty::new(100.0, Arc::new(NumericPipeline));
/// let boots = OwnerId::new();
///
/// let (handle, changed) = speed.add_modifier(Modifier::base_add(10.0), boots);
/// assert!(changed);
/// assert_eq!(*speed.value(), 110.0);
///
/// speed.remove_modifier(handle);
/// assert_eq!(*speed.value(), 100.0);
/// ```
pub struct StatProperty<T> {
    id: PropertyId,
    base: T,
    entries: HashMap<ModifierId, ModifierEntry<T>>,
    next_seq: u64,
    cached: T,
    dirty: bool,
    strategy: Arc<dyn CalcStrategy<T>>,
}

impl<T: StatValue> StatProperty<T> {
    /// Create a property with an initial base value and a calculation
    /// strategy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statmod::{NumericPipeline, OverrideStrategy, StatProperty};
    /// use std::sync::Arc;
    ///
    /// let mut armor = StatProperty::new(25.0, Arc::new(NumericPipeline));
    /// assert_eq!(*armor.value(), 25.0);
    ///
    /// // Discrete stats take the override strategy.
    /// let mut stance = StatProperty::new(0i32, Arc::new(OverrideStrategy));
    /// assert_eq!(*stance.value(), 0);
    /// ```
    pub fn new(base: T, strategy: Arc<dyn CalcStrategy<T>>) -> Self {
        let cached = strategy.calculate(&base, &[]);
        Self {
            id: PropertyId::new(),
            base,
            entries: HashMap::new(),
            next_seq: 0,
            cached,
            dirty: false,
            strategy,
        }
    }

    /// This property's unique id.
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// The base value, before any modifiers.
    pub fn base_value(&self) -> &T {
        &self.base
    }

    /// Number of modifier applications currently held.
    pub fn modifier_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether no modifiers are applied.
    pub fn is_unmodified(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a modifier application on behalf of `owner`.
    ///
    /// Always succeeds; the modifier is copied into the property, so the
    /// returned handle stays valid however the caller's copy is dropped.
    /// Returns the removal handle plus whether the observable value
    /// changed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statmod::{Modifier, NumericPipeline, OwnerId, StatProperty};
    /// use std::sync::Arc;
    ///
    /// let mut damage = StatProperty::new(50.0, Arc::new(NumericPipeline));
    /// let rage = OwnerId::new();
    ///
    /// let (_, changed) = damage.add_modifier(Modifier::percent_add(0.2), rage);
    /// assert!(changed);
    ///
    /// // A net-zero modifier produces no notification.
    /// let (_, changed) = damage.add_modifier(Modifier::base_add(0.0), rage);
    /// assert!(!changed);
    /// ```
    pub fn add_modifier(&mut self, modifier: Modifier<T>, owner: OwnerId) -> (ModifierHandle, bool) {
        let id = ModifierId::new();
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(
            property = %self.id,
            modifier = %modifier.description(),
            %owner,
            "modifier added"
        );
        self.entries.insert(
            id,
            ModifierEntry {
                id,
                owner,
                seq,
                modifier,
            },
        );
        self.dirty = true;
        let changed = self.recompute();
        (ModifierHandle::new(self.id, id), changed)
    }

    /// Remove the one application the handle refers to.
    ///
    /// Removing twice, removing after a bulk clear, or presenting a handle
    /// from a different property is a no-op returning `false`: expiry
    /// races are expected, not errors.
    pub fn remove_modifier(&mut self, handle: ModifierHandle) -> bool {
        if handle.property() != self.id {
            return false;
        }
        match self.entries.remove(&handle.id()) {
            Some(entry) => {
                trace!(
                    property = %self.id,
                    modifier = %entry.modifier.description(),
                    "modifier removed"
                );
                self.dirty = true;
                self.recompute()
            }
            None => false,
        }
    }

    /// Remove every application the given owner made.
    ///
    /// Returns whether the observable value changed. Removing from an
    /// owner with no applications is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statmod::{Modifier, NumericPipeline, OwnerId, StatProperty};
    /// use std::sync::Arc;
    ///
    /// let mut speed = StatProperty::new(100.0, Arc::new(NumericPipeline));
    /// let poison = OwnerId::new();
    ///
    /// speed.add_modifier(Modifier::percent_add(-0.2), poison);
    /// speed.add_modifier(Modifier::base_add(-10.0), poison);
    /// assert_eq!(*speed.value(), 72.0);
    ///
    /// speed.remove_all_from(poison);
    /// assert_eq!(*speed.value(), 100.0);
    /// ```
    pub fn remove_all_from(&mut self, owner: OwnerId) -> bool {
        let removed: Vec<ModifierId> = self
            .entries
            .values()
            .filter(|entry| entry.owner == owner)
            .map(|entry| entry.id)
            .collect();
        if removed.is_empty() {
            return false;
        }
        for id in &removed {
            self.entries.remove(id);
        }
        trace!(property = %self.id, %owner, removed = removed.len(), "modifiers removed by owner");
        self.dirty = true;
        self.recompute()
    }

    /// Replace the base value. Returns whether the observable value
    /// changed.
    pub fn set_base_value(&mut self, base: T) -> bool {
        self.base = base;
        self.dirty = true;
        self.recompute()
    }

    /// The current computed value, recomputing only if dirty.
    pub fn value(&mut self) -> &T {
        if self.dirty {
            self.recompute();
        }
        &self.cached
    }

    /// Force the next read to recompute.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// A debugging view of the last computation: the final value plus
    /// which modifiers applied, which were cancelled, and which were
    /// context-gated out.
    pub fn breakdown(&mut self) -> Breakdown<T> {
        if self.dirty {
            self.recompute();
        }
        let resolution = resolve_entries(self.entries.values());
        let describe = |entries: &[&ModifierEntry<T>]| -> Vec<String> {
            entries.iter().map(|e| e.modifier.description()).collect()
        };
        Breakdown {
            value: self.cached.clone(),
            base: self.base.clone(),
            applied: describe(&resolution.eligible),
            cancelled: describe(&resolution.cancelled),
            inactive: describe(&resolution.inactive),
        }
    }

    /// Re-run resolution and the strategy, refresh the cache, and report
    /// whether the observable value changed.
    fn recompute(&mut self) -> bool {
        let next = {
            let resolution = resolve_entries(self.entries.values());
            let modifiers: Vec<&Modifier<T>> = resolution
                .eligible
                .iter()
                .map(|entry| &entry.modifier)
                .collect();
            self.strategy.calculate(&self.base, &modifiers)
        };
        let changed = !next.value_eq(&self.cached);
        if changed {
            debug!(
                property = %self.id,
                old = ?self.cached,
                new = ?next,
                "computed value changed"
            );
        }
        self.cached = next;
        self.dirty = false;
        changed
    }
}

impl<T: StatValue> std::fmt::Debug for StatProperty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatProperty")
            .field("id", &self.id)
            .field("base", &self.base)
            .field("modifiers", &self.entries.len())
            .field("cached", &self.cached)
            .field("dirty", &self.dirty)
            .finish()
    }
}
