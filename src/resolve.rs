//! Modifier conflict resolution.
//!
//! Turns the unordered bag of modifier entries into the ordered, filtered
//! list a calculation strategy consumes. Three passes:
//!
//! 1. **Order**: sort by priority descending; ties keep insertion order
//!    (every entry carries a monotonic insertion sequence, so the order is
//!    fully deterministic).
//! 2. **Cancellation**: union every entry's cancel tags into one set, then
//!    drop any entry whose effect tags intersect it. The cancel set is
//!    built from the *full* ordered list, so a modifier cancels its targets
//!    even if it is itself dropped by context gating afterwards.
//! 3. **Context gating**: union the context tags of the cancellation
//!    survivors into the active-condition set, then drop survivors whose
//!    required tags are disjoint from it. Contributions are collected
//!    before any gating, in a single batch: an entry that is itself gated
//!    out can still satisfy another entry's requirement. No fixed point is
//!    iterated.

use crate::property::ModifierEntry;
use crate::tag::TagSet;
use std::cmp::Reverse;

/// Outcome of one resolution pass over a property's entries.
///
/// `eligible` is the ordered list handed to the strategy; `cancelled` and
/// `inactive` record what was filtered out and why, for breakdowns.
pub(crate) struct Resolution<'a, T> {
    pub eligible: Vec<&'a ModifierEntry<T>>,
    pub cancelled: Vec<&'a ModifierEntry<T>>,
    pub inactive: Vec<&'a ModifierEntry<T>>,
}

/// Resolve a bag of entries into the ordered, filtered strategy input.
pub(crate) fn resolve_entries<'a, T>(
    entries: impl IntoIterator<Item = &'a ModifierEntry<T>>,
) -> Resolution<'a, T> {
    let mut ordered: Vec<&ModifierEntry<T>> = entries.into_iter().collect();
    ordered.sort_by_key(|e| (Reverse(e.modifier.priority()), e.seq));

    // Cancellation pass, computed over the full ordered list.
    let mut cancel_set = TagSet::new();
    for entry in &ordered {
        cancel_set.union_with(entry.modifier.cancels_effect_tags());
    }
    let (survivors, cancelled): (Vec<_>, Vec<_>) = ordered
        .into_iter()
        .partition(|e| !e.modifier.effect_tags().intersects(&cancel_set));

    // Context pass: active conditions come from cancellation survivors only.
    let mut active = TagSet::new();
    for entry in &survivors {
        active.union_with(entry.modifier.context_tags());
    }
    let (eligible, inactive): (Vec<_>, Vec<_>) = survivors.into_iter().partition(|e| {
        let required = e.modifier.required_context_tags();
        required.is_empty() || required.intersects(&active)
    });

    Resolution {
        eligible,
        cancelled,
        inactive,
    }
}
