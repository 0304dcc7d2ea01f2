//! # statmod - Deterministic, Tag-Aware Stat Modifier Engine
//!
//! A per-entity stat modifier engine for games that provides:
//! - **Deterministic** calculation (same modifiers → same output; ties break
//!   by insertion order)
//! - **Staged** numeric pipeline (flat adds, summed percent bonuses, ordered
//!   final multipliers)
//! - **Tag-based** conflict resolution (cancellation and context gating)
//! - **Cached** computed values with real change detection
//!
//! ## Core Concepts
//!
//! ### Value Pipeline
//!
//! Each property computes its value through a fixed pipeline:
//!
//! ```text
//! [base value] → [resolution: sort / cancel / gate] → [strategy] → [cached value]
//! ```
//!
//! 1. **Resolution** orders the modifier bag by priority and filters it by
//!    tags
//! 2. **Strategies** reduce the filtered list against the base value
//! 3. The result is cached until the next mutation
//!
//! ### Key Features
//!
//! - **Handles**: every insertion returns an opaque handle for precise
//!   removal; stale handles are no-ops, never errors
//! - **Owners**: bulk removal of everything one buff source applied
//! - **Change Detection**: mutations report whether the observable value
//!   actually changed (epsilon-tolerant for floats)
//! - **Definitions**: serializable modifier definitions compile into typed
//!   modifiers at the registry boundary
//!
//! ## Example
//!
//! ```rust
//! use statmod::*;
//! use std::sync::Arc;
//!
//! let mut speed = StatProperty::new(100.0, Arc::new(NumericPipeline));
//! let gear = OwnerId::new();
//!
//! // Flat and percent bonuses stack predictably.
//! speed.add_modifier(Modifier::base_add(10.0), gear);
//! speed.add_modifier(Modifier::percent_add(0.5), gear);
//! assert_eq!(*speed.value(), 165.0); // (100 + 10) * 1.5
//!
//! // A stun floors the result, whatever else is stacked.
//! let (stun, _) = speed.add_modifier(
//!     Modifier::final_multiply(0.0).with_priority(999).effect_tag("stun"),
//!     gear,
//! );
//! assert_eq!(*speed.value(), 0.0);
//!
//! // Removing it by handle restores the previous value.
//! speed.remove_modifier(stun);
//! assert_eq!(*speed.value(), 165.0);
//! ```
//!
//! ## Modules
//!
//! - [`tag`] - Tag and tag-set types
//! - [`ids`] - Identifier and handle types
//! - [`numeric`] - Value-type abstractions
//! - [`modifier`] - Modifier value objects
//! - [`strategy`] - Calculation strategies
//! - [`property`] - The modifiable property container
//! - [`breakdown`] - Computation breakdowns for debugging
//! - [`def`] - Declarative modifier definitions
//! - [`error`] - Error types

pub mod breakdown;
pub mod def;
pub mod error;
pub mod ids;
pub mod modifier;
pub mod numeric;
pub mod property;
mod resolve;
pub mod strategy;
pub mod tag;

// Re-export main types for convenience
pub use breakdown::Breakdown;
pub use error::StatError;
pub use ids::{ModifierHandle, ModifierId, OwnerId, PropertyId};
pub use modifier::{Modifier, ModifierOp};
pub use property::StatProperty;
pub use tag::{Tag, TagSet};

// Re-export strategies and value-type traits
pub use def::{DefOp, ModifierDef};
pub use numeric::{StatNumeric, StatValue};
pub use strategy::{BoundedPipeline, Bounds, CalcStrategy, NumericPipeline, OverrideStrategy};
