//! Identifier and handle types.
//!
//! Every modifier application, owner, and property is identified by a
//! UUID-backed newtype. Owners are plain comparable ids rather than object
//! references, so an owner may be destroyed before (or after) the modifiers
//! it applied without any lifetime entanglement.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Define a strongly-typed ID wrapper around a v4 UUID.
macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

define_id!(
    /// Unique identifier of one modifier application.
    ///
    /// Generated at insertion time, never reused within a property's
    /// lifetime. The only externally visible means of removing exactly one
    /// application (via [`ModifierHandle`]).
    ModifierId
);

define_id!(
    /// Opaque identity of whoever applied a modifier.
    ///
    /// Used for bulk removal of everything one source applied. Only
    /// compared for equality, never dereferenced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statmod::OwnerId;
    ///
    /// let poison_aura = OwnerId::new();
    /// let ice_trap = OwnerId::new();
    /// assert_ne!(poison_aura, ice_trap);
    /// ```
    OwnerId
);

define_id!(
    /// Unique identifier of one modifiable property.
    PropertyId
);

/// Opaque capability for removing exactly one modifier application.
///
/// Returned by [`StatProperty::add_modifier`](crate::StatProperty::add_modifier).
/// A handle is a two-part token: the owning property's id plus the entry's
/// unique id. It grants exactly one precise removal and nothing else.
///
/// Handles are `Copy` and safe to retain indefinitely: using a handle after
/// its entry was already removed, or against a property that never owned it,
/// is a no-op rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierHandle {
    property: PropertyId,
    id: ModifierId,
}

impl ModifierHandle {
    pub(crate) fn new(property: PropertyId, id: ModifierId) -> Self {
        Self { property, id }
    }

    pub(crate) fn property(&self) -> PropertyId {
        self.property
    }

    pub(crate) fn id(&self) -> ModifierId {
        self.id
    }
}
