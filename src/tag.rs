//! Tag types for modifier classification.
//!
//! Tags are interned string labels attached to modifiers. A modifier carries
//! tags describing what it *is* (effect tags), which other modifiers it
//! suppresses (cancel tags), and which ambient conditions it contributes or
//! requires (context tags). Uses `Arc<str>` for memory efficiency and fast
//! comparison.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Interned string label used for modifier classification.
///
/// Uses `Arc<str>` so multiple `Tag` instances with the same content share
/// the underlying allocation.
///
/// # Examples
///
/// ```rust
/// use statmod::Tag;
///
/// let frozen = Tag::from_str("frozen");
///
/// // Can be created from string slices or owned strings
/// let frozen2: Tag = "frozen".into();
/// let frozen3: Tag = String::from("frozen").into();
///
/// assert_eq!(frozen, frozen2);
/// assert_eq!(frozen, frozen3);
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tag(Arc<str>);

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Tag::from(s))
    }
}

impl Tag {
    /// Create a new `Tag` from a string slice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statmod::Tag;
    ///
    /// let tag = Tag::from_str("slippery");
    /// assert_eq!(tag.as_str(), "slippery");
    /// ```
    pub fn from_str(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the string representation of this `Tag`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered set of tags.
///
/// Backed by a `BTreeSet` so iteration order is deterministic, which keeps
/// resolution output and breakdown listings stable across runs.
///
/// # Examples
///
/// ```rust
/// use statmod::TagSet;
///
/// let tags = TagSet::from(["frozen", "slippery"]);
/// assert!(tags.contains_str("frozen"));
/// assert_eq!(tags.len(), 2);
///
/// let other = TagSet::from(["slippery"]);
/// assert!(tags.intersects(&other));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<Tag>);

impl TagSet {
    /// Create a new empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: impl Into<Tag>) -> bool {
        self.0.insert(tag.into())
    }

    /// Check whether a tag is in the set.
    pub fn contains(&self, tag: &Tag) -> bool {
        self.0.contains(tag)
    }

    /// Check whether a tag with the given text is in the set.
    pub fn contains_str(&self, s: &str) -> bool {
        self.0.contains(&Tag::from_str(s))
    }

    /// Check whether this set shares at least one tag with `other`.
    ///
    /// Two empty sets do not intersect.
    pub fn intersects(&self, other: &TagSet) -> bool {
        // Walk the smaller set, probe the larger.
        let (small, large) = if self.0.len() <= other.0.len() {
            (&self.0, &other.0)
        } else {
            (&other.0, &self.0)
        };
        small.iter().any(|t| large.contains(t))
    }

    /// Add every tag from `other` into this set.
    pub fn union_with(&mut self, other: &TagSet) {
        for tag in &other.0 {
            self.0.insert(tag.clone());
        }
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tags in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> btree_set::Iter<'_, Tag> {
        self.0.iter()
    }
}

impl<const N: usize> From<[&str; N]> for TagSet {
    fn from(tags: [&str; N]) -> Self {
        tags.into_iter().collect()
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(Tag::from_str).collect())
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = btree_set::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
