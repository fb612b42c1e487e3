//! Privilege bit sets.
//!
//! A [`PrivilegeBits`] value is a fixed-capacity set over the dense privilege
//! id space handed out by a privilege registry. Ids are assigned externally;
//! this type only knows how to combine them.
//!
//! Bit sets are compared by content. Two sets built in different ways are
//! equal whenever they hold the same ids.
//!
//! # Example
//!
//! ```
//! use arbor_core::PrivilegeBits;
//!
//! let read = PrivilegeBits::from_id(0).unwrap();
//! let add_child = PrivilegeBits::from_id(2).unwrap();
//!
//! let both = read | add_child;
//! assert!(both.contains(read));
//! assert_eq!(both - read, add_child);
//! assert!((read - both).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Sub};

const WORDS: usize = 4;

/// Fixed-capacity set of privilege ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrivilegeBits {
    words: [u64; WORDS],
}

impl PrivilegeBits {
    /// Number of distinct privilege ids a set can hold.
    pub const CAPACITY: usize = WORDS * 64;

    /// The empty set.
    pub const EMPTY: Self = Self { words: [0; WORDS] };

    /// Returns the empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Returns a set holding the single id, or `None` if the id is out of range.
    #[must_use]
    pub fn from_id(id: usize) -> Option<Self> {
        if id >= Self::CAPACITY {
            return None;
        }
        let mut words = [0; WORDS];
        words[id / 64] = 1u64 << (id % 64);
        Some(Self { words })
    }

    /// Builds a set from several ids, or `None` if any id is out of range.
    #[must_use]
    pub fn from_ids<I: IntoIterator<Item = usize>>(ids: I) -> Option<Self> {
        ids.into_iter()
            .try_fold(Self::EMPTY, |acc, id| Self::from_id(id).map(|bit| acc | bit))
    }

    /// Bits in either set.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let mut words = self.words;
        for (w, o) in words.iter_mut().zip(other.words) {
            *w |= o;
        }
        Self { words }
    }

    /// Bits in `self` that are not in `other`.
    #[must_use]
    pub fn subtract(self, other: Self) -> Self {
        let mut words = self.words;
        for (w, o) in words.iter_mut().zip(other.words) {
            *w &= !o;
        }
        Self { words }
    }

    /// Bits in both sets.
    #[must_use]
    pub fn intersection(self, other: Self) -> Self {
        let mut words = self.words;
        for (w, o) in words.iter_mut().zip(other.words) {
            *w &= o;
        }
        Self { words }
    }

    /// Returns `true` if every bit of `other` is also set in `self`.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        other.subtract(self).is_empty()
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Number of ids in the set.
    #[must_use]
    pub fn len(self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if the id is in the set.
    #[must_use]
    pub fn has(self, id: usize) -> bool {
        id < Self::CAPACITY && self.words[id / 64] & (1u64 << (id % 64)) != 0
    }

    /// Iterates over the ids in ascending order.
    pub fn ids(self) -> impl Iterator<Item = usize> {
        (0..Self::CAPACITY).filter(move |id| self.has(*id))
    }
}

impl BitOr for PrivilegeBits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for PrivilegeBits {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl Sub for PrivilegeBits {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs)
    }
}

impl BitAnd for PrivilegeBits {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl fmt::Display for PrivilegeBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }
        let ids: Vec<String> = self.ids().map(|id| id.to_string()).collect();
        write!(f, "{{{}}}", ids.join(", "))
    }
}
