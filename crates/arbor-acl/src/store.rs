//! Ordered entry storage for one access-control list.
//!
//! Entries live in a contiguous vector; an entry's position is its index.
//! Replacing at an index keeps the position, removing shifts later entries
//! down by one, and nothing else reorders except [`EntryStore::move_before`].

use crate::entry::{AccessControlEntry, EntryKey};

/// The ordered entries of one list.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<AccessControlEntry>,
}

impl EntryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the end.
    pub fn append(&mut self, entry: AccessControlEntry) {
        self.entries.push(entry);
    }

    /// Replaces the entry at `position`, or removes it when `entry` is `None`.
    ///
    /// Returns the previous entry, or `None` if `position` is out of range.
    pub fn replace_at(
        &mut self,
        position: usize,
        entry: Option<AccessControlEntry>,
    ) -> Option<AccessControlEntry> {
        if position >= self.entries.len() {
            return None;
        }
        match entry {
            Some(entry) => Some(std::mem::replace(&mut self.entries[position], entry)),
            None => Some(self.entries.remove(position)),
        }
    }

    /// Position of the entry structurally equal to `entry`.
    ///
    /// An entry handed out by this store is found by its id; the match is
    /// then confirmed structurally so a stale copy of a rewritten entry is
    /// not found. Other entries are located by content.
    pub fn index_of(&self, entry: &AccessControlEntry) -> Option<usize> {
        let by_id = self
            .entries
            .iter()
            .position(|e| e.id() == entry.id())
            .filter(|pos| self.entries[*pos] == *entry);
        by_id.or_else(|| self.entries.iter().position(|e| e == entry))
    }

    /// Position of the entry with the given key and polarity.
    pub fn find(&self, key: &EntryKey, allow: bool) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.is_allow() == allow && e.has_key(key))
    }

    /// Moves the entry at `src` to just before the entry currently at `dest`,
    /// or to the end when `dest` is `None`.
    ///
    /// Out-of-range indices leave the store unchanged.
    pub fn move_before(&mut self, src: usize, dest: Option<usize>) {
        let len = self.entries.len();
        if src >= len || dest.is_some_and(|d| d >= len) {
            return;
        }
        let entry = self.entries.remove(src);
        match dest {
            Some(d) => {
                let target = if d > src { d - 1 } else { d };
                self.entries.insert(target, entry);
            }
            None => self.entries.push(entry),
        }
    }

    /// Entry at `position`.
    pub fn get(&self, position: usize) -> Option<&AccessControlEntry> {
        self.entries.get(position)
    }

    /// All entries in order.
    pub fn as_slice(&self) -> &[AccessControlEntry] {
        &self.entries
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, AccessControlEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntryStore {
    type Item = &'a AccessControlEntry;
    type IntoIter = std::slice::Iter<'a, AccessControlEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
