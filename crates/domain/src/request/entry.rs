//! Header and query parameter entries as edited in the request form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of an entry, unique within its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    /// Returns the raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single header or query parameter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueEntry {
    /// Row identifier.
    pub id: EntryId,
    /// Header name or parameter key. Never templated.
    pub key: String,
    /// Value; may contain `{{placeholders}}`.
    pub value: String,
    /// Disabled rows stay in the list but are not sent.
    pub enabled: bool,
}

impl KeyValueEntry {
    /// Returns true if this row takes part in the outbound request.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.trim().is_empty()
    }
}

/// Ordered list of entries; insertion order is submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryList {
    entries: Vec<KeyValueEntry>,
    next_id: u64,
}

impl EntryList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list of enabled entries from key/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut list = Self::new();
        for (key, value) in pairs {
            list.add_with(key, value);
        }
        list
    }

    /// Appends a blank, enabled entry and returns its id.
    pub fn add(&mut self) -> EntryId {
        self.add_with("", "")
    }

    /// Appends an enabled entry with the given key and value.
    pub fn add_with(&mut self, key: impl Into<String>, value: impl Into<String>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(KeyValueEntry {
            id,
            key: key.into(),
            value: value.into(),
            enabled: true,
        });
        id
    }

    /// Returns the entry with the given id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&KeyValueEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: EntryId) -> DomainResult<&mut KeyValueEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(DomainError::UnknownEntry(id))
    }

    /// Replaces the key of an entry.
    ///
    /// # Errors
    /// Returns `DomainError::UnknownEntry` if no entry has this id.
    pub fn set_key(&mut self, id: EntryId, key: impl Into<String>) -> DomainResult<()> {
        self.get_mut(id)?.key = key.into();
        Ok(())
    }

    /// Replaces the value of an entry.
    ///
    /// # Errors
    /// Returns `DomainError::UnknownEntry` if no entry has this id.
    pub fn set_value(&mut self, id: EntryId, value: impl Into<String>) -> DomainResult<()> {
        self.get_mut(id)?.value = value.into();
        Ok(())
    }

    /// Flips the enabled flag and returns the new state.
    ///
    /// # Errors
    /// Returns `DomainError::UnknownEntry` if no entry has this id.
    pub fn toggle(&mut self, id: EntryId) -> DomainResult<bool> {
        let entry = self.get_mut(id)?;
        entry.enabled = !entry.enabled;
        Ok(entry.enabled)
    }

    /// Removes an entry, returning it.
    ///
    /// # Errors
    /// Returns `DomainError::UnknownEntry` if no entry has this id.
    pub fn remove(&mut self, id: EntryId) -> DomainResult<KeyValueEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(DomainError::UnknownEntry(id))?;
        Ok(self.entries.remove(index))
    }

    /// Iterates over all entries, including disabled ones.
    pub fn iter(&self) -> impl Iterator<Item = &KeyValueEntry> {
        self.entries.iter()
    }

    /// Iterates over the entries that would be sent.
    pub fn active(&self) -> impl Iterator<Item = &KeyValueEntry> {
        self.entries.iter().filter(|e| e.is_active())
    }

    /// Number of entries that would be sent (badge count).
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a KeyValueEntry;
    type IntoIter = std::slice::Iter<'a, KeyValueEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ids_are_unique_even_after_removal() {
        let mut list = EntryList::new();
        let a = list.add();
        let b = list.add();
        list.remove(a).unwrap();
        let c = list.add();
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn disabled_entries_are_kept_but_inactive() {
        let mut list = EntryList::from_pairs([("foo", "bar"), ("baz", "qux")]);
        let first = list.iter().next().unwrap().id;
        assert!(!list.toggle(first).unwrap());

        assert_eq!(list.len(), 2);
        assert_eq!(list.active_count(), 1);
        assert_eq!(list.active().next().unwrap().key, "baz");
    }

    #[test]
    fn blank_keys_are_inactive() {
        let mut list = EntryList::new();
        let id = list.add();
        list.set_key(id, "   ").unwrap();
        list.set_value(id, "value").unwrap();
        assert_eq!(list.active_count(), 0);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut list = EntryList::new();
        let id = list.add();
        list.remove(id).unwrap();
        assert_eq!(list.set_key(id, "x"), Err(DomainError::UnknownEntry(id)));
        assert_eq!(list.toggle(id), Err(DomainError::UnknownEntry(id)));
    }

    #[test]
    fn preserves_insertion_order() {
        let list = EntryList::from_pairs([("b", "2"), ("a", "1"), ("c", "3")]);
        let keys: Vec<_> = list.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }
}
