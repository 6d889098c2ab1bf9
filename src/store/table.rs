//! Keyed table per entity kind and the `Stored` contract that binds a kind to its table.

use super::RecordStore;
use crate::domain::{Identified, RecordsError};
use std::collections::BTreeMap;
use std::fmt;

/// An entity kind with its own table in the Record Store.
pub trait Stored: Identified + Sized {
    type Key: Ord + Clone + fmt::Display;

    fn key(&self) -> Self::Key;

    /// Parse a caller-facing id. `None` means no entity can have that id.
    fn parse_key(id: &str) -> Option<Self::Key>;

    fn table(store: &RecordStore) -> &Table<Self>;

    fn table_mut(store: &mut RecordStore) -> &mut Table<Self>;

    /// Verify every parent exists. Runs before any mutation.
    fn check_links(&self, _store: &RecordStore) -> Result<(), RecordsError> {
        Ok(())
    }

    /// Append to parent indexes. Only called after `check_links` succeeded.
    fn link(&self, _store: &mut RecordStore) {}
}

pub struct Table<T: Stored> {
    rows: BTreeMap<T::Key, T>,
}

impl<T: Stored + fmt::Debug> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.rows.iter().map(|(key, row)| (key.to_string(), row)))
            .finish()
    }
}

impl<T: Stored> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Stored> Table<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        T::parse_key(id).and_then(|key| self.rows.get(&key))
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        let key = T::parse_key(id)?;
        self.rows.get_mut(&key)
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.rows.contains_key(key)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Rows in key order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub(super) fn len(&self) -> usize {
        self.rows.len()
    }

    /// Caller guarantees the key is vacant.
    pub(super) fn insert(&mut self, key: T::Key, row: T) -> &T {
        self.rows.entry(key).or_insert(row)
    }

    pub(super) fn remove(&mut self, id: &str) -> Option<T> {
        let key = T::parse_key(id)?;
        self.rows.remove(&key)
    }
}

/// String keys match after trimming; blank never matches.
pub(super) fn parse_text_key(id: &str) -> Option<String> {
    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}

/// Numeric keys match after trimming, in plain decimal only: no sign, no leading zeros.
pub(super) fn parse_number_key(id: &str) -> Option<u32> {
    let id = id.trim();
    let canonical = !id.is_empty()
        && id.bytes().all(|b| b.is_ascii_digit())
        && (id.len() == 1 || !id.starts_with('0'));
    if canonical { id.parse().ok() } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys() {
        assert_eq!(parse_number_key("42"), Some(42));
        assert_eq!(parse_number_key(" 7\t"), Some(7));
        assert_eq!(parse_number_key("0"), Some(0));
        assert_eq!(parse_number_key("007"), None);
        assert_eq!(parse_number_key("-1"), None);
        assert_eq!(parse_number_key("4294967296"), None);
    }

    #[test]
    fn test_text_keys() {
        assert_eq!(parse_text_key(" CS1101 ").as_deref(), Some("CS1101"));
        assert_eq!(parse_text_key(""), None);
    }
}
