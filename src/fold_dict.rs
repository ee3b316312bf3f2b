use crate::byte_table::{ByteTable, InsertError};

/// Folds the trailing bytes of `key` into the integer key domain.
///
/// Each byte is shifted into the low end of the accumulator, so only the
/// trailing `size_of::<u64>()` bytes survive and the most recent byte lands
/// in the low-order bits. The fold is lossy by design: inputs sharing their
/// trailing eight bytes produce the same key.
#[must_use]
pub fn fold_bytes(key: &[u8]) -> u64 {
    key.iter().fold(0_u64, |folded, &byte| folded.wrapping_shl(8) | u64::from(byte))
}

/// Folds a string's UTF-8 bytes into the integer key domain.
///
/// `fold_key("a")` is 97, the ordinal of `'a'`; see [`fold_bytes`] for the
/// trailing-window rule.
#[must_use]
pub fn fold_key(key: &str) -> u64 {
    fold_bytes(key.as_bytes())
}

/// A string-keyed dictionary over the integer-keyed [`ByteTable`].
///
/// Every operation folds its key with [`fold_key`] and forwards to the
/// table, so two strings sharing their trailing eight bytes address the same
/// entry and the later insert overwrites the earlier value. The adapter
/// never re-checks string equality; it disambiguates folded keys only.
#[derive(Debug, Clone)]
pub struct FoldDict {
    /// The integer-keyed engine folded keys are forwarded to.
    table: ByteTable,
}

impl Default for FoldDict {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ByteTable> for FoldDict {
    /// Wraps a pre-configured engine, keeping its probe strategy, capacity
    /// and entries.
    fn from(table: ByteTable) -> Self {
        Self { table }
    }
}

impl FoldDict {
    /// Creates an empty dictionary that allocates on first insert.
    #[must_use]
    pub fn new() -> Self {
        Self { table: ByteTable::new() }
    }

    /// Creates an empty dictionary with at least `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { table: ByteTable::with_capacity(capacity) }
    }

    /// Inserts a copy of `value` under the folded `key` and returns the slot
    /// index used.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::EmptyValue`] when `value` is present but
    /// zero-length, leaving the dictionary untouched.
    pub fn insert(&mut self, key: &str, value: Option<&[u8]>) -> Result<usize, InsertError> {
        self.table.insert(fold_key(key), value)
    }

    /// Returns the slot index holding the folded `key`, if present.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<usize> {
        self.table.find(fold_key(key))
    }

    /// Returns `true` if the folded `key` is live in the dictionary.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.table.contains_key(fold_key(key))
    }

    /// Removes the folded `key` and returns the slot index it occupied.
    pub fn remove(&mut self, key: &str) -> Option<usize> {
        self.table.remove(fold_key(key))
    }

    /// Returns a borrowed view of the bytes stored under the folded `key`,
    /// or `default` when it is absent.
    #[must_use]
    pub fn get<'a>(&'a self, key: &str, default: Option<&'a [u8]>) -> Option<&'a [u8]> {
        self.table.get(fold_key(key), default)
    }

    /// Returns an owned copy of the bytes stored under the folded `key`, or
    /// `default` when it is absent or holds a marker entry.
    #[must_use]
    pub fn get_copy(&self, key: &str, default: Option<Vec<u8>>) -> Option<Vec<u8>> {
        self.table.get_copy(fold_key(key), default)
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the dictionary holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Drops every stored value, keeping the allocation.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns the integer-keyed engine, e.g. to mix folded and raw keys on
    /// one table.
    #[must_use]
    pub fn table(&self) -> &ByteTable {
        &self.table
    }

    /// Returns the integer-keyed engine mutably.
    pub fn table_mut(&mut self) -> &mut ByteTable {
        &mut self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProbeStrategy;

    #[test]
    fn test_fold_single_byte() {
        assert_eq!(fold_key("a"), u64::from(b'a'));
        assert_eq!(fold_key("a"), 97);
    }

    #[test]
    fn test_fold_values() {
        assert_eq!(fold_bytes(b""), 0);
        assert_eq!(fold_bytes(b"\x01\x02"), 0x0102);
        assert_eq!(fold_bytes(b"casa"), 0x6361_7361);
        assert_eq!(fold_key("casa"), fold_bytes(b"casa"));
    }

    #[test]
    fn test_fold_keeps_trailing_window() {
        // Only the trailing eight bytes matter.
        assert_eq!(fold_key("0123456789"), fold_key("xx23456789"));
        // A proper suffix shorter than the window folds differently.
        assert_ne!(fold_key("casa"), fold_key("asa"));
    }

    #[test]
    fn test_fold_is_byte_based() {
        // Two UTF-8 bytes, 0xC3 0xB1.
        assert_eq!(fold_key("ñ"), 0xC3B1);
    }

    #[test]
    fn test_dict_roundtrip() {
        let mut dict = FoldDict::new();
        let index = dict.insert("casa", None);
        assert!(index.is_ok());
        assert_eq!(dict.len(), 1);
        assert!(dict.contains_key("casa"));
        assert!(!dict.contains_key("asa"));

        assert_eq!(dict.remove("casa"), index.ok());
        assert_eq!(dict.len(), 0);
        assert_eq!(dict.remove("casa"), None);
    }

    #[test]
    fn test_dict_update() {
        let mut dict = FoldDict::new();
        let first = dict.insert("clave", Some(b"uno"));
        let second = dict.insert("clave", Some(b"dos"));

        assert_eq!(first, second);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("clave", None), Some(b"dos".as_slice()));

        assert_eq!(dict.remove("clave"), second.ok());
        assert_eq!(dict.get("clave", Some(b"dflt")), Some(b"dflt".as_slice()));
    }

    #[test]
    fn test_suffix_collision_overwrites() {
        let mut dict = FoldDict::new();
        assert!(dict.insert("x_suffix!", Some(b"first")).is_ok());
        assert!(dict.insert("yy_suffix!", Some(b"second")).is_ok());

        // Both strings share their trailing eight bytes, so they address a
        // single entry.
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("x_suffix!", None), Some(b"second".as_slice()));
    }

    #[test]
    fn test_marker_and_copy_defaults() {
        let mut dict = FoldDict::new();
        assert!(dict.insert("marker", None).is_ok());

        assert_eq!(dict.get("marker", Some(b"dflt")), None);
        assert_eq!(dict.get_copy("marker", Some(b"dflt".to_vec())), Some(b"dflt".to_vec()));
        assert_eq!(dict.get_copy("absent", None), None);
    }

    #[test]
    fn test_table_access_mixes_key_domains() {
        let mut dict = FoldDict::new();
        assert!(dict.insert("casa", Some(b"house")).is_ok());

        let folded = fold_key("casa");
        assert_eq!(dict.table().get(folded, None), Some(b"house".as_slice()));

        assert!(dict.table_mut().insert(folded, Some(b"home")).is_ok());
        assert_eq!(dict.get("casa", None), Some(b"home".as_slice()));
    }

    #[test]
    fn test_from_table_keeps_strategy() {
        let table = ByteTable::with_capacity_and_strategy(8, ProbeStrategy::Linear);
        let dict = FoldDict::from(table);
        assert_eq!(dict.table().probe_strategy(), ProbeStrategy::Linear);
        assert_eq!(dict.table().capacity(), 8);
    }

    #[test]
    fn test_clear() {
        let mut dict = FoldDict::new();
        assert!(dict.insert("uno", Some(b"1")).is_ok());
        assert!(dict.insert("dos", Some(b"2")).is_ok());
        assert_eq!(dict.len(), 2);

        dict.clear();

        assert!(dict.is_empty());
        assert_eq!(dict.get("uno", None), None);
    }
}
