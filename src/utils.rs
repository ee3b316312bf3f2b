//! Convenience helpers layered on the table types.

use crate::byte_table::{ByteTable, InsertError};
use crate::fold_dict::FoldDict;

/// Snapshot accessors shared by the table types.
pub trait TableExtensions {
    /// Collects the live keys in slot order.
    fn keys(&self) -> Vec<u64>;

    /// Collects owned copies of the live values in slot order, `None` for
    /// marker entries.
    fn values(&self) -> Vec<Option<Vec<u8>>>;
}

impl TableExtensions for ByteTable {
    fn keys(&self) -> Vec<u64> {
        self.iter().map(|(key, _)| key).collect()
    }

    fn values(&self) -> Vec<Option<Vec<u8>>> {
        self.iter().map(|(_, value)| value.map(<[u8]>::to_vec)).collect()
    }
}

impl TableExtensions for FoldDict {
    fn keys(&self) -> Vec<u64> {
        self.table().keys()
    }

    fn values(&self) -> Vec<Option<Vec<u8>>> {
        self.table().values()
    }
}

/// Builds a table from `(key, value)` pairs, inserting in order.
///
/// # Errors
///
/// Returns [`InsertError::EmptyValue`] on the first zero-length value,
/// discarding the partially filled table.
#[allow(dead_code)]
pub fn table_from_pairs<I: IntoIterator<Item = (u64, Vec<u8>)>>(
    pairs: I,
) -> Result<ByteTable, InsertError> {
    let mut table = ByteTable::new();
    for (key, value) in pairs {
        table.insert(key, Some(&value))?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let pairs = vec![(1_u64, b"one".to_vec()), (2, b"two".to_vec()), (3, b"three".to_vec())];
        let table = table_from_pairs(pairs).unwrap_or_default();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(2, None), Some(b"two".as_slice()));
    }

    #[test]
    fn test_from_pairs_rejects_empty_value() {
        let pairs = vec![(1_u64, b"one".to_vec()), (2, Vec::new())];
        assert!(matches!(table_from_pairs(pairs), Err(InsertError::EmptyValue)));
    }

    #[test]
    fn test_keys_and_values() {
        let mut table = ByteTable::new();
        assert!(table.insert(10, Some(b"ten")).is_ok());
        assert!(table.insert(20, None).is_ok());

        let keys = table.keys();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&10));
        assert!(keys.contains(&20));

        let values = table.values();
        assert_eq!(values.len(), 2);
        assert!(values.contains(&Some(b"ten".to_vec())));
        assert!(values.contains(&None));
    }

    #[test]
    fn test_dict_extensions() {
        let mut dict = FoldDict::new();
        assert!(dict.insert("a", Some(b"alpha")).is_ok());
        assert!(dict.insert("b", Some(b"beta")).is_ok());

        let mut keys = dict.keys();
        keys.sort_unstable();
        assert_eq!(keys, vec![97, 98]);
        assert_eq!(dict.values().len(), 2);
    }
}
