//! # Byte Dict
//!
//! A Rust implementation of an open-addressing hash table for byte payloads.
//!
//! This crate provides two dictionary types:
//!
//! - [`ByteTable`]: the core table, keyed by `u64` and storing owned byte
//!   buffers, with configurable probing and tombstone-based deletion
//! - [`FoldDict`]: a string-keyed adapter that folds the trailing bytes of
//!   each key into the integer domain and forwards to a `ByteTable`
//!
//! Capacities are powers of two and the table grows by doubling once more
//! than 80 percent of its slots hold live entries.
//!
//! ## Basic Usage
//!
//! ```rust
//! use bytedict::ByteTable;
//!
//! // Create a new table
//! let mut table = ByteTable::new();
//!
//! // Insert values
//! table.insert(1, Some(b"apple")).unwrap();
//! table.insert(2, Some(b"banana")).unwrap();
//!
//! // Retrieve values
//! assert_eq!(table.get(1, None), Some(b"apple".as_slice()));
//!
//! // Update values
//! table.insert(1, Some(b"cherry")).unwrap();
//! assert_eq!(table.get(1, None), Some(b"cherry".as_slice()));
//!
//! // Remove values
//! table.remove(1);
//! assert_eq!(table.get(1, None), None);
//! ```
//!
//! ## String Keys
//!
//! ```rust
//! use bytedict::{fold_key, FoldDict};
//!
//! let mut dict = FoldDict::new();
//!
//! // Keys are folded byte by byte, so "a" lands on its ordinal
//! assert_eq!(fold_key("a"), 97);
//!
//! dict.insert("casa", Some(b"house")).unwrap();
//! assert_eq!(dict.get("casa", None), Some(b"house".as_slice()));
//!
//! // Lookups of absent keys fall back to the caller's default
//! assert_eq!(dict.get("gato", Some(b"dflt")), Some(b"dflt".as_slice()));
//! ```

/// Module implementing the integer-keyed open-addressing table
mod byte_table;
/// Module implementing the string-keyed folding adapter
mod fold_dict;
/// Module implementing the probe sequence strategies
mod probe;
/// Utility functions and traits for the table types
mod utils;

pub use byte_table::{ByteTable, InsertError, Iter};
pub use fold_dict::{fold_bytes, fold_key, FoldDict};
pub use probe::ProbeStrategy;
pub use utils::TableExtensions;
