//! # Probemap
//!
//! A hash map with string keys, open addressing and linear probing.
//!
//! Keys are hashed with the 64-bit FNV-1a function and entries live directly
//! in the slot array. A collision is resolved by scanning forward from the
//! hashed slot, wrapping past the end of the table, until an empty slot or a
//! matching key is found. The table doubles its capacity whenever an insert
//! would push the load factor above one half, and re-homes every entry by
//! re-hashing it against the new capacity.
//!
//! There is deliberately no removal operation: lookups stop at the first
//! empty slot, which is only a reliable "absent" signal while entries are
//! never deleted.
//!
//! ## Basic Usage
//!
//! ```rust
//! use probemap::ProbingMap;
//!
//! // Create a new map with an explicit initial capacity
//! let mut map = ProbingMap::with_capacity(16)?;
//!
//! // Insert values
//! map.set("apple".to_string(), 1)?;
//! map.set("banana".to_string(), 2)?;
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//! assert_eq!(map.get("cherry"), None);
//!
//! // Update values; the previous value is handed back
//! let previous = map.set("apple".to_string(), 10)?;
//! assert_eq!(previous, Some(1));
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! assert_eq!(map.len(), 2);
//! # Ok::<(), probemap::MapError>(())
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use probemap::ProbingMap;
//!
//! let mut map = ProbingMap::with_capacity(4)?;
//! map.set("foo".to_string(), 2)?;
//! map.set("bar".to_string(), 1)?;
//!
//! // The growth check runs before the probe, so this update call doubles
//! // the table: two items already fill half of the four slots.
//! map.set("bar".to_string(), 3)?;
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.capacity(), 8);
//! # Ok::<(), probemap::MapError>(())
//! ```
//!
//! The map is not thread-safe; concurrent mutation must be serialized by the
//! caller.

/// Module implementing the error types reported by map operations
mod error;
/// Module implementing the open-addressing map with linear probing
mod probing_map;
/// Utility functions and traits for the map
mod utils;

pub use error::MapError;
pub use probing_map::{Iter, ProbingMap, fnv1a};
pub use utils::MapExtensions;
