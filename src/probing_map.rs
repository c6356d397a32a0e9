use std::mem;

use crate::error::MapError;

/// 64-bit FNV offset basis.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// 64-bit FNV prime.
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Initial capacity used by constructors that do not take one explicitly.
pub(crate) const DEFAULT_CAPACITY: usize = 16;

/// Computes the 64-bit FNV-1a hash of a key.
///
/// Each byte of the key is folded into the accumulator with XOR and the
/// result is multiplied by the FNV prime with wraparound arithmetic. The
/// same key always produces the same hash.
#[must_use]
pub fn fnv1a(key: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in key.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// A slot in the table: either vacant or holding a key-value pair.
///
/// The tagged state makes occupancy explicit, so any value of `V` may be
/// stored without a reserved sentinel.
#[derive(Debug, Clone)]
enum Slot<V> {
    /// No entry lives here.
    Empty,
    /// A live entry.
    Occupied {
        /// The key, owned by the map.
        key: String,
        /// The value associated with the key.
        value: V,
    },
}

/// A hash map with string keys, open addressing and linear probing.
///
/// All entries live directly in the slot array; a collision is resolved by
/// scanning forward (wrapping past the end) until an empty slot or a matching
/// key is found. Keys are hashed with FNV-1a. The table doubles its capacity
/// whenever an insert would push the load factor above one half, so probe
/// chains stay short and every probe loop terminates.
///
/// There is no removal operation. Lookups stop at the first empty slot, which
/// is only sound because entries are never deleted. Dropping the map releases
/// every stored key and value exactly once.
///
/// Note: this implementation is not thread-safe. Concurrent mutation must be
/// serialized by the caller.
#[derive(Debug, Clone)]
pub struct ProbingMap<V> {
    /// The slot array; its length is the table capacity.
    slots: Vec<Slot<V>>,
    /// Current number of occupied slots.
    items: usize,
}

impl<V> ProbingMap<V> {
    /// Creates a map with exactly `capacity` empty slots.
    ///
    /// The capacity is used as given; it is not rounded to a power of two or
    /// a prime.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidCapacity`] if `capacity` is zero, or
    /// [`MapError::AllocationFailed`] if the slot array cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, MapError> {
        if capacity == 0 {
            return Err(MapError::InvalidCapacity);
        }
        let slots = Self::allocate_slots(capacity)?;
        Ok(Self { slots, items: 0 })
    }

    /// Allocates a slot array of exactly `capacity` empty slots.
    fn allocate_slots(capacity: usize) -> Result<Vec<Slot<V>>, MapError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || Slot::Empty);
        Ok(slots)
    }

    /// Maps a key to its starting slot index for the current capacity.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn slot_index(&self, key: &str) -> usize {
        // A live map always has at least one slot, so the modulo is defined.
        (fnv1a(key) % self.slots.len() as u64) as usize
    }

    /// Inserts a key-value pair, or updates the value of an existing key.
    ///
    /// The table grows before the probe whenever the occupied count has
    /// reached half the capacity, so the load factor stays at or below one
    /// half after every successful call. On an update the previous value is
    /// handed back to the caller and the stored key is kept.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CapacityOverflow`] or
    /// [`MapError::AllocationFailed`] when the table needed to grow and could
    /// not; the map is left unchanged in that case.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn set(&mut self, key: String, value: V) -> Result<Option<V>, MapError> {
        if self.items >= self.slots.len() / 2 {
            self.grow()?;
        }
        let index = self.slot_index(&key);
        Ok(self.place(index, key, value))
    }

    /// Stores `key` and `value` by linear probing from `start_index`.
    ///
    /// Returns the previous value when the key was already present.
    fn place(&mut self, start_index: usize, key: String, value: V) -> Option<V> {
        let capacity = self.slots.len();
        let mut index = start_index;

        for _ in 0..capacity {
            match self.slots.get_mut(index) {
                Some(Slot::Occupied { key: existing, value: stored }) => {
                    if *existing == key {
                        return Some(mem::replace(stored, value));
                    }
                }
                Some(slot @ Slot::Empty) => {
                    *slot = Slot::Occupied { key, value };
                    self.items = self.items.saturating_add(1);
                    return None;
                }
                None => return None,
            }

            index = index.saturating_add(1);
            if index >= capacity {
                index = 0;
            }
        }

        // Unreachable while the load factor stays below one half; an empty
        // slot is always found first.
        None
    }

    /// Returns the slot index holding `key`, probing from its hash position.
    ///
    /// The probe stops at the first empty slot, which is a reliable "absent"
    /// signal because entries are never removed.
    fn probe_position(&self, key: &str) -> Option<usize> {
        let capacity = self.slots.len();
        let mut index = self.slot_index(key);

        for _ in 0..capacity {
            match self.slots.get(index)? {
                Slot::Empty => return None,
                Slot::Occupied { key: existing, .. } => {
                    if existing.as_str() == key {
                        return Some(index);
                    }
                }
            }

            index = index.saturating_add(1);
            if index >= capacity {
                index = 0;
            }
        }

        None
    }

    /// Retrieves the value stored for `key`, or `None` if it was never set.
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.probe_position(key)?;
        match self.slots.get(index) {
            Some(Slot::Occupied { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// Retrieves a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.probe_position(key)?;
        match self.slots.get_mut(index) {
            Some(Slot::Occupied { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// Returns the number of slots in the table.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current load factor of the table.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.items as f64 / self.slots.len() as f64
    }

    /// Returns an iterator over the key-value pairs, in slot order.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: &self.slots, index: 0 }
    }

    /// Doubles the capacity and re-homes every entry.
    ///
    /// Entries are re-hashed against the new capacity and re-inserted through
    /// the regular probing placement; carrying slots over at their old
    /// indices would break lookups. Any failure leaves the map untouched at
    /// its previous capacity.
    fn grow(&mut self) -> Result<(), MapError> {
        let new_capacity = self
            .slots
            .len()
            .checked_mul(2)
            .ok_or(MapError::CapacityOverflow)?;
        let new_slots = Self::allocate_slots(new_capacity)?;

        let old_slots = mem::replace(&mut self.slots, new_slots);
        self.items = 0;
        for slot in old_slots {
            if let Slot::Occupied { key, value } = slot {
                let index = self.slot_index(&key);
                self.place(index, key, value);
            }
        }

        Ok(())
    }
}

/// Iterator over the key-value pairs of a [`ProbingMap`].
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The slot array being scanned.
    slots: &'a [Slot<V>],
    /// Current position in the scan.
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied { key, value } = slot {
                return Some((key.as_str(), value));
            }
        }
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut map = ProbingMap::with_capacity(16).unwrap();
        assert_eq!(map.set("key1".to_string(), 1).unwrap(), None);
        assert_eq!(map.set("key2".to_string(), 2).unwrap(), None);
        assert_eq!(map.set("key3".to_string(), 3).unwrap(), None);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.get("key4"), None);
    }

    #[test]
    fn test_update_returns_previous_value() {
        let mut map = ProbingMap::with_capacity(16).unwrap();
        assert_eq!(map.set("key1".to_string(), 1).unwrap(), None);
        assert_eq!(map.set("key1".to_string(), 10).unwrap(), Some(1));
        assert_eq!(map.get("key1"), Some(&10));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_growth_on_update_call() {
        // The growth check runs before the probe, so the third call doubles
        // the table even though it only updates an existing key.
        let mut map = ProbingMap::with_capacity(4).unwrap();
        map.set("foo".to_string(), 2).unwrap();
        map.set("bar".to_string(), 1).unwrap();
        map.set("bar".to_string(), 3).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("bar"), Some(&3));
        assert_eq!(map.get("foo"), Some(&2));
        assert_eq!(map.capacity(), 8);
    }

    #[test]
    fn test_collisions_at_tiny_capacity() {
        // Every insert collides modulo such a small table; all entries must
        // still be reachable through their probe chains.
        let mut map = ProbingMap::with_capacity(1).unwrap();
        map.set("alpha".to_string(), 1).unwrap();
        map.set("beta".to_string(), 2).unwrap();
        map.set("gamma".to_string(), 3).unwrap();

        assert_eq!(map.get("alpha"), Some(&1));
        assert_eq!(map.get("beta"), Some(&2));
        assert_eq!(map.get("gamma"), Some(&3));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_resize_round_trip() {
        let mut map = ProbingMap::with_capacity(4).unwrap();
        for i in 0..40 {
            map.set(format!("key-{i}"), i).unwrap();
        }

        assert_eq!(map.len(), 40);
        for i in 0..40 {
            assert_eq!(map.get(&format!("key-{i}")), Some(&i));
        }
    }

    #[test]
    fn test_load_factor_invariant() {
        let mut map = ProbingMap::with_capacity(4).unwrap();
        for i in 0..100 {
            map.set(format!("key-{i}"), i).unwrap();
            assert!(map.len() <= map.capacity() / 2);
            assert!(map.load_factor() <= 0.5);
        }
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut map = ProbingMap::with_capacity(8).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);

        map.set("key1".to_string(), 1).unwrap();
        assert!(!map.is_empty());
        assert_eq!(map.len(), 1);

        map.set("key2".to_string(), 2).unwrap();
        assert_eq!(map.len(), 2);

        map.set("key2".to_string(), 3).unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = ProbingMap::<i32>::with_capacity(0);
        assert!(matches!(result, Err(MapError::InvalidCapacity)));
    }

    #[test]
    fn test_get_mut() {
        let mut map = ProbingMap::with_capacity(8).unwrap();
        map.set("key1".to_string(), 1).unwrap();

        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(map.get("key1"), Some(&11));
        assert_eq!(map.get_mut("missing"), None);
    }

    #[test]
    fn test_iter() {
        let mut map = ProbingMap::with_capacity(16).unwrap();
        map.set("key1".to_string(), 1).unwrap();
        map.set("key2".to_string(), 2).unwrap();
        map.set("key3".to_string(), 3).unwrap();

        let mut count = 0;
        let mut sum = 0;
        for (_, &value) in map.iter() {
            count += 1;
            sum += value;
        }

        assert_eq!(count, 3);
        assert_eq!(sum, 6);
    }

    #[test]
    fn test_fnv1a_reference_vectors() {
        assert_eq!(fnv1a(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a("a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv1a("foobar"), 0x8594_4171_f739_67e8);
    }

    proptest! {
        #[test]
        fn matches_std_hash_map(
            ops in proptest::collection::vec(("[a-e]{1,3}", any::<u32>()), 0..64),
        ) {
            let mut map = ProbingMap::with_capacity(2).unwrap();
            let mut model = HashMap::new();

            for (key, value) in ops {
                map.set(key.clone(), value).unwrap();
                model.insert(key, value);
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert!(map.len() <= map.capacity() / 2);
            for (key, value) in &model {
                prop_assert_eq!(map.get(key), Some(value));
            }
        }
    }
}
