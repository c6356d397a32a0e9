//! Utility functions and traits for [`ProbingMap`]

use crate::error::MapError;
use crate::probing_map::{DEFAULT_CAPACITY, ProbingMap};

/// Extension trait for map implementations that provides additional utility
/// methods
pub trait MapExtensions<V> {
    /// Returns the keys of the map as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the map as a Vec
    fn values(&self) -> Vec<V>;

    /// Returns true if the map contains the given key
    fn contains_key(&self, key: &str) -> bool;
}

impl<V> MapExtensions<V> for ProbingMap<V>
where
    V: Clone,
{
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Creates a [`ProbingMap`] from an iterator of key-value pairs
///
/// # Errors
///
/// Returns the first error raised while building the map or inserting a
/// pair.
#[allow(dead_code)]
pub fn from_iter<V, I>(iter: I) -> Result<ProbingMap<V>, MapError>
where
    I: IntoIterator<Item = (String, V)>,
{
    let mut map = ProbingMap::with_capacity(DEFAULT_CAPACITY)?;

    for (key, value) in iter {
        map.set(key, value)?;
    }

    Ok(map)
}
