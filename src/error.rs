use thiserror::Error;

/// The error returned when a lookup or removal names a key that is not in the map.
///
/// A failed operation never restructures the tree, so the map is exactly as it
/// was before the call.
///
/// # Examples
///
/// ```
/// use baltree::{AvlMap, KeyNotFound};
///
/// let mut map: AvlMap<i32, &str> = AvlMap::new();
/// assert_eq!(map.get(&1), Err(KeyNotFound));
/// assert_eq!(map.remove(&1), Err(KeyNotFound));
/// ```
#[derive(Clone, Copy, Debug, Error, Eq, Hash, PartialEq)]
#[error("key not found")]
pub struct KeyNotFound;
