use core::borrow::Borrow;
use core::ops::Index;

use super::TreeMap;
use crate::Rank;
use crate::balance::Balance;

impl<K, V, B: Balance> TreeMap<K, V, B> {
    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    /// Never restructures the tree, even for a [`SplayMap`](crate::SplayMap).
    ///
    /// # Complexity
    ///
    /// Proportional to the depth of the tree: O(log n) for the balanced policies.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put("a", 10);
    /// map.put("c", 30);
    /// map.put("b", 20);
    ///
    /// let (key, value) = map.get_by_rank(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.root()?.select(rank).map(|node| (node.key(), node.value()))
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// # Complexity
    ///
    /// Proportional to the depth of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::WbtMap;
    ///
    /// let mut map = WbtMap::new();
    /// map.put(10, "a");
    /// map.put(20, "b");
    ///
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.root()?.rank_of(key)
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use baltree::{BstMap, Rank};
///
/// let map = BstMap::from([("b", 2), ("a", 1)]);
///
/// assert_eq!(map[Rank(0)], 1);
/// assert_eq!(map[Rank(1)], 2);
/// ```
impl<K, V, B: Balance> Index<Rank> for TreeMap<K, V, B> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
