use alloc::boxed::Box;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use smallvec::SmallVec;

use crate::KeyNotFound;
use crate::balance::{Avl, Balance, Splay, Unbalanced, WeightBalanced};
use crate::raw::{Link, Node};

mod order_statistic;

pub use crate::Rank;

// Traversal stacks hold this many nodes inline and spill to the heap beyond it.
const STACK: usize = 32;

/// An ordered map based on a [binary search tree], rebalanced by the policy `B`.
///
/// Given a key type with a [total order], an ordered map stores its entries in key order.
/// That means that keys must be of a type that implements the [`Ord`] trait,
/// such that two keys can always be compared to determine their [`Ordering`].
///
/// The four policies share one node layout and one set of recursive algorithms and
/// differ only in what happens on the way back up from a recursive call:
///
/// - [`BstMap`] ([`Unbalanced`]) never rotates;
/// - [`AvlMap`] ([`Avl`]) keeps sibling heights within one of each other;
/// - [`WbtMap`] ([`WeightBalanced`]) keeps sibling sizes within a constant ratio;
/// - [`SplayMap`] ([`Splay`]) moves every key it touches to the root.
///
/// All of them implement the same contract, so code written against one can switch
/// to another by changing a type alias.
///
/// Iterators obtained from functions such as [`TreeMap::iter`], [`TreeMap::into_iter`],
/// [`TreeMap::values`], or [`TreeMap::keys`] produce their items in key order.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. The behavior
/// resulting from such a logic error is not specified, but will be encapsulated to the `TreeMap`
/// that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use baltree::{AvlMap, KeyNotFound};
///
/// // type inference lets us omit an explicit type signature (which
/// // would be `AvlMap<&str, &str>` in this example).
/// let mut movie_reviews = AvlMap::new();
///
/// // review some movies.
/// movie_reviews.put("Office Space",       "Deals with real issues in the workplace.");
/// movie_reviews.put("Pulp Fiction",       "Masterpiece.");
/// movie_reviews.put("The Godfather",      "Very enjoyable.");
/// movie_reviews.put("The Blues Brothers", "Eye lyked it a lot.");
///
/// // check for a specific one.
/// if !movie_reviews.contains_key("Les Miserables") {
///     println!("We've got {} reviews, but Les Miserables ain't one.",
///              movie_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove("The Blues Brothers")?;
///
/// // look up the values associated with some keys.
/// for movie in ["Up!", "Office Space"] {
///     match movie_reviews.get(movie) {
///        Ok(review) => println!("{movie}: {review}"),
///        Err(KeyNotFound) => println!("{movie} is unreviewed.")
///     }
/// }
///
/// // iterate over everything.
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// # Ok::<(), KeyNotFound>(())
/// ```
///
/// A map with a known list of items can be initialized from an array:
///
/// ```
/// use baltree::WbtMap;
///
/// let solar_distance = WbtMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.floor("Moon"), Some((&"Mercury", &0.4)));
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
pub struct TreeMap<K, V, B: Balance = Unbalanced> {
    root: Link<K, V, B>,
}

/// A map that never rebalances. See [`Unbalanced`].
pub type BstMap<K, V> = TreeMap<K, V, Unbalanced>;

/// A height-balanced map. See [`Avl`].
pub type AvlMap<K, V> = TreeMap<K, V, Avl>;

/// A weight-balanced map. See [`WeightBalanced`].
pub type WbtMap<K, V> = TreeMap<K, V, WeightBalanced>;

/// A self-adjusting map. See [`Splay`].
pub type SplayMap<K, V> = TreeMap<K, V, Splay>;

/// An iterator over the entries of a `TreeMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`TreeMap`]. See its
/// documentation for more.
///
/// [`iter`]: TreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, B: Balance = Unbalanced> {
    // Nodes whose left subtree has been visited but which have not been yielded.
    stack: SmallVec<[&'a Node<K, V, B>; STACK]>,
    remaining: usize,
}

/// An owning iterator over the entries of a `TreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`TreeMap`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V, B: Balance = Unbalanced> {
    // Detached nodes, each still owning its right subtree.
    stack: SmallVec<[Box<Node<K, V, B>>; STACK]>,
    remaining: usize,
}

/// An iterator over the keys of a `TreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`TreeMap`]. See its
/// documentation for more.
///
/// [`keys`]: TreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, B: Balance = Unbalanced> {
    inner: Iter<'a, K, V, B>,
}

/// An iterator over the values of a `TreeMap`.
///
/// This `struct` is created by the [`values`] method on [`TreeMap`]. See its
/// documentation for more.
///
/// [`values`]: TreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, B: Balance = Unbalanced> {
    inner: Iter<'a, K, V, B>,
}

/// An iterator over the keys of a `TreeMap` in pre-order: each node before its
/// left subtree, and the left subtree before the right one.
///
/// This `struct` is created by the [`preorder`] method on [`TreeMap`]. See its
/// documentation for more.
///
/// [`preorder`]: TreeMap::preorder
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Preorder<'a, K, V, B: Balance = Unbalanced> {
    stack: SmallVec<[&'a Node<K, V, B>; STACK]>,
    remaining: usize,
}

impl<K, V, B: Balance> TreeMap<K, V, B> {
    /// Makes a new, empty `TreeMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.put(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        TreeMap { root: None }
    }

    pub(crate) fn root(&self) -> Option<&Node<K, V, B>> {
        self.root.as_deref()
    }

    /// Clears the map, removing all elements.
    ///
    /// Nodes are released one at a time, so clearing (or dropping) a degenerate
    /// tree does not recurse.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.put(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        drop(IntoIter::new(self.root.take()));
    }

    /// Returns the number of elements in the map.
    ///
    /// This is the cached size of the root, so it is O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.put(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        Node::len_of(self.root())
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns a reference to the value corresponding to the key, without
    /// restructuring the tree under any policy.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.put(1, "a");
    /// map.put(2, "b");
    /// assert_eq!(map.lookup(&1), Some(&"a"));
    /// assert_eq!(map.lookup(&3), None);
    /// // A splay tree is left as it was.
    /// assert_eq!(map.root_key_value(), Some((&2, &"b")));
    /// ```
    pub fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.root()?.get(key).map(Node::value)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::WbtMap;
    ///
    /// let map = WbtMap::from([(1, "a")]);
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.lookup(key).is_some()
    }

    /// Returns the entry with the greatest key less than or equal to `key`, or
    /// `None` if every key in the map is greater than `key`.
    ///
    /// Never restructures the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::AvlMap;
    ///
    /// let map = AvlMap::from([(1, "a"), (3, "c"), (5, "e")]);
    /// assert_eq!(map.floor(&3), Some((&3, &"c")));
    /// assert_eq!(map.floor(&4), Some((&3, &"c")));
    /// assert_eq!(map.floor(&0), None);
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.root()?.floor(key).map(|node| (node.key(), node.value()))
    }

    /// Returns the entry stored at the root of the tree.
    ///
    /// For a [`SplayMap`] this is the entry most recently touched by
    /// [`get`](TreeMap::get) or [`put`](TreeMap::put).
    #[must_use]
    pub fn root_key_value(&self) -> Option<(&K, &V)> {
        self.root().map(|node| (node.key(), node.value()))
    }

    /// Returns the number of edges on the longest path from the root to a
    /// leaf, or `None` for an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.height(), None);
    /// map.put(2, ());
    /// assert_eq!(map.height(), Some(0));
    /// map.put(1, ());
    /// map.put(3, ());
    /// assert_eq!(map.height(), Some(1));
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        let mut stack: SmallVec<[(&Node<K, V, B>, usize); STACK]> = SmallVec::new();
        stack.push((self.root()?, 0));
        let mut height = 0;
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().into_iter().chain(node.right()).map(|child| (child, depth + 1)));
        }
        Some(height)
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// Each call starts a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(3, "c");
    /// map.put(2, "b");
    /// map.put(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, B> {
        Iter::new(self.root())
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::WbtMap;
    ///
    /// let map = WbtMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V, B> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::WbtMap;
    ///
    /// let map = WbtMap::from([(1, "hello"), (2, "goodbye")]);
    /// let values: Vec<&str> = map.values().copied().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V, B> {
        Values { inner: self.iter() }
    }

    /// Gets an iterator over the keys of the map in pre-order, which exposes
    /// the shape of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::BstMap;
    ///
    /// let map = BstMap::from([(2, ()), (1, ()), (3, ())]);
    /// let keys: Vec<_> = map.preorder().copied().collect();
    /// assert_eq!(keys, [2, 1, 3]);
    /// ```
    pub fn preorder(&self) -> Preorder<'_, K, V, B> {
        let mut stack = SmallVec::new();
        stack.extend(self.root());
        Preorder {
            stack,
            remaining: self.len(),
        }
    }
}

impl<K: Ord, V, B: Balance> TreeMap<K, V, B> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// Takes `&mut self` because a self-adjusting policy ([`SplayMap`]) moves
    /// the key to the root; the other policies leave the tree untouched. Use
    /// [`lookup`](TreeMap::lookup) for a read that never restructures.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if the key is absent. The tree is not modified.
    ///
    /// # Complexity
    ///
    /// O(log n) for [`AvlMap`] and [`WbtMap`], amortized O(log n) for
    /// [`SplayMap`], O(n) worst case for [`BstMap`].
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::{AvlMap, KeyNotFound};
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.get(&1), Ok(&"a"));
    /// assert_eq!(map.get(&2), Err(KeyNotFound));
    /// ```
    pub fn get<Q>(&mut self, key: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if !B::SELF_ADJUSTING {
            return self.lookup(key).ok_or(KeyNotFound);
        }
        let index = Node::access(&mut self.root, key)?;
        self.adjust_root(index);
        let root = self.root().ok_or(KeyNotFound)?;
        debug_assert!(key.cmp(root.key().borrow()).is_eq(), "accessed key was not moved to the root");
        Ok(root.value())
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned. The key is not updated, though; this matters for
    /// types that can be `==` without being identical.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// assert_eq!(map.put(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.put(37, "b");
    /// assert_eq!(map.put(37, "c"), Some("b"));
    /// assert_eq!(map.get(&37), Ok(&"c"));
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let placed = Node::put_into(self.root.take(), key, value);
        self.root = Some(B::on_root(placed.root, placed.index));
        placed.previous
    }

    /// Removes a key from the map, returning the value at the key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if the key is absent. The tree is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::{WbtMap, KeyNotFound};
    ///
    /// let mut map = WbtMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.remove(&1), Ok("a"));
    /// assert_eq!(map.remove(&1), Err(KeyNotFound));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if the key is absent. The tree is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.remove_entry(&1), Ok((1, "a")));
    /// assert!(map.remove_entry(&1).is_err());
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V), KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Node::remove(&mut self.root, key)
    }

    /// Lets the policy finish an access to the entry at in-order `index`.
    fn adjust_root(&mut self, index: usize) {
        if let Some(root) = self.root.take() {
            self.root = Some(B::on_root(root, index));
        }
    }
}

impl<K, V, B: Balance> Drop for TreeMap<K, V, B> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Clone, V: Clone, B: Balance> Clone for TreeMap<K, V, B> {
    fn clone(&self) -> Self {
        TreeMap {
            root: self.root.clone(),
        }
    }
}

impl<K: Hash, V: Hash, B: Balance> Hash for TreeMap<K, V, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, B: Balance> PartialEq for TreeMap<K, V, B> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, B: Balance> Eq for TreeMap<K, V, B> {}

impl<K: PartialOrd, V: PartialOrd, B: Balance> PartialOrd for TreeMap<K, V, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, B: Balance> Ord for TreeMap<K, V, B> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance> fmt::Debug for TreeMap<K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Formats the map as `{key : value, ...}` in key order.
///
/// # Examples
///
/// ```
/// use baltree::AvlMap;
///
/// let map = AvlMap::from([(2, "b"), (1, "a")]);
/// assert_eq!(map.to_string(), "{1 : a, 2 : b}");
/// ```
impl<K: fmt::Display, V: fmt::Display, B: Balance> fmt::Display for TreeMap<K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key} : {value}")?;
        }
        f.write_str("}")
    }
}

impl<K, V, B: Balance> Default for TreeMap<K, V, B> {
    fn default() -> Self {
        TreeMap::new()
    }
}

impl<K: Ord, V, B: Balance> FromIterator<(K, V)> for TreeMap<K, V, B> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = TreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, B: Balance> Extend<(K, V)> for TreeMap<K, V, B> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy, B: Balance> Extend<(&'a K, &'a V)> for TreeMap<K, V, B> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.put(k, v);
        }
    }
}

impl<'a, K, V, B: Balance> IntoIterator for &'a TreeMap<K, V, B> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, B>;

    fn into_iter(self) -> Iter<'a, K, V, B> {
        self.iter()
    }
}

impl<K, V, B: Balance> IntoIterator for TreeMap<K, V, B> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, B>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use baltree::SplayMap;
    ///
    /// let map = SplayMap::from([(2, "b"), (1, "a")]);
    /// let entries: Vec<_> = map.into_iter().collect();
    /// assert_eq!(entries, [(1, "a"), (2, "b")]);
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V, B> {
        IntoIter::new(self.root.take())
    }
}

/// Looks up a value without restructuring the tree.
///
/// # Panics
///
/// Panics if the key is not present in the map.
impl<K, Q, V, B> Index<&Q> for TreeMap<K, V, B>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
    B: Balance,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.lookup(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, B: Balance, const N: usize> From<[(K, V); N]> for TreeMap<K, V, B> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, B: Balance> Iter<'a, K, V, B> {
    fn new(root: Option<&'a Node<K, V, B>>) -> Self {
        let mut iter = Iter {
            stack: SmallVec::new(),
            remaining: Node::len_of(root),
        };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut node: Option<&'a Node<K, V, B>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, K, V, B: Balance> Iterator for Iter<'a, K, V, B> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend(node.right());
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, B: Balance> ExactSizeIterator for Iter<'_, K, V, B> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, B: Balance> FusedIterator for Iter<'_, K, V, B> {}

impl<K, V, B: Balance> Clone for Iter<'_, K, V, B> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance> fmt::Debug for Iter<'_, K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V, B: Balance> Default for Iter<'_, K, V, B> {
    /// Creates an empty `Iter`.
    ///
    /// ```
    /// use baltree::tree_map;
    ///
    /// let iter: tree_map::Iter<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter::new(None)
    }
}

impl<K, V, B: Balance> IntoIter<K, V, B> {
    fn new(root: Link<K, V, B>) -> Self {
        let mut iter = IntoIter {
            remaining: Node::len_of(root.as_deref()),
            stack: SmallVec::new(),
        };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut link: Link<K, V, B>) {
        while let Some(mut node) = link {
            link = node.take_left();
            self.stack.push(node);
        }
    }
}

impl<K, V, B: Balance> Iterator for IntoIter<K, V, B> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let mut node = self.stack.pop()?;
        self.descend(node.take_right());
        self.remaining -= 1;
        Some(node.into_entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, B: Balance> ExactSizeIterator for IntoIter<K, V, B> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, B: Balance> FusedIterator for IntoIter<K, V, B> {}

impl<K, V, B: Balance> Drop for IntoIter<K, V, B> {
    fn drop(&mut self) {
        // Detach every node before it is freed so no drop recurses down a subtree.
        for _ in &mut *self {}
    }
}

impl<K, V, B: Balance> fmt::Debug for IntoIter<K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.remaining).finish()
    }
}

impl<K, V, B: Balance> Default for IntoIter<K, V, B> {
    fn default() -> Self {
        IntoIter::new(None)
    }
}

impl<'a, K, V, B: Balance> Iterator for Keys<'a, K, V, B> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, B: Balance> ExactSizeIterator for Keys<'_, K, V, B> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, B: Balance> FusedIterator for Keys<'_, K, V, B> {}

impl<K, V, B: Balance> Clone for Keys<'_, K, V, B> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V, B: Balance> fmt::Debug for Keys<'_, K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, B: Balance> Iterator for Values<'a, K, V, B> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, B: Balance> ExactSizeIterator for Values<'_, K, V, B> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V, B: Balance> FusedIterator for Values<'_, K, V, B> {}

impl<K, V, B: Balance> Clone for Values<'_, K, V, B> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug, B: Balance> fmt::Debug for Values<'_, K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, B: Balance> Iterator for Preorder<'a, K, V, B> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let node = self.stack.pop()?;
        // Right first so the left subtree is popped first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        self.remaining -= 1;
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, B: Balance> ExactSizeIterator for Preorder<'_, K, V, B> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V, B: Balance> FusedIterator for Preorder<'_, K, V, B> {}

impl<K, V, B: Balance> Clone for Preorder<'_, K, V, B> {
    fn clone(&self) -> Self {
        Preorder {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V, B: Balance> fmt::Debug for Preorder<'_, K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
