use alloc::boxed::Box;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use tracing::trace;

use crate::KeyNotFound;
use crate::balance::Balance;

/// An owned, possibly empty subtree.
pub(crate) type Link<K, V, B> = Option<Box<Node<K, V, B>>>;

pub(crate) struct Node<K, V, B: Balance> {
    key: K,
    value: V,
    left: Link<K, V, B>,
    right: Link<K, V, B>,
    // The number of key/value pairs in the subtree rooted at this node.
    len: usize,
    // Policy metadata, always derived from the children by `update`.
    meta: B::Meta,
}

/// Result of [`Node::put`].
pub(crate) struct Placed<K, V, B: Balance> {
    /// The new root of the subtree the entry was placed into.
    pub(crate) root: Box<Node<K, V, B>>,
    /// In-order index of the placed entry within `root`.
    pub(crate) index: usize,
    /// The value that was overwritten, if the key was already present.
    pub(crate) previous: Option<V>,
}

impl<K, V, B: Balance> Node<K, V, B> {
    /// Creates a single-node subtree.
    pub(crate) fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            len: 1,
            meta: B::Meta::default(),
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns the number of entries in this subtree.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of entries in `node`, or zero for an absent subtree.
    #[inline]
    pub(crate) fn len_of(node: Option<&Self>) -> usize {
        node.map_or(0, Self::len)
    }

    /// Returns the number of entries in the left subtree, which is also the
    /// in-order index of this node within its own subtree.
    #[inline]
    pub(crate) fn left_len(&self) -> usize {
        Self::len_of(self.left())
    }

    #[inline]
    pub(crate) fn meta(&self) -> B::Meta {
        self.meta
    }

    #[inline]
    pub(crate) fn set_meta(&mut self, meta: B::Meta) {
        self.meta = meta;
    }

    /// Recomputes the cached size and policy metadata from the children.
    ///
    /// The children's cached values must already be current.
    pub(crate) fn update(&mut self) {
        self.len = 1 + Self::len_of(self.left()) + Self::len_of(self.right());
        B::refresh(self);
    }

    /// Detaches the left subtree.
    pub(crate) fn take_left(&mut self) -> Link<K, V, B> {
        self.left.take()
    }

    /// Detaches the right subtree.
    pub(crate) fn take_right(&mut self) -> Link<K, V, B> {
        self.right.take()
    }

    /// Replaces the left subtree with `f(left)`, if there is one.
    ///
    /// This node's own cached values are left stale; the caller refreshes them
    /// (every caller follows up with a rotation of this node).
    pub(crate) fn map_left(&mut self, f: impl FnOnce(Box<Self>) -> Box<Self>) {
        if let Some(left) = self.left.take() {
            self.left = Some(f(left));
        }
    }

    /// Replaces the right subtree with `f(right)`, if there is one.
    ///
    /// See [`Node::map_left`].
    pub(crate) fn map_right(&mut self, f: impl FnOnce(Box<Self>) -> Box<Self>) {
        if let Some(right) = self.right.take() {
            self.right = Some(f(right));
        }
    }

    /// Consumes a detached node, returning its entry.
    pub(crate) fn into_entry(self: Box<Self>) -> (K, V) {
        let Node { key, value, .. } = *self;
        (key, value)
    }

    /// Raises the right child into this node's position.
    ///
    /// ```text
    ///     a                b
    ///    / \              / \
    ///   x   b     =>     a   z
    ///      / \          / \
    ///     y   z        x   y
    /// ```
    ///
    /// Returns `self` unchanged if there is no right child.
    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut root) = self.right.take() else {
            return self;
        };
        trace!(policy = B::NAME, "rotate left");
        self.right = root.left.take();
        // The lowered node first: the raised node's values depend on it.
        self.update();
        root.left = Some(self);
        root.update();
        root
    }

    /// Raises the left child into this node's position.
    ///
    /// Mirror image of [`Node::rotate_left`]. Returns `self` unchanged if there
    /// is no left child.
    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut root) = self.left.take() else {
            return self;
        };
        trace!(policy = B::NAME, "rotate right");
        self.left = root.right.take();
        self.update();
        root.right = Some(self);
        root.update();
        root
    }

    fn max_mut(&mut self) -> &mut Self {
        match self.right {
            Some(ref mut right) => right.max_mut(),
            None => self,
        }
    }

    /// Exchanges this node's entry with the maximum entry of its left subtree.
    ///
    /// This breaks the ordering invariant until the caller removes the
    /// displaced key from the left subtree, which is where it now lives as the
    /// rightmost node.
    fn swap_with_left_max(&mut self) {
        if let Some(left) = self.left.as_deref_mut() {
            let max = left.max_mut();
            mem::swap(&mut self.key, &mut max.key);
            mem::swap(&mut self.value, &mut max.value);
        }
    }

    /// Returns the entry at in-order position `rank` within this subtree.
    pub(crate) fn select(&self, mut rank: usize) -> Option<&Self> {
        let mut current = self;
        loop {
            let left_len = current.left_len();
            match rank.cmp(&left_len) {
                Ordering::Less => current = current.left()?,
                Ordering::Equal => return Some(current),
                Ordering::Greater => {
                    rank -= left_len + 1;
                    current = current.right()?;
                }
            }
        }
    }
}

impl<K, V, B: Balance> Node<K, V, B> {
    /// Finds the node holding `key` in this subtree.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&Self>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match key.cmp(self.key.borrow()) {
            Ordering::Equal => Some(self),
            Ordering::Less => self.left()?.get(key),
            Ordering::Greater => self.right()?.get(key),
        }
    }

    /// Finds the node holding the greatest key less than or equal to `key`.
    ///
    /// `None` means every key in this subtree is greater than `key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<&Self>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match key.cmp(self.key.borrow()) {
            Ordering::Equal => Some(self),
            Ordering::Less => self.left()?.floor(key),
            Ordering::Greater => Some(self.right().and_then(|right| right.floor(key)).unwrap_or(self)),
        }
    }

    /// Returns the in-order position of `key` within this subtree.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self;
        let mut rank = 0;
        loop {
            match key.cmp(current.key.borrow()) {
                Ordering::Less => current = current.left()?,
                Ordering::Equal => return Some(rank + current.left_len()),
                Ordering::Greater => {
                    rank += current.left_len() + 1;
                    current = current.right()?;
                }
            }
        }
    }

    /// Inserts or overwrites `key` in the subtree `link`, creating the subtree
    /// if it is empty.
    pub(crate) fn put_into(link: Link<K, V, B>, key: K, value: V) -> Placed<K, V, B>
    where
        K: Ord,
    {
        match link {
            Some(node) => node.put(key, value),
            None => Placed {
                root: Box::new(Self::leaf(key, value)),
                index: 0,
                previous: None,
            },
        }
    }

    /// Inserts or overwrites `key` in this subtree.
    ///
    /// Consumes the subtree and returns its new root, which differs from
    /// `self` whenever the policy rotated on the way back up.
    pub(crate) fn put(mut self: Box<Self>, key: K, value: V) -> Placed<K, V, B>
    where
        K: Ord,
    {
        let (index, previous) = match key.cmp(&self.key) {
            Ordering::Equal => (self.left_len(), Some(mem::replace(&mut self.value, value))),
            Ordering::Less => {
                let placed = Self::put_into(self.left.take(), key, value);
                self.left = Some(placed.root);
                (placed.index, placed.previous)
            }
            Ordering::Greater => {
                let placed = Self::put_into(self.right.take(), key, value);
                self.right = Some(placed.root);
                (self.left_len() + 1 + placed.index, placed.previous)
            }
        };
        self.update();
        Placed {
            root: B::on_put(self, index),
            index,
            previous,
        }
    }

    /// Removes `key` from the subtree owned by `link`.
    ///
    /// The slot is only rewritten after the key was found, so a failed removal
    /// leaves the subtree exactly as it was.
    pub(crate) fn remove<Q>(link: &mut Link<K, V, B>, key: &Q) -> Result<(K, V), KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = link.as_deref_mut().ok_or(KeyNotFound)?;
        let removed = match key.cmp(node.key.borrow()) {
            Ordering::Less => Self::remove(&mut node.left, key)?,
            Ordering::Greater => Self::remove(&mut node.right, key)?,
            Ordering::Equal if node.left.is_some() && node.right.is_some() => {
                trace!(policy = B::NAME, "swapped with left maximum");
                node.swap_with_left_max();
                Self::remove(&mut node.left, key)?
            }
            Ordering::Equal => {
                // At most one child: it takes this node's place.
                let child = node.left.take().or_else(|| node.right.take());
                let detached = mem::replace(link, child);
                return detached.map(Node::into_entry).ok_or(KeyNotFound);
            }
        };
        if let Some(mut node) = link.take() {
            node.update();
            *link = Some(B::on_remove(node));
        }
        Ok(removed)
    }

    /// Looks up `key` in the subtree owned by `link`, letting the policy
    /// restructure the search path on the way back up.
    ///
    /// Returns the in-order index of `key` within the (new) subtree.
    pub(crate) fn access<Q>(link: &mut Link<K, V, B>, key: &Q) -> Result<usize, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = link.as_deref_mut().ok_or(KeyNotFound)?;
        let index = match key.cmp(node.key.borrow()) {
            Ordering::Equal => return Ok(node.left_len()),
            Ordering::Less => Self::access(&mut node.left, key)?,
            Ordering::Greater => Self::access(&mut node.right, key)? + node.left_len() + 1,
        };
        if let Some(node) = link.take() {
            *link = Some(B::on_access(node, index));
        }
        Ok(index)
    }
}

impl<K: Clone, V: Clone, B: Balance> Clone for Node<K, V, B> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            left: self.left.clone(),
            right: self.right.clone(),
            len: self.len,
            meta: self.meta,
        }
    }
}
