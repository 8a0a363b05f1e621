//! Rebalancing policies.
//!
//! Every [`TreeMap`](crate::TreeMap) shares one node type and one set of
//! recursive algorithms. The policy type parameter decides what happens when a
//! recursive call returns to a node:
//!
//! | Policy | Metadata | After `put`/`remove` | After `get` |
//! |---|---|---|---|
//! | [`Unbalanced`] | none | nothing | nothing |
//! | [`Avl`] | height | restore `\|h(l) - h(r)\| <= 1` | nothing |
//! | [`WeightBalanced`] | none (sizes only) | restore the [`DELTA`] weight ratio | nothing |
//! | [`Splay`] | none | splay the key towards the root | splay the key towards the root |
//!
//! Policies are zero-sized marker types; all dispatch is static.

use alloc::boxed::Box;
use core::fmt::Debug;

use crate::raw::Node;

mod avl;
mod splay;
mod unbalanced;
mod weight;

pub use avl::Avl;
pub use splay::Splay;
pub use unbalanced::Unbalanced;
pub use weight::{DELTA, WeightBalanced};

mod sealed {
    #[allow(unreachable_pub)]
    pub trait Sealed {}
}

/// A rebalancing policy for [`TreeMap`](crate::TreeMap).
///
/// This trait is sealed; the crate provides [`Unbalanced`], [`Avl`],
/// [`WeightBalanced`] and [`Splay`].
///
/// Hooks receive ownership of a subtree root whose children are already
/// finished and whose cached size is current, and return the root of the
/// (possibly rotated) subtree. `index` arguments are the in-order position of
/// the entry touched by the current operation within that subtree; rotations
/// never change it.
#[allow(private_interfaces)]
pub trait Balance: sealed::Sealed + Sized {
    /// Name reported in trace events.
    const NAME: &'static str;

    /// Whether [`TreeMap::get`](crate::TreeMap::get) restructures the tree.
    const SELF_ADJUSTING: bool = false;

    /// Per-node metadata. `Default` is the value for a single-node subtree.
    type Meta: Copy + Debug + Default;

    /// Recomputes `node`'s metadata from its children.
    fn refresh<K, V>(_node: &mut Node<K, V, Self>) {}

    /// Restores the policy's shape invariant at `node`.
    fn rebalance<K, V>(node: Box<Node<K, V, Self>>) -> Box<Node<K, V, Self>> {
        node
    }

    /// Called on each node of the insertion path, bottom-up.
    fn on_put<K, V>(node: Box<Node<K, V, Self>>, _index: usize) -> Box<Node<K, V, Self>> {
        Self::rebalance(node)
    }

    /// Called on each node of the removal path, bottom-up.
    fn on_remove<K, V>(node: Box<Node<K, V, Self>>) -> Box<Node<K, V, Self>> {
        Self::rebalance(node)
    }

    /// Called on each node of a successful lookup path, bottom-up, when
    /// [`Balance::SELF_ADJUSTING`] is set.
    fn on_access<K, V>(node: Box<Node<K, V, Self>>, _index: usize) -> Box<Node<K, V, Self>> {
        node
    }

    /// Called once on the tree root after a `put` or an adjusting `get`.
    fn on_root<K, V>(root: Box<Node<K, V, Self>>, _index: usize) -> Box<Node<K, V, Self>> {
        root
    }
}
