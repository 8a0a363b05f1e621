use alloc::boxed::Box;
use core::cmp::Ordering;

use tracing::trace;

use super::{Balance, sealed};
use crate::raw::Node;

/// Self-adjusting (splay) policy.
///
/// No balance metadata is stored. Every [`get`](crate::TreeMap::get) and
/// [`put`](crate::TreeMap::put) moves the touched key to the root with zig-zig
/// and zig-zag double rotations on the way up, finishing with a single zig at
/// the root when needed. A single operation can take linear time, but any
/// sequence of `m` operations on `n` keys costs `O((m + n) log n)`.
///
/// Read-only queries ([`lookup`](crate::TreeMap::lookup),
/// [`floor`](crate::TreeMap::floor), iteration) do not restructure the tree.
///
/// # Examples
///
/// ```
/// use baltree::SplayMap;
///
/// let mut map = SplayMap::new();
/// for key in [5, 3, 8, 1] {
///     map.put(key, key * 10);
/// }
/// assert_eq!(map.root_key_value(), Some((&1, &10)));
///
/// assert_eq!(map.get(&8), Ok(&80));
/// assert_eq!(map.root_key_value(), Some((&8, &80)));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Splay;

impl sealed::Sealed for Splay {}

/// Raises the entry at in-order `index` by two levels if it sits two levels
/// below `node`.
///
/// Callers guarantee the entry is at most two levels down: every level below
/// has already been splayed.
fn splay_step<K, V>(mut node: Box<Node<K, V, Splay>>, index: usize) -> Box<Node<K, V, Splay>> {
    let left_len = node.left_len();
    match index.cmp(&left_len) {
        Ordering::Equal => node,
        Ordering::Less => {
            let Some(inner) = node.left().map(Node::left_len) else {
                return node;
            };
            match index.cmp(&inner) {
                Ordering::Equal => node,
                Ordering::Less => {
                    trace!(policy = Splay::NAME, "zig-zig");
                    node.rotate_right().rotate_right()
                }
                Ordering::Greater => {
                    trace!(policy = Splay::NAME, "zig-zag");
                    node.map_left(Node::rotate_left);
                    node.rotate_right()
                }
            }
        }
        Ordering::Greater => {
            let index = index - left_len - 1;
            let Some(inner) = node.right().map(Node::left_len) else {
                return node;
            };
            match index.cmp(&inner) {
                Ordering::Equal => node,
                Ordering::Greater => {
                    trace!(policy = Splay::NAME, "zig-zig");
                    node.rotate_left().rotate_left()
                }
                Ordering::Less => {
                    trace!(policy = Splay::NAME, "zig-zag");
                    node.map_right(Node::rotate_right);
                    node.rotate_left()
                }
            }
        }
    }
}

impl Balance for Splay {
    const NAME: &'static str = "splay";

    const SELF_ADJUSTING: bool = true;

    type Meta = ();

    fn on_put<K, V>(node: Box<Node<K, V, Self>>, index: usize) -> Box<Node<K, V, Self>> {
        splay_step(node, index)
    }

    fn on_access<K, V>(node: Box<Node<K, V, Self>>, index: usize) -> Box<Node<K, V, Self>> {
        splay_step(node, index)
    }

    fn on_root<K, V>(root: Box<Node<K, V, Self>>, index: usize) -> Box<Node<K, V, Self>> {
        // After the per-level steps the entry is the root or one of its children.
        match index.cmp(&root.left_len()) {
            Ordering::Less => root.rotate_right(),
            Ordering::Equal => root,
            Ordering::Greater => root.rotate_left(),
        }
    }
}
