use alloc::boxed::Box;

use tracing::trace;

use super::{Balance, sealed};
use crate::raw::Node;

/// Height-balanced (AVL) policy.
///
/// Every node caches its height, and after each insertion or removal the two
/// subtrees of every node on the path differ in height by at most one. Depth
/// is therefore bounded by about `1.44 log2(n)`.
///
/// # Examples
///
/// ```
/// use baltree::AvlMap;
///
/// let mut map = AvlMap::new();
/// for key in 0..1023 {
///     map.put(key, ());
/// }
/// // Sorted insertion still yields a perfectly balanced tree here.
/// assert_eq!(map.height(), Some(9));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Avl;

impl sealed::Sealed for Avl {}

/// Height of `node`, with `-1` for an absent subtree.
fn height<K, V>(node: Option<&Node<K, V, Avl>>) -> i32 {
    node.map_or(-1, Node::meta)
}

/// `height(right) - height(left)`.
fn balance_factor<K, V>(node: &Node<K, V, Avl>) -> i32 {
    height(node.right()) - height(node.left())
}

impl Balance for Avl {
    const NAME: &'static str = "avl";

    type Meta = i32;

    fn refresh<K, V>(node: &mut Node<K, V, Self>) {
        let meta = 1 + height(node.left()).max(height(node.right()));
        node.set_meta(meta);
    }

    fn rebalance<K, V>(mut node: Box<Node<K, V, Self>>) -> Box<Node<K, V, Self>> {
        match balance_factor(&node) {
            -2 => {
                // Left-right shape: straighten it into left-left first.
                if node.left().is_some_and(|left| balance_factor(left) > 0) {
                    trace!(policy = Self::NAME, "double rotation (left-right)");
                    node.map_left(Node::rotate_left);
                }
                node.rotate_right()
            }
            2 => {
                if node.right().is_some_and(|right| balance_factor(right) < 0) {
                    trace!(policy = Self::NAME, "double rotation (right-left)");
                    node.map_right(Node::rotate_right);
                }
                node.rotate_left()
            }
            factor => {
                debug_assert!(factor.abs() <= 1, "AVL balance factor {factor} escaped rebalancing");
                node
            }
        }
    }
}
