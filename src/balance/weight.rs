use alloc::boxed::Box;

use tracing::trace;

use super::{Balance, sealed};
use crate::raw::Node;

/// The weight-balance threshold.
///
/// A subtree is *too light* when its parent's size plus one reaches `DELTA`
/// times its own size plus one. Rebalancing keeps, for every node,
/// `size(heavy) + 1 < DELTA * (size(light) + 1)`.
pub const DELTA: usize = 4;

/// Weight-balanced policy.
///
/// Uses only the subtree sizes every node already caches: no extra metadata is
/// stored. After each insertion or removal a node whose lighter side has become
/// too light relative to the whole node is fixed with a single or double
/// rotation.
///
/// # Examples
///
/// ```
/// use baltree::WbtMap;
///
/// let mut map = WbtMap::new();
/// for key in 0..1000 {
///     map.put(key, key * 2);
/// }
/// assert_eq!(map.len(), 1000);
/// assert!(map.height().unwrap() < 20);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct WeightBalanced;

impl sealed::Sealed for WeightBalanced {}

/// Whether `side` is too light to hang below `node`.
fn too_light<K, V>(node: &Node<K, V, WeightBalanced>, side: Option<&Node<K, V, WeightBalanced>>) -> bool {
    node.len() + 1 >= DELTA * (Node::len_of(side) + 1)
}

impl Balance for WeightBalanced {
    const NAME: &'static str = "weight";

    type Meta = ();

    fn rebalance<K, V>(mut node: Box<Node<K, V, Self>>) -> Box<Node<K, V, Self>> {
        if too_light(&node, node.left()) {
            // A too-light outer grandchild would leave the rotated root
            // lopsided the other way: raise the inner grandchild first.
            if node.right().is_some_and(|right| too_light(&node, right.right())) {
                trace!(policy = Self::NAME, "double rotation (right-left)");
                node.map_right(Node::rotate_right);
            }
            node.rotate_left()
        } else if too_light(&node, node.right()) {
            if node.left().is_some_and(|left| too_light(&node, left.left())) {
                trace!(policy = Self::NAME, "double rotation (left-right)");
                node.map_left(Node::rotate_left);
            }
            node.rotate_right()
        } else {
            node
        }
    }
}
