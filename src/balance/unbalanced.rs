use super::{Balance, sealed};

/// The reference policy: plain binary search tree insertion and removal, with
/// no rebalancing.
///
/// The tree's shape depends entirely on insertion order; inserting sorted keys
/// produces a path of depth `n`.
///
/// # Examples
///
/// ```
/// use baltree::BstMap;
///
/// let mut map = BstMap::new();
/// for key in [2, 1, 3] {
///     map.put(key, ());
/// }
/// // The first key stays at the root forever.
/// assert_eq!(map.root_key_value(), Some((&2, &())));
/// assert_eq!(map.height(), Some(1));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Unbalanced;

impl sealed::Sealed for Unbalanced {}

impl Balance for Unbalanced {
    const NAME: &'static str = "unbalanced";

    type Meta = ();
}
