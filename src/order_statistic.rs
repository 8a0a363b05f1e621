/// A zero-based rank into the sorted order of a map.
///
/// Ranks are answered from the cached subtree sizes every node carries, so
/// they cost one root-to-node walk regardless of the rebalancing policy.
///
/// # Examples
///
/// ```
/// use baltree::{WbtMap, Rank};
///
/// let mut map = WbtMap::new();
/// map.put("a", 10);
/// map.put("b", 20);
///
/// assert_eq!(map[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
