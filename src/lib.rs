//! Ordered maps built on binary search trees with pluggable rebalancing.
//!
//! This crate provides one generic map, [`TreeMap`], whose third type parameter
//! chooses how the tree keeps itself in shape:
//!
//! - [`BstMap`] - a plain binary search tree, shaped entirely by insertion order
//! - [`AvlMap`] - a height-balanced (AVL) tree
//! - [`WbtMap`] - a weight-balanced tree, using only subtree sizes
//! - [`SplayMap`] - a self-adjusting tree that moves every touched key to the root
//!
//! All four expose the same contract, so the same code runs against each and
//! produces the same results; only the shape of the tree (and so the cost of
//! each operation) differs.
//!
//! # Example
//!
//! ```
//! use baltree::{AvlMap, KeyNotFound, Rank, SplayMap};
//!
//! let mut scores = AvlMap::new();
//! scores.put("Alice", 100);
//! scores.put("Bob", 85);
//! scores.put("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Ok(&85));
//! assert_eq!(scores.get(&"Dave"), Err(KeyNotFound));
//! assert_eq!(scores.len(), 3);
//!
//! // The greatest key at or below a probe.
//! assert_eq!(scores.floor(&"Bz"), Some((&"Bob", &85)));
//!
//! // Subtree sizes are cached, so ranks are cheap.
//! assert_eq!(scores.rank_of(&"Carol"), Some(2));
//! assert_eq!(scores[Rank(0)], 100);
//!
//! // Switching policy changes nothing but the shape.
//! let mut recent: SplayMap<_, _> = scores.iter().map(|(k, v)| (*k, *v)).collect();
//! recent.get(&"Alice")?;
//! assert_eq!(recent.root_key_value(), Some((&"Alice", &100)));
//! assert!(recent.iter().eq(scores.iter()));
//! # Ok::<(), KeyNotFound>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Shared core** - one node type and one set of recursive algorithms; policies only hook the return path
//! - **Failure atomic** - a `get` or `remove` of an absent key leaves the tree untouched
//! - **Observable** - rotations are reported as `tracing` events at trace level
//!
//! # Implementation
//!
//! Nodes own their children through `Option<Box<_>>`. Each node caches the size
//! of its subtree plus whatever metadata the policy needs (a height for
//! [`Avl`], nothing for the others). Operations take a subtree by value and
//! return its new root, so rotations are plain ownership moves.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![deny(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod balance;
pub mod tree_map;

pub use balance::{Avl, Balance, Splay, Unbalanced, WeightBalanced};
pub use error::KeyNotFound;
pub use order_statistic::Rank;
pub use tree_map::{AvlMap, BstMap, SplayMap, TreeMap, WbtMap};
