/*!
# Node Indices

Node values are arbitrary and live in the graph's node list. Algorithms work on their positions
in that list. A position stays valid as long as nodes are only appended or replaced in place.

Sets of node indices (visited markers, seen sets) implement [`NodeSet`]. The dense default is
[`NodeBitSet`]; a [`FxHashSet`](fxhash::FxHashSet) is the sparse alternative for walks that only
touch a few nodes of a large graph.
*/

use std::{collections::HashSet, hash::BuildHasher};

use stream_bitset::bitset::BitSetImpl;

/// Position of a node in the node list of a graph, in the range `0..order`
pub type NodeIndex = usize;

/// Number of nodes of a graph
pub type NumNodes = usize;

/// Distance assigned to nodes that have not been reached (yet)
pub const UNREACHED: f64 = f64::INFINITY;

/// BitSet for node indices. Bits are addressed by `u32`, so graphs are limited to `2^32 - 1`
/// nodes when used with bitsets.
pub type NodeBitSet = BitSetImpl<u32>;

/// Minimalist set of node indices of a graph with a fixed order
pub trait NodeSet {
    /// Creates an empty set for a graph with `order` nodes
    fn with_order(order: NumNodes) -> Self;

    /// Inserts `u` into the set.
    /// Returns *true* if `u` was not contained before.
    fn insert_node(&mut self, u: NodeIndex) -> bool;

    /// Removes `u` from the set.
    /// Returns *true* if `u` was contained before.
    fn remove_node(&mut self, u: NodeIndex) -> bool;

    /// Returns *true* if `u` is contained in the set
    fn contains_node(&self, u: NodeIndex) -> bool;
}

impl NodeSet for NodeBitSet {
    fn with_order(order: NumNodes) -> Self {
        NodeBitSet::new(order as u32)
    }

    fn insert_node(&mut self, u: NodeIndex) -> bool {
        !self.set_bit(u as u32)
    }

    fn remove_node(&mut self, u: NodeIndex) -> bool {
        self.clear_bit(u as u32)
    }

    fn contains_node(&self, u: NodeIndex) -> bool {
        self.get_bit(u as u32)
    }
}

impl<S> NodeSet for HashSet<NodeIndex, S>
where
    S: BuildHasher + Default,
{
    fn with_order(_order: NumNodes) -> Self {
        HashSet::default()
    }

    fn insert_node(&mut self, u: NodeIndex) -> bool {
        HashSet::insert(self, u)
    }

    fn remove_node(&mut self, u: NodeIndex) -> bool {
        HashSet::remove(self, &u)
    }

    fn contains_node(&self, u: NodeIndex) -> bool {
        HashSet::contains(self, &u)
    }
}
