/*!
# Node Lookup Strategies

A graph stores its nodes in insertion order. Resolving a node *value* to its index is delegated to
a [`NodeLookup`] strategy that the graph owns and notifies about every node mutation.

| Strategy | Requirement on `N` | Lookup | Kept up to date |
|---|---|---|---|
| [`LinearLookup`] | `PartialEq` | `O(n)` scan | always (no state) |
| [`SortedLookup`] | `Ord` | `O(log n)` binary search | no: rebuilt by the caller, falls back to a scan while stale |
| [`HashedLookup`] | `Eq + Hash + Clone` | `O(1)` hash map | always |
*/

use std::hash::Hash;

use fxhash::FxHashMap;
use itertools::Itertools;

use crate::NodeIndex;

/// Strategy for resolving a node value to its index in the node list of a graph.
///
/// The hooks are called by the graph *after* it changed its node list; `nodes` always is the
/// updated list.
pub trait NodeLookup<N>: Default {
    /// Returns the index of `node` in `nodes` or `None` if it is not contained
    fn index_of(&self, nodes: &[N], node: &N) -> Option<NodeIndex>;

    /// Called after a node was appended at `index`
    fn on_insert(&mut self, nodes: &[N], index: NodeIndex);

    /// Called after the node `old` at `index` was replaced by `nodes[index]`
    fn on_replace(&mut self, nodes: &[N], index: NodeIndex, old: &N);

    /// Called after the whole node list was replaced
    fn on_reset(&mut self, nodes: &[N]);
}

/// Sequential search through the node list. Correct for any node type, needs no extra memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearLookup;

impl<N> NodeLookup<N> for LinearLookup
where
    N: PartialEq,
{
    fn index_of(&self, nodes: &[N], node: &N) -> Option<NodeIndex> {
        nodes.iter().position(|n| n == node)
    }

    fn on_insert(&mut self, _nodes: &[N], _index: NodeIndex) {}

    fn on_replace(&mut self, _nodes: &[N], _index: NodeIndex, _old: &N) {}

    fn on_reset(&mut self, _nodes: &[N]) {}
}

/// Binary search through a list of node indices sorted by node value.
///
/// The index is built explicitly via [`SortedLookup::rebuild`] (see
/// [`Graph::index_nodes`](super::Graph::index_nodes)). Every node mutation drops it, after which
/// lookups fall back to a sequential search until it is rebuilt.
#[derive(Debug, Clone, Default)]
pub struct SortedLookup {
    sorted: Option<Vec<NodeIndex>>,
}

impl SortedLookup {
    /// Sorts the indices of `nodes` by node value
    pub fn rebuild<N: Ord>(&mut self, nodes: &[N]) {
        let mut sorted = (0..nodes.len()).collect_vec();
        sorted.sort_unstable_by(|&a, &b| nodes[a].cmp(&nodes[b]));
        self.sorted = Some(sorted);
    }

    /// Returns *true* if the sorted index is in use, i.e. it was built after the last mutation
    pub fn is_indexed(&self) -> bool {
        self.sorted.is_some()
    }

    fn invalidate(&mut self) {
        self.sorted = None;
    }
}

impl<N> NodeLookup<N> for SortedLookup
where
    N: Ord,
{
    fn index_of(&self, nodes: &[N], node: &N) -> Option<NodeIndex> {
        match &self.sorted {
            Some(sorted) => sorted
                .binary_search_by(|&i| nodes[i].cmp(node))
                .ok()
                .map(|pos| sorted[pos]),
            None => nodes.iter().position(|n| n == node),
        }
    }

    fn on_insert(&mut self, _nodes: &[N], _index: NodeIndex) {
        self.invalidate();
    }

    fn on_replace(&mut self, _nodes: &[N], _index: NodeIndex, _old: &N) {
        self.invalidate();
    }

    fn on_reset(&mut self, _nodes: &[N]) {
        self.invalidate();
    }
}

/// Hash map from node value to index, updated on every node mutation
#[derive(Debug, Clone)]
pub struct HashedLookup<N> {
    map: FxHashMap<N, NodeIndex>,
}

impl<N> Default for HashedLookup<N> {
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }
}

impl<N> NodeLookup<N> for HashedLookup<N>
where
    N: Eq + Hash + Clone,
{
    fn index_of(&self, _nodes: &[N], node: &N) -> Option<NodeIndex> {
        self.map.get(node).copied()
    }

    fn on_insert(&mut self, nodes: &[N], index: NodeIndex) {
        self.map.insert(nodes[index].clone(), index);
    }

    fn on_replace(&mut self, nodes: &[N], index: NodeIndex, old: &N) {
        self.map.remove(old);
        self.map.insert(nodes[index].clone(), index);
    }

    fn on_reset(&mut self, nodes: &[N]) {
        // on duplicates the first occurrence wins, like a sequential scan
        self.map.clear();
        for (index, node) in nodes.iter().enumerate() {
            self.map.entry(node.clone()).or_insert(index);
        }
    }
}
