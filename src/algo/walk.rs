/*!
Step-limited walks along the edges of a graph.

A walk visits nodes reachable from a start node in breadth-first or depth-first order and stops
after a fixed number of steps. This module provides:
- [`NodeSequencer`]: the frontier abstraction (queue for BFS, stack for DFS).
- [`WalkSearch`]: a lazy iterator over the visited node indices.
- [`Walk`]: the high-level trait exposing walks directly as methods on graphs, including the
  optional backtrack trail of depth-first walks.
*/

use std::collections::VecDeque;

use itertools::Itertools;
use tracing::debug;

use super::*;

/// Abstraction for the frontier of a walk.
///
/// - [`VecDeque`] -> queue semantics -> **BFS**
/// - [`Vec`] -> stack semantics -> **DFS**
pub trait NodeSequencer<T> {
    /// Creates a new sequencer initialized with a single item.
    fn init(item: T) -> Self;

    /// Pushes the children of a single node such that the first child is popped first
    /// among them.
    fn push_siblings<I>(&mut self, items: I)
    where
        I: DoubleEndedIterator<Item = T>;

    /// Removes and returns the next item from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    fn init(item: T) -> Self {
        Self::from(vec![item])
    }
    fn push_siblings<I>(&mut self, items: I)
    where
        I: DoubleEndedIterator<Item = T>,
    {
        self.extend(items)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl<T> NodeSequencer<T> for Vec<T> {
    fn init(item: T) -> Self {
        vec![item]
    }
    fn push_siblings<I>(&mut self, items: I)
    where
        I: DoubleEndedIterator<Item = T>,
    {
        self.extend(items.rev())
    }
    fn pop(&mut self) -> Option<T> {
        self.pop()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Lazy walk over the node indices reachable from a start node.
///
/// A node enters the frontier only if it was neither visited nor is already waiting in the
/// frontier. The iterator yields the start node and at most `max_steps` further nodes.
/// Visited and queued nodes are tracked in sets of type `V`.
pub struct WalkSearch<'a, G, S, V = NodeBitSet>
where
    G: AdjacencyList,
    S: NodeSequencer<NodeIndex>,
    V: NodeSet,
{
    graph: &'a G,
    visited: V,
    queued: V,
    sequencer: S,
    remaining: usize,
}

/// A breadth-first walk with a custom visited set
pub type BreadthFirstWalkWithSet<'a, G, V> = WalkSearch<'a, G, VecDeque<NodeIndex>, V>;

/// A depth-first walk with a custom visited set
pub type DepthFirstWalkWithSet<'a, G, V> = WalkSearch<'a, G, Vec<NodeIndex>, V>;

/// A breadth-first walk
pub type BreadthFirstWalk<'a, G> = WalkSearch<'a, G, VecDeque<NodeIndex>, NodeBitSet>;

/// A depth-first walk
pub type DepthFirstWalk<'a, G> = WalkSearch<'a, G, Vec<NodeIndex>, NodeBitSet>;

impl<'a, G, S, V> WalkSearch<'a, G, S, V>
where
    G: AdjacencyList,
    S: NodeSequencer<NodeIndex>,
    V: NodeSet,
{
    /// Creates a walk starting at the node with index `start` that takes at most `max_steps`
    /// steps.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `start >= order`
    pub fn new(graph: &'a G, start: NodeIndex, max_steps: usize) -> Result<Self> {
        let start = graph.check_index(start)?;
        let mut queued = V::with_order(graph.order());
        queued.insert_node(start);

        Ok(Self {
            graph,
            visited: V::with_order(graph.order()),
            queued,
            sequencer: S::init(start),
            remaining: max_steps.saturating_add(1),
        })
    }

    /// Returns *true* if `u` was already yielded by the walk
    pub fn did_visit_node(&self, u: NodeIndex) -> bool {
        self.visited.contains_node(u)
    }
}

impl<G, S, V> Iterator for WalkSearch<'_, G, S, V>
where
    G: AdjacencyList,
    S: NodeSequencer<NodeIndex>,
    V: NodeSet,
{
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let u = self.sequencer.pop()?;
        self.remaining -= 1;
        self.queued.remove_node(u);
        self.visited.insert_node(u);

        let fresh = self
            .graph
            .children_of(u)
            .filter(|&v| !self.visited.contains_node(v) && !self.queued.contains_node(v))
            .unique()
            .collect_vec();
        for &v in &fresh {
            self.queued.insert_node(v);
        }
        self.sequencer.push_siblings(fresh.into_iter());

        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower = self.sequencer.cardinality().min(self.remaining);
        (lower, Some(self.remaining))
    }
}

/// Step-limited walks. Implemented for every [`AdjacencyList`].
pub trait Walk: AdjacencyList + Sized {
    /// Returns a breadth-first [`WalkSearch`] starting at the node with index `start`
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `start >= order`
    fn bfs_walk(&self, start: NodeIndex, max_steps: usize) -> Result<BreadthFirstWalk<'_, Self>> {
        WalkSearch::new(self, start, max_steps)
    }

    /// Returns a depth-first [`WalkSearch`] starting at the node with index `start`
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `start >= order`
    fn dfs_walk(&self, start: NodeIndex, max_steps: usize) -> Result<DepthFirstWalk<'_, Self>> {
        WalkSearch::new(self, start, max_steps)
    }

    /// Visits the nodes reachable from `from` in breadth-first order, at most `max_steps + 1`
    /// of them (the start plus one per step).
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `from` is not part of the graph
    fn walk_breadth_first(&self, from: &Self::Node, max_steps: usize) -> Result<Vec<Self::Node>>
    where
        Self::Node: Clone,
    {
        let start = self.index_of(from)?;
        let path = self.bfs_walk(start, max_steps)?.collect_vec();
        debug!(start, max_steps, visited = path.len(), "finished breadth-first walk");
        Ok(self.nodes_at(path).into_iter().cloned().collect())
    }

    /// Visits the nodes reachable from `from` in depth-first order, at most `max_steps + 1` of
    /// them. Siblings are visited in edge insertion order.
    ///
    /// If `include_backtrack` is set, the walker does not jump: whenever the next node is not a
    /// child of the current one, the walk so far is retraced backwards (including earlier
    /// retraced nodes) and every node passed is appended, until one of them is a parent of the
    /// next node or the start of the walk is reached. Retraced nodes do not count as steps.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `from` is not part of the graph
    fn walk_depth_first(
        &self,
        from: &Self::Node,
        max_steps: usize,
        include_backtrack: bool,
    ) -> Result<Vec<Self::Node>>
    where
        Self::Node: Clone,
    {
        let start = self.index_of(from)?;

        let mut path: Vec<NodeIndex> = Vec::new();
        let mut current: Option<NodeIndex> = None;
        for v in self.dfs_walk(start, max_steps)? {
            if include_backtrack && current.is_some_and(|u| !self.has_edge(u, v)) {
                let mut i = path.len() - 1;
                while i > 0 {
                    i -= 1;
                    let w = path[i];
                    path.push(w);
                    if self.has_edge(w, v) {
                        break;
                    }
                }
            }
            path.push(v);
            current = Some(v);
        }

        debug!(
            start,
            max_steps,
            include_backtrack,
            length = path.len(),
            "finished depth-first walk"
        );
        Ok(self.nodes_at(path).into_iter().cloned().collect())
    }
}

impl<G: AdjacencyList> Walk for G {}

#[cfg(test)]
mod tests {
    use fxhash::FxHashSet;

    use super::*;

    /// ```text
    ///      a
    ///     / \
    ///    b   c
    ///   / \   \
    ///  d   e   f      g (isolated)
    /// ```
    fn tree() -> ScanGraph<char, ()> {
        ScanGraph::from_edges(
            ['a', 'b', 'c', 'd', 'e', 'f', 'g'],
            [
                ('a', 'b', ()),
                ('a', 'c', ()),
                ('b', 'd', ()),
                ('b', 'e', ()),
                ('c', 'f', ()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn breadth_first() {
        let graph = tree();
        assert_eq!(
            graph.walk_breadth_first(&'a', 100).unwrap(),
            vec!['a', 'b', 'c', 'd', 'e', 'f']
        );
        assert_eq!(
            graph.walk_breadth_first(&'a', 2).unwrap(),
            vec!['a', 'b', 'c']
        );
        assert_eq!(graph.walk_breadth_first(&'a', 0).unwrap(), vec!['a']);
        assert_eq!(graph.walk_breadth_first(&'g', 5).unwrap(), vec!['g']);
        assert_eq!(
            graph.walk_breadth_first(&'z', 5),
            Err(GraphError::NodeNotFound)
        );
    }

    #[test]
    fn depth_first() {
        let graph = tree();
        assert_eq!(
            graph.walk_depth_first(&'a', 100, false).unwrap(),
            vec!['a', 'b', 'd', 'e', 'c', 'f']
        );
        assert_eq!(
            graph.walk_depth_first(&'a', 3, false).unwrap(),
            vec!['a', 'b', 'd', 'e']
        );
        assert_eq!(
            graph.walk_depth_first(&'b', 100, false).unwrap(),
            vec!['b', 'd', 'e']
        );
        assert_eq!(
            graph.walk_depth_first(&'z', 5, true),
            Err(GraphError::NodeNotFound)
        );
    }

    #[test]
    fn depth_first_with_backtrack() {
        let graph = tree();
        assert_eq!(
            graph.walk_depth_first(&'a', 100, true).unwrap(),
            vec!['a', 'b', 'd', 'b', 'e', 'b', 'd', 'b', 'a', 'c', 'f']
        );
        assert_eq!(
            graph.walk_depth_first(&'a', 2, true).unwrap(),
            vec!['a', 'b', 'd']
        );
    }

    #[test]
    fn walks_on_cycles() {
        let graph = MappedGraph::<u8, ()>::from_edges(
            [1, 2, 3, 4],
            [(1, 2, ()), (2, 3, ()), (3, 1, ()), (1, 2, ()), (3, 4, ())],
        )
        .unwrap();
        assert_eq!(graph.walk_breadth_first(&1, 50).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(graph.walk_depth_first(&3, 50, false).unwrap(), vec![3, 1, 2, 4]);
        assert_eq!(
            graph.walk_depth_first(&3, 50, true).unwrap(),
            vec![3, 1, 2, 1, 3, 4]
        );
    }

    #[test]
    fn walk_search() {
        let graph = tree();
        let mut walk = graph.bfs_walk(1, 10).unwrap();
        assert_eq!(walk.next(), Some(1));
        assert!(walk.did_visit_node(1));
        assert!(!walk.did_visit_node(3));
        assert_eq!(walk.collect_vec(), vec![3, 4]);

        assert!(graph.dfs_walk(7, 10).is_err());
    }

    #[test]
    fn walk_with_hashed_set() {
        let graph = tree();
        let sparse: DepthFirstWalkWithSet<'_, _, FxHashSet<NodeIndex>> =
            WalkSearch::new(&graph, 0, 100).unwrap();
        assert_eq!(sparse.collect_vec(), graph.dfs_walk(0, 100).unwrap().collect_vec());

        let sparse: BreadthFirstWalkWithSet<'_, _, FxHashSet<NodeIndex>> =
            WalkSearch::new(&graph, 2, 100).unwrap();
        assert_eq!(sparse.collect_vec(), vec![2, 5]);
    }
}
