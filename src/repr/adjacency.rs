/*!
# Adjacency-List Graph

[`Graph`] is the single storage backend of the crate. For every node index `u` it stores

- `adjacency[u]`: the targets of all outgoing edges of `u` in insertion order,
- `edges[u]`: the payloads of these edges, parallel to `adjacency[u]`.

Both lists are kept inline for up to four entries, which covers the typical grid graph without
any extra allocation.

```text
 nodes     adjacency    edges
   a        [2, 3]      [e1, e2]
   b        [1]         [e3]
   c        [3]         [e4]
```
*/

use std::fmt::Debug;

use smallvec::SmallVec;

use super::*;
use crate::testing::test_graph_store;

/// Inline capacity of the per-node adjacency and payload lists
const INLINE_DEGREE: usize = 4;

type Neighborhood = SmallVec<[NodeIndex; INLINE_DEGREE]>;
type Payloads<E> = SmallVec<[E; INLINE_DEGREE]>;

/// A directed graph over distinct nodes `N` with edge payloads `E`.
///
/// # Type parameters
/// - `N`: node values; must be distinct w.r.t. `PartialEq`.
/// - `E`: arbitrary edge payload.
/// - `L`: [`NodeLookup`] strategy used to resolve node values to indices.
#[derive(Clone)]
pub struct Graph<N, E, L = LinearLookup> {
    nodes: Vec<N>,
    adjacency: Vec<Neighborhood>,
    edges: Vec<Payloads<E>>,
    num_edges: NumEdges,
    lookup: L,
}

impl<N, E, L> Default for Graph<N, E, L>
where
    L: Default,
{
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            adjacency: Vec::new(),
            edges: Vec::new(),
            num_edges: 0,
            lookup: L::default(),
        }
    }
}

impl<N, E, L> Debug for Graph<N, E, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("order", &self.nodes.len())
            .field("size", &self.num_edges)
            .finish()
    }
}

impl<N, E, L> Graph<N, E, L>
where
    L: Default,
{
    /// Creates an empty graph with space reserved for `n` nodes
    pub fn with_capacity(n: NumNodes) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
            adjacency: Vec::with_capacity(n),
            edges: Vec::with_capacity(n),
            num_edges: 0,
            lookup: L::default(),
        }
    }
}

impl<N, E, L> Graph<N, E, L> {
    /// Returns the lookup strategy
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Returns an iterator over all edge payloads in adjacency storage order
    pub fn payloads(&self) -> impl Iterator<Item = &E> + '_ {
        self.edges.iter().flatten()
    }

    /// Returns mutable references to the payloads of all edges `u -> v`.
    /// ** Panics if `u >= order` **
    pub fn payloads_between_mut(
        &mut self,
        u: NodeIndex,
        v: NodeIndex,
    ) -> impl Iterator<Item = &mut E> + '_ {
        self.adjacency[u]
            .iter()
            .zip(self.edges[u].iter_mut())
            .filter_map(move |(&w, e)| (w == v).then_some(e))
    }

    fn debug_assert_shape(&self) {
        debug_assert_eq!(self.nodes.len(), self.adjacency.len());
        debug_assert_eq!(self.nodes.len(), self.edges.len());
        debug_assert!(
            self.adjacency
                .iter()
                .zip(&self.edges)
                .all(|(a, e)| a.len() == e.len())
        );
    }
}

impl<N, E, L> Graph<N, E, L>
where
    L: NodeLookup<N> + Default,
{
    /// Creates a graph that only consists of `node`
    pub fn singleton(node: N) -> Self {
        let mut graph = Self::with_capacity(1);
        graph.push_node(node);
        graph
    }
}

impl<N, E, L> Graph<N, E, L>
where
    L: NodeLookup<N>,
{
    /// Appends `node` without checking for duplicates
    fn push_node(&mut self, node: N) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(node);
        self.adjacency.push(Neighborhood::new());
        self.edges.push(Payloads::new());
        self.lookup.on_insert(&self.nodes, index);
        index
    }
}

impl<N, E> Graph<N, E, SortedLookup>
where
    N: Ord,
{
    /// (Re-)builds the sorted node index. Needs to be called after every change to the nodes,
    /// otherwise lookups fall back to a sequential search.
    pub fn index_nodes(&mut self) {
        self.lookup.rebuild(&self.nodes);
    }

    /// Returns *true* if lookups currently use the sorted node index
    pub fn is_node_indexed(&self) -> bool {
        self.lookup.is_indexed()
    }
}

impl<N, E, L> GraphType for Graph<N, E, L> {
    type Node = N;
    type Edge = E;
}

impl<N, E, L> GraphNodeOrder for Graph<N, E, L> {
    fn nodes(&self) -> &[N] {
        &self.nodes
    }
}

impl<N, E, L> GraphEdgeOrder for Graph<N, E, L> {
    fn size(&self) -> NumEdges {
        self.num_edges
    }
}

impl<N, E, L> NodeQuery for Graph<N, E, L>
where
    L: NodeLookup<N>,
{
    fn node_index(&self, node: &N) -> Option<NodeIndex> {
        self.lookup.index_of(&self.nodes, node)
    }
}

impl<N, E, L> AdjacencyList for Graph<N, E, L>
where
    L: NodeLookup<N>,
{
    fn out_edges_of(&self, u: NodeIndex) -> impl Iterator<Item = (NodeIndex, &E)> + '_ {
        self.adjacency[u].iter().copied().zip(self.edges[u].iter())
    }

    fn out_degree_of(&self, u: NodeIndex) -> NumNodes {
        self.adjacency[u].len()
    }

    fn has_edge(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.adjacency[u].contains(&v)
    }
}

impl<N, E, L> GraphNew for Graph<N, E, L>
where
    L: Default,
{
    fn new() -> Self {
        Self::default()
    }
}

impl<N, E, L> GraphEditing for Graph<N, E, L>
where
    L: NodeLookup<N>,
{
    fn add_node(&mut self, node: N) -> Result<NodeIndex> {
        if let Some(index) = self.node_index(&node) {
            return Err(GraphError::DuplicateNode { index });
        }

        Ok(self.push_node(node))
    }

    fn set_node(&mut self, index: NodeIndex, node: N) -> Result<()> {
        let index = self.check_index(index)?;
        if let Some(existing) = self.node_index(&node) {
            return Err(GraphError::DuplicateNode { index: existing });
        }

        let old = std::mem::replace(&mut self.nodes[index], node);
        self.lookup.on_replace(&self.nodes, index, &old);

        Ok(())
    }

    fn set_nodes<I>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = N>,
    {
        let previous = std::mem::replace(&mut self.nodes, nodes.into_iter().collect());
        self.lookup.on_reset(&self.nodes);

        // a node whose lookup does not point back to itself has an equal predecessor
        let duplicate = self
            .vertices()
            .find_map(|u| self.node_index(&self.nodes[u]).filter(|&first| first != u));
        if let Some(index) = duplicate {
            self.nodes = previous;
            self.lookup.on_reset(&self.nodes);
            return Err(GraphError::DuplicateNode { index });
        }

        let n = self.nodes.len();
        self.adjacency = vec![Neighborhood::new(); n];
        self.edges = (0..n).map(|_| Payloads::new()).collect();
        self.num_edges = 0;
        self.debug_assert_shape();

        Ok(())
    }

    fn add_edge_by_index(&mut self, u: NodeIndex, v: NodeIndex, edge: E) -> Result<()> {
        let u = self.check_index(u)?;
        let v = self.check_index(v)?;

        self.adjacency[u].push(v);
        self.edges[u].push(edge);
        self.num_edges += 1;

        Ok(())
    }

    fn update_edge_by_index(&mut self, u: NodeIndex, v: NodeIndex, edge: E) -> Result<()> {
        let u = self.check_index(u)?;
        let v = self.check_index(v)?;

        match self.adjacency[u].iter().position(|&w| w == v) {
            Some(pos) => self.edges[u][pos] = edge,
            None => {
                self.adjacency[u].push(v);
                self.edges[u].push(edge);
                self.num_edges += 1;
            }
        }

        Ok(())
    }
}

test_graph_store!(scan_graph_tests, ScanGraph, |_: &mut ScanGraph<u32, u32>| {});
test_graph_store!(sorted_graph_tests, SortedGraph, |g: &mut SortedGraph<u32, u32>| g
    .index_nodes());
test_graph_store!(mapped_graph_tests, MappedGraph, |_: &mut MappedGraph<u32, u32>| {});

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn letters() -> MappedGraph<char, u32> {
        MappedGraph::from_edges(
            ['a', 'b', 'c', 'd', 'e'],
            [
                ('a', 'b', 1),
                ('a', 'c', 2),
                ('b', 'd', 3),
                ('c', 'd', 4),
                ('a', 'b', 5),
            ],
        )
        .unwrap()
    }

    #[test]
    fn relational_queries() {
        let graph = letters();
        assert_eq!(graph.order(), 5);
        assert_eq!(graph.size(), 5);

        assert_eq!(graph.child_nodes(&'a').unwrap(), vec![&'b', &'c', &'b']);
        assert_eq!(graph.parent_nodes(&'d').unwrap(), vec![&'b', &'c']);
        assert_eq!(graph.edges_between(&'a', &'b').unwrap(), vec![&1, &5]);
        assert!(graph.edges_between(&'b', &'a').unwrap().is_empty());
        assert!(graph.is_connected(&'c', &'d').unwrap());
        assert!(!graph.is_connected(&'d', &'c').unwrap());
        assert_eq!(graph.edges_from(&'b').unwrap(), vec![(&3, &'d')]);
        assert_eq!(graph.edges_to(&'d').unwrap(), vec![(&3, &'b'), (&4, &'c')]);
        assert_eq!(graph.descendants(&'a').unwrap(), vec![&'b', &'c', &'d']);
        assert!(graph.descendants(&'e').unwrap().is_empty());
        assert_eq!(graph.payloads().copied().collect_vec(), vec![1, 2, 5, 3, 4]);
    }

    #[test]
    fn missing_nodes() {
        let graph = letters();
        assert_eq!(graph.child_nodes(&'z'), Err(GraphError::NodeNotFound));
        assert_eq!(graph.edges_between(&'a', &'z'), Err(GraphError::NodeNotFound));
        assert_eq!(graph.is_connected(&'z', &'a'), Err(GraphError::NodeNotFound));
        assert_eq!(graph.descendants(&'z'), Err(GraphError::NodeNotFound));
        assert_eq!(
            graph.node(5),
            Err(GraphError::IndexOutOfRange { index: 5, order: 5 })
        );
        assert_eq!(
            graph.child_indices(9),
            Err(GraphError::IndexOutOfRange { index: 9, order: 5 })
        );
        assert_eq!(graph.node_index(&'z'), None);
    }

    #[test]
    fn index_forms() {
        let graph = letters();
        assert_eq!(graph.child_indices(0).unwrap(), vec![1, 2, 1]);
        assert_eq!(graph.parent_indices(3).unwrap(), vec![1, 2]);
        assert_eq!(graph.edges_between_indices(0, 1).unwrap(), vec![&1, &5]);
        assert!(graph.is_connected_indices(2, 3).unwrap());
        assert_eq!(graph.edges_from_index(0).unwrap(), vec![(&1, 1), (&2, 2), (&5, 1)]);
        assert_eq!(graph.edges_to_index(1).unwrap(), vec![(&1, 0), (&5, 0)]);
        assert_eq!(
            graph.edges_to_index(5),
            Err(GraphError::IndexOutOfRange { index: 5, order: 5 })
        );
        assert_eq!(graph.descendant_indices(0).unwrap(), vec![1, 2, 3]);
        assert_eq!(graph.nodes_at([4, 0]), vec![&'e', &'a']);

        let mut other = MappedGraph::<char, u32>::with_capacity(2);
        other.add_nodes(['x', 'y']).unwrap();
        other.add_edge_by_index(1, 0, 9).unwrap();
        assert_eq!(other.edges().collect_vec(), vec![(Endpoints(1, 0), &9)]);
    }

    #[test]
    fn update_edge_replaces_first() {
        let mut graph = letters();
        graph.update_edge(&'a', &'b', 10).unwrap();
        assert_eq!(graph.edges_between(&'a', &'b').unwrap(), vec![&10, &5]);
        assert_eq!(graph.size(), 5);

        graph.update_edge(&'d', &'e', 7).unwrap();
        assert_eq!(graph.edges_between(&'d', &'e').unwrap(), vec![&7]);
        assert_eq!(graph.size(), 6);

        assert_eq!(
            graph.update_edge(&'d', &'z', 7),
            Err(GraphError::NodeNotFound)
        );
    }

    #[test]
    fn descendants_on_cycle() {
        let graph = ScanGraph::<u8, ()>::from_edges(
            [0, 1, 2, 3],
            [(0, 1, ()), (1, 2, ()), (2, 0, ()), (2, 3, ())],
        )
        .unwrap();
        assert_eq!(graph.descendants(&0).unwrap(), vec![&1, &2, &0, &3]);
        assert_eq!(graph.descendant_indices(3).unwrap(), Vec::<NodeIndex>::new());
    }

    #[test]
    fn singleton() {
        let mut graph = MappedGraph::<char, u32>::singleton('s');
        assert_eq!(graph.order(), 1);
        assert_eq!(graph.size(), 0);
        assert_eq!(graph.node_index(&'s'), Some(0));
        assert_eq!(
            graph.add_node('s'),
            Err(GraphError::DuplicateNode { index: 0 })
        );
        assert_eq!(graph.add_node('t'), Ok(1));

        let graph = SortedGraph::<char, u32>::singleton('s');
        assert!(graph.has_node(&'s'));
        assert!(!graph.is_node_indexed());
    }

    #[test]
    fn set_node_keeps_edges() {
        let mut graph = letters();
        graph.set_node(0, 'x').unwrap();
        assert!(!graph.has_node(&'a'));
        assert_eq!(graph.node_index(&'x'), Some(0));
        assert_eq!(graph.child_nodes(&'x').unwrap(), vec![&'b', &'c', &'b']);

        assert_eq!(
            graph.set_node(1, 'c'),
            Err(GraphError::DuplicateNode { index: 2 })
        );
        assert_eq!(
            graph.set_node(8, 'y'),
            Err(GraphError::IndexOutOfRange { index: 8, order: 5 })
        );
    }

    #[test]
    fn set_nodes_discards_edges() {
        let mut graph = letters();
        graph.set_nodes(['q', 'r']).unwrap();
        assert_eq!(graph.order(), 2);
        assert_eq!(graph.size(), 0);
        assert_eq!(graph.node_index(&'r'), Some(1));
        assert!(!graph.has_node(&'a'));

        assert_eq!(
            graph.set_nodes(['s', 't', 's']),
            Err(GraphError::DuplicateNode { index: 0 })
        );
        assert_eq!(graph.nodes(), &['q', 'r']);
        assert_eq!(graph.node_index(&'q'), Some(0));
    }

    #[test]
    fn sorted_index_is_dropped_on_mutation() {
        let mut graph = SortedGraph::<&str, ()>::new();
        graph.add_nodes(["kiwi", "apple", "pear"]).unwrap();
        assert!(!graph.is_node_indexed());

        graph.index_nodes();
        assert!(graph.is_node_indexed());
        assert_eq!(graph.node_index(&"pear"), Some(2));

        graph.add_node("fig").unwrap();
        assert!(!graph.is_node_indexed());
        assert_eq!(graph.node_index(&"fig"), Some(3));

        graph.index_nodes();
        graph.set_node(0, "lime").unwrap();
        assert!(!graph.is_node_indexed());
        assert_eq!(graph.node_index(&"lime"), Some(0));
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", letters()), "Graph { order: 5, size: 5 }");
    }
}
