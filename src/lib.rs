/*!
`lgraphs` is a graph data structure & algorithms library designed for graphs that are
- **l**abelled : Nodes are arbitrary, distinct values (grid coordinates, strings, ...)
- weighted : Every edge carries a payload from which callers extract a weight
- directed : Edges are one-directional; a bidirectional relationship requires two edges

# Representation

Nodes are stored in insertion order and addressed internally by a [`NodeIndex`] in the range
`0..order`. Edges are kept per source node in an adjacency list of target indices, with the edge
payloads in a parallel list of the same shape. Parallel edges between the same pair of nodes are
permitted.

Turning a node value back into its index is the job of a [`NodeLookup`](crate::repr::NodeLookup)
strategy which is chosen by type parameter:

- [`ScanGraph`](crate::repr::ScanGraph) scans the node list (works for any `PartialEq` node),
- [`SortedGraph`](crate::repr::SortedGraph) binary-searches a sorted index that the caller
  rebuilds after mutating nodes,
- [`MappedGraph`](crate::repr::MappedGraph) keeps a hash map from node to index up to date.

# Design

Basic queries are provided by the traits in [`ops`]. All algorithms in [`algo`] are implemented as
traits with blanket implementations over these operations, so `graph.shortest_path_dijkstra(..)`
works on every representation. Every operation that can fail on caller input returns a
[`Result`](crate::error::Result) with a [`GraphError`](crate::error::GraphError) instead of
panicking.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes node/edge definitions, errors, graph operation traits and representations,
- [`algo`] includes shortest paths (Dijkstra, A*), breadth/depth-first walks and path weights,
- [`path_tree`] includes the [`PathTree`](crate::path_tree::PathTree) that enumerates all
  non-cyclic paths between two nodes,
- [`io`] includes a GraphViz writer for debugging.

In most use-cases, `use lgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use lgraphs::{prelude::*, algo::*};

let mut graph = MappedGraph::<char, f64>::new();
graph.add_nodes(['a', 'b', 'c']).unwrap();
graph.add_edge(&'a', &'b', 1.0).unwrap();
graph.add_edge(&'b', &'c', 2.0).unwrap();

let path = graph.shortest_path_dijkstra(&'a', &'c', |w| *w).unwrap();
assert_eq!(path, vec!['a', 'b', 'c']);
assert_eq!(graph.path_weight(&path, |w| *w).unwrap(), 3.0);
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod io;
pub mod node;
pub mod ops;
pub mod path_tree;
pub mod repr;
pub(crate) mod testing;

/// `lgraphs::prelude` includes definitions for nodes and edges, errors, all basic graph operation
/// traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, error::*, node::*, ops::*, repr::*};
}

pub use edge::*;
pub use node::*;
