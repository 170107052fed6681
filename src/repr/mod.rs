/*!
# Graph Representations

All graphs are stored as [`Graph`], an adjacency list with parallel payload lists. The
representations only differ in the [`NodeLookup`] strategy used to resolve a node value to its
index:

- [`ScanGraph`]: sequential search, any `PartialEq` node.
- [`SortedGraph`]: binary search in a sorted index that is rebuilt via
  [`Graph::index_nodes`] after node mutations.
- [`MappedGraph`]: hash map kept up to date on every node mutation.
*/

use crate::{ops::*, *};

mod adjacency;
mod lookup;

pub use adjacency::*;
pub use lookup::*;

use crate::error::{GraphError, Result};

/// Graph resolving nodes by sequential search
pub type ScanGraph<N, E> = Graph<N, E, LinearLookup>;

/// Graph resolving nodes by binary search in an explicitly rebuilt, sorted index
pub type SortedGraph<N, E> = Graph<N, E, SortedLookup>;

/// Graph resolving nodes through a hash map
pub type MappedGraph<N, E> = Graph<N, E, HashedLookup<N>>;
