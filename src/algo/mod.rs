/*!
# Graph Algorithms

This module provides the **path algorithms** built on top of the graph operations in this crate.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use lgraphs::algo::*;
```
and gain access to shortest paths, walks and path weights as methods on every graph.

Edge payloads are turned into `f64` weights by a caller-provided closure `weight_of`, so the same
graph can be searched under different metrics.
*/

mod path_weight;
mod shortest_path;
mod walk;

use crate::prelude::*;

pub use path_weight::*;
pub use shortest_path::*;
pub use walk::*;
