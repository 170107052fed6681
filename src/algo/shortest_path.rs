/*!
Shortest paths between two nodes.

Both searches settle nodes from a binary min-heap with lazy deletion: outdated heap entries are
skipped when popped instead of being decreased in place. Among entries of equal priority the node
with the lowest index is taken first, which makes results deterministic.
*/

use std::{cmp::Reverse, collections::BinaryHeap};

use tracing::debug;

use super::*;

/// Entry of the min-heap used by [`ShortestPath`]; ordered by `priority` first and `node` second
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    priority: f64,
    node: NodeIndex,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.node.cmp(&other.node))
    }
}

type MinHeap = BinaryHeap<Reverse<HeapEntry>>;

/// Rebuilds the path `from -> ... -> to` from a predecessor array
fn rebuild_path(
    predecessor: &[Option<NodeIndex>],
    from: NodeIndex,
    to: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        match predecessor[current] {
            Some(p) => {
                path.push(p);
                current = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Weighted shortest paths. Implemented for every [`AdjacencyList`].
pub trait ShortestPath: AdjacencyList {
    /// Computes a shortest path between the nodes at index `from` and `to` with Dijkstra's
    /// algorithm and returns the indices of all nodes on it, including both endpoints.
    /// Parallel edges are all relaxed, so effectively the lightest one is used.
    ///
    /// # Errors
    /// - [`GraphError::IndexOutOfRange`] if either index is `>= order`
    /// - [`GraphError::InvalidWeight`] if an edge into a node that is not settled yet has a weight
    ///   that is not strictly positive. The search settles every node reachable from `from`, so
    ///   this includes edges beyond `to`.
    /// - [`GraphError::PathNotFound`] if `to` is not reachable from `from`
    fn dijkstra_indices<W>(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        weight_of: W,
    ) -> Result<Vec<NodeIndex>>
    where
        W: Fn(&Self::Edge) -> f64,
    {
        let from = self.check_index(from)?;
        let to = self.check_index(to)?;

        let n = self.order();
        let mut distance = vec![UNREACHED; n];
        let mut predecessor: Vec<Option<NodeIndex>> = vec![None; n];
        let mut settled = NodeBitSet::with_order(n);
        let mut heap = MinHeap::new();

        distance[from] = 0.0;
        heap.push(Reverse(HeapEntry {
            priority: 0.0,
            node: from,
        }));

        while let Some(Reverse(HeapEntry { node: u, .. })) = heap.pop() {
            if !settled.insert_node(u) {
                continue;
            }

            for (v, edge) in self.out_edges_of(u) {
                if settled.contains_node(v) {
                    continue;
                }

                let weight = weight_of(edge);
                if !(weight > 0.0) {
                    return Err(GraphError::InvalidWeight { weight });
                }

                let candidate = distance[u] + weight;
                if candidate < distance[v] {
                    distance[v] = candidate;
                    predecessor[v] = Some(u);
                    heap.push(Reverse(HeapEntry {
                        priority: candidate,
                        node: v,
                    }));
                }
            }
        }

        if distance[to] == UNREACHED {
            debug!(from, to, "dijkstra found no path");
            return Err(GraphError::PathNotFound);
        }

        let path = rebuild_path(&predecessor, from, to);
        debug!(
            from,
            to,
            distance = distance[to],
            hops = path.len() - 1,
            "dijkstra found path"
        );
        Ok(path)
    }

    /// Node-valued version of [`ShortestPath::dijkstra_indices`]. `from == to` yields `[from]`.
    ///
    /// # Errors
    /// - [`GraphError::NodeNotFound`] if either node is not part of the graph
    /// - [`GraphError::InvalidWeight`] / [`GraphError::PathNotFound`] as in
    ///   [`ShortestPath::dijkstra_indices`]
    fn shortest_path_dijkstra<W>(
        &self,
        from: &Self::Node,
        to: &Self::Node,
        weight_of: W,
    ) -> Result<Vec<Self::Node>>
    where
        W: Fn(&Self::Edge) -> f64,
        Self::Node: Clone,
    {
        let Endpoints(u, v) = self.endpoints_of(from, to)?;
        let path = self.dijkstra_indices(u, v, weight_of)?;
        Ok(self.nodes_at(path).into_iter().cloned().collect())
    }

    /// Computes a shortest path between the nodes at index `from` and `to` with the A* algorithm.
    /// Nodes are expanded by ascending `g + h` where `g` is the cost of the best known path from
    /// `from` and `h` the `heuristic` of the node.
    ///
    /// The result is only guaranteed to be optimal if `heuristic` never overestimates the
    /// remaining cost to `to`; this is not checked.
    ///
    /// # Errors
    /// - [`GraphError::IndexOutOfRange`] if either index is `>= order`
    /// - [`GraphError::InvalidWeight`] if an examined edge has a negative or NaN weight
    /// - [`GraphError::PathNotFound`] if `to` is not reachable from `from`
    fn astar_indices<W, H>(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        weight_of: W,
        heuristic: H,
    ) -> Result<Vec<NodeIndex>>
    where
        W: Fn(&Self::Edge) -> f64,
        H: Fn(&Self::Node) -> f64,
    {
        let from = self.check_index(from)?;
        let to = self.check_index(to)?;

        let n = self.order();
        let nodes = self.nodes();
        let mut g_score = vec![UNREACHED; n];
        let mut f_score = vec![UNREACHED; n];
        let mut predecessor: Vec<Option<NodeIndex>> = vec![None; n];
        let mut open = MinHeap::new();

        g_score[from] = 0.0;
        f_score[from] = heuristic(&nodes[from]);
        open.push(Reverse(HeapEntry {
            priority: f_score[from],
            node: from,
        }));

        while let Some(Reverse(HeapEntry { priority, node: u })) = open.pop() {
            // stale entry of a node whose f-score improved after it was pushed
            if priority.total_cmp(&f_score[u]).is_gt() {
                continue;
            }

            if u == to {
                let path = rebuild_path(&predecessor, from, to);
                debug!(
                    from,
                    to,
                    distance = g_score[to],
                    hops = path.len() - 1,
                    "a* found path"
                );
                return Ok(path);
            }

            for (v, edge) in self.out_edges_of(u) {
                let weight = weight_of(edge);
                if !(weight >= 0.0) {
                    return Err(GraphError::InvalidWeight { weight });
                }

                let candidate = g_score[u] + weight;
                if candidate < g_score[v] {
                    predecessor[v] = Some(u);
                    g_score[v] = candidate;
                    f_score[v] = candidate + heuristic(&nodes[v]);
                    open.push(Reverse(HeapEntry {
                        priority: f_score[v],
                        node: v,
                    }));
                }
            }
        }

        debug!(from, to, "a* found no path");
        Err(GraphError::PathNotFound)
    }

    /// Node-valued version of [`ShortestPath::astar_indices`]
    ///
    /// # Errors
    /// - [`GraphError::NodeNotFound`] if either node is not part of the graph
    /// - [`GraphError::InvalidWeight`] / [`GraphError::PathNotFound`] as in
    ///   [`ShortestPath::astar_indices`]
    fn shortest_path_astar<W, H>(
        &self,
        from: &Self::Node,
        to: &Self::Node,
        weight_of: W,
        heuristic: H,
    ) -> Result<Vec<Self::Node>>
    where
        W: Fn(&Self::Edge) -> f64,
        H: Fn(&Self::Node) -> f64,
        Self::Node: Clone,
    {
        let Endpoints(u, v) = self.endpoints_of(from, to)?;
        let path = self.astar_indices(u, v, weight_of, heuristic)?;
        Ok(self.nodes_at(path).into_iter().cloned().collect())
    }
}

impl<G: AdjacencyList> ShortestPath for G {}
