use std::{collections::VecDeque, ops::Range};

use itertools::Itertools;

use crate::prelude::*;

/// Fixes the types of node values and edge payloads of a graph
pub trait GraphType {
    /// Type of the (distinct) node values
    type Node;

    /// Type of the payload attached to every edge
    type Edge;
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder: GraphType {
    /// Returns all nodes in index order
    fn nodes(&self) -> &[Self::Node];

    /// Returns the number of nodes of the graph
    fn order(&self) -> NumNodes {
        self.nodes().len()
    }

    /// Returns the range of all node indices `0..order`
    fn vertices(&self) -> Range<NodeIndex> {
        0..self.order()
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.order() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph (parallel edges are counted individually)
    fn size(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn has_no_edges(&self) -> bool {
        self.size() == 0
    }
}

/// Translation between node values and node indices
pub trait NodeQuery: GraphNodeOrder {
    /// Returns the index of `node` or `None` if it is not part of the graph.
    /// Absence is a regular outcome and therefore not an error.
    fn node_index(&self, node: &Self::Node) -> Option<NodeIndex>;

    /// Returns *true* if `node` is part of the graph
    fn has_node(&self, node: &Self::Node) -> bool {
        self.node_index(node).is_some()
    }

    /// Returns the node at `index`.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `index >= order`
    fn node(&self, index: NodeIndex) -> Result<&Self::Node> {
        self.nodes().get(index).ok_or(GraphError::IndexOutOfRange {
            index,
            order: self.order(),
        })
    }

    /// Returns the index of `node`.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if the node is not part of the graph
    fn index_of(&self, node: &Self::Node) -> Result<NodeIndex> {
        self.node_index(node).ok_or(GraphError::NodeNotFound)
    }

    /// Returns the indices of both endpoints of a (possible) edge `from -> to`.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if either node is not part of the graph
    fn endpoints_of(&self, from: &Self::Node, to: &Self::Node) -> Result<Endpoints> {
        Ok(Endpoints(self.index_of(from)?, self.index_of(to)?))
    }

    /// Returns `index` if it is a valid node index.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `index >= order`
    fn check_index(&self, index: NodeIndex) -> Result<NodeIndex> {
        if index < self.order() {
            Ok(index)
        } else {
            Err(GraphError::IndexOutOfRange {
                index,
                order: self.order(),
            })
        }
    }

    /// Maps indices to node values.
    /// ** Panics if any index is `>= order` **
    fn nodes_at<I>(&self, indices: I) -> Vec<&Self::Node>
    where
        I: IntoIterator<Item = NodeIndex>,
    {
        let nodes = self.nodes();
        indices.into_iter().map(|u| &nodes[u]).collect_vec()
    }
}

/// Traits pertaining getters for neighborhoods & edges.
///
/// The required method and the methods taking raw indices without returning a `Result` panic on
/// invalid indices; they are the building blocks of algorithms which validated their input
/// beforehand. All other methods validate their arguments.
pub trait AdjacencyList: NodeQuery + GraphEdgeOrder {
    /// Returns an iterator over `(target, payload)` of all outgoing edges of `u` in insertion
    /// order.
    /// ** Panics if `u >= order` **
    fn out_edges_of(&self, u: NodeIndex) -> impl Iterator<Item = (NodeIndex, &Self::Edge)> + '_;

    /// Returns the number of outgoing edges of `u`.
    /// ** Panics if `u >= order` **
    fn out_degree_of(&self, u: NodeIndex) -> NumNodes {
        self.out_edges_of(u).count()
    }

    /// Returns an iterator over the targets of all outgoing edges of `u` (one entry per edge).
    /// ** Panics if `u >= order` **
    fn children_of(&self, u: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.out_edges_of(u).map(|(v, _)| v)
    }

    /// Returns an iterator over `(source, payload)` of all incoming edges of `u`,
    /// ordered by source index first and insertion order second.
    /// Scans all nodes and is therefore costly.
    /// ** Panics if `u >= order` **
    fn in_edges_of(&self, u: NodeIndex) -> impl Iterator<Item = (NodeIndex, &Self::Edge)> + '_ {
        assert!(u < self.order());
        self.vertices().flat_map(move |p| {
            self.out_edges_of(p)
                .filter_map(move |(v, e)| (v == u).then_some((p, e)))
        })
    }

    /// Returns an iterator over the sources of all incoming edges of `u` (one entry per edge).
    /// ** Panics if `u >= order` **
    fn parents_of(&self, u: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.in_edges_of(u).map(|(p, _)| p)
    }

    /// Returns an iterator over the payloads of all edges `u -> v`.
    /// ** Panics if `u >= order` **
    fn payloads_between(
        &self,
        u: NodeIndex,
        v: NodeIndex,
    ) -> impl Iterator<Item = &Self::Edge> + '_ {
        self.out_edges_of(u).filter_map(move |(w, e)| (w == v).then_some(e))
    }

    /// Returns *true* if there is at least one edge `u -> v`.
    /// ** Panics if `u >= order` **
    fn has_edge(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.children_of(u).contains(&v)
    }

    /// Returns the smallest weight among all parallel edges `u -> v` or `None` if there is no
    /// such edge.
    /// ** Panics if `u >= order` **
    fn min_weight_between<W>(&self, u: NodeIndex, v: NodeIndex, weight_of: W) -> Option<f64>
    where
        W: Fn(&Self::Edge) -> f64,
    {
        self.payloads_between(u, v)
            .map(weight_of)
            .min_by(f64::total_cmp)
    }

    /// Returns an iterator over all edges of the graph in adjacency storage order
    fn edges(&self) -> impl Iterator<Item = (Endpoints, &Self::Edge)> + '_ {
        self.vertices().flat_map(move |u| {
            self.out_edges_of(u)
                .map(move |(v, e)| (Endpoints(u, v), e))
        })
    }

    /// Returns the targets of all outgoing edges of the node at index `u`.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `u >= order`
    fn child_indices(&self, u: NodeIndex) -> Result<Vec<NodeIndex>> {
        let u = self.check_index(u)?;
        Ok(self.children_of(u).collect_vec())
    }

    /// Returns the sources of all incoming edges of the node at index `u`.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `u >= order`
    fn parent_indices(&self, u: NodeIndex) -> Result<Vec<NodeIndex>> {
        let u = self.check_index(u)?;
        Ok(self.parents_of(u).collect_vec())
    }

    /// Returns the payloads of all edges `u -> v`; empty if the nodes are not connected.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `u >= order` or `v >= order`
    fn edges_between_indices(&self, u: NodeIndex, v: NodeIndex) -> Result<Vec<&Self::Edge>> {
        let u = self.check_index(u)?;
        let v = self.check_index(v)?;
        Ok(self.payloads_between(u, v).collect_vec())
    }

    /// Returns *true* if there is at least one edge `u -> v`.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `u >= order` or `v >= order`
    fn is_connected_indices(&self, u: NodeIndex, v: NodeIndex) -> Result<bool> {
        let u = self.check_index(u)?;
        let v = self.check_index(v)?;
        Ok(self.has_edge(u, v))
    }

    /// Returns `(payload, target)` for all outgoing edges of the node at index `u`.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `u >= order`
    fn edges_from_index(&self, u: NodeIndex) -> Result<Vec<(&Self::Edge, NodeIndex)>> {
        let u = self.check_index(u)?;
        Ok(self.out_edges_of(u).map(|(v, e)| (e, v)).collect_vec())
    }

    /// Returns `(payload, source)` for all incoming edges of the node at index `u`.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `u >= order`
    fn edges_to_index(&self, u: NodeIndex) -> Result<Vec<(&Self::Edge, NodeIndex)>> {
        let u = self.check_index(u)?;
        Ok(self.in_edges_of(u).map(|(p, e)| (e, p)).collect_vec())
    }

    /// Returns all nodes reachable from `u` via one or more edges, each exactly once, in the order
    /// they are discovered by a breadth-first expansion. `u` itself is only included if it lies on
    /// a cycle.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `u >= order`
    fn descendant_indices(&self, u: NodeIndex) -> Result<Vec<NodeIndex>> {
        let u = self.check_index(u)?;

        let mut seen = NodeBitSet::with_order(self.order());
        let mut queue: VecDeque<NodeIndex> = self.children_of(u).collect();
        let mut descendants = Vec::new();

        while let Some(v) = queue.pop_front() {
            if !seen.insert_node(v) {
                continue;
            }
            descendants.push(v);
            queue.extend(self.children_of(v).filter(|&w| !seen.contains_node(w)));
        }

        Ok(descendants)
    }

    /// Returns the targets of all outgoing edges of `node` (one entry per edge).
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if the node is not part of the graph
    fn child_nodes(&self, node: &Self::Node) -> Result<Vec<&Self::Node>> {
        let u = self.index_of(node)?;
        Ok(self.nodes_at(self.children_of(u)))
    }

    /// Returns the sources of all incoming edges of `node` (one entry per edge).
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if the node is not part of the graph
    fn parent_nodes(&self, node: &Self::Node) -> Result<Vec<&Self::Node>> {
        let u = self.index_of(node)?;
        Ok(self.nodes_at(self.parents_of(u)))
    }

    /// Returns `(payload, target)` for all outgoing edges of `node`.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if the node is not part of the graph
    fn edges_from(&self, node: &Self::Node) -> Result<Vec<(&Self::Edge, &Self::Node)>> {
        let u = self.index_of(node)?;
        let nodes = self.nodes();
        Ok(self
            .out_edges_of(u)
            .map(|(v, e)| (e, &nodes[v]))
            .collect_vec())
    }

    /// Returns `(payload, source)` for all incoming edges of `node`.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if the node is not part of the graph
    fn edges_to(&self, node: &Self::Node) -> Result<Vec<(&Self::Edge, &Self::Node)>> {
        let u = self.index_of(node)?;
        let nodes = self.nodes();
        Ok(self
            .in_edges_of(u)
            .map(|(p, e)| (e, &nodes[p]))
            .collect_vec())
    }

    /// Returns the payloads of all direct edges `from -> to`.
    /// The list is empty (and *not* an error) if both nodes exist but are not connected.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if either node is not part of the graph
    fn edges_between(&self, from: &Self::Node, to: &Self::Node) -> Result<Vec<&Self::Edge>> {
        let Endpoints(u, v) = self.endpoints_of(from, to)?;
        Ok(self.payloads_between(u, v).collect_vec())
    }

    /// Returns *true* if there is at least one direct edge `from -> to`.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if either node is not part of the graph
    fn is_connected(&self, from: &Self::Node, to: &Self::Node) -> Result<bool> {
        let Endpoints(u, v) = self.endpoints_of(from, to)?;
        Ok(self.has_edge(u, v))
    }

    /// Node-valued version of [`AdjacencyList::descendant_indices`].
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if the node is not part of the graph
    fn descendants(&self, node: &Self::Node) -> Result<Vec<&Self::Node>> {
        let u = self.index_of(node)?;
        Ok(self.nodes_at(self.descendant_indices(u)?))
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph without nodes
    fn new() -> Self;
}

/// Provides functions to insert nodes and to insert/update edges.
///
/// Graphs are accretive: there is no way to delete a single node or edge.
pub trait GraphEditing: NodeQuery {
    /// Appends a node without edges and returns its index.
    ///
    /// # Errors
    /// [`GraphError::DuplicateNode`] if an equal node is already part of the graph
    fn add_node(&mut self, node: Self::Node) -> Result<NodeIndex>;

    /// Adds all nodes in order and stops at the first failure
    ///
    /// # Errors
    /// [`GraphError::DuplicateNode`] if a node is already part of the graph
    fn add_nodes<I>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Node>,
    {
        for node in nodes {
            self.add_node(node)?;
        }
        Ok(())
    }

    /// Replaces the node at `index` and keeps all of its edges.
    ///
    /// # Errors
    /// - [`GraphError::IndexOutOfRange`] if `index >= order`
    /// - [`GraphError::DuplicateNode`] if an equal node is already part of the graph
    fn set_node(&mut self, index: NodeIndex, node: Self::Node) -> Result<()>;

    /// Replaces all nodes and removes all edges. The iteration order of `nodes` determines the
    /// new node indices.
    ///
    /// # Errors
    /// [`GraphError::DuplicateNode`] if `nodes` contains equal values; the graph is left unchanged.
    fn set_nodes<I>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Node>;

    /// Adds the edge `u -> v`. Parallel edges are permitted.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `u >= order` or `v >= order`
    fn add_edge_by_index(&mut self, u: NodeIndex, v: NodeIndex, edge: Self::Edge) -> Result<()>;

    /// Replaces the payload of the *first* edge `u -> v` or adds the edge if there is none.
    ///
    /// # Errors
    /// [`GraphError::IndexOutOfRange`] if `u >= order` or `v >= order`
    fn update_edge_by_index(&mut self, u: NodeIndex, v: NodeIndex, edge: Self::Edge)
    -> Result<()>;

    /// Adds the edge `from -> to`. Parallel edges are permitted.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if either node is not part of the graph
    fn add_edge(&mut self, from: &Self::Node, to: &Self::Node, edge: Self::Edge) -> Result<()> {
        let Endpoints(u, v) = self.endpoints_of(from, to)?;
        self.add_edge_by_index(u, v, edge)
    }

    /// Replaces the payload of the *first* edge `from -> to` or adds the edge if there is none.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if either node is not part of the graph
    fn update_edge(&mut self, from: &Self::Node, to: &Self::Node, edge: Self::Edge) -> Result<()> {
        let Endpoints(u, v) = self.endpoints_of(from, to)?;
        self.update_edge_by_index(u, v, edge)
    }
}

/// A super trait for creating a graph from scratch from a set of nodes and edges
pub trait GraphFromScratch: GraphType + Sized {
    /// Creates a graph from an iterator over nodes and an iterator over `(from, to, payload)`.
    ///
    /// # Errors
    /// - [`GraphError::DuplicateNode`] if `nodes` contains equal values
    /// - [`GraphError::NodeNotFound`] if an edge references a node not in `nodes`
    fn from_edges<I, J>(nodes: I, edges: J) -> Result<Self>
    where
        I: IntoIterator<Item = Self::Node>,
        J: IntoIterator<Item = (Self::Node, Self::Node, Self::Edge)>;
}

impl<G> GraphFromScratch for G
where
    G: GraphNew + GraphEditing,
{
    fn from_edges<I, J>(nodes: I, edges: J) -> Result<Self>
    where
        I: IntoIterator<Item = Self::Node>,
        J: IntoIterator<Item = (Self::Node, Self::Node, Self::Edge)>,
    {
        let mut graph = Self::new();
        graph.add_nodes(nodes)?;
        for (from, to, edge) in edges {
            graph.add_edge(&from, &to, edge)?;
        }
        Ok(graph)
    }
}
