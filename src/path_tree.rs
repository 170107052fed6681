/*!
# Path Tree

A [`PathTree`] grows all non-cyclic paths between two nodes of a source graph, one layer of
steps at a time, and enumerates them afterwards.

```text
 source graph           path tree from s to t

 s --> a --> t            s --> a --> t
 |           ^            |           ^
 +---> b ----+            +---> b ----+
       |
       +---> c (dead end, backtracked)
```

Steps are never deleted: removing a step marks it as *removed* ([`TreeStep::removed`]). Only
*live* steps take part in the structure of the tree, so a removed step can later be revived by
adding it again.

Every node of the tree carries its distance from the source, i.e. the minimum over its live
parents of the parent's distance plus the step weight.
*/

use std::{collections::VecDeque, hash::Hash};

use fxhash::FxHashSet;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::prelude::*;

/// Default iteration budget of [`PathTreeBuilder`]
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// A step of a [`PathTree`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeStep {
    /// Weight of the step in the source graph
    pub weight: f64,
    /// Tombstone of a soft-deleted step
    pub removed: bool,
}

impl TreeStep {
    /// Creates a live step
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            removed: false,
        }
    }

    /// Returns *true* if the step was not removed
    pub fn is_live(&self) -> bool {
        !self.removed
    }
}

impl std::fmt::Display for TreeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.removed {
            write!(f, "{} (removed)", self.weight)
        } else {
            write!(f, "{}", self.weight)
        }
    }
}

/// Tree of paths rooted at a source node. See the [module documentation](self).
#[derive(Debug, Clone)]
pub struct PathTree<N> {
    graph: MappedGraph<N, TreeStep>,
    distances: Vec<f64>,
    splits: FxHashSet<NodeIndex>,
}

/// Index of the source in the internal graph
const SOURCE: NodeIndex = 0;

impl<N> PathTree<N>
where
    N: Eq + Hash + Clone,
{
    /// Creates a tree that only consists of `source`
    pub fn new(source: N) -> Self {
        Self {
            graph: MappedGraph::singleton(source),
            distances: vec![0.0],
            splits: FxHashSet::default(),
        }
    }

    /// Builds the tree of all paths from `from` to `to` in `graph`.
    /// Shorthand for `PathTreeBuilder::new(from, to).max_steps(max_steps).build(graph, weight_of)`.
    ///
    /// # Errors
    /// See [`PathTreeBuilder::build`]
    pub fn build<G, W>(
        graph: &G,
        from: &N,
        to: &N,
        max_steps: usize,
        weight_of: W,
    ) -> Result<Self>
    where
        G: AdjacencyList<Node = N>,
        W: Fn(&G::Edge) -> f64,
    {
        PathTreeBuilder::new(from.clone(), to.clone())
            .max_steps(max_steps)
            .build(graph, weight_of)
    }

    /// Returns the root of the tree
    pub fn source(&self) -> &N {
        &self.graph.nodes()[SOURCE]
    }

    /// Returns the internal graph of the tree, including removed steps
    pub fn graph(&self) -> &MappedGraph<N, TreeStep> {
        &self.graph
    }

    /// Returns *true* if `node` was ever added to the tree
    pub fn contains(&self, node: &N) -> bool {
        self.graph.has_node(node)
    }

    /// Returns the distance of `node` from the source (`f64::INFINITY` if it is currently not
    /// reached by live steps) or `None` if the node is not part of the tree
    pub fn distance_to(&self, node: &N) -> Option<f64> {
        self.graph.node_index(node).map(|u| self.distances[u])
    }

    /// Returns *true* if `node` was recorded as a split, i.e. it had more than one child when it
    /// was expanded
    pub fn is_split(&self, node: &N) -> bool {
        self.graph
            .node_index(node)
            .is_some_and(|u| self.splits.contains(&u))
    }

    /// Returns the targets of all live steps leaving `node`
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if the node is not part of the tree
    pub fn live_children(&self, node: &N) -> Result<Vec<&N>> {
        let u = self.graph.index_of(node)?;
        Ok(self.graph.nodes_at(self.live_children_of(u)))
    }

    /// Returns the sources of all live steps entering `node`
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if the node is not part of the tree
    pub fn live_parents(&self, node: &N) -> Result<Vec<&N>> {
        let u = self.graph.index_of(node)?;
        Ok(self.graph.nodes_at(self.live_parents_of(u)))
    }

    /// Returns all end nodes: nodes other than the source with a live inbound step but no live
    /// outbound step
    pub fn end_nodes(&self) -> Vec<&N> {
        self.graph.nodes_at(self.end_node_indices())
    }

    /// Adds a step `from -> to`, adding `to` to the tree if it is new. A removed step between
    /// the same nodes is revived with the new weight.
    /// The distance of `to` becomes the minimum over its live parents.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `from` is not part of the tree
    pub fn add_step(&mut self, from: &N, to: N, weight: f64) -> Result<()> {
        let u = self.graph.index_of(from)?;
        self.add_step_from(u, to, weight)?;
        Ok(())
    }

    /// Removes all steps `from -> to` and updates distances. If `to` is left without live
    /// parents, it becomes unreached and the removal continues with the steps from `to` into
    /// every child that has no other live parent. Children with another live parent stay in the
    /// tree and only have their distance recomputed.
    /// Removing a step that does not exist is a no-op.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if either node is not part of the tree
    pub fn remove_step(&mut self, from: &N, to: &N) -> Result<()> {
        let Endpoints(u, v) = self.graph.endpoints_of(from, to)?;
        self.remove_step_between(u, v);
        Ok(())
    }

    /// Prunes the dead branch ending in `node`: removes all live steps into `node` and continues
    /// upwards with every parent that is left without live children. Stops at parents that
    /// still have other live children and at the source.
    ///
    /// # Errors
    /// - [`GraphError::NodeNotFound`] if the node is not part of the tree
    /// - [`GraphError::NotDeadEnd`] if the node has live children
    pub fn backtrack_to_last_split(&mut self, node: &N) -> Result<()> {
        let u = self.graph.index_of(node)?;
        self.backtrack_from(u)
    }

    /// Enumerates all paths from the source to an end node along live steps, in source-to-end
    /// order. Paths that would visit a node twice are skipped.
    ///
    /// # Errors
    /// [`GraphError::NoEndNodes`] if the tree has no end nodes
    pub fn enumerate_paths(&self) -> Result<Vec<Vec<N>>> {
        let ends = self.end_node_indices();
        if ends.is_empty() {
            return Err(GraphError::NoEndNodes);
        }

        let mut paths = Vec::new();
        let mut discarded = 0usize;
        for end in ends {
            // partial paths are kept in end-to-source order
            let mut partials = vec![vec![end]];
            while let Some(partial) = partials.pop() {
                let head = partial[partial.len() - 1];
                if head == SOURCE {
                    paths.push(
                        self.graph
                            .nodes_at(partial.into_iter().rev())
                            .into_iter()
                            .cloned()
                            .collect_vec(),
                    );
                    continue;
                }

                let parents = self.live_parents_of(head);
                if parents.is_empty() {
                    discarded += 1;
                }
                for p in parents.into_iter().rev() {
                    if partial.contains(&p) {
                        discarded += 1;
                        continue;
                    }
                    let mut extended = partial.clone();
                    extended.push(p);
                    partials.push(extended);
                }
            }
        }

        debug!(paths = paths.len(), discarded, "enumerated path tree");
        Ok(paths)
    }

    fn live_children_of(&self, u: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .out_edges_of(u)
            .filter_map(|(v, step)| step.is_live().then_some(v))
            .unique()
            .collect_vec()
    }

    fn live_parents_of(&self, u: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .in_edges_of(u)
            .filter_map(|(p, step)| step.is_live().then_some(p))
            .unique()
            .collect_vec()
    }

    fn has_live_children(&self, u: NodeIndex) -> bool {
        self.graph.out_edges_of(u).any(|(_, step)| step.is_live())
    }

    fn has_live_parents(&self, u: NodeIndex) -> bool {
        self.graph.in_edges_of(u).any(|(_, step)| step.is_live())
    }

    fn end_node_indices(&self) -> Vec<NodeIndex> {
        self.graph
            .vertices()
            .filter(|&u| u != SOURCE && !self.has_live_children(u) && self.has_live_parents(u))
            .collect_vec()
    }

    /// Returns *true* if `ancestor` reaches `u` along live steps (or is `u` itself)
    fn is_tree_ancestor(&self, ancestor: NodeIndex, u: NodeIndex) -> bool {
        let mut seen = NodeBitSet::with_order(self.graph.order());
        let mut queue = VecDeque::from([u]);
        seen.insert_node(u);

        while let Some(v) = queue.pop_front() {
            if v == ancestor {
                return true;
            }
            for p in self.live_parents_of(v) {
                if seen.insert_node(p) {
                    queue.push_back(p);
                }
            }
        }
        false
    }

    /// Minimum over all live parents of their distance plus the step weight
    fn recompute_distance(&mut self, v: NodeIndex) {
        if v == SOURCE {
            return;
        }
        let distance = self
            .graph
            .in_edges_of(v)
            .filter(|(_, step)| step.is_live())
            .map(|(p, step)| self.distances[p] + step.weight)
            .min_by(f64::total_cmp)
            .unwrap_or(UNREACHED);
        self.distances[v] = distance;
    }

    /// Adds a step from the node at index `u` and returns the index of `to`
    fn add_step_from(&mut self, u: NodeIndex, to: N, weight: f64) -> Result<NodeIndex> {
        let v = match self.graph.node_index(&to) {
            Some(v) => v,
            None => {
                let v = self.graph.add_node(to)?;
                self.distances.push(UNREACHED);
                v
            }
        };

        self.graph.update_edge_by_index(u, v, TreeStep::new(weight))?;
        self.recompute_distance(v);
        trace!(from = u, to = v, weight, distance = self.distances[v], "added tree step");

        Ok(v)
    }

    /// Marks all steps `u -> v` as removed; returns *true* if one of them was live
    fn tombstone_steps(&mut self, u: NodeIndex, v: NodeIndex) -> bool {
        let mut removed = false;
        for step in self.graph.payloads_between_mut(u, v) {
            removed |= step.is_live();
            step.removed = true;
        }
        if removed {
            trace!(from = u, to = v, "removed tree step");
        }
        removed
    }

    fn remove_step_between(&mut self, u: NodeIndex, v: NodeIndex) {
        if !self.tombstone_steps(u, v) || v == SOURCE {
            return;
        }

        self.distances[v] = UNREACHED;
        if self.has_live_parents(v) {
            self.recompute_distance(v);
            return;
        }

        // `v` is cut off: the removal continues into every child without another live parent
        let mut cut = vec![v];
        while let Some(w) = cut.pop() {
            for c in self.live_children_of(w) {
                if c == SOURCE {
                    continue;
                }
                if self.live_parents_of(c).into_iter().any(|p| p != w) {
                    self.recompute_distance(c);
                    continue;
                }
                self.tombstone_steps(w, c);
                self.distances[c] = UNREACHED;
                cut.push(c);
            }
        }
    }

    fn backtrack_from(&mut self, u: NodeIndex) -> Result<()> {
        if self.has_live_children(u) {
            return Err(GraphError::NotDeadEnd);
        }

        let mut removed = 0usize;
        let mut dead_ends = vec![u];
        while let Some(v) = dead_ends.pop() {
            if v == SOURCE {
                continue;
            }
            for p in self.live_parents_of(v) {
                self.remove_step_between(p, v);
                removed += 1;
                if p != SOURCE && !self.has_live_children(p) {
                    dead_ends.push(p);
                }
            }
        }

        debug!(node = u, removed, "backtracked dead end");
        Ok(())
    }
}

/// Configuration for building a [`PathTree`] between two nodes of a graph
#[derive(Debug, Clone)]
pub struct PathTreeBuilder<N> {
    from: N,
    to: N,
    max_steps: usize,
}

impl<N> PathTreeBuilder<N>
where
    N: Eq + Hash + Clone,
{
    /// Creates a builder for the tree of all paths from `from` to `to`
    pub fn new(from: N, to: N) -> Self {
        Self {
            from,
            to,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Sets the maximum number of expansion layers (default: `10_000`)
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Grows the tree layer by layer. Every active node other than the target is expanded to
    /// its distinct children in `graph` whose lightest edge has a non-zero weight. A child that
    /// is already part of the tree is skipped if it is a split or an ancestor of the active node;
    /// otherwise the branches converge in it without expanding it again. An active node without
    /// children is backtracked. Finally all end nodes other than `to` are backtracked, so the
    /// live tree only contains paths into `to`.
    ///
    /// # Errors
    /// - [`GraphError::NodeNotFound`] if `from` or `to` is not part of `graph`
    /// - [`GraphError::StepLimitExceeded`] if the expansion needs more than `max_steps` layers
    pub fn build<G, W>(&self, graph: &G, weight_of: W) -> Result<PathTree<N>>
    where
        G: AdjacencyList<Node = N>,
        W: Fn(&G::Edge) -> f64,
    {
        let Endpoints(source, target) = graph.endpoints_of(&self.from, &self.to)?;
        let nodes = graph.nodes();

        let mut tree = PathTree::new(self.from.clone());
        let mut frontier = vec![source];
        let mut layers = 0usize;

        while !frontier.iter().all(|&u| u == target) {
            if layers >= self.max_steps {
                debug!(layers, frontier = frontier.len(), "path tree exceeded step limit");
                return Err(GraphError::StepLimitExceeded {
                    max_steps: self.max_steps,
                });
            }
            layers += 1;

            let mut next = Vec::new();
            for &u in &frontier {
                if u == target {
                    continue;
                }
                let active = tree.graph.index_of(&nodes[u])?;

                let children = graph
                    .children_of(u)
                    .unique()
                    .filter_map(|v| {
                        graph
                            .min_weight_between(u, v, &weight_of)
                            .filter(|&w| w != 0.0)
                            .map(|w| (v, w))
                    })
                    .filter(|&(v, _)| match tree.graph.node_index(&nodes[v]) {
                        Some(existing) => {
                            !tree.splits.contains(&existing)
                                && !tree.is_tree_ancestor(existing, active)
                        }
                        None => true,
                    })
                    .collect_vec();

                if children.is_empty() {
                    trace!(node = active, "dead end in path tree");
                    tree.backtrack_from(active)?;
                    continue;
                }
                if children.len() > 1 {
                    tree.splits.insert(active);
                }

                for (v, weight) in children {
                    let is_new = !tree.contains(&nodes[v]);
                    tree.add_step_from(active, nodes[v].clone(), weight)?;
                    if is_new {
                        next.push(v);
                    }
                }
            }

            trace!(layer = layers, frontier = next.len(), "expanded path tree layer");
            frontier = next;
        }

        let target_in_tree = tree.graph.node_index(&self.to);
        for end in tree.end_node_indices() {
            if Some(end) != target_in_tree {
                tree.backtrack_from(end)?;
            }
        }

        debug!(
            layers,
            nodes = tree.graph.order(),
            splits = tree.splits.len(),
            reached = target_in_tree.is_some_and(|t| tree.has_live_parents(t)),
            "built path tree"
        );
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::PathWeight;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn graph_of(
        nodes: &[&'static str],
        edges: &[(&'static str, &'static str, f64)],
    ) -> MappedGraph<&'static str, f64> {
        MappedGraph::from_edges(nodes.iter().copied(), edges.iter().copied()).unwrap()
    }

    #[test]
    fn diamond() {
        let graph = graph_of(
            &["s", "a", "b", "t"],
            &[("s", "a", 1.0), ("s", "b", 2.0), ("a", "t", 3.0), ("b", "t", 1.0)],
        );
        let tree = PathTree::build(&graph, &"s", &"t", 100, |w| *w).unwrap();

        assert_eq!(tree.source(), &"s");
        assert!(tree.is_split(&"s"));
        assert!(!tree.is_split(&"a"));
        assert_eq!(tree.end_nodes(), vec![&"t"]);
        assert_eq!(tree.distance_to(&"t"), Some(3.0));
        assert_eq!(tree.distance_to(&"z"), None);
        assert_eq!(tree.live_parents(&"t").unwrap(), vec![&"a", &"b"]);
        assert_eq!(
            tree.enumerate_paths().unwrap(),
            vec![vec!["s", "a", "t"], vec!["s", "b", "t"]]
        );
    }

    #[test]
    fn single_path_and_backtrack() {
        let graph = graph_of(
            &["s", "a", "b", "t"],
            &[("s", "a", 1.0), ("a", "b", 1.0), ("b", "t", 1.0)],
        );
        let mut tree = PathTree::build(&graph, &"s", &"t", 100, |w| *w).unwrap();
        assert_eq!(tree.enumerate_paths().unwrap(), vec![vec!["s", "a", "b", "t"]]);
        assert_eq!(tree.distance_to(&"t"), Some(3.0));

        assert_eq!(tree.backtrack_to_last_split(&"b"), Err(GraphError::NotDeadEnd));

        tree.remove_step(&"b", &"t").unwrap();
        assert_eq!(tree.distance_to(&"t"), Some(f64::INFINITY));
        tree.backtrack_to_last_split(&"b").unwrap();

        assert!(tree.graph().payloads().all(|step| step.removed));
        assert!(tree.end_nodes().is_empty());
        assert_eq!(tree.enumerate_paths(), Err(GraphError::NoEndNodes));
        assert!(tree.contains(&"a"));
        assert_eq!(tree.distance_to(&"a"), Some(f64::INFINITY));
    }

    #[test]
    fn step_limit() {
        let graph = graph_of(&["s", "a", "t"], &[("s", "a", 1.0), ("a", "t", 1.0)]);
        assert_eq!(
            PathTree::build(&graph, &"s", &"t", 0, |w| *w).unwrap_err(),
            GraphError::StepLimitExceeded { max_steps: 0 }
        );
        assert_eq!(
            PathTreeBuilder::new("s", "t")
                .max_steps(1)
                .build(&graph, |w| *w)
                .unwrap_err(),
            GraphError::StepLimitExceeded { max_steps: 1 }
        );
        assert!(
            PathTreeBuilder::new("s", "t")
                .max_steps(2)
                .build(&graph, |w| *w)
                .is_ok()
        );
    }

    #[test]
    fn missing_endpoints() {
        let graph = graph_of(&["s", "t"], &[("s", "t", 1.0)]);
        assert_eq!(
            PathTree::build(&graph, &"s", &"x", 10, |w| *w).unwrap_err(),
            GraphError::NodeNotFound
        );
        assert_eq!(
            PathTree::build(&graph, &"x", &"t", 10, |w| *w).unwrap_err(),
            GraphError::NodeNotFound
        );
    }

    #[test]
    fn trivial_query() {
        let graph = graph_of(&["s", "t"], &[("s", "t", 1.0)]);
        let tree = PathTree::build(&graph, &"s", &"s", 0, |w| *w).unwrap();
        assert_eq!(tree.graph().order(), 1);
        assert_eq!(tree.enumerate_paths(), Err(GraphError::NoEndNodes));
    }

    #[test]
    fn dead_branches_are_pruned() {
        let graph = graph_of(
            &["s", "a", "b", "c", "d", "t"],
            &[
                ("s", "a", 1.0),
                ("s", "b", 1.0),
                ("a", "t", 1.0),
                ("b", "c", 1.0),
                ("c", "d", 1.0),
                ("b", "t", 0.0),
            ],
        );
        let tree = PathTree::build(&graph, &"s", &"t", 100, |w| *w).unwrap();

        assert_eq!(tree.end_nodes(), vec![&"t"]);
        assert!(tree.live_children(&"b").unwrap().is_empty());
        assert_eq!(tree.live_children(&"s").unwrap(), vec![&"a"]);
        assert_eq!(tree.enumerate_paths().unwrap(), vec![vec!["s", "a", "t"]]);
    }

    #[test]
    fn unreachable_target() {
        let graph = graph_of(
            &["s", "a", "b", "t"],
            &[("s", "a", 1.0), ("s", "b", 1.0), ("t", "s", 1.0)],
        );
        let tree = PathTree::build(&graph, &"s", &"t", 100, |w| *w).unwrap();
        assert!(tree.end_nodes().is_empty());
        assert_eq!(tree.enumerate_paths(), Err(GraphError::NoEndNodes));
    }

    #[test]
    fn cycles_and_bidirectional_edges() {
        let graph = graph_of(
            &["s", "a", "b", "c", "t"],
            &[
                ("s", "a", 1.0),
                ("a", "s", 1.0),
                ("a", "b", 1.0),
                ("b", "a", 1.0),
                ("b", "c", 1.0),
                ("c", "a", 1.0),
                ("c", "t", 1.0),
                ("a", "t", 5.0),
            ],
        );
        let tree = PathTree::build(&graph, &"s", &"t", 100, |w| *w).unwrap();
        let paths = tree.enumerate_paths().unwrap();

        assert!(!paths.is_empty());
        for path in &paths {
            assert_eq!(path.first(), Some(&"s"));
            assert_eq!(path.last(), Some(&"t"));
            assert_eq!(path.iter().unique().count(), path.len());
            assert!(graph.path_weight(path, |w| *w).is_ok());
        }
        assert!(paths.contains(&vec!["s", "a", "t"]));
    }

    #[test]
    fn random_grids_terminate_with_simple_paths() {
        let rng = &mut Pcg64Mcg::seed_from_u64(17);

        for _ in 0..10 {
            let n = 4;
            let mut graph = MappedGraph::<(u8, u8), f64>::new();
            graph
                .add_nodes((0..n).flat_map(|x| (0..n).map(move |y| (x, y))))
                .unwrap();
            for x in 0..n {
                for y in 0..n {
                    if x + 1 < n && rng.random_bool(0.7) {
                        graph.add_edge(&(x, y), &(x + 1, y), 1.0).unwrap();
                    }
                    if y + 1 < n && rng.random_bool(0.7) {
                        graph.add_edge(&(x, y), &(x, y + 1), 1.0).unwrap();
                    }
                    if x > 0 && rng.random_bool(0.3) {
                        graph.add_edge(&(x, y), &(x - 1, y), 1.0).unwrap();
                    }
                }
            }

            let target = (n - 1, n - 1);
            let tree = PathTree::build(&graph, &(0, 0), &target, 1_000, |w| *w).unwrap();
            match tree.enumerate_paths() {
                Ok(paths) => {
                    for path in paths {
                        assert_eq!(path.last(), Some(&target));
                        assert_eq!(path.iter().unique().count(), path.len());
                        assert!(graph.path_weight(&path, |w| *w).is_ok());
                    }
                }
                Err(err) => assert_eq!(err, GraphError::NoEndNodes),
            }
        }
    }

    #[test]
    fn manual_steps() {
        let mut tree = PathTree::new('s');
        tree.add_step(&'s', 'a', 2.0).unwrap();
        tree.add_step(&'s', 'b', 1.0).unwrap();
        tree.add_step(&'a', 'c', 1.0).unwrap();
        tree.add_step(&'b', 'c', 5.0).unwrap();
        tree.add_step(&'c', 'd', 1.0).unwrap();
        assert_eq!(tree.add_step(&'x', 'y', 1.0), Err(GraphError::NodeNotFound));

        assert_eq!(tree.distance_to(&'c'), Some(3.0));
        assert_eq!(tree.distance_to(&'d'), Some(4.0));

        // `c` keeps a live parent
        tree.remove_step(&'a', &'c').unwrap();
        assert_eq!(tree.distance_to(&'c'), Some(6.0));
        assert_eq!(tree.live_parents(&'c').unwrap(), vec![&'b']);

        // now `c` and `d` are cut off
        tree.remove_step(&'b', &'c').unwrap();
        assert_eq!(tree.distance_to(&'c'), Some(f64::INFINITY));
        assert_eq!(tree.distance_to(&'d'), Some(f64::INFINITY));
        assert!(tree.live_parents(&'d').unwrap().is_empty());
        assert_eq!(tree.end_nodes(), vec![&'a', &'b']);

        // no-op for a missing step, error for missing nodes
        tree.remove_step(&'a', &'b').unwrap();
        assert_eq!(tree.remove_step(&'a', &'x'), Err(GraphError::NodeNotFound));

        // reviving a removed step does not revive the steps below it
        tree.add_step(&'a', 'c', 0.5).unwrap();
        assert_eq!(tree.distance_to(&'c'), Some(2.5));
        assert_eq!(tree.distance_to(&'d'), Some(f64::INFINITY));
        assert_eq!(tree.graph().size(), 5);
        assert_eq!(
            tree.enumerate_paths().unwrap(),
            vec![vec!['s', 'b'], vec!['s', 'a', 'c']]
        );
    }

    #[test]
    fn removal_cuts_off_descendants() {
        let mut tree = PathTree::new('s');
        tree.add_step(&'s', 'a', 1.0).unwrap();
        tree.add_step(&'a', 'b', 1.0).unwrap();
        tree.remove_step(&'s', &'a').unwrap();

        assert!(tree.end_nodes().is_empty());
        assert!(tree.live_parents(&'b').unwrap().is_empty());
        assert!(tree.graph().payloads().all(|step| step.removed));
        assert_eq!(tree.enumerate_paths(), Err(GraphError::NoEndNodes));

        //  s -> a -> b -> d
        //  |         ^
        //  +--> c ---+
        let mut tree = PathTree::new('s');
        tree.add_step(&'s', 'a', 1.0).unwrap();
        tree.add_step(&'a', 'b', 1.0).unwrap();
        tree.add_step(&'s', 'c', 3.0).unwrap();
        tree.add_step(&'c', 'b', 3.0).unwrap();
        tree.add_step(&'b', 'd', 1.0).unwrap();
        assert_eq!(tree.distance_to(&'b'), Some(2.0));

        tree.remove_step(&'s', &'a').unwrap();
        assert_eq!(tree.distance_to(&'a'), Some(f64::INFINITY));
        assert_eq!(tree.distance_to(&'b'), Some(6.0));
        assert_eq!(tree.live_parents(&'b').unwrap(), vec![&'a', &'c']);
        assert_eq!(tree.live_children(&'b').unwrap(), vec![&'d']);
        assert_eq!(tree.end_nodes(), vec![&'d']);
        assert_eq!(
            tree.enumerate_paths().unwrap(),
            vec![vec!['s', 'c', 'b', 'd']]
        );

        // a step back into the source never cuts it off
        tree.add_step(&'d', 's', 1.0).unwrap();
        tree.remove_step(&'d', &'s').unwrap();
        assert_eq!(tree.distance_to(&'s'), Some(0.0));
        assert_eq!(tree.live_children(&'s').unwrap(), vec![&'c']);
    }

    #[test]
    fn backtrack_stops_at_split() {
        let mut tree = PathTree::new(0u32);
        tree.add_step(&0, 1, 1.0).unwrap();
        tree.add_step(&1, 2, 1.0).unwrap();
        tree.add_step(&1, 3, 1.0).unwrap();
        tree.add_step(&3, 4, 1.0).unwrap();

        tree.backtrack_to_last_split(&4).unwrap();
        assert_eq!(tree.live_children(&1).unwrap(), vec![&2]);
        assert!(tree.live_parents(&4).unwrap().is_empty());
        assert!(tree.live_parents(&3).unwrap().is_empty());
        assert_eq!(tree.live_parents(&2).unwrap(), vec![&1]);
        assert_eq!(tree.end_nodes(), vec![&2]);

        assert_eq!(tree.backtrack_to_last_split(&9), Err(GraphError::NodeNotFound));
        assert_eq!(tree.backtrack_to_last_split(&1), Err(GraphError::NotDeadEnd));
    }
}
