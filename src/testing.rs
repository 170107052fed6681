/// Runs the shared test-suite of the graph store against a representation.
///
/// `$prepare` is called on every graph after it was populated and before it is queried, e.g. to
/// rebuild an explicit node index.
macro_rules! test_graph_store {
    ($env:ident, $graph:ident, $prepare:expr) => {
        #[cfg(test)]
        mod $env {
            use crate::{ops::*, repr::*, error::GraphError, NodeIndex, NumNodes, NumEdges};
            use rand::{Rng, SeedableRng, seq::SliceRandom};
            use rand_pcg::Pcg64Mcg;
            use itertools::Itertools;

            type TestGraph = $graph<u32, u32>;

            /// Distinct, shuffled node values for `n` nodes
            fn random_nodes<R: Rng>(rng: &mut R, n: NumNodes) -> Vec<u32> {
                let mut nodes = (0..n as u32).map(|i| 7 * i + 3).collect_vec();
                nodes.shuffle(rng);
                nodes
            }

            /// At most `m` random edges `(u, v, payload)` for node indices `0..n`;
            /// may contain loops and parallel edges
            fn random_edges<R: Rng>(
                rng: &mut R,
                n: NumNodes,
                m: NumEdges,
            ) -> Vec<(NodeIndex, NodeIndex, u32)> {
                (0..m)
                    .map(|i| (rng.random_range(0..n), rng.random_range(0..n), i as u32))
                    .collect_vec()
            }

            fn build(nodes: &[u32], edges: &[(NodeIndex, NodeIndex, u32)]) -> TestGraph {
                let mut graph = TestGraph::new();
                graph.add_nodes(nodes.iter().copied()).unwrap();
                for &(u, v, e) in edges {
                    graph.add_edge(&nodes[u], &nodes[v], e).unwrap();
                }
                let prepare = $prepare;
                prepare(&mut graph);
                graph
            }

            #[test]
            fn graph_new() {
                let graph = TestGraph::new();
                assert_eq!(graph.order(), 0);
                assert_eq!(graph.size(), 0);
                assert!(graph.is_empty());
                assert!(graph.has_no_edges());
                assert_eq!(graph.node_index(&3), None);
            }

            #[test]
            fn node_lookup() {
                let rng = &mut Pcg64Mcg::seed_from_u64(1);

                for n in [1 as NumNodes, 10, 50] {
                    let nodes = random_nodes(rng, n);
                    let mut graph = build(&nodes, &[]);

                    assert_eq!(graph.order(), n);
                    assert_eq!(graph.nodes(), nodes.as_slice());
                    for (i, node) in nodes.iter().enumerate() {
                        assert_eq!(graph.node_index(node), Some(i));
                        assert_eq!(graph.node(i), Ok(node));
                    }
                    assert_eq!(graph.node_index(&1), None);
                    assert_eq!(graph.index_of(&1), Err(GraphError::NodeNotFound));
                    assert_eq!(
                        graph.node(n),
                        Err(GraphError::IndexOutOfRange { index: n, order: n })
                    );

                    let existing = nodes[n / 2];
                    assert_eq!(
                        graph.add_node(existing),
                        Err(GraphError::DuplicateNode { index: n / 2 })
                    );
                    assert_eq!(graph.order(), n);
                }
            }

            #[test]
            fn adjacency_list() {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);

                for n in [10 as NumNodes, 20, 50] {
                    for m in [n * 2, n * 5] {
                        for _ in 0..5 {
                            let nodes = random_nodes(rng, n);
                            let edges = random_edges(rng, n, m);
                            let graph = build(&nodes, &edges);

                            assert_eq!(graph.size(), m);

                            for u in 0..n {
                                let children = edges
                                    .iter()
                                    .filter(|&&(s, _, _)| s == u)
                                    .map(|&(_, t, _)| &nodes[t])
                                    .collect_vec();
                                assert_eq!(graph.child_nodes(&nodes[u]).unwrap(), children);
                                assert_eq!(graph.out_degree_of(u), children.len());

                                // parents are ordered by source index first
                                let parents = edges
                                    .iter()
                                    .filter(|&&(_, t, _)| t == u)
                                    .sorted_by_key(|&&(s, _, _)| s)
                                    .map(|&(s, _, _)| &nodes[s])
                                    .collect_vec();
                                assert_eq!(graph.parent_nodes(&nodes[u]).unwrap(), parents);
                            }

                            for _ in 0..20 {
                                let u = rng.random_range(0..n);
                                let v = rng.random_range(0..n);
                                let payloads = edges
                                    .iter()
                                    .filter(|&&(s, t, _)| s == u && t == v)
                                    .map(|(_, _, e)| e)
                                    .collect_vec();

                                assert_eq!(
                                    graph.edges_between(&nodes[u], &nodes[v]).unwrap(),
                                    payloads
                                );
                                assert_eq!(
                                    graph.is_connected(&nodes[u], &nodes[v]).unwrap(),
                                    !payloads.is_empty()
                                );
                            }
                        }
                    }
                }
            }

            #[test]
            fn edge_editing() {
                let rng = &mut Pcg64Mcg::seed_from_u64(5);

                for n in [5 as NumNodes, 20] {
                    let nodes = random_nodes(rng, n);
                    let mut edges = random_edges(rng, n, 3 * n);
                    let mut graph = build(&nodes, &edges);

                    for i in 0..(2 * n) as u32 {
                        let u = rng.random_range(0..n);
                        let v = rng.random_range(0..n);
                        let payload = 1000 + i;

                        match edges.iter_mut().find(|(s, t, _)| *s == u && *t == v) {
                            Some(edge) => edge.2 = payload,
                            None => edges.push((u, v, payload)),
                        }
                        graph.update_edge(&nodes[u], &nodes[v], payload).unwrap();

                        assert_eq!(graph.size(), edges.len());
                        assert_eq!(
                            graph.edges_between(&nodes[u], &nodes[v]).unwrap()[0],
                            &payload
                        );
                    }

                    assert_eq!(
                        graph.add_edge(&nodes[0], &1, 0),
                        Err(GraphError::NodeNotFound)
                    );
                    assert_eq!(
                        graph.add_edge_by_index(0, n, 0),
                        Err(GraphError::IndexOutOfRange { index: n, order: n })
                    );
                    assert_eq!(graph.size(), edges.len());
                }
            }

            #[test]
            fn replace_nodes() {
                let rng = &mut Pcg64Mcg::seed_from_u64(7);
                let nodes = random_nodes(rng, 10);
                let edges = random_edges(rng, 10, 30);
                let mut graph = build(&nodes, &edges);

                assert_eq!(
                    graph.set_nodes([1, 2, 1]),
                    Err(GraphError::DuplicateNode { index: 0 })
                );
                assert_eq!(graph.nodes(), nodes.as_slice());
                assert_eq!(graph.size(), 30);

                graph.set_nodes([2, 1, 0]).unwrap();
                let prepare = $prepare;
                prepare(&mut graph);

                assert_eq!(graph.order(), 3);
                assert_eq!(graph.size(), 0);
                assert_eq!(graph.node_index(&0), Some(2));
                assert_eq!(graph.node_index(&nodes[0]), None);
                assert!(graph.child_nodes(&1).unwrap().is_empty());
            }
        }
    };
}

pub(crate) use test_graph_store;
