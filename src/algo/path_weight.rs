use itertools::Itertools;

use super::*;

/// Total weight of a given node sequence. Implemented for every [`AdjacencyList`].
pub trait PathWeight: AdjacencyList {
    /// Sums up the weights of all steps of `path`, where the weight of a step is the minimum
    /// weight among all parallel edges between its two nodes. Paths with fewer than two nodes
    /// weigh `0.0`.
    ///
    /// A step whose lightest edge has weight exactly `0.0` does not count as a real connection.
    ///
    /// # Errors
    /// - [`GraphError::NodeNotFound`] if a node of `path` is not part of the graph
    /// - [`GraphError::DisconnectedStep`] if two consecutive nodes are not connected
    /// - [`GraphError::ZeroWeightStep`] if the lightest edge of a step has weight `0.0`
    ///
    /// `position` of both step errors is the index of the step's first node in `path`.
    fn path_weight<W>(&self, path: &[Self::Node], weight_of: W) -> Result<f64>
    where
        W: Fn(&Self::Edge) -> f64,
    {
        let indices = path
            .iter()
            .map(|node| self.index_of(node))
            .collect::<Result<Vec<NodeIndex>>>()?;

        indices
            .iter()
            .tuple_windows()
            .enumerate()
            .try_fold(0.0, |total, (position, (&u, &v))| {
                match self.min_weight_between(u, v, &weight_of) {
                    None => Err(GraphError::DisconnectedStep { position }),
                    Some(weight) if weight == 0.0 => Err(GraphError::ZeroWeightStep { position }),
                    Some(weight) => Ok(total + weight),
                }
            })
    }
}

impl<G: AdjacencyList> PathWeight for G {}
