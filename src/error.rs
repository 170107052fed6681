/*!
# Errors

Every expected failure of a graph operation is reported as a [`GraphError`]. Absence of a node in
[`NodeQuery::node_index`](crate::ops::NodeQuery::node_index) is *not* an error but a regular
`None`.
*/

use thiserror::Error;

use crate::NodeIndex;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, GraphError>;

/// All recoverable failures of graph operations and algorithms
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A node equal to the one being inserted already exists at `index`
    #[error("nodes must be unique: an equal node already exists at index {index}")]
    DuplicateNode { index: NodeIndex },

    /// An operation referenced a node value that is not part of the graph
    #[error("node could not be found in the graph")]
    NodeNotFound,

    /// An index-based accessor received an index outside of `0..order`
    #[error("node index {index} out of bounds for graph of order {order}")]
    IndexOutOfRange { index: NodeIndex, order: usize },

    /// A shortest-path search encountered an edge weight it cannot handle
    #[error("invalid edge weight {weight}: shortest path search expects positive weights")]
    InvalidWeight { weight: f64 },

    /// There is no path between the requested endpoints
    #[error("could not find a path")]
    PathNotFound,

    /// Two consecutive nodes of a path are not connected by an edge
    #[error("step {position} of the path connects unconnected nodes")]
    DisconnectedStep { position: usize },

    /// Two consecutive nodes of a path are only connected by zero-weight edges
    #[error("step {position} of the path has zero weight")]
    ZeroWeightStep { position: usize },

    /// An iterative algorithm needed more than `max_steps` iterations
    #[error("exceeded the limit of {max_steps} steps")]
    StepLimitExceeded { max_steps: usize },

    /// A path tree has no end nodes to enumerate paths to
    #[error("path tree has no end nodes")]
    NoEndNodes,

    /// Only dead ends (nodes without live children) can be backtracked from
    #[error("node still has live children and is not a dead end")]
    NotDeadEnd,
}

impl GraphError {
    /// Returns *true* if the error stems from referencing a node or index that is not part of
    /// the graph
    pub fn is_missing_node(&self) -> bool {
        matches!(
            self,
            GraphError::NodeNotFound | GraphError::IndexOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            GraphError::IndexOutOfRange { index: 7, order: 3 }.to_string(),
            "node index 7 out of bounds for graph of order 3"
        );
        assert_eq!(
            GraphError::StepLimitExceeded { max_steps: 10 }.to_string(),
            "exceeded the limit of 10 steps"
        );
        assert!(GraphError::NodeNotFound.is_missing_node());
        assert!(!GraphError::PathNotFound.is_missing_node());
    }
}
