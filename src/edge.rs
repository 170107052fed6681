use std::fmt::{Debug, Display};

use crate::NodeIndex;

/// The endpoints of a directed edge, given as node indices: the edge points FROM `.0` TO `.1`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Endpoints(pub NodeIndex, pub NodeIndex);

/// Number of edges of a graph
pub type NumEdges = usize;

impl Display for Endpoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Endpoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Endpoints {
    /// Returns the index of the node the edge originates from
    pub fn source(&self) -> NodeIndex {
        self.0
    }

    /// Returns the index of the node the edge points to
    pub fn target(&self) -> NodeIndex {
        self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Endpoints(self.1, self.0)
    }
}

impl From<(NodeIndex, NodeIndex)> for Endpoints {
    fn from(value: (NodeIndex, NodeIndex)) -> Self {
        Endpoints(value.0, value.1)
    }
}

impl From<&(NodeIndex, NodeIndex)> for Endpoints {
    fn from(value: &(NodeIndex, NodeIndex)) -> Self {
        Endpoints(value.0, value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let e = Endpoints::from((3, 5));
        assert_eq!(e.source(), 3);
        assert_eq!(e.target(), 5);
        assert_eq!(e.reverse(), Endpoints(5, 3));
        assert!(!e.is_loop());
        assert!(Endpoints(2, 2).is_loop());
        assert_eq!(format!("{e:?}"), "(3,5)");
    }
}
