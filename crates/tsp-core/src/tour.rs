use serde::{Deserialize, Serialize};

use crate::matrix::DistanceMatrix;

/// A complete round trip.
///
/// `nodes[0]` is the start node; the closing move back to it is implied and
/// not repeated. `cost` includes that closing move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub nodes: Vec<usize>,
    pub cost: f64,
}

impl Tour {
    pub fn new(nodes: Vec<usize>, cost: f64) -> Self {
        Tour { nodes, cost }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<usize> {
        self.nodes.first().copied()
    }

    /// Every move of the tour, including the closing one.
    /// A single-node tour has no moves.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = if self.nodes.len() > 1 { self.nodes.len() } else { 0 };
        (0..n).map(move |i| (self.nodes[i], self.nodes[(i + 1) % n]))
    }

    /// Sum of the matrix weights along `edges()`, or `None` if one of the
    /// moves does not exist.
    pub fn recompute_cost(&self, matrix: &DistanceMatrix) -> Option<f64> {
        self.edges()
            .map(|(from, to)| matrix.edge(from, to))
            .sum::<Option<f64>>()
    }

    /// True when every node of `matrix` appears exactly once.
    pub fn is_hamiltonian(&self, matrix: &DistanceMatrix) -> bool {
        let mut seen = vec![false; matrix.len()];
        self.nodes.len() == matrix.len()
            && self
                .nodes
                .iter()
                .all(|&u| u < seen.len() && !std::mem::replace(&mut seen[u], true))
    }
}
