use crate::error::TspError;

/// Square matrix of non-negative travel costs between nodes.
///
/// `weight(i, j)` is the cost of the move `i -> j`. Missing edges are kept
/// separately from their weight so that a real zero-cost edge can coexist
/// with the legacy "zero means no edge" input convention.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    // Flattened row-major, `None` where no move exists
    dist_mat: Vec<Option<f64>>,
    num_nodes: usize,
}

impl DistanceMatrix {
    /// Builds a matrix using the legacy convention: a zero (or infinite)
    /// weight between two distinct nodes means there is no direct edge.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, TspError> {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|w| if w == 0.0 { None } else { Some(w) })
                    .collect()
            })
            .collect();
        Self::from_optional_rows(rows)
    }

    /// Builds a matrix where `None` marks a missing edge and every `Some`
    /// finite weight, including zero, is traversable.
    pub fn from_optional_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self, TspError> {
        let num_nodes = rows.len();
        if num_nodes == 0 {
            return Err(TspError::EmptyMatrix);
        }

        let mut dist_mat = Vec::with_capacity(num_nodes * num_nodes);
        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != num_nodes {
                return Err(TspError::NotSquare {
                    row: from,
                    len: row.len(),
                    expected: num_nodes,
                });
            }
            for (to, cell) in row.into_iter().enumerate() {
                let entry = match cell {
                    Some(w) if w.is_nan() => return Err(TspError::InvalidWeight { from, to }),
                    Some(w) if w < 0.0 => {
                        return Err(TspError::NegativeWeight {
                            from,
                            to,
                            weight: w,
                        })
                    }
                    Some(w) if w.is_infinite() => None,
                    // Self-loops are never moves
                    _ if from == to => None,
                    other => other,
                };
                dist_mat.push(entry);
            }
        }

        Ok(DistanceMatrix { dist_mat, num_nodes })
    }

    /// Number of nodes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Always false: construction rejects empty matrices.
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Raw weight of `from -> to`, `0.0` where no edge exists.
    #[inline(always)]
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        self.edge(from, to).unwrap_or(0.0)
    }

    /// Weight of the move `from -> to` if that move is allowed.
    #[inline(always)]
    pub fn edge(&self, from: usize, to: usize) -> Option<f64> {
        self.dist_mat[from * self.num_nodes + to]
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edge(from, to).is_some()
    }

    /// Traversable moves out of `from`, in ascending target order.
    pub fn neighbours(&self, from: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let row = &self.dist_mat[from * self.num_nodes..(from + 1) * self.num_nodes];
        row.iter()
            .enumerate()
            .filter_map(|(to, w)| w.map(|w| (to, w)))
    }

    /// Rejects node indices outside `[0, len)`.
    pub fn check_node(&self, node: usize) -> Result<(), TspError> {
        if node < self.num_nodes {
            Ok(())
        } else {
            Err(TspError::StartOutOfRange {
                start: node,
                nodes: self.num_nodes,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 0.0, 0.0],
            vec![1.0, 0.0, 5.0, 2.0],
            vec![0.0, 5.0, 0.0, 3.0],
            vec![0.0, 2.0, 3.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn zero_off_diagonal_is_missing_edge() {
        let m = legacy();
        assert_eq!(m.len(), 4);
        assert_eq!(m.edge(0, 1), Some(1.0));
        assert_eq!(m.edge(0, 2), None);
        assert_eq!(m.weight(0, 2), 0.0);
        assert!(!m.has_edge(2, 2));
        assert_eq!(m.neighbours(1).collect::<Vec<_>>(), vec![(0, 1.0), (2, 5.0), (3, 2.0)]);
    }

    #[test]
    fn explicit_zero_edge_is_traversable() {
        let m = DistanceMatrix::from_optional_rows(vec![
            vec![None, Some(0.0)],
            vec![Some(0.0), Some(4.0)],
        ])
        .unwrap();
        assert_eq!(m.edge(0, 1), Some(0.0));
        assert_eq!(m.edge(1, 0), Some(0.0));
        // diagonal is dropped even when given
        assert_eq!(m.edge(1, 1), None);
    }

    #[test]
    fn infinite_weight_is_missing_edge() {
        let m = DistanceMatrix::from_rows(vec![vec![0.0, f64::INFINITY], vec![3.0, 0.0]]).unwrap();
        assert_eq!(m.edge(0, 1), None);
        assert_eq!(m.edge(1, 0), Some(3.0));
    }

    #[test]
    fn asymmetric_weights_are_kept() {
        let m = DistanceMatrix::from_rows(vec![vec![0.0, 2.0], vec![7.0, 0.0]]).unwrap();
        assert_eq!(m.weight(0, 1), 2.0);
        assert_eq!(m.weight(1, 0), 7.0);
    }

    #[test]
    fn rejects_malformed_matrices() {
        assert!(matches!(
            DistanceMatrix::from_rows(vec![]),
            Err(TspError::EmptyMatrix)
        ));
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]),
            Err(TspError::NotSquare { row: 1, len: 1, expected: 2 })
        ));
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]),
            Err(TspError::NegativeWeight { from: 0, to: 1, .. })
        ));
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![f64::NAN, 0.0]]),
            Err(TspError::InvalidWeight { from: 1, to: 0 })
        ));
    }

    #[test]
    fn check_node_bounds() {
        let m = legacy();
        assert!(m.check_node(3).is_ok());
        assert!(matches!(
            m.check_node(4),
            Err(TspError::StartOutOfRange { start: 4, nodes: 4 })
        ));
    }
}
