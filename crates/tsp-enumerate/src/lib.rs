#![deny(clippy::all)]

use log::debug;
use tsp_core::{DistanceMatrix, SearchState, Tour, TspError};

/// Records every Hamiltonian cycle from a start node.
///
/// Results accumulate across calls to [`Enumerator::enumerate`]; call
/// [`Enumerator::clear`] before reusing the instance for a new start.
pub struct Enumerator<'a> {
    matrix: &'a DistanceMatrix,
    paths: Vec<Vec<usize>>,
    costs: Vec<f64>,
}

impl<'a> Enumerator<'a> {
    pub fn new(matrix: &'a DistanceMatrix) -> Self {
        Enumerator {
            matrix,
            paths: Vec::new(),
            costs: Vec::new(),
        }
    }

    /// Appends every cycle through all nodes that starts and ends at `start`
    /// and returns how many were found. Zero means no tour exists.
    pub fn enumerate(&mut self, start: usize) -> Result<usize, TspError> {
        let before = self.paths.len();
        let mut state = SearchState::new(self.matrix.len(), start)?;
        self.dfs(&mut state);

        let found = self.paths.len() - before;
        debug!(
            "enumerated {found} tours from node {start} on {} nodes",
            self.matrix.len()
        );
        Ok(found)
    }

    fn dfs(&mut self, state: &mut SearchState) {
        let matrix = self.matrix;

        // Base Case: every node placed
        if state.is_complete() {
            if let Some(cost) = state.close(matrix) {
                self.paths.push(state.path().to_vec());
                self.costs.push(cost);
            }
            return;
        }

        for (next, w) in matrix.neighbours(state.current()) {
            if state.is_visited(next) {
                continue;
            }
            state.push(next, w);
            self.dfs(state);
            state.pop();
        }
    }

    pub fn paths(&self) -> &[Vec<usize>] {
        &self.paths
    }

    /// Costs matching `paths()` index by index.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn tours(&self) -> impl Iterator<Item = Tour> + '_ {
        self.paths
            .iter()
            .zip(&self.costs)
            .map(|(path, &cost)| Tour::new(path.clone(), cost))
    }

    /// First cheapest tour in discovery order. Among equal costs the
    /// earliest wins, which matches the tour `BranchAndBound` keeps since it
    /// only replaces its incumbent on a strict improvement. Scanning for the
    /// last minimum would pick the mirror image of that tour on symmetric
    /// instances.
    pub fn best(&self) -> Option<Tour> {
        let mut best: Option<usize> = None;
        for (i, &cost) in self.costs.iter().enumerate() {
            if best.is_none_or(|b| cost < self.costs[b]) {
                best = Some(i);
            }
        }
        best.map(|i| Tour::new(self.paths[i].clone(), self.costs[i]))
    }

    pub fn clear(&mut self) {
        self.paths.clear();
        self.costs.clear();
    }

    pub fn into_tours(self) -> Vec<Tour> {
        self.paths
            .into_iter()
            .zip(self.costs)
            .map(|(path, cost)| Tour::new(path, cost))
            .collect()
    }
}

/// Every tour from `start`, in discovery order.
pub fn enumerate_tours(matrix: &DistanceMatrix, start: usize) -> Result<Vec<Tour>, TspError> {
    let mut enumerator = Enumerator::new(matrix);
    enumerator.enumerate(start)?;
    Ok(enumerator.into_tours())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &str) -> DistanceMatrix {
        DistanceMatrix::from_rows(serde_json::from_str(rows).unwrap()).unwrap()
    }

    fn square() -> DistanceMatrix {
        // 0-1-2-3-0 ring plus the 0-2 diagonal
        matrix("[[0,1,4,2],[1,0,3,0],[4,3,0,5],[2,0,5,0]]")
    }

    #[test]
    fn complete_graph_yields_all_permutations() {
        let m = matrix("[[0,1,2,3],[1,0,4,5],[2,4,0,6],[3,5,6,0]]");
        let tours = enumerate_tours(&m, 0).unwrap();
        assert_eq!(tours.len(), 6);
        for tour in &tours {
            assert_eq!(tour.start(), Some(0));
            assert!(tour.is_hamiltonian(&m));
            assert_eq!(tour.recompute_cost(&m), Some(tour.cost));
        }
    }

    #[test]
    fn discovery_order_is_lexicographic() {
        let m = square();
        let mut e = Enumerator::new(&m);
        assert_eq!(e.enumerate(0).unwrap(), 2);
        assert_eq!(e.paths(), &[vec![0, 1, 2, 3], vec![0, 3, 2, 1]]);
        assert_eq!(e.costs(), &[1.0 + 3.0 + 5.0 + 2.0, 2.0 + 5.0 + 3.0 + 1.0]);
    }

    #[test]
    fn results_accumulate_until_cleared() {
        let m = square();
        let mut e = Enumerator::new(&m);
        e.enumerate(0).unwrap();
        e.enumerate(2).unwrap();
        assert_eq!(e.len(), 4);
        assert_eq!(e.paths()[2][0], 2);

        e.clear();
        assert!(e.is_empty());
        assert!(e.best().is_none());
    }

    #[test]
    fn best_prefers_first_minimum() {
        let m = matrix("[[0,1,2],[1,0,3],[2,3,0]]");
        let mut e = Enumerator::new(&m);
        e.enumerate(0).unwrap();
        // both directions cost 6
        assert_eq!(e.costs(), &[6.0, 6.0]);
        assert_eq!(e.best().unwrap().nodes, vec![0, 1, 2]);
    }

    #[test]
    fn legacy_cities_have_no_tour() {
        let m = matrix("[[0,1,0,0],[1,0,5,2],[0,5,0,3],[0,2,3,0]]");
        for start in 0..4 {
            assert!(enumerate_tours(&m, start).unwrap().is_empty());
        }
    }

    #[test]
    fn isolated_node_blocks_every_tour() {
        let m = matrix("[[0,1,2,0],[1,0,3,0],[2,3,0,0],[0,0,0,0]]");
        assert!(enumerate_tours(&m, 0).unwrap().is_empty());

        let without = matrix("[[0,1,2],[1,0,3],[2,3,0]]");
        assert_eq!(enumerate_tours(&without, 0).unwrap().len(), 2);
    }

    #[test]
    fn one_way_edges_are_respected() {
        let m = DistanceMatrix::from_optional_rows(vec![
            vec![None, Some(1.0), None],
            vec![None, None, Some(1.0)],
            vec![Some(1.0), None, None],
        ])
        .unwrap();
        let tours = enumerate_tours(&m, 1).unwrap();
        assert_eq!(tours, vec![Tour::new(vec![1, 2, 0], 3.0)]);
    }

    #[test]
    fn two_nodes_need_both_directions() {
        let m = DistanceMatrix::from_optional_rows(vec![
            vec![None, Some(2.0)],
            vec![Some(7.0), None],
        ])
        .unwrap();
        assert_eq!(enumerate_tours(&m, 0).unwrap(), vec![Tour::new(vec![0, 1], 9.0)]);
        assert_eq!(enumerate_tours(&m, 1).unwrap(), vec![Tour::new(vec![1, 0], 9.0)]);

        let one_way = DistanceMatrix::from_optional_rows(vec![
            vec![None, Some(2.0)],
            vec![None, None],
        ])
        .unwrap();
        assert!(enumerate_tours(&one_way, 0).unwrap().is_empty());
        assert!(enumerate_tours(&one_way, 1).unwrap().is_empty());
    }

    #[test]
    fn single_node_has_trivial_tour() {
        let m = matrix("[[0]]");
        assert_eq!(enumerate_tours(&m, 0).unwrap(), vec![Tour::new(vec![0], 0.0)]);
    }

    #[test]
    fn rejects_start_out_of_range() {
        let m = square();
        let mut e = Enumerator::new(&m);
        assert!(matches!(
            e.enumerate(4),
            Err(TspError::StartOutOfRange { start: 4, nodes: 4 })
        ));
        assert!(e.is_empty());
    }
}
