#![deny(clippy::all)]

use log::{debug, trace};
use tsp_core::{DistanceMatrix, SearchState, Tour, TspError};

/// Counters of the last search since `reset()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Partial paths extended by one node.
    pub expanded: u64,
    /// Extensions skipped because they cannot beat the incumbent.
    pub pruned: u64,
    /// Full-length paths that closed back to the start.
    pub completed: u64,
    /// Times the incumbent was replaced.
    pub improvements: u64,
}

/// Depth-first branch-and-bound that keeps only the cheapest tour.
///
/// The incumbent survives across `search` calls; `reset()` must be called
/// before starting a fresh search.
pub struct BranchAndBound<'a> {
    matrix: &'a DistanceMatrix,
    best_path: Vec<usize>,
    best_cost: f64,
    stats: SearchStats,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(matrix: &'a DistanceMatrix) -> Self {
        BranchAndBound {
            matrix,
            best_path: Vec::new(),
            best_cost: f64::INFINITY,
            stats: SearchStats::default(),
        }
    }

    pub fn reset(&mut self) {
        self.best_path.clear();
        self.best_cost = f64::INFINITY;
        self.stats = SearchStats::default();
    }

    /// Searches tours from `start`, tightening the current incumbent.
    pub fn search(&mut self, start: usize) -> Result<(), TspError> {
        let mut state = SearchState::new(self.matrix.len(), start)?;
        self.dfs(&mut state);

        debug!(
            "branch-and-bound from node {start}: best cost {} ({:?})",
            self.best_cost, self.stats
        );
        Ok(())
    }

    fn dfs(&mut self, state: &mut SearchState) {
        let matrix = self.matrix;

        if state.is_complete() {
            if let Some(cost) = state.close(matrix) {
                self.stats.completed += 1;
                // Strict: the first optimum found is kept
                if cost < self.best_cost {
                    self.best_cost = cost;
                    self.best_path.clear();
                    self.best_path.extend_from_slice(state.path());
                    self.stats.improvements += 1;
                    trace!("new incumbent {cost}: {:?}", self.best_path);
                }
            }
            return;
        }

        for (next, w) in matrix.neighbours(state.current()) {
            if state.is_visited(next) {
                continue;
            }
            // Weights are non-negative, so no extension of this prefix can
            // go below its current cost
            if state.cost() + w >= self.best_cost {
                self.stats.pruned += 1;
                continue;
            }
            self.stats.expanded += 1;
            state.push(next, w);
            self.dfs(state);
            state.pop();
        }
    }

    /// Nodes of the incumbent, empty when no tour has been found.
    pub fn best_path(&self) -> &[usize] {
        &self.best_path
    }

    /// Cost of the incumbent, `f64::INFINITY` when no tour has been found.
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    pub fn has_solution(&self) -> bool {
        !self.best_path.is_empty()
    }

    pub fn best(&self) -> Option<Tour> {
        self.has_solution()
            .then(|| Tour::new(self.best_path.clone(), self.best_cost))
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Cheapest tour from `start`, `None` if no tour exists.
pub fn solve(matrix: &DistanceMatrix, start: usize) -> Result<Option<Tour>, TspError> {
    let mut solver = BranchAndBound::new(matrix);
    solver.search(start)?;
    Ok(solver.best())
}
