use crate::error::TspError;
use crate::matrix::DistanceMatrix;

/// Backtracking state for one depth-first search.
///
/// Each `push` must be matched by one `pop` when the recursive call returns.
/// Costs are kept as prefix sums so `pop` restores the parent's cost exactly
/// instead of subtracting floating-point weights.
#[derive(Clone, Debug)]
pub struct SearchState {
    visited: Vec<bool>,
    path: Vec<usize>,
    prefix_cost: Vec<f64>,
}

impl SearchState {
    /// Fresh state with only `start` placed.
    pub fn new(num_nodes: usize, start: usize) -> Result<Self, TspError> {
        if start >= num_nodes {
            return Err(TspError::StartOutOfRange {
                start,
                nodes: num_nodes,
            });
        }

        let mut visited = vec![false; num_nodes];
        visited[start] = true;

        let mut path = Vec::with_capacity(num_nodes);
        path.push(start);

        let mut prefix_cost = Vec::with_capacity(num_nodes);
        prefix_cost.push(0.0);

        Ok(SearchState {
            visited,
            path,
            prefix_cost,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> usize {
        self.path[0]
    }

    #[inline(always)]
    pub fn current(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    /// Number of nodes placed so far, including the start.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Accumulated cost of the moves taken so far.
    #[inline(always)]
    pub fn cost(&self) -> f64 {
        self.prefix_cost[self.prefix_cost.len() - 1]
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    #[inline(always)]
    pub fn is_visited(&self, node: usize) -> bool {
        self.visited[node]
    }

    /// All nodes placed.
    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.path.len() == self.visited.len()
    }

    /// Cost of the full cycle once every node is placed, or `None` when the
    /// move back to the start does not exist. A single-node path closes with
    /// no move at all.
    pub fn close(&self, matrix: &DistanceMatrix) -> Option<f64> {
        if self.depth() == 1 {
            return Some(self.cost());
        }
        matrix
            .edge(self.current(), self.start())
            .map(|w| self.cost() + w)
    }

    pub fn push(&mut self, next: usize, weight: f64) {
        debug_assert!(!self.visited[next]);
        let cost = self.cost() + weight;
        self.visited[next] = true;
        self.path.push(next);
        self.prefix_cost.push(cost);
    }

    pub fn pop(&mut self) {
        debug_assert!(self.path.len() > 1, "the start node is never popped");
        if let Some(last) = self.path.pop() {
            self.visited[last] = false;
            self.prefix_cost.pop();
        }
    }
}
