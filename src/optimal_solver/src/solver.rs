use crate::{
    config::SearchConfig,
    move_history::MoveHistory,
    pruning::CornerPatternDatabase,
    puzzle::{CornerState, CubeState, EdgeState, Move},
    start, success, working,
};
use log::{debug, info};
use std::time::Instant;
use thiserror::Error;

/// Nodes visited between two reads of the clock.
const DEADLINE_CHECK_INTERVAL: u64 = 4096;

/// An iterative deepening A* solver guided by the corner pattern database.
pub struct OptimalSolver<'a> {
    pattern_database: &'a CornerPatternDatabase,
    search_config: SearchConfig,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolverError {
    #[error("No solution of at most {max_solution_length} moves exists")]
    SolutionNotFound { max_solution_length: u8 },
    #[error("Node budget exceeded")]
    NodeBudgetExceeded,
    #[error("Time limit exceeded")]
    TimeLimitExceeded,
    #[error("The move history must be empty before solving, but it holds {len} moves")]
    HistoryNotReset { len: usize },
}

/// Statistics of a successful solve.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SolveStats {
    pub nodes_visited: u64,
    pub iterations: u32,
    pub depth: u8,
}

enum SearchResult {
    Found,
    NewBound(u8),
}

struct OptimalSolverMutable<'h> {
    history: &'h mut MoveHistory,
    nodes_visited: u64,
    node_budget: Option<u64>,
    deadline: Option<Instant>,
}

impl OptimalSolverMutable<'_> {
    fn visit_node(&mut self) -> Result<(), SolverError> {
        self.nodes_visited += 1;
        if self
            .node_budget
            .is_some_and(|budget| self.nodes_visited > budget)
        {
            return Err(SolverError::NodeBudgetExceeded);
        }
        if self.nodes_visited % DEADLINE_CHECK_INTERVAL == 0
            && let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(SolverError::TimeLimitExceeded);
        }
        Ok(())
    }
}

impl<'a> OptimalSolver<'a> {
    pub fn new(pattern_database: &'a CornerPatternDatabase) -> Self {
        Self {
            pattern_database,
            search_config: SearchConfig::default(),
        }
    }

    #[must_use]
    pub fn with_search_config(mut self, search_config: SearchConfig) -> Self {
        self.search_config = search_config;
        self
    }

    #[must_use]
    pub fn with_max_solution_length(mut self, max_solution_length: u8) -> Self {
        self.search_config.max_solution_length = max_solution_length;
        self
    }

    fn heuristic(&self, corners: CornerState) -> u8 {
        self.pattern_database.admissible_heuristic(corners)
    }

    /// The exact cost bound of a node that has exhausted its budget without
    /// being solved: one move plus the cheapest child estimate.
    fn leaf_bound(&self, state: CubeState) -> u8 {
        Move::ALL
            .into_iter()
            .map(|move_| self.heuristic(state.corners.apply(move_)))
            .min()
            .unwrap_or(0)
            .saturating_add(1)
    }

    /// One depth-first pass of IDA*, searching up to `permitted_cost` more
    /// moves from `state`.
    ///
    /// On success the history holds the path from the root to the solved
    /// state. Otherwise the history is left as it was found and the returned
    /// bound is the smallest estimated solution length from `state` that
    /// exceeded `permitted_cost`.
    fn search_for_solution(
        &self,
        mutable: &mut OptimalSolverMutable<'_>,
        state: CubeState,
        permitted_cost: u8,
    ) -> Result<SearchResult, SolverError> {
        mutable.visit_node()?;

        // The bound is checked before the goal so that a solution one move
        // past the current depth waits for the next iteration.
        let heuristic = self.heuristic(state.corners);
        if heuristic > permitted_cost {
            return Ok(SearchResult::NewBound(heuristic));
        }
        if state.is_solved() {
            return Ok(SearchResult::Found);
        }
        if permitted_cost == 0 {
            return Ok(SearchResult::NewBound(self.leaf_bound(state)));
        }

        let permitted_cost = permitted_cost - 1;
        let mut new_bound = u8::MAX;
        for move_ in Move::ALL {
            let next_state = state.apply(move_);
            // We handle leaf children inline to save the recursive call. They
            // are not counted as visited.
            let child_bound = if permitted_cost == 0 {
                let child_heuristic = self.heuristic(next_state.corners);
                if child_heuristic > 0 {
                    child_heuristic
                } else if next_state.is_solved() {
                    mutable.history.push(move_);
                    return Ok(SearchResult::Found);
                } else {
                    self.leaf_bound(next_state)
                }
            } else {
                mutable.history.push(move_);
                match self.search_for_solution(mutable, next_state, permitted_cost)? {
                    // Leave the history intact; it is the solution
                    SearchResult::Found => return Ok(SearchResult::Found),
                    SearchResult::NewBound(child_bound) => {
                        mutable.history.pop();
                        child_bound
                    }
                }
            };
            new_bound = new_bound.min(child_bound.saturating_add(1));
        }
        Ok(SearchResult::NewBound(new_bound))
    }

    /// Find a shortest move sequence solving `state` and leave it in
    /// `history`.
    ///
    /// The deepest iteration attempted is the configured maximum solution
    /// length or the capacity of `history`, whichever is smaller. When a
    /// search limit is hit the history is cleared.
    ///
    /// # Errors
    ///
    /// If `history` is not empty, if no solution fits within the maximum
    /// solution length, or if the node budget or time limit runs out. See
    /// `SolverError`.
    pub fn try_solve(
        &self,
        state: CubeState,
        history: &mut MoveHistory,
    ) -> Result<SolveStats, SolverError> {
        if !history.is_empty() {
            return Err(SolverError::HistoryNotReset { len: history.len() });
        }
        let max_solution_length = u8::try_from(history.capacity()).map_or(
            self.search_config.max_solution_length,
            |capacity| capacity.min(self.search_config.max_solution_length),
        );

        info!(start!("Searching for an optimal solution"));
        let start = Instant::now();
        let mut mutable = OptimalSolverMutable {
            history,
            nodes_visited: 0,
            node_budget: self.search_config.node_budget,
            deadline: self
                .search_config
                .time_limit()
                .map(|time_limit| start + time_limit),
        };

        let mut depth = self.heuristic(state.corners);
        let mut iterations = 0;
        loop {
            if depth > max_solution_length {
                return Err(SolverError::SolutionNotFound {
                    max_solution_length,
                });
            }
            debug!(working!("Searching depth {}..."), depth);
            let depth_start = Instant::now();
            let nodes_before = mutable.nodes_visited;
            iterations += 1;

            let result = match self.search_for_solution(&mut mutable, state, depth) {
                Ok(result) => result,
                Err(e) => {
                    mutable.history.reset();
                    return Err(e);
                }
            };
            debug!(
                working!("Traversed {} nodes in {:.3}s"),
                mutable.nodes_visited - nodes_before,
                depth_start.elapsed().as_secs_f64()
            );

            match result {
                SearchResult::Found => {
                    info!(
                        success!("Found a {} move solution in {:.3}s: {}"),
                        mutable.history.len(),
                        start.elapsed().as_secs_f64(),
                        mutable.history
                    );
                    return Ok(SolveStats {
                        nodes_visited: mutable.nodes_visited,
                        iterations,
                        depth,
                    });
                }
                SearchResult::NewBound(new_bound) => depth = new_bound,
            }
        }
    }

    /// Like [`OptimalSolver::try_solve`], reporting only whether a solution
    /// was found.
    pub fn solve(&self, state: CubeState, history: &mut MoveHistory) -> bool {
        match self.try_solve(state, history) {
            Ok(_) => true,
            Err(e) => {
                debug!("{e}");
                false
            }
        }
    }
}

/// Solve the cube made of `corners` and `edges` with the default search
/// settings. On success `history` holds an optimal solution.
pub fn solve(
    corners: CornerState,
    edges: EdgeState,
    pattern_database: &CornerPatternDatabase,
    history: &mut MoveHistory,
) -> bool {
    OptimalSolver::new(pattern_database).solve(CubeState::new(corners, edges), history)
}
