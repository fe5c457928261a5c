use crate::board::Grid;
use crate::error::SolveError;
use crate::location::Location;
use crate::reachability::ReachabilityIndex;
use crate::search::EnclosureSearch;

/// Limits applied to a [`Solver`]. The default imposes none.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SolverConfig {
    /// Reject puzzles where the agent can reach more than this many cells, with [`SolveError::TooManyCells`].
    pub max_cells: Option<usize>,
    /// Stop after expanding this many search states and report the best enclosure found so far.
    ///
    /// A solution cut short this way is still a valid enclosure, but may not be the largest one.
    pub state_limit: Option<usize>,
}

/// The result of a solve: the largest enclosed area found and the walls that achieve it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    /// Number of cells the agent can still reach once `walls` are placed, itself included.
    /// Zero if no enclosure fits the budget.
    pub area: usize,
    /// Cells to turn into walls, sorted by `(row, col)`.
    pub walls: Vec<Location>,
    /// Whether the search ran to completion, in which case `area` is optimal.
    pub exhaustive: bool,
}

impl Solution {
    fn impossible() -> Self {
        Self {
            area: 0,
            walls: Vec::new(),
            exhaustive: true,
        }
    }
}

/// Entry point to the solver, carrying a [`SolverConfig`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Construct a solver with the given limits.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Find the largest region, never touching the grid boundary, that at most `k` walls can trap the agent in.
    ///
    /// An agent standing on the boundary can never be enclosed and yields an area of 0 with no walls.
    pub fn solve(&self, k: usize, grid: &Grid) -> Result<Solution, SolveError> {
        if grid.is_boundary(grid.agent()) {
            tracing::debug!(agent = %grid.agent(), "agent is on the boundary, nothing to enclose");
            return Ok(Solution::impossible());
        }

        let index = ReachabilityIndex::new(grid);
        if let Some(limit) = self.config.max_cells {
            if index.len() > limit {
                return Err(SolveError::TooManyCells { cells: index.len(), limit });
            }
        }

        let best = EnclosureSearch::new(&index, k, self.config.state_limit).run(k);
        Ok(Solution {
            area: best.area,
            walls: index.locations_of(&best.walls),
            exhaustive: best.exhaustive,
        })
    }
}

/// Solve `grid` with a budget of `k` walls under the default [`SolverConfig`].
///
/// Shorthand for [`Solver::solve`] on a default [`Solver`].
pub fn solve(k: usize, grid: &Grid) -> Result<Solution, SolveError> {
    Solver::default().solve(k, grid)
}
