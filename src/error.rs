use crate::location::Location;

/// Reasons a [`Grid`](crate::Grid) cannot be produced from its input.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GridError {
    /// The input had no rows, or only blank ones.
    #[error("grid is empty")]
    Empty,
    /// Rows of a grid must all have the same length.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based line of the offending row, blank lines included.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// No agent cell (`H`) was present.
    #[error("no agent cell found in grid")]
    NoAgentFound,
    /// More than one agent cell was present.
    #[error("found a second agent at {second}, the first is at {first}")]
    MultipleAgents {
        /// The agent seen first, in row-major order.
        first: Location,
        /// The agent that made the grid invalid.
        second: Location,
    },
    /// A feature was placed outside the dimensions given to a [`GridBuilder`](crate::GridBuilder).
    #[error("{0} is outside the grid")]
    OutOfBounds(Location),
}

/// Reasons a solve is rejected before any search happens.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SolveError {
    /// The wall budget was negative.
    #[error("wall budget must be non-negative, got {0}")]
    InvalidBudget(i64),
    /// The agent can reach more cells than [`SolverConfig::max_cells`](crate::SolverConfig::max_cells) allows.
    #[error("agent can reach {cells} cells, more than the configured limit of {limit}")]
    TooManyCells {
        /// Cells the agent can reach with no walls placed.
        cells: usize,
        /// The configured limit.
        limit: usize,
    },
    /// The grid could not be produced.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Convert a signed wall budget, as typed by a user, into the budget [`solve`](crate::solve) takes.
pub fn budget_from_signed(k: i64) -> Result<usize, SolveError> {
    usize::try_from(k).map_err(|_| SolveError::InvalidBudget(k))
}
