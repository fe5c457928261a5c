#![warn(missing_docs)]

//! # `corral`
//!
//! A solver for the enclosure puzzle: a rectangular grid of grass (`.`), water (`#`) and a single agent (`H`),
//! plus a budget of `k` walls that may be placed on grass.
//! The goal is to trap the agent in the largest possible region that never touches the edge of the grid.
//!
//! Begin by producing a [`Grid`], either by parsing text with [`str::parse`] or with a [`GridBuilder`].
//! Then call [`solve()`] (or [`Grid::solve`], or a configured [`Solver`]) to obtain a [`Solution`],
//! and [`Grid::render`] to draw it back onto the grid.
//!
//! ```
//! use corral::{Grid, Location};
//!
//! let grid: Grid = "#####\n#...#\n#.H..\n#...#\n#####\n".parse().unwrap();
//! let solution = corral::solve(1, &grid).unwrap();
//! assert_eq!(solution.area, 9);
//! assert_eq!(solution.walls, vec![Location(2, 4)]);
//! ```
//!
//! # Internals
//! Enclosing the agent means choosing a vertex cut between the agent and the boundary of the grid.
//! We restrict the grid to the cells the agent can reach and express it as a flow network, splitting every cell into an
//! "in" and an "out" node so that a unit capacity on the edge between them makes the cell itself the thing that is cut.
//! Grass costs one wall; the agent and water can never be cut.
//!
//! A max-flow computation capped at the remaining budget says whether any cut fits, and reachability in the residual
//! network recovers the minimum cut enclosing the largest region. A minimum cut is not necessarily the best one though,
//! since spending more walls further out can enclose more area.
//! So we branch on the cells of each minimum cut: either a cell stays open, in which case it is fed directly from the
//! source and the next cut must go around it, or it becomes a wall and the budget shrinks.
//! States are memoized, and any state whose reachable area cannot beat the best enclosure so far is pruned.

pub use board::{Grid, RenderedGrid};
pub use builder::GridBuilder;
pub use cell::Tile;
pub use error::{budget_from_signed, GridError, SolveError};
pub use location::Location;
pub use solver::{solve, Solution, Solver, SolverConfig};

pub(crate) mod board;
pub mod builder;
pub(crate) mod cell;
pub(crate) mod error;
pub(crate) mod location;
pub(crate) mod network;
pub(crate) mod reachability;
pub(crate) mod search;
pub(crate) mod separator;
pub(crate) mod shape;
pub(crate) mod solver;
mod tests;
#[cfg(feature = "wasm")]
pub mod wasm;
