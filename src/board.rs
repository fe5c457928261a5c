use std::collections::{HashSet, VecDeque};
use std::fmt::{Display, Formatter};
use std::num::NonZero;
use std::str::FromStr;

use itertools::Itertools;
use ndarray::Array2;

use crate::cell::{MarkedTile, Tile};
use crate::error::{GridError, SolveError};
use crate::location::{Dimension, Location};
use crate::shape::Step;
use crate::solver::{Solution, Solver};

/// An immutable rectangular puzzle grid with exactly one [`Agent`](Tile::Agent) cell.
///
/// [`Grid`]s are produced by parsing text (see [`FromStr`]) or with a [`GridBuilder`](crate::GridBuilder).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    tiles: Array2<Tile>,
    agent: Location,
}

impl Grid {
    pub(crate) fn from_tiles(tiles: Array2<Tile>) -> Result<Self, GridError> {
        if tiles.is_empty() {
            return Err(GridError::Empty);
        }

        let mut agents = tiles.indexed_iter()
            .filter(|(_, tile)| **tile == Tile::Agent)
            .map(|(index, _)| Location::from(index));

        let agent = agents.next().ok_or(GridError::NoAgentFound)?;
        if let Some(second) = agents.next() {
            return Err(GridError::MultipleAgents { first: agent, second });
        }

        Ok(Self { tiles, agent })
    }

    /// The dimensions of this grid in `(rows, cols)` order.
    pub fn dims(&self) -> (usize, usize) {
        self.tiles.dim()
    }

    pub(crate) fn nonzero_dims(&self) -> (Dimension, Dimension) {
        let (rows, cols) = self.tiles.dim();
        // from_tiles rejects empty arrays, so both are at least one
        (NonZero::new(rows).unwrap_or(NonZero::<usize>::MIN), NonZero::new(cols).unwrap_or(NonZero::<usize>::MIN))
    }

    /// The tile at `location`, or [`None`] if it is out of bounds.
    pub fn tile(&self, location: Location) -> Option<Tile> {
        self.tiles.get(location.as_index()).copied()
    }

    /// The location of the agent.
    pub fn agent(&self) -> Location {
        self.agent
    }

    /// Whether `location` lies on the outermost ring of this grid.
    pub fn is_boundary(&self, location: Location) -> bool {
        location.on_edge_of(self.nonzero_dims())
    }

    /// In-bounds orthogonal neighbors of `location` that are open, i.e. not water.
    pub(crate) fn open_neighbors(&self, location: Location) -> impl Iterator<Item = Location> + '_ {
        Step::neighbors_of(location, self.nonzero_dims())
            .into_iter()
            .filter(move |neighbor| self.tile(*neighbor).is_some_and(|tile| tile.is_open()))
    }

    /// Every cell the agent can reach once `walls` are placed.
    pub fn flood_from_agent(&self, walls: &HashSet<Location>) -> HashSet<Location> {
        let mut seen = HashSet::from([self.agent]);
        let mut queue = VecDeque::from([self.agent]);

        while let Some(location) = queue.pop_front() {
            for neighbor in self.open_neighbors(location) {
                if !walls.contains(&neighbor) && seen.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        seen
    }

    /// Solves this grid with a budget of `k` walls under the default [`SolverConfig`](crate::SolverConfig).
    ///
    /// See [`solve`](crate::solve).
    pub fn solve(&self, k: usize) -> Result<Solution, SolveError> {
        Solver::default().solve(k, self)
    }

    /// Overlay `solution` onto this grid: walls become `X` and enclosed grass becomes `&`.
    pub fn render(&self, solution: &Solution) -> RenderedGrid {
        let walls: HashSet<Location> = solution.walls.iter().copied().collect();
        let enclosed = if solution.area > 0 {
            self.flood_from_agent(&walls)
        } else {
            HashSet::new()
        };

        let marks = Array2::from_shape_fn(self.tiles.raw_dim(), |index| {
            let location = Location::from(index);
            let tile = self.tiles[index];
            if walls.contains(&location) {
                MarkedTile::Wall
            } else if tile == Tile::Grass && enclosed.contains(&location) {
                MarkedTile::Enclosed
            } else {
                MarkedTile::Plain(tile)
            }
        });

        RenderedGrid { marks }
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse one row per line: `.` is grass, `H` the agent, anything else water.
    /// Blank lines and trailing `\r` are ignored; [`RaggedRow`](GridError::RaggedRow) reports the line as it appears
    /// in `s`, counting blank lines too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s.lines()
            .map(|line| line.trim_end_matches('\r'))
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_number, line)| (line_number, line.chars().map(Tile::from).collect_vec()))
            .collect_vec();

        let cols = rows.first().ok_or(GridError::Empty)?.1.len();
        if let Some((row, tiles)) = rows.iter().find(|(_, tiles)| tiles.len() != cols) {
            return Err(GridError::RaggedRow { row: *row, expected: cols, found: tiles.len() });
        }

        let tiles = Array2::from_shape_fn((rows.len(), cols), |(row, col)| rows[row].1[col]);
        Self::from_tiles(tiles)
    }
}

fn print(marks: &Array2<impl Display>, f: &mut Formatter<'_>) -> std::fmt::Result {
    for row in marks.rows() {
        for cell in row {
            write!(f, "{}", cell)?;
        }
        writeln!(f)?;
    }

    Ok(())
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        print(&self.tiles.mapv(MarkedTile::Plain), f)
    }
}

/// A [`Grid`] with a [`Solution`] drawn onto it, ready for printing.
pub struct RenderedGrid {
    marks: Array2<MarkedTile>,
}

impl Display for RenderedGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        print(&self.marks, f)
    }
}
