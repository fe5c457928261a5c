use std::fmt::{Display, Formatter};

use strum::VariantArray;

/// The kind of a single grid cell, as produced by whatever read the puzzle.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Tile {
    /// Open ground. May be converted into a wall.
    #[default]
    Grass,
    /// Impassable and never counted towards an enclosure.
    Water,
    /// The single cell that must end up enclosed. Open, but never wallable.
    Agent,
}

impl Tile {
    /// Whether the agent can move through this tile before any walls are placed.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Water)
    }

    /// Whether this tile may be converted into a wall.
    pub fn is_wallable(&self) -> bool {
        matches!(self, Self::Grass)
    }

    /// The character used for this tile in puzzle text.
    pub fn symbol(&self) -> char {
        match self {
            Self::Grass => '.',
            Self::Water => '#',
            Self::Agent => 'H',
        }
    }
}

impl From<char> for Tile {
    // anything unrecognized is treated as impassable
    fn from(value: char) -> Self {
        match value {
            '.' => Self::Grass,
            'H' => Self::Agent,
            _ => Self::Water,
        }
    }
}

/// Cells, frozen for output after a solve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MarkedTile {
    Plain(Tile),
    Wall,
    Enclosed,
}

impl Display for MarkedTile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::Plain(tile) => tile.symbol(),
            Self::Wall => 'X',
            Self::Enclosed => '&',
        })
    }
}
