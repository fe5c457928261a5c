use itertools::Itertools;
use strum::VariantArray;

use crate::location::{Dimension, Location};

/// One step between orthogonally adjacent cells. Only 4-directional movement exists.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub(crate) enum Step {
    Down,
    Up,
    Right,
    Left,
}

impl Step {
    /// Attempt the step from `location` and return the resultant [`Location`].
    ///
    /// Stepping off the top or left edge wraps to a huge coordinate, which [`Location::within`] rejects.
    pub(crate) fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Down => location.offset_by((1, 0)),
            Self::Up => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((0, 1)),
            Self::Left => location.offset_by((0, -1)),
        }
    }

    /// All in-bounds neighbors of `location` on a grid of `dims`, in [`Step::VARIANTS`] order.
    pub(crate) fn neighbors_of(location: Location, dims: (Dimension, Dimension)) -> Vec<Location> {
        Self::VARIANTS.iter()
            .map(|step| step.attempt_from(location))
            .filter(|neighbor| neighbor.within(dims))
            .collect_vec()
    }
}
