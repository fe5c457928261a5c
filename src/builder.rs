//! Programmatic construction of [`Grid`]s.

use ndarray::Array2;

use crate::board::Grid;
use crate::cell::Tile;
use crate::error::GridError;
use crate::location::{Dimension, Location};

/// A builder for [`Grid`]s, for callers that classify tiles themselves instead of producing puzzle text.
///
/// Every cell starts as [`Grass`](Tile::Grass).
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone)]
pub struct GridBuilder {
    // rows, cols
    dims: (Dimension, Dimension),
    tiles: Array2<Tile>,
    agent: Option<Location>,
    invalid_reasons: Vec<GridError>,
}

impl GridBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(rows, cols)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            tiles: Array2::from_elem((dims.0.get(), dims.1.get()), Tile::Grass),
            agent: None,
            invalid_reasons: Default::default(),
        }
    }

    fn check_bounds(&mut self, location: Location) -> bool {
        if !location.within(self.dims) {
            self.invalid_reasons.push(GridError::OutOfBounds(location));
            return false;
        }

        true
    }

    /// Place the agent at `location`.
    ///
    /// May cause the builder to enter an [`OutOfBounds`](GridError::OutOfBounds) invalid state if `location` is out of bounds,
    /// or a [`MultipleAgents`](GridError::MultipleAgents) one if an agent was already placed.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn place_agent(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() || !self.check_bounds(location) {
            return self;
        }

        if let Some(first) = self.agent {
            self.invalid_reasons.push(GridError::MultipleAgents { first, second: location });
            return self;
        }

        self.agent = Some(location);
        self.tiles[location.as_index()] = Tile::Agent;
        self
    }

    /// Turn `location` into water. Placing water over the agent removes the agent.
    ///
    /// May cause the builder to enter an [`OutOfBounds`](GridError::OutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_water(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() || !self.check_bounds(location) {
            return self;
        }

        if self.agent == Some(location) {
            self.agent = None;
        }
        self.tiles[location.as_index()] = Tile::Water;
        self
    }

    /// Shorthand for multiple calls to [`Self::add_water`], with the same conditions.
    pub fn add_water_all(&mut self, locations: impl IntoIterator<Item = Location>) -> &mut Self {
        for location in locations {
            self.add_water(location);
        }

        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<GridError>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<GridError>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Grid`].
    ///
    /// Fails with the first reason this builder became invalid, or with [`NoAgentFound`](GridError::NoAgentFound).
    pub fn build(&self) -> Result<Grid, GridError> {
        if let Some(reason) = self.invalid_reasons.first() {
            return Err(reason.clone());
        }

        Grid::from_tiles(self.tiles.clone())
    }
}
