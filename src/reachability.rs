use std::collections::{HashMap, VecDeque};

use fixedbitset::FixedBitSet;
use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::board::Grid;
use crate::cell::Tile;
use crate::location::Location;

/// Dense id of a cell the agent can reach. The agent is always `0`.
pub(crate) type CellId = usize;

pub(crate) const AGENT: CellId = 0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Cell {
    pub(crate) location: Location,
    pub(crate) boundary: bool,
    pub(crate) wallable: bool,
}

/// The cells reachable from the agent at some point of the search.
#[derive(Clone, Debug)]
pub(crate) struct Region {
    pub(crate) cells: FixedBitSet,
    pub(crate) area: usize,
    pub(crate) escapes: bool,
}

/// The puzzle restricted to the cells the agent can reach before any walls are placed.
///
/// Walls only ever shrink what the agent reaches, so nothing outside this universe matters.
/// Node indices of the adjacency graph double as [`CellId`]s, assigned in breadth-first discovery order.
pub(crate) struct ReachabilityIndex {
    graph: UnGraph<Cell, ()>,
    boundary: FixedBitSet,
}

impl ReachabilityIndex {
    pub(crate) fn new(grid: &Grid) -> Self {
        let mut graph = UnGraph::<Cell, ()>::default();
        let mut ids: HashMap<Location, NodeIndex> = HashMap::new();

        discover(&mut graph, &mut ids, grid, grid.agent());
        let mut queue = VecDeque::from([grid.agent()]);
        while let Some(location) = queue.pop_front() {
            for neighbor in grid.open_neighbors(location) {
                if !ids.contains_key(&neighbor) {
                    discover(&mut graph, &mut ids, grid, neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        // every cell is known now, so each adjacency is added once from its lower id
        let mut edges = Vec::new();
        for node in graph.node_indices() {
            for neighbor in grid.open_neighbors(graph[node].location) {
                if let Some(&other) = ids.get(&neighbor) {
                    if node < other {
                        edges.push((node, other));
                    }
                }
            }
        }
        for (a, b) in edges {
            graph.add_edge(a, b, ());
        }

        let mut boundary = FixedBitSet::with_capacity(graph.node_count());
        boundary.extend(graph.node_indices().filter(|node| graph[*node].boundary).map(NodeIndex::index));

        tracing::debug!(cells = graph.node_count(), adjacencies = graph.edge_count(), "indexed reachable cells");

        Self { graph, boundary }
    }

    pub(crate) fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub(crate) fn cell(&self, id: CellId) -> &Cell {
        &self.graph[NodeIndex::new(id)]
    }

    pub(crate) fn neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.graph.neighbors(NodeIndex::new(id)).map(NodeIndex::index)
    }

    /// An empty set sized for this universe.
    pub(crate) fn empty_set(&self) -> FixedBitSet {
        FixedBitSet::with_capacity(self.len())
    }

    /// Breadth-first reachability from the agent in the original adjacency, never entering `blocked`.
    ///
    /// A blocked agent reaches nothing and counts as escaping.
    pub(crate) fn region_avoiding(&self, blocked: &FixedBitSet) -> Region {
        if blocked.contains(AGENT) {
            return Region { cells: self.empty_set(), area: 0, escapes: true };
        }

        let mut cells = self.empty_set();
        cells.insert(AGENT);
        let mut queue = VecDeque::from([NodeIndex::new(AGENT)]);
        while let Some(node) = queue.pop_front() {
            for next in self.graph.neighbors(node) {
                if !blocked.contains(next.index()) && !cells.put(next.index()) {
                    queue.push_back(next);
                }
            }
        }

        let area = cells.count_ones(..);
        let escapes = !cells.is_disjoint(&self.boundary);
        Region { cells, area, escapes }
    }

    /// The grid locations of `cells`, sorted row-major.
    pub(crate) fn locations_of(&self, cells: &FixedBitSet) -> Vec<Location> {
        cells.ones()
            .map(|id| self.cell(id).location)
            .sorted()
            .collect_vec()
    }
}

fn discover(graph: &mut UnGraph<Cell, ()>, ids: &mut HashMap<Location, NodeIndex>, grid: &Grid, location: Location) {
    let tile = grid.tile(location).unwrap_or(Tile::Water);
    let node = graph.add_node(Cell {
        location,
        boundary: grid.is_boundary(location),
        wallable: tile.is_wallable(),
    });
    ids.insert(location, node);
}
