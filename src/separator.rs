use fixedbitset::FixedBitSet;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::network::{Capacity, ResidualNetwork};
use crate::reachability::{CellId, ReachabilityIndex, AGENT};

/// A minimum set of undecided cells whose walling cuts the agent off from the boundary.
///
/// Empty `cells` means the boundary is already unreachable.
#[derive(Clone, Debug)]
pub(crate) struct Separator {
    pub(crate) cells: FixedBitSet,
    pub(crate) flow: Capacity,
}

/// Min vertex cuts between the agent and the grid boundary, via the usual vertex-split reduction.
///
/// Cell `i` becomes `in(i) = 2i` and `out(i) = 2i + 1`, joined by a cell edge that carries the cell's capacity.
/// `out` nodes of neighboring cells feed each other's `in` nodes, boundary cells drain into the sink,
/// and every cell has a (normally closed) edge from the source so it can later be forced open.
pub(crate) struct SeparatorExtractor<'a> {
    index: &'a ReachabilityIndex,
    network: ResidualNetwork,
    cell_edge: Vec<EdgeIndex>,
    source_edge: Vec<EdgeIndex>,
    source: NodeIndex,
    sink: NodeIndex,
    infinity: Capacity,
}

/// A wall budget as a capacity, leaving room for one more unit on top.
///
/// A cut never needs more walls than there are cells, so clamping huge budgets changes no answer.
fn clamp_budget(walls: usize) -> Capacity {
    Capacity::try_from(walls).unwrap_or(Capacity::MAX).min(Capacity::MAX - 1)
}

fn in_node(cell: CellId) -> NodeIndex {
    NodeIndex::new(2 * cell)
}

fn out_node(cell: CellId) -> NodeIndex {
    NodeIndex::new(2 * cell + 1)
}

impl<'a> SeparatorExtractor<'a> {
    /// Build the network for a puzzle with a total budget of `k` walls.
    pub(crate) fn new(index: &'a ReachabilityIndex, k: usize) -> Self {
        let cells = index.len();
        // no query ever pushes more than k + 1 units, so this can never saturate
        let infinity = clamp_budget(k) + 1;
        let source = NodeIndex::new(2 * cells);
        let sink = NodeIndex::new(2 * cells + 1);
        let mut network = ResidualNetwork::with_nodes(2 * cells + 2);

        let cell_edge = (0..cells)
            .map(|cell| {
                let capacity = if cell == AGENT || !index.cell(cell).wallable { infinity } else { 1 };
                network.add_edge(in_node(cell), out_node(cell), capacity)
            })
            .collect();

        for cell in 0..cells {
            for neighbor in index.neighbors(cell) {
                network.add_edge(out_node(cell), in_node(neighbor), infinity);
            }
        }

        for cell in (0..cells).filter(|cell| index.cell(*cell).boundary) {
            network.add_edge(out_node(cell), sink, infinity);
        }

        let source_edge = (0..cells)
            .map(|cell| network.add_edge(source, out_node(cell), if cell == AGENT { infinity } else { 0 }))
            .collect();

        tracing::debug!(nodes = network.node_count(), edges = network.edge_count(), "built flow network");

        Self {
            index,
            network,
            cell_edge,
            source_edge,
            source,
            sink,
            infinity,
        }
    }

    /// Find a minimum separator among cells that are neither `deleted` (already walls) nor `forced` (kept open).
    ///
    /// Of all minimum separators, the one furthest from the agent is chosen, so the region it encloses is maximal.
    /// Returns [`None`] if `forced` and `deleted` overlap or if every separator needs more than `remaining` walls.
    pub(crate) fn min_separator(&self, deleted: &FixedBitSet, forced: &FixedBitSet, remaining: usize) -> Option<Separator> {
        if !forced.is_disjoint(deleted) {
            return None;
        }

        let mut capacities = self.network.base_capacities();
        for cell in deleted.ones() {
            capacities[self.cell_edge[cell].index()] = 0;
        }
        for cell in forced.ones() {
            capacities[self.cell_edge[cell].index()] = self.infinity;
            capacities[self.source_edge[cell].index()] = self.infinity;
        }

        let remaining = clamp_budget(remaining);
        let flow = self.network.max_flow_bounded(self.source, self.sink, &mut capacities, remaining + 1);
        if flow > remaining {
            return None;
        }

        let can_reach_sink = self.network.reaching(self.sink, &capacities);
        let mut cells = self.index.empty_set();
        cells.extend((0..self.index.len()).filter(|cell| {
            self.index.cell(*cell).wallable
                && !deleted.contains(*cell)
                && !forced.contains(*cell)
                && !can_reach_sink.contains(in_node(*cell).index())
                && can_reach_sink.contains(out_node(*cell).index())
        }));

        Some(Separator { cells, flow })
    }
}
