use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction::Incoming;

pub(crate) type Capacity = u32;

/// A directed flow network whose topology is fixed once built.
///
/// Capacities live outside the graph so that one network can serve many queries, each on its own copy of
/// [`Self::base_capacities`]. Every edge is stored with its paired reverse edge as its weight, so
/// `reverse(reverse(e)) == e` for all edges.
pub(crate) struct ResidualNetwork {
    graph: DiGraph<(), EdgeIndex>,
    base_capacity: Vec<Capacity>,
}

impl ResidualNetwork {
    pub(crate) fn with_nodes(node_count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(node_count, 0);
        for _ in 0..node_count {
            graph.add_node(());
        }

        Self {
            graph,
            base_capacity: Vec::new(),
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a directed edge `from -> to` with `capacity` along with its reverse edge of capacity 0.
    ///
    /// Returns the forward edge.
    pub(crate) fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, capacity: Capacity) -> EdgeIndex {
        // placeholder until the reverse edge exists
        let forward = self.graph.add_edge(from, to, EdgeIndex::end());
        let backward = self.graph.add_edge(to, from, forward);
        self.graph[forward] = backward;

        self.base_capacity.push(capacity);
        self.base_capacity.push(0);
        forward
    }

    pub(crate) fn reverse(&self, edge: EdgeIndex) -> EdgeIndex {
        self.graph[edge]
    }

    /// A fresh, mutable copy of the capacities every edge was built with.
    pub(crate) fn base_capacities(&self) -> Vec<Capacity> {
        self.base_capacity.clone()
    }

    /// Push flow from `source` to `sink` one unit at a time until no augmenting path remains or the flow reaches `limit`.
    ///
    /// `capacities` is left holding the residual capacities.
    /// Every capacity used here is integral and `limit` is small, so unit augmentation needs at most `limit` searches.
    pub(crate) fn max_flow_bounded(&self, source: NodeIndex, sink: NodeIndex, capacities: &mut [Capacity], limit: Capacity) -> Capacity {
        let mut flow = 0;
        // edge used to enter each node, and the node it came from
        let mut parent: Vec<Option<(EdgeIndex, NodeIndex)>> = vec![None; self.node_count()];

        while flow < limit {
            parent.fill(None);
            let mut seen = FixedBitSet::with_capacity(self.node_count());
            seen.insert(source.index());
            let mut queue = VecDeque::from([source]);

            'search: while let Some(node) = queue.pop_front() {
                for edge in self.graph.edges(node) {
                    let next = edge.target();
                    if capacities[edge.id().index()] == 0 || seen.put(next.index()) {
                        continue;
                    }

                    parent[next.index()] = Some((edge.id(), node));
                    if next == sink {
                        break 'search;
                    }
                    queue.push_back(next);
                }
            }

            if !seen.contains(sink.index()) {
                break;
            }

            let mut node = sink;
            while let Some((edge, previous)) = parent[node.index()] {
                capacities[edge.index()] -= 1;
                capacities[self.reverse(edge).index()] += 1;
                node = previous;
            }
            flow += 1;
        }

        flow
    }

    /// Every node that can still reach `sink` through edges with residual capacity left in `capacities`.
    pub(crate) fn reaching(&self, sink: NodeIndex, capacities: &[Capacity]) -> FixedBitSet {
        let mut can_reach = FixedBitSet::with_capacity(self.node_count());
        can_reach.insert(sink.index());
        let mut queue = VecDeque::from([sink]);

        while let Some(node) = queue.pop_front() {
            for edge in self.graph.edges_directed(node, Incoming) {
                if capacities[edge.id().index()] > 0 && !can_reach.put(edge.source().index()) {
                    queue.push_back(edge.source());
                }
            }
        }

        can_reach
    }
}
