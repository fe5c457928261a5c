use std::collections::HashSet;

use fixedbitset::FixedBitSet;

use crate::reachability::{ReachabilityIndex, AGENT};
use crate::separator::SeparatorExtractor;

/// One node of the decision tree: cells already turned into walls, cells guaranteed to stay open, and walls left to place.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct State {
    deleted: FixedBitSet,
    forced: FixedBitSet,
    remaining: usize,
}

/// Best enclosure found by an [`EnclosureSearch`].
#[derive(Clone, Debug)]
pub(crate) struct Incumbent {
    pub(crate) area: usize,
    pub(crate) walls: FixedBitSet,
    /// False if the search stopped early because of a state limit.
    pub(crate) exhaustive: bool,
}

/// Branch and bound over the cells of minimum separators.
///
/// Each state computes a minimum separator for the cells not yet decided, records it as a candidate,
/// then branches on one of its cells: keep it open, or wall it off. Together with the visited-state set
/// this enumerates every separator reachable within the budget without expanding any state twice.
pub(crate) struct EnclosureSearch<'a> {
    index: &'a ReachabilityIndex,
    extractor: SeparatorExtractor<'a>,
    visited: HashSet<State>,
    state_limit: Option<usize>,
    best: Incumbent,
}

impl<'a> EnclosureSearch<'a> {
    pub(crate) fn new(index: &'a ReachabilityIndex, k: usize, state_limit: Option<usize>) -> Self {
        Self {
            index,
            extractor: SeparatorExtractor::new(index, k),
            visited: HashSet::new(),
            state_limit,
            best: Incumbent {
                area: 0,
                walls: index.empty_set(),
                exhaustive: true,
            },
        }
    }

    pub(crate) fn run(mut self, k: usize) -> Incumbent {
        let mut forced = self.index.empty_set();
        forced.insert(AGENT);
        self.expand(State {
            deleted: self.index.empty_set(),
            forced,
            remaining: k,
        });

        tracing::debug!(
            states = self.visited.len(),
            area = self.best.area,
            walls = self.best.walls.count_ones(..),
            exhaustive = self.best.exhaustive,
            "search finished",
        );
        self.best
    }

    fn expand(&mut self, state: State) {
        if self.visited.contains(&state) {
            return;
        }
        if self.state_limit.is_some_and(|limit| self.visited.len() >= limit) {
            self.best.exhaustive = false;
            return;
        }
        self.visited.insert(state.clone());

        // walling more cells only shrinks this, so it bounds every descendant
        let reachable_now = self.index.region_avoiding(&state.deleted);
        if reachable_now.area <= self.best.area {
            return;
        }
        if !state.forced.is_subset(&reachable_now.cells) {
            return;
        }

        let Some(separator) = self.extractor.min_separator(&state.deleted, &state.forced, state.remaining) else {
            return;
        };

        let mut candidate = state.deleted.clone();
        candidate.union_with(&separator.cells);
        let region = self.index.region_avoiding(&candidate);
        if !region.escapes && region.area > self.best.area {
            tracing::trace!(area = region.area, walls = candidate.count_ones(..), cut = separator.flow, "new best enclosure");
            self.best.area = region.area;
            self.best.walls = candidate;
        }

        if state.remaining == 0 {
            return;
        }
        let Some(pivot) = separator.cells.ones().next() else {
            return;
        };

        let mut kept_open = state.forced.clone();
        kept_open.insert(pivot);
        self.expand(State {
            deleted: state.deleted.clone(),
            forced: kept_open,
            remaining: state.remaining,
        });

        let mut walled = state.deleted;
        walled.insert(pivot);
        self.expand(State {
            deleted: walled,
            forced: state.forced,
            remaining: state.remaining - 1,
        });
    }
}
