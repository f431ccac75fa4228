use crate::algorithms::common::{Observation, Outcome, SearchEvent, SearchProcess};
use crate::algorithms::reconstruct::reconstruct_path;
use crate::algorithms::Algorithm;
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Breadth-first search with a FIFO frontier. Nodes are marked visited
/// when enqueued, so each position enters the queue at most once and the
/// returned route has the fewest moves.
pub struct BreadthFirst {
    start: Position,
    target: Position,
    frontier: VecDeque<Position>,
    visited: FxHashSet<Position>,
    parent: FxHashMap<Position, Position>,
    /// Emitted but not yet tested or expanded.
    pending: Option<Position>,
    outcome: Outcome,
}

impl BreadthFirst {
    pub fn new(start: Position, target: Position) -> Self {
        let mut visited = FxHashSet::default();
        visited.insert(start);
        BreadthFirst {
            start,
            target,
            frontier: VecDeque::from([start]),
            visited,
            parent: FxHashMap::default(),
            pending: None,
            outcome: Outcome::default(),
        }
    }
}

impl SearchProcess for BreadthFirst {
    fn step(&mut self, grid: &Grid) -> Result<SearchEvent, SearchError> {
        if let Some(done) = self.outcome.get() {
            return Ok(done);
        }

        if let Some(current) = self.pending.take() {
            if current == self.target {
                let path = reconstruct_path(&self.parent, self.start, self.target)?;
                return Ok(self.outcome.finish(Algorithm::BreadthFirst, Some(path)));
            }
            for neighbor in grid.neighbors(current) {
                if self.visited.insert(neighbor) {
                    self.parent.insert(neighbor, current);
                    self.frontier.push_back(neighbor);
                }
            }
        }

        let Some(current) = self.frontier.pop_front() else {
            return Ok(self.outcome.finish(Algorithm::BreadthFirst, None));
        };
        self.pending = Some(current);
        Ok(SearchEvent::Step(Observation {
            current,
            frontier: self.frontier.iter().copied().collect(),
            visited: self.visited.clone(),
        }))
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::BreadthFirst
    }
}
