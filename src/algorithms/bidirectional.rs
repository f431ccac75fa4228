use crate::algorithms::common::{Observation, Outcome, SearchEvent, SearchProcess};
use crate::algorithms::reconstruct::reconstruct_path;
use crate::algorithms::Algorithm;
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};

/// Layered breadth-first search from the start that stops as soon as it
/// touches the goal side.
///
/// The goal side is seeded with the target and never grows: only the
/// start-side front is expanded, one whole layer per round, and a meeting
/// is detected when a neighbour lies in the goal-side visited set. The
/// route runs from the start to the meeting node.
pub struct Bidirectional {
    start: Position,
    start_front: Vec<Position>,
    /// Index of the next node of `start_front` to emit.
    cursor: usize,
    next_front: Vec<Position>,
    visited_start: FxHashSet<Position>,
    visited_goal: FxHashSet<Position>,
    parent_start: FxHashMap<Position, Position>,
    pending: Option<Position>,
    outcome: Outcome,
}

impl Bidirectional {
    pub fn new(start: Position, target: Position) -> Self {
        let mut visited_start = FxHashSet::default();
        visited_start.insert(start);
        let mut visited_goal = FxHashSet::default();
        visited_goal.insert(target);
        Bidirectional {
            start,
            start_front: vec![start],
            cursor: 0,
            next_front: Vec::new(),
            visited_start,
            visited_goal,
            parent_start: FxHashMap::default(),
            pending: None,
            outcome: Outcome::default(),
        }
    }

    fn meet(&mut self, meeting: Position) -> Result<SearchEvent, SearchError> {
        log::debug!("bidirectional: fronts meet at {meeting}");
        let path = reconstruct_path(&self.parent_start, self.start, meeting)?;
        Ok(self.outcome.finish(Algorithm::Bidirectional, Some(path)))
    }
}

impl SearchProcess for Bidirectional {
    fn step(&mut self, grid: &Grid) -> Result<SearchEvent, SearchError> {
        if let Some(done) = self.outcome.get() {
            return Ok(done);
        }

        if let Some(node) = self.pending.take() {
            // Only the start itself can already be on the goal side.
            if self.visited_goal.contains(&node) {
                return self.meet(node);
            }
            for neighbor in grid.neighbors(node) {
                if self.visited_goal.contains(&neighbor) {
                    self.parent_start.insert(neighbor, node);
                    return self.meet(neighbor);
                }
                if self.visited_start.insert(neighbor) {
                    self.parent_start.insert(neighbor, node);
                    self.next_front.push(neighbor);
                }
            }
        }

        if self.cursor == self.start_front.len() {
            self.start_front = std::mem::take(&mut self.next_front);
            self.cursor = 0;
        }
        let Some(&node) = self.start_front.get(self.cursor) else {
            return Ok(self.outcome.finish(Algorithm::Bidirectional, None));
        };
        self.cursor += 1;
        self.pending = Some(node);
        Ok(SearchEvent::Step(Observation {
            current: node,
            frontier: self.start_front.clone(),
            visited: self.visited_start.clone(),
        }))
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Bidirectional
    }
}
