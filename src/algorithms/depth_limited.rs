use crate::algorithms::common::{Observation, Outcome, SearchEvent, SearchProcess, MOVES};
use crate::algorithms::reconstruct::reconstruct_path;
use crate::algorithms::Algorithm;
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};

/// One suspended level of the depth-first recursion.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: Position,
    depth: usize,
    /// Index into `MOVES` of the next child to try.
    next_move: usize,
}

/// Depth-limited search, run as an explicit stack of frames.
///
/// A node is marked visited once it passes the depth check and stays
/// visited for the rest of the run, including for sibling branches. Nodes
/// at the limit are observed and tested against the target but never
/// marked. There is no external frontier, so observations carry an empty
/// one.
pub struct DepthLimited {
    start: Position,
    target: Position,
    limit: usize,
    stack: Vec<Frame>,
    visited: FxHashSet<Position>,
    parent: FxHashMap<Position, Position>,
    /// Node emitted by the last step with its depth; `None` before the first step.
    pending: Option<(Position, usize)>,
    started: bool,
    outcome: Outcome,
}

impl DepthLimited {
    pub fn new(start: Position, target: Position, limit: usize) -> Self {
        DepthLimited {
            start,
            target,
            limit,
            stack: Vec::new(),
            visited: FxHashSet::default(),
            parent: FxHashMap::default(),
            pending: None,
            started: false,
            outcome: Outcome::default(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn emit(&mut self, node: Position, depth: usize) -> SearchEvent {
        self.pending = Some((node, depth));
        SearchEvent::Step(Observation {
            current: node,
            frontier: Vec::new(),
            visited: self.visited.clone(),
        })
    }

    /// Resumes the innermost frame at its next untried move, popping
    /// exhausted frames, until a child is entered or the stack empties.
    fn descend(&mut self, grid: &Grid) -> Option<(Position, usize)> {
        while let Some(frame) = self.stack.last_mut() {
            while frame.next_move < MOVES.len() {
                let m = MOVES[frame.next_move];
                frame.next_move += 1;
                let Some(child) = frame.node.offset(m) else {
                    continue;
                };
                if grid.is_valid(child) && !self.visited.contains(&child) {
                    self.parent.insert(child, frame.node);
                    return Some((child, frame.depth + 1));
                }
            }
            self.stack.pop();
        }
        None
    }
}

impl SearchProcess for DepthLimited {
    fn step(&mut self, grid: &Grid) -> Result<SearchEvent, SearchError> {
        if let Some(done) = self.outcome.get() {
            return Ok(done);
        }

        if !self.started {
            self.started = true;
            return Ok(self.emit(self.start, 0));
        }

        if let Some((node, depth)) = self.pending.take() {
            if node == self.target {
                let path = reconstruct_path(&self.parent, self.start, self.target)?;
                return Ok(self.outcome.finish(Algorithm::DepthLimited, Some(path)));
            }
            if depth < self.limit {
                self.visited.insert(node);
                self.stack.push(Frame {
                    node,
                    depth,
                    next_move: 0,
                });
            }
        }

        match self.descend(grid) {
            Some((child, depth)) => Ok(self.emit(child, depth)),
            None => Ok(self.outcome.finish(Algorithm::DepthLimited, None)),
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::DepthLimited
    }
}
