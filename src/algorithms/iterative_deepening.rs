use crate::algorithms::common::{Outcome, SearchEvent, SearchProcess};
use crate::algorithms::depth_limited::DepthLimited;
use crate::algorithms::Algorithm;
use crate::error::SearchError;
use crate::grid::{Grid, Position};

/// Default number of depth iterations; limits run `0..DEFAULT_MAX_DEPTH`.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Runs depth-limited search with limits `0, 1, ..` below `max_depth`,
/// each round from scratch. Targets further than `max_depth - 1` moves
/// away are reported as not found.
pub struct IterativeDeepening {
    start: Position,
    target: Position,
    max_depth: usize,
    round: DepthLimited,
    outcome: Outcome,
}

impl IterativeDeepening {
    pub fn new(start: Position, target: Position, max_depth: usize) -> Self {
        IterativeDeepening {
            start,
            target,
            max_depth,
            round: DepthLimited::new(start, target, 0),
            outcome: Outcome::default(),
        }
    }

    /// Limit of the round currently being stepped.
    pub fn current_limit(&self) -> usize {
        self.round.limit()
    }
}

impl SearchProcess for IterativeDeepening {
    fn step(&mut self, grid: &Grid) -> Result<SearchEvent, SearchError> {
        if let Some(done) = self.outcome.get() {
            return Ok(done);
        }
        if self.max_depth == 0 {
            return Ok(self.outcome.finish(Algorithm::IterativeDeepening, None));
        }

        loop {
            match self.round.step(grid)? {
                SearchEvent::Finished(Some(path)) => {
                    return Ok(self.outcome.finish(Algorithm::IterativeDeepening, Some(path)));
                }
                SearchEvent::Finished(None) => {
                    let next = self.round.limit() + 1;
                    if next >= self.max_depth {
                        return Ok(self.outcome.finish(Algorithm::IterativeDeepening, None));
                    }
                    log::debug!("iterative deepening: raising limit to {next}");
                    self.round = DepthLimited::new(self.start, self.target, next);
                }
                step => return Ok(step),
            }
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::IterativeDeepening
    }
}
