use crate::algorithms::Algorithm;
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use rustc_hash::FxHashSet;

/// The eight move offsets as (row, col) deltas. The order is the
/// tie-breaker every strategy expands neighbours in.
pub const MOVES: [(isize, isize); 8] = [
    (-1, 0),  // up
    (0, 1),   // right
    (1, 0),   // down
    (1, 1),   // down-right
    (0, -1),  // left
    (-1, -1), // up-left
    (-1, 1),  // up-right
    (1, -1),  // down-left
];

/// State exposed after one expansion step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub current: Position,
    /// Positions to highlight as pending; ordering depends on the strategy.
    pub frontier: Vec<Position>,
    pub visited: FxHashSet<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Step(Observation),
    /// `None` means the reachable space was exhausted without hitting the target.
    Finished(Option<Vec<Position>>),
}

impl SearchEvent {
    pub fn is_finished(&self) -> bool {
        matches!(self, SearchEvent::Finished(_))
    }
}

/// A resumable search bound to a start and target.
///
/// Each call to `step` does the work left over from the previous
/// observation, then either emits the next observation or finishes. The
/// grid is only borrowed for the duration of a call, so the caller is free
/// to mutate it between calls. Dropping the process abandons the search.
pub trait SearchProcess {
    fn step(&mut self, grid: &Grid) -> Result<SearchEvent, SearchError>;

    fn algorithm(&self) -> Algorithm;

    /// Steps until the process finishes, without interleaving anything.
    fn run_to_end(&mut self, grid: &Grid) -> Result<Option<Vec<Position>>, SearchError> {
        loop {
            if let SearchEvent::Finished(path) = self.step(grid)? {
                return Ok(path);
            }
        }
    }
}

/// Terminal slot shared by the state machines: once set, every later
/// `step` replays it.
#[derive(Debug, Default)]
pub(crate) struct Outcome(Option<Option<Vec<Position>>>);

impl Outcome {
    pub(crate) fn get(&self) -> Option<SearchEvent> {
        self.0.clone().map(SearchEvent::Finished)
    }

    pub(crate) fn finish(
        &mut self,
        algorithm: Algorithm,
        path: Option<Vec<Position>>,
    ) -> SearchEvent {
        match &path {
            Some(p) => log::debug!("{algorithm}: path found with {} nodes", p.len()),
            None => log::debug!("{algorithm}: no path found"),
        }
        self.0 = Some(path.clone());
        SearchEvent::Finished(path)
    }
}
