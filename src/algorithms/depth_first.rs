use crate::algorithms::common::{Observation, Outcome, SearchEvent, SearchProcess, MOVES};
use crate::algorithms::reconstruct::reconstruct_path;
use crate::algorithms::Algorithm;
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};

/// Depth-first search over an explicit stack.
///
/// Nodes are marked visited when popped rather than when pushed, so the
/// stack may hold duplicates; a duplicate is still observed when popped and
/// then dropped without expansion.
pub struct DepthFirst {
    start: Position,
    target: Position,
    frontier: Vec<Position>,
    visited: FxHashSet<Position>,
    parent: FxHashMap<Position, Position>,
    pending: Option<Position>,
    outcome: Outcome,
}

impl DepthFirst {
    pub fn new(start: Position, target: Position) -> Self {
        DepthFirst {
            start,
            target,
            frontier: vec![start],
            visited: FxHashSet::default(),
            parent: FxHashMap::default(),
            pending: None,
            outcome: Outcome::default(),
        }
    }

    fn expand(&mut self, grid: &Grid, current: Position) {
        if !self.visited.insert(current) {
            return;
        }
        // Reverse push so the first move is popped first.
        for &m in MOVES.iter().rev() {
            let Some(neighbor) = current.offset(m) else {
                continue;
            };
            if grid.is_valid(neighbor) && !self.visited.contains(&neighbor) {
                self.frontier.push(neighbor);
                self.parent.insert(neighbor, current);
            }
        }
    }
}

impl SearchProcess for DepthFirst {
    fn step(&mut self, grid: &Grid) -> Result<SearchEvent, SearchError> {
        if let Some(done) = self.outcome.get() {
            return Ok(done);
        }

        if let Some(current) = self.pending.take() {
            if current == self.target {
                let path = reconstruct_path(&self.parent, self.start, self.target)?;
                return Ok(self.outcome.finish(Algorithm::DepthFirst, Some(path)));
            }
            self.expand(grid, current);
        }

        let Some(current) = self.frontier.pop() else {
            return Ok(self.outcome.finish(Algorithm::DepthFirst, None));
        };
        self.pending = Some(current);
        Ok(SearchEvent::Step(Observation {
            current,
            frontier: self.frontier.clone(),
            visited: self.visited.clone(),
        }))
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::DepthFirst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn currents(grid: &Grid, search: &mut DepthFirst) -> (Vec<Position>, Option<Vec<Position>>) {
        let mut seen = Vec::new();
        loop {
            match search.step(grid).unwrap() {
                SearchEvent::Step(obs) => seen.push(obs.current),
                SearchEvent::Finished(path) => return (seen, path),
            }
        }
    }

    #[test]
    fn visited_starts_empty() {
        let grid = Grid::from_layout(&["S.", ".T"], 0.0).unwrap();
        let mut dfs = DepthFirst::new(grid.start(), grid.target());
        let SearchEvent::Step(obs) = dfs.step(&grid).unwrap() else {
            panic!("expected a step");
        };
        assert_eq!(obs.current, p(0, 0));
        assert!(obs.visited.is_empty());
    }

    #[test]
    fn expands_in_move_order() {
        let grid = Grid::from_layout(&["S..", "...", "..T"], 0.0).unwrap();
        let mut dfs = DepthFirst::new(grid.start(), grid.target());
        dfs.step(&grid).unwrap();

        let SearchEvent::Step(obs) = dfs.step(&grid).unwrap() else {
            panic!("expected a step");
        };
        // Right is the first valid move from the corner.
        assert_eq!(obs.current, p(0, 1));
        assert_eq!(obs.frontier, vec![p(1, 1), p(1, 0)]);
    }

    #[test]
    fn walks_a_corridor_to_the_target() {
        let grid = Grid::from_layout(&["S...T"], 0.0).unwrap();
        let mut dfs = DepthFirst::new(grid.start(), grid.target());
        let (seen, path) = currents(&grid, &mut dfs);
        assert_eq!(seen, vec![p(0, 0), p(0, 1), p(0, 2), p(0, 3), p(0, 4)]);
        assert_eq!(path.unwrap().len(), 5);
    }

    #[test]
    fn duplicates_are_observed_but_not_expanded() {
        // (1,0) is pushed from both (0,0) and (0,1); the target is walled off.
        let grid = Grid::from_layout(&["S.#", ".##", "##T"], 0.0).unwrap();
        let mut dfs = DepthFirst::new(grid.start(), grid.target());
        let mut observed = Vec::new();
        let mut expanded = Vec::new();
        loop {
            match dfs.step(&grid).unwrap() {
                SearchEvent::Step(obs) => {
                    observed.push(obs.current);
                    if !obs.visited.contains(&obs.current) {
                        assert!(!expanded.contains(&obs.current));
                        expanded.push(obs.current);
                    }
                }
                SearchEvent::Finished(path) => {
                    assert_eq!(path, None);
                    break;
                }
            }
        }
        assert_eq!(observed, vec![p(0, 0), p(0, 1), p(1, 0), p(1, 0)]);
        assert_eq!(expanded, vec![p(0, 0), p(0, 1), p(1, 0)]);
    }

    #[test]
    fn later_push_overwrites_parent() {
        let grid = Grid::from_layout(&["S.", ".#", "#T"], 0.0).unwrap();
        let mut dfs = DepthFirst::new(grid.start(), grid.target());
        let path = dfs.run_to_end(&grid).unwrap();
        assert_eq!(path, Some(vec![p(0, 0), p(0, 1), p(1, 0), p(2, 1)]));
    }
}
