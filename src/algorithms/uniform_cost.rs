use crate::algorithms::common::{Observation, Outcome, SearchEvent, SearchProcess};
use crate::algorithms::reconstruct::reconstruct_path;
use crate::algorithms::Algorithm;
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Every move costs the same, diagonals included.
const STEP_COST: u32 = 1;

/// Frontier entry ordered so that `BinaryHeap` pops the cheapest first,
/// breaking ties on the lower position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    cost: u32,
    pos: Position,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed comparison to make BinaryHeap a min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Uniform-cost search with lazy deletion: improved costs push a fresh
/// entry and stale ones are observed, then skipped, when they surface.
pub struct UniformCost {
    start: Position,
    target: Position,
    frontier: BinaryHeap<Entry>,
    cost: FxHashMap<Position, u32>,
    visited: FxHashSet<Position>,
    parent: FxHashMap<Position, Position>,
    pending: Option<Entry>,
    outcome: Outcome,
}

impl UniformCost {
    pub fn new(start: Position, target: Position) -> Self {
        let mut cost = FxHashMap::default();
        cost.insert(start, 0);
        UniformCost {
            start,
            target,
            frontier: BinaryHeap::from([Entry { cost: 0, pos: start }]),
            cost,
            visited: FxHashSet::default(),
            parent: FxHashMap::default(),
            pending: None,
            outcome: Outcome::default(),
        }
    }

    fn expand(&mut self, grid: &Grid, current: Entry) {
        if !self.visited.insert(current.pos) {
            return;
        }
        let new_cost = current.cost + STEP_COST;
        for neighbor in grid.neighbors(current.pos) {
            let improves = self.cost.get(&neighbor).map_or(true, |&known| new_cost < known);
            if improves {
                self.cost.insert(neighbor, new_cost);
                self.parent.insert(neighbor, current.pos);
                self.frontier.push(Entry {
                    cost: new_cost,
                    pos: neighbor,
                });
            }
        }
    }

    /// Pending positions, cheapest first.
    fn frontier_snapshot(&self) -> Vec<Position> {
        let mut entries: Vec<Entry> = self.frontier.iter().copied().collect();
        // Entry's ordering is reversed, so a descending sort is cheapest-first.
        entries.sort_by(|a, b| b.cmp(a));
        entries.into_iter().map(|e| e.pos).collect()
    }
}

impl SearchProcess for UniformCost {
    fn step(&mut self, grid: &Grid) -> Result<SearchEvent, SearchError> {
        if let Some(done) = self.outcome.get() {
            return Ok(done);
        }

        if let Some(current) = self.pending.take() {
            if current.pos == self.target {
                let path = reconstruct_path(&self.parent, self.start, self.target)?;
                return Ok(self.outcome.finish(Algorithm::UniformCost, Some(path)));
            }
            self.expand(grid, current);
        }

        let Some(current) = self.frontier.pop() else {
            return Ok(self.outcome.finish(Algorithm::UniformCost, None));
        };
        self.pending = Some(current);
        Ok(SearchEvent::Step(Observation {
            current: current.pos,
            frontier: self.frontier_snapshot(),
            visited: self.visited.clone(),
        }))
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::UniformCost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::shortest_route_length;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn heap_pops_cheapest_then_lowest_position() {
        let mut heap = BinaryHeap::new();
        heap.push(Entry { cost: 2, pos: p(0, 0) });
        heap.push(Entry { cost: 1, pos: p(3, 3) });
        heap.push(Entry { cost: 1, pos: p(0, 5) });
        assert_eq!(heap.pop().map(|e| e.pos), Some(p(0, 5)));
        assert_eq!(heap.pop().map(|e| e.pos), Some(p(3, 3)));
        assert_eq!(heap.pop().map(|e| e.pos), Some(p(0, 0)));
    }

    #[test]
    fn diagonal_costs_the_same_as_orthogonal() {
        let grid = Grid::from_layout(&["S..", "...", "..T"], 0.0).unwrap();
        let mut ucs = UniformCost::new(grid.start(), grid.target());
        let path = ucs.run_to_end(&grid).unwrap().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(ucs.cost.get(&p(2, 2)), Some(&2));
    }

    #[test]
    fn frontier_snapshot_is_cost_ordered() {
        let grid = Grid::from_layout(&["S..", "...", "..T"], 0.0).unwrap();
        let mut ucs = UniformCost::new(grid.start(), grid.target());
        ucs.step(&grid).unwrap();
        ucs.step(&grid).unwrap();

        let SearchEvent::Step(obs) = ucs.step(&grid).unwrap() else {
            panic!("expected a step");
        };
        assert_eq!(obs.current, p(1, 0));
        assert_eq!(obs.frontier, vec![p(1, 1), p(0, 2), p(1, 2)]);
        for pos in &obs.frontier {
            assert!(ucs.cost[pos] >= 1);
        }
    }

    #[test]
    fn never_expands_a_position_twice() {
        let grid = Grid::from_layout(&["S...", ".#..", "...#", "#..T"], 0.0).unwrap();
        let mut ucs = UniformCost::new(grid.start(), grid.target());
        let mut expanded = Vec::new();
        loop {
            match ucs.step(&grid).unwrap() {
                SearchEvent::Step(obs) => {
                    if !obs.visited.contains(&obs.current) {
                        assert!(!expanded.contains(&obs.current), "{} expanded twice", obs.current);
                        expanded.push(obs.current);
                    }
                }
                SearchEvent::Finished(path) => {
                    // The wall at (1, 1) rules out the straight diagonal.
                    assert_eq!(path.map(|p| p.len()), Some(5));
                    assert_eq!(shortest_route_length(&grid), Some(5));
                    break;
                }
            }
        }
    }

    #[test]
    fn enclosed_target_exhausts() {
        let grid = Grid::from_layout(&["S...", "....", "..##", "..#T"], 0.0).unwrap();
        let mut ucs = UniformCost::new(grid.start(), grid.target());
        assert_eq!(ucs.run_to_end(&grid).unwrap(), None);
        assert_eq!(ucs.visited.len(), 12);
    }
}
