pub mod bidirectional;
pub mod breadth_first;
pub mod common;
pub mod depth_first;
pub mod depth_limited;
pub mod iterative_deepening;
pub mod reconstruct;
pub mod uniform_cost;

use crate::grid::Position;
use bidirectional::Bidirectional;
use breadth_first::BreadthFirst;
use clap::ValueEnum;
use common::SearchProcess;
use depth_first::DepthFirst;
use depth_limited::DepthLimited;
use iterative_deepening::IterativeDeepening;
use std::fmt;
use uniform_cost::UniformCost;

/// The six uninformed strategies, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Algorithm {
    BreadthFirst,
    DepthFirst,
    UniformCost,
    DepthLimited,
    IterativeDeepening,
    Bidirectional,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::UniformCost,
        Algorithm::DepthLimited,
        Algorithm::IterativeDeepening,
        Algorithm::Bidirectional,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => "Breadth-First Search",
            Algorithm::DepthFirst => "Depth-First Search",
            Algorithm::UniformCost => "Uniform-Cost Search",
            Algorithm::DepthLimited => "Depth-Limited Search",
            Algorithm::IterativeDeepening => "Iterative Deepening DFS",
            Algorithm::Bidirectional => "Bidirectional Search",
        }
    }

    /// Short identifier, the same one accepted on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => "breadth-first",
            Algorithm::DepthFirst => "depth-first",
            Algorithm::UniformCost => "uniform-cost",
            Algorithm::DepthLimited => "depth-limited",
            Algorithm::IterativeDeepening => "iterative-deepening",
            Algorithm::Bidirectional => "bidirectional",
        }
    }

    /// Builds a fresh search process. `depth_limit` is only read by
    /// depth-limited search and `max_depth` only by iterative deepening.
    pub fn build(
        self,
        start: Position,
        target: Position,
        depth_limit: usize,
        max_depth: usize,
    ) -> Box<dyn SearchProcess> {
        match self {
            Algorithm::BreadthFirst => Box::new(BreadthFirst::new(start, target)),
            Algorithm::DepthFirst => Box::new(DepthFirst::new(start, target)),
            Algorithm::UniformCost => Box::new(UniformCost::new(start, target)),
            Algorithm::DepthLimited => Box::new(DepthLimited::new(start, target, depth_limit)),
            Algorithm::IterativeDeepening => {
                Box::new(IterativeDeepening::new(start, target, max_depth))
            }
            Algorithm::Bidirectional => Box::new(Bidirectional::new(start, target)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_tags_each_process() {
        let start = Position::new(0, 0);
        let target = Position::new(1, 1);
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.build(start, target, 5, 10).algorithm(), algorithm);
        }
    }

    #[test]
    fn cli_names_match_slugs() {
        for algorithm in Algorithm::ALL {
            assert_eq!(Algorithm::from_str(algorithm.slug(), false), Ok(algorithm));
        }
        assert!(Algorithm::from_str("astar", false).is_err());
    }
}
