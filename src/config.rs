use crate::algorithms::iterative_deepening::DEFAULT_MAX_DEPTH;
use crate::algorithms::Algorithm;
use crate::error::ConfigError;
use crate::grid::Position;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    #[arg(long, default_value_t = 20)]
    pub cols: usize,

    /// Start cell as `row,col`
    #[arg(long, default_value = "0,0")]
    pub start: Position,

    /// Target cell as `row,col`
    #[arg(long, default_value = "10,16")]
    pub target: Position,

    /// Chance that any non-endpoint cell starts as a static wall
    #[arg(long, default_value_t = 0.15)]
    pub wall_probability: f64,

    /// Chance, per search step, of dropping a dynamic wall on a random cell
    #[arg(long, default_value_t = 0.03)]
    pub dynamic_probability: f64,

    #[arg(long, value_enum, default_value_t = Algorithm::BreadthFirst)]
    pub algorithm: Algorithm,

    /// Depth limit for depth-limited search
    #[arg(long, default_value_t = 20)]
    pub depth_limit: usize,

    /// Number of iterative-deepening rounds (limits 0 up to this, exclusive)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    /// Seed for wall placement and dynamic obstacles; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run every algorithm on the same grid and compare
    #[arg(long, default_value_t = false)]
    pub compare: bool,

    /// Run this many seeds of every algorithm and write a CSV
    #[arg(long)]
    pub batch_runs: Option<usize>,

    #[arg(long, default_value = "results.csv")]
    pub output_file: String,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("wall probability", self.wall_probability),
            ("dynamic probability", self.dynamic_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        for (name, position) in [("start", self.start), ("target", self.target)] {
            if position.row >= self.rows || position.col >= self.cols {
                return Err(ConfigError::PositionOutOfBounds {
                    name,
                    position,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }
        if !(1..=100).contains(&self.depth_limit) {
            return Err(ConfigError::DepthLimitOutOfRange(self.depth_limit));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepthCap);
        }
        Ok(())
    }
}
