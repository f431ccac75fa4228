use crate::grid::Position;
use thiserror::Error;

/// Failures raised while a search process is running.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Reconstruction was asked for a node that does not lead back to the start.
    #[error("no parent chain from {terminal} back to {start}")]
    BrokenParentChain { start: Position, terminal: Position },
}

/// Rejected configuration values, reported before any grid is built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("{name} {position} lies outside the {rows}x{cols} grid")]
    PositionOutOfBounds {
        name: &'static str,
        position: Position,
        rows: usize,
        cols: usize,
    },

    #[error("depth limit must be within 1..=100, got {0}")]
    DepthLimitOutOfRange(usize),

    #[error("iterative deepening cap must be at least 1")]
    ZeroDepthCap,

    #[error("invalid grid layout: {0}")]
    InvalidLayout(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected `row,col`, got `{0}`")]
pub struct ParsePositionError(pub String);

/// Everything that can stop the simulation driver.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),
}
