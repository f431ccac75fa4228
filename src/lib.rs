//! Six uninformed grid searches (breadth-first, depth-first, uniform-cost,
//! depth-limited, iterative deepening, bidirectional) exposed as resumable
//! processes, so a caller can inspect every step and change the grid
//! between steps.

pub mod algorithms;
pub mod batch_simulation;
pub mod config;
pub mod error;
pub mod grid;
pub mod monitor;
pub mod simulation;
pub mod statistics;

pub use algorithms::common::{Observation, SearchEvent, SearchProcess, MOVES};
pub use algorithms::reconstruct::reconstruct_path;
pub use algorithms::Algorithm;
pub use error::{ConfigError, SearchError, SimulationError};
pub use grid::{Cell, Grid, Position};
pub use monitor::path_blocked;
