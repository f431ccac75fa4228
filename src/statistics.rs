use crate::algorithms::Algorithm;
use std::fmt;

/// Summary of one search run.
#[derive(Debug, Clone)]
pub struct Statistics {
    pub algorithm: Algorithm,
    pub seed: u64,
    /// Observations emitted before the process finished.
    pub steps: usize,
    /// Size of the visited set at the last observation.
    pub visited: usize,
    pub static_walls: usize,
    pub dynamic_obstacles: usize,
    /// Node count of the returned route.
    pub path_length: Option<usize>,
    /// Node count of the shortest route on the grid before any dynamic walls.
    pub reference_length: Option<usize>,
    pub route_efficiency: f64,
    pub path_blocked: bool,
}

impl Statistics {
    pub fn new(
        algorithm: Algorithm,
        seed: u64,
        static_walls: usize,
        reference_length: Option<usize>,
    ) -> Self {
        Statistics {
            algorithm,
            seed,
            steps: 0,
            visited: 0,
            static_walls,
            dynamic_obstacles: 0,
            path_length: None,
            reference_length,
            route_efficiency: 0.0,
            path_blocked: false,
        }
    }

    pub fn success(&self) -> bool {
        self.path_length.is_some()
    }

    /// Moves taken relative to the reference; 1.0 is optimal.
    pub fn calculate_efficiency(&mut self) {
        self.route_efficiency = match (self.path_length, self.reference_length) {
            (Some(found), Some(best)) if best > 1 => (found - 1) as f64 / (best - 1) as f64,
            (Some(_), Some(_)) => 1.0,
            _ => 0.0,
        };
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(f, "Visited: {}", self.visited)?;
        writeln!(f, "Static walls: {}", self.static_walls)?;
        writeln!(f, "Dynamic obstacles spawned: {}", self.dynamic_obstacles)?;
        match self.path_length {
            Some(len) => writeln!(f, "Path length: {} nodes", len)?,
            None => writeln!(f, "Path length: no path found")?,
        }
        match self.reference_length {
            Some(len) => writeln!(f, "Shortest possible (initial grid): {} nodes", len)?,
            None => writeln!(f, "Shortest possible (initial grid): unreachable")?,
        }
        if self.success() {
            writeln!(f, "Route efficiency: {:.3}", self.route_efficiency)?;
            if self.path_blocked {
                writeln!(f, "Path is now blocked by a dynamic obstacle")?;
            }
        }
        Ok(())
    }
}
