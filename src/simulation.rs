use crate::algorithms::common::{Observation, SearchEvent};
use crate::algorithms::Algorithm;
use crate::config::Config;
use crate::error::SimulationError;
use crate::grid::{Cell, Grid, Position};
use crate::monitor::{blocked_positions, path_blocked};
use crate::statistics::Statistics;
use pathfinding::prelude::bfs;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;
use std::time::Duration;

/// Result of driving one search process to completion.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub statistics: Statistics,
    pub path: Option<Vec<Position>>,
}

/// Drives a search step by step, dropping dynamic obstacles between steps
/// and optionally drawing every frame to the terminal.
pub struct Simulation {
    grid: Grid,
    config: Config,
    rng: StdRng,
    seed: u64,
    reference_length: Option<usize>,
}

impl Simulation {
    pub fn new(config: Config) -> Result<Self, SimulationError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_seed(config, seed)
    }

    /// Same seed, same walls, same obstacle draws.
    pub fn with_seed(config: Config, seed: u64) -> Result<Self, SimulationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = Grid::generate(&config, &mut rng)?;
        Ok(Self::assemble(config, grid, rng, seed))
    }

    /// Runs on a prepared grid instead of a generated one.
    pub fn from_grid(config: Config, grid: Grid, seed: u64) -> Self {
        Self::assemble(config, grid, StdRng::seed_from_u64(seed), seed)
    }

    fn assemble(config: Config, grid: Grid, rng: StdRng, seed: u64) -> Self {
        let reference_length = shortest_route_length(&grid);
        log::info!(
            "grid {}x{} seed {}: {} static walls, start {}, target {}",
            grid.rows(),
            grid.cols(),
            seed,
            grid.count(Cell::StaticWall),
            grid.start(),
            grid.target()
        );
        Simulation {
            grid,
            config,
            rng,
            seed,
            reference_length,
        }
    }

    pub fn run(&mut self) -> Result<RunOutcome, SimulationError> {
        let algorithm = self.config.algorithm;
        let mut process = algorithm.build(
            self.grid.start(),
            self.grid.target(),
            self.config.depth_limit,
            self.config.max_depth,
        );
        let mut stats = Statistics::new(
            algorithm,
            self.seed,
            self.grid.count(Cell::StaticWall),
            self.reference_length,
        );

        let path = loop {
            match process.step(&self.grid)? {
                SearchEvent::Step(observation) => {
                    stats.steps += 1;
                    stats.visited = observation.visited.len();

                    if let Some(pos) = self.grid.spawn_dynamic_obstacle(&mut self.rng) {
                        stats.dynamic_obstacles += 1;
                        log::debug!("step {}: obstacle at {}", stats.steps, pos);
                    }

                    if !self.config.no_visualization {
                        self.draw_step(algorithm, stats.steps, &observation);
                    }
                }
                SearchEvent::Finished(path) => break path,
            }
        };

        if let Some(route) = &path {
            stats.path_length = Some(route.len());
            stats.path_blocked = path_blocked(&self.grid, route);
            if stats.path_blocked {
                let blocked: Vec<_> = blocked_positions(&self.grid, route).collect();
                log::warn!("{algorithm}: route blocked by dynamic obstacles at {blocked:?}");
            }
        }
        stats.calculate_efficiency();

        log::info!(
            "{algorithm}: {} after {} steps",
            if stats.success() { "path found" } else { "no path" },
            stats.steps
        );

        if !self.config.no_visualization {
            self.draw_final(algorithm, path.as_deref());
        }

        Ok(RunOutcome {
            statistics: stats,
            path,
        })
    }

    /// Runs every algorithm on the same seed, so they all see the same walls
    /// and the same obstacle draws per step.
    pub fn run_all_algorithms(config: Config) -> Result<Vec<Statistics>, SimulationError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        println!("Running comparison of {} algorithms...", Algorithm::ALL.len());
        println!("Environment seed: {} (for reproducibility)", seed);

        let mut results = Vec::with_capacity(Algorithm::ALL.len());
        for algorithm in Algorithm::ALL {
            let mut algorithm_config = config.clone();
            algorithm_config.algorithm = algorithm;
            algorithm_config.no_visualization = true;

            let outcome = Simulation::with_seed(algorithm_config, seed)?.run()?;
            println!(
                "Completed: {} - Success: {}, Steps: {}",
                algorithm,
                outcome.statistics.success(),
                outcome.statistics.steps
            );
            results.push(outcome.statistics);
        }
        Ok(results)
    }

    pub fn print_comparison_results(results: &[Statistics]) {
        println!("\n=== ALGORITHM COMPARISON RESULTS ===\n");
        println!(
            "{:<26} {:<8} {:<8} {:<8} {:<8} {:<10} {:<10} {:<8}",
            "Algorithm",
            "Success",
            "Steps",
            "Visited",
            "Length",
            "Shortest",
            "Efficiency",
            "Blocked"
        );
        println!("{}", "-".repeat(94));

        for stats in results {
            let length = stats.path_length.map_or("-".to_string(), |l| l.to_string());
            let shortest = stats.reference_length.map_or("-".to_string(), |l| l.to_string());
            println!(
                "{:<26} {:<8} {:<8} {:<8} {:<8} {:<10} {:<10.3} {:<8}",
                stats.algorithm.name(),
                if stats.success() { "yes" } else { "no" },
                stats.steps,
                stats.visited,
                length,
                shortest,
                stats.route_efficiency,
                if stats.path_blocked { "yes" } else { "no" }
            );
        }

        let fewest_steps = results
            .iter()
            .filter(|s| s.success())
            .min_by_key(|s| s.steps);
        match fewest_steps {
            Some(best) => println!(
                "\nFewest steps to a route: {} ({} steps)",
                best.algorithm, best.steps
            ),
            None => println!("\nNo algorithm found a route."),
        }
    }

    fn draw_step(&self, algorithm: Algorithm, step: usize, observation: &Observation) {
        self.clear_screen();
        println!("=== {} ===", algorithm);
        println!(
            "Step: {} | Current: {} | Frontier: {} | Visited: {}",
            step,
            observation.current,
            observation.frontier.len(),
            observation.visited.len()
        );
        print!("{}", self.grid.render(Some(observation), None));
        thread::sleep(Duration::from_millis(self.config.delay_ms));
    }

    fn draw_final(&self, algorithm: Algorithm, path: Option<&[Position]>) {
        self.clear_screen();
        println!("=== {} COMPLETE ===", algorithm);
        match path {
            Some(route) => println!("Route of {} nodes", route.len()),
            None => println!("No path found"),
        }
        print!("{}", self.grid.render(None, path));
    }

    fn clear_screen(&self) {
        print!("\x1B[2J\x1B[1;1H");
    }
}

/// Node count of the shortest 8-connected route on the grid as it is now.
pub fn shortest_route_length(grid: &Grid) -> Option<usize> {
    let target = grid.target();
    bfs(
        &grid.start(),
        |p| grid.neighbors(*p).collect::<Vec<_>>(),
        |p| *p == target,
    )
    .map(|route| route.len())
}
