use crate::algorithms::Algorithm;
use crate::config::Config;
use crate::error::SimulationError;
use crate::simulation::Simulation;
use crate::statistics::Statistics;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};

const CSV_HEADER: &str = "seed,algorithm,success,steps,visited,static_walls,dynamic_obstacles,path_length,reference_length,route_efficiency,path_blocked";

/// Runs every algorithm over a range of consecutive seeds and appends one
/// CSV row per run.
pub struct BatchSimulation {
    config: Config,
    runs: usize,
    base_seed: u64,
    results: Vec<Statistics>,
    batch_size: usize,
    total_results_written: usize,
    start_time: Instant,
}

impl BatchSimulation {
    pub fn new(config: Config, runs: usize) -> Self {
        let base_seed = config.seed.unwrap_or_else(rand::random);
        BatchSimulation {
            config,
            runs,
            base_seed,
            results: Vec::new(),
            batch_size: 100,
            total_results_written: 0,
            start_time: Instant::now(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Statistics for every finished run, including those already flushed.
    pub fn results(&self) -> &[Statistics] {
        &self.results
    }

    pub fn run(&mut self) -> Result<(), SimulationError> {
        self.initialize_csv_file()?;
        log::info!(
            "batch: {} runs x {} algorithms from seed {} -> {}",
            self.runs,
            Algorithm::ALL.len(),
            self.base_seed,
            self.config.output_file
        );

        let mut pending = 0;
        let mut last_progress_report = Instant::now();
        let progress_interval = Duration::from_secs(10);

        for run in 0..self.runs {
            let seed = self.base_seed.wrapping_add(run as u64);
            for algorithm in Algorithm::ALL {
                let mut run_config = self.config.clone();
                run_config.algorithm = algorithm;
                run_config.no_visualization = true;

                let outcome = Simulation::with_seed(run_config, seed)?.run()?;
                self.results.push(outcome.statistics);
                pending += 1;
            }

            if pending >= self.batch_size {
                self.flush_results_to_csv(pending)?;
                pending = 0;
            }

            if last_progress_report.elapsed() > progress_interval {
                log::info!(
                    "batch progress: {}/{} runs in {:.1}s",
                    run + 1,
                    self.runs,
                    self.start_time.elapsed().as_secs_f64()
                );
                last_progress_report = Instant::now();
            }
        }

        if pending > 0 {
            self.flush_results_to_csv(pending)?;
        }
        log::info!(
            "batch finished: {} rows in {:.1}s",
            self.total_results_written,
            self.start_time.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn initialize_csv_file(&self) -> Result<(), SimulationError> {
        let mut file = File::create(&self.config.output_file)?;
        writeln!(file, "{}", CSV_HEADER)?;
        Ok(())
    }

    /// Appends the last `count` results to the output file.
    fn flush_results_to_csv(&mut self, count: usize) -> Result<(), SimulationError> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.config.output_file)?;
        let mut out = BufWriter::new(file);

        let fresh = &self.results[self.results.len() - count..];
        for stats in fresh {
            writeln!(out, "{}", csv_row(stats))?;
        }
        out.flush()?;

        self.total_results_written += count;
        log::debug!("flushed {} rows (total {})", count, self.total_results_written);
        Ok(())
    }

    pub fn print_summary(&self) {
        println!("\n=== BATCH SUMMARY ===");
        for algorithm in Algorithm::ALL {
            let runs: Vec<_> = self.results.iter().filter(|s| s.algorithm == algorithm).collect();
            if runs.is_empty() {
                continue;
            }
            let successful: Vec<_> = runs.iter().filter(|s| s.success()).collect();
            let success_rate = successful.len() as f64 / runs.len() as f64 * 100.0;
            println!("{}:", algorithm);
            println!("  Success rate: {}/{} ({:.1}%)", successful.len(), runs.len(), success_rate);

            if !successful.is_empty() {
                let n = successful.len() as f64;
                let avg_steps = successful.iter().map(|s| s.steps as f64).sum::<f64>() / n;
                let avg_efficiency = successful.iter().map(|s| s.route_efficiency).sum::<f64>() / n;
                let blocked = successful.iter().filter(|s| s.path_blocked).count();
                println!("  Average steps: {:.1}", avg_steps);
                println!("  Average efficiency: {:.3}", avg_efficiency);
                println!("  Routes blocked afterwards: {}", blocked);
            }
        }
    }
}

fn csv_row(stats: &Statistics) -> String {
    let optional = |v: Option<usize>| v.map_or(String::new(), |n| n.to_string());
    format!(
        "{},{},{},{},{},{},{},{},{},{:.6},{}",
        stats.seed,
        stats.algorithm.slug(),
        stats.success(),
        stats.steps,
        stats.visited,
        stats.static_walls,
        stats.dynamic_obstacles,
        optional(stats.path_length),
        optional(stats.reference_length),
        stats.route_efficiency,
        stats.path_blocked
    )
}
