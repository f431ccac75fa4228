use clap::Parser;

use uninformed_search::batch_simulation::BatchSimulation;
use uninformed_search::config::Config;
use uninformed_search::simulation::Simulation;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    println!("Starting uninformed search...");
    println!("Grid size: {}x{}", config.rows, config.cols);
    println!("Start: {}, Target: {}", config.start, config.target);
    println!(
        "Wall probability: {}, Dynamic obstacle probability: {}",
        config.wall_probability, config.dynamic_probability
    );

    if let Some(runs) = config.batch_runs {
        let mut batch = BatchSimulation::new(config, runs);
        match batch.run() {
            Ok(()) => batch.print_summary(),
            Err(e) => {
                eprintln!("Batch simulation failed: {}", e);
                std::process::exit(1);
            }
        }
    } else if config.compare {
        match Simulation::run_all_algorithms(config) {
            Ok(results) => Simulation::print_comparison_results(&results),
            Err(e) => {
                eprintln!("Error running all algorithms: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("Algorithm: {}", config.algorithm);
        if !config.no_visualization {
            println!("Visualization enabled with {}ms delay", config.delay_ms);
            std::thread::sleep(std::time::Duration::from_millis(1000));
        }

        let outcome = Simulation::new(config).and_then(|mut simulation| simulation.run());
        match outcome {
            Ok(outcome) => {
                println!("\n=== FINAL RESULTS ===");
                println!("{}", outcome.statistics);
                if let Some(path) = outcome.path {
                    let route: Vec<String> = path.iter().map(ToString::to_string).collect();
                    println!("Route: {}", route.join(" -> "));
                }
            }
            Err(e) => {
                eprintln!("Simulation failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
