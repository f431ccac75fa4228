use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use uninformed_search::config::Config;
use uninformed_search::monitor::blocked_positions;
use uninformed_search::simulation::shortest_route_length;
use uninformed_search::{path_blocked, Algorithm, Cell, Grid, Position, SearchEvent};

const DEPTH_LIMIT: usize = 100;
const MAX_DEPTH: usize = 50;

fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

fn random_grid(seed: u64) -> Grid {
    let config = Config::parse_from([
        "uninformed_search",
        "--rows",
        "10",
        "--cols",
        "10",
        "--target",
        "8,9",
        "--wall-probability",
        "0.3",
    ]);
    let mut rng = StdRng::seed_from_u64(seed);
    Grid::generate(&config, &mut rng).unwrap()
}

fn solve(algorithm: Algorithm, grid: &Grid) -> Option<Vec<Position>> {
    algorithm
        .build(grid.start(), grid.target(), DEPTH_LIMIT, MAX_DEPTH)
        .run_to_end(grid)
        .unwrap()
}

fn assert_well_formed(algorithm: Algorithm, grid: &Grid, path: &[Position]) {
    assert_eq!(path.first(), Some(&grid.start()), "{algorithm} route must leave from start");
    assert_eq!(path.last(), Some(&grid.target()), "{algorithm} route must end at target");
    for pair in path.windows(2) {
        assert!(
            pair[0].is_adjacent(pair[1]),
            "{algorithm}: {} -> {} is not a single move",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn every_route_is_a_chain_of_single_moves() {
    for seed in 0..40 {
        let grid = random_grid(seed);
        for algorithm in Algorithm::ALL {
            if let Some(path) = solve(algorithm, &grid) {
                assert_well_formed(algorithm, &grid, &path);
                assert!(path.iter().all(|&pos| grid.is_valid(pos)));
            }
        }
    }
}

#[test]
fn breadth_first_matches_the_shortest_route() {
    for seed in 0..40 {
        let grid = random_grid(seed);
        let found = solve(Algorithm::BreadthFirst, &grid).map(|path| path.len());
        assert_eq!(found, shortest_route_length(&grid), "seed {seed}");
        assert_eq!(solve(Algorithm::UniformCost, &grid).map(|path| path.len()), found);
        assert_eq!(solve(Algorithm::Bidirectional, &grid).map(|path| path.len()), found);
    }
}

#[test]
fn complete_strategies_agree_on_reachability() {
    for seed in 0..40 {
        let grid = random_grid(seed);
        let reachable = shortest_route_length(&grid).is_some();
        for algorithm in [Algorithm::BreadthFirst, Algorithm::DepthFirst, Algorithm::UniformCost] {
            assert_eq!(solve(algorithm, &grid).is_some(), reachable, "{algorithm} seed {seed}");
        }
    }
}

#[test]
fn depth_first_and_uniform_cost_expand_each_cell_once() {
    for seed in 0..20 {
        let grid = random_grid(seed);
        for algorithm in [Algorithm::DepthFirst, Algorithm::UniformCost] {
            let mut process = algorithm.build(grid.start(), grid.target(), DEPTH_LIMIT, MAX_DEPTH);
            let mut expanded = std::collections::HashSet::new();
            loop {
                match process.step(&grid).unwrap() {
                    SearchEvent::Step(obs) => {
                        if !obs.visited.contains(&obs.current) {
                            assert!(
                                expanded.insert(obs.current),
                                "{algorithm} re-expanded {}",
                                obs.current
                            );
                        }
                    }
                    SearchEvent::Finished(_) => break,
                }
            }
        }
    }
}

#[test]
fn three_by_three_open_grid() {
    let grid = Grid::from_layout(&["S..", "...", "..T"], 0.0).unwrap();
    let mut bfs =
        Algorithm::BreadthFirst.build(grid.start(), grid.target(), DEPTH_LIMIT, MAX_DEPTH);
    match bfs.step(&grid).unwrap() {
        SearchEvent::Step(obs) => assert_eq!(obs.current, p(0, 0)),
        other => panic!("expected a step, got {other:?}"),
    }
    assert_eq!(bfs.run_to_end(&grid).unwrap(), Some(vec![p(0, 0), p(1, 1), p(2, 2)]));
}

#[test]
fn start_on_target_inside_walls_succeeds_everywhere() {
    let grid = Grid::from_layout(&["###", "#*#", "###"], 0.0).unwrap();
    for algorithm in Algorithm::ALL {
        assert_eq!(solve(algorithm, &grid), Some(vec![p(1, 1)]), "{algorithm}");
    }
}

#[test]
fn enclosed_target_exhausts_the_complete_strategies() {
    let grid = Grid::from_layout(&["S....", ".....", "...##", "...#T"], 0.0).unwrap();
    for algorithm in [Algorithm::BreadthFirst, Algorithm::DepthFirst, Algorithm::UniformCost] {
        let mut process = algorithm.build(grid.start(), grid.target(), DEPTH_LIMIT, MAX_DEPTH);
        let mut observed = std::collections::HashSet::new();
        let path = loop {
            match process.step(&grid).unwrap() {
                SearchEvent::Step(obs) => {
                    observed.insert(obs.current);
                }
                SearchEvent::Finished(path) => break path,
            }
        };
        assert_eq!(path, None, "{algorithm}");
        // Every reachable cell was looked at before giving up.
        assert_eq!(observed.len(), 16, "{algorithm}");
    }
}

#[test]
fn iterative_deepening_cap_hides_long_corridors() {
    let mut layout = String::from("S");
    layout.push_str(&".".repeat(54));
    layout.push('T');
    let grid = Grid::from_layout(&[layout.as_str()], 0.0).unwrap();

    let shortest = solve(Algorithm::BreadthFirst, &grid).unwrap();
    assert_eq!(shortest.len() - 1, 55);
    assert_eq!(solve(Algorithm::IterativeDeepening, &grid), None);

    let mut uncapped =
        Algorithm::IterativeDeepening.build(grid.start(), grid.target(), DEPTH_LIMIT, 56);
    assert_eq!(uncapped.run_to_end(&grid).unwrap(), Some(shortest));
}

#[test]
fn obstacles_injected_between_steps_are_never_crossed() {
    for seed in 0..20 {
        for algorithm in Algorithm::ALL {
            let mut grid = random_grid(seed);
            let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
            let mut process = algorithm.build(grid.start(), grid.target(), DEPTH_LIMIT, MAX_DEPTH);
            let mut spawned = Vec::new();

            let path = loop {
                match process.step(&grid).unwrap() {
                    SearchEvent::Step(_) => {
                        let pos = p(rng.gen_range(0..grid.rows()), rng.gen_range(0..grid.cols()));
                        if grid.place_dynamic_obstacle(pos) {
                            spawned.push(pos);
                        }
                    }
                    SearchEvent::Finished(path) => break path,
                }
            };

            assert!(spawned.iter().all(|&pos| grid.cell(pos) == Some(Cell::DynamicWall)));
            assert_eq!(grid.cell(grid.start()), Some(Cell::Start));
            assert_eq!(grid.cell(grid.target()), Some(Cell::Target));

            if let Some(path) = path {
                assert_well_formed(algorithm, &grid, &path);
                assert!(path.iter().all(|&pos| grid.cell(pos) != Some(Cell::StaticWall)));
                assert_eq!(
                    path_blocked(&grid, &path),
                    blocked_positions(&grid, &path).next().is_some()
                );
            }
        }
    }
}

#[test]
fn abandoning_a_search_leaves_the_grid_untouched() {
    let grid = random_grid(3);
    let before = grid.cells().to_vec();
    for algorithm in Algorithm::ALL {
        let mut process = algorithm.build(grid.start(), grid.target(), DEPTH_LIMIT, MAX_DEPTH);
        for _ in 0..5 {
            process.step(&grid).unwrap();
        }
        drop(process);
    }
    assert_eq!(grid.cells(), before.as_slice());
}
