use grid_maze::{solve, Coordinate, MazeConfig, DEFAULT_GRID_SIZE, DEFAULT_WALL_DENSITY};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Instant;

// Generates a maze with the default size and density, then solves it from the top-left to the
// bottom-right corner. The maze is printed with
// - # marking a wall
// - * marking a cell on the A* path
// - o marking a cell only on the depth-first path
//
// Pass a number as first argument to pick a different seed.

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let config = MazeConfig::new(DEFAULT_GRID_SIZE, DEFAULT_WALL_DENSITY);
    let grid = config.generate(&mut rng).unwrap();

    let timer = Instant::now();
    let report = solve(&grid, config.start, config.goal).unwrap();
    let elapsed = timer.elapsed();

    let astar_path = report.astar.path.clone().unwrap_or_default();
    let dfs_path = report.dfs.path.clone().unwrap_or_default();
    for (row, line) in grid.to_string().lines().enumerate() {
        let line: String = line
            .chars()
            .enumerate()
            .map(|(col, ch)| {
                let p = Coordinate::new(row as i32, col as i32);
                if astar_path.contains(&p) {
                    '*'
                } else if dfs_path.contains(&p) {
                    'o'
                } else {
                    ch
                }
            })
            .collect();
        println!("{line}");
    }
    match report.path_length() {
        Some(length) => println!(
            "Path length: {} | A* nodes expanded: {} | DFS path length: {} | Time (ms): {:.2}",
            length,
            report.astar.metrics.nodes_expanded,
            dfs_path.len(),
            elapsed.as_secs_f64() * 1000.0
        ),
        None => println!("No path could be found!"),
    }
}
