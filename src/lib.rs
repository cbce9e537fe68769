//! # grid_maze
//!
//! Maze generation and pathfinding on a square grid of open and blocked cells.
//!
//! Mazes are carved with a randomized depth-first
//! [recursive backtracker](https://en.wikipedia.org/wiki/Maze_generation_algorithm#Randomized_depth-first_search)
//! on the even sub-lattice, then loosened by opening extra interior cells (which introduces
//! cycles) and by randomly flipping border cells. The border step can cut the maze apart, so a
//! generated maze is solvable on a best-effort basis only.
//!
//! Paths are found with [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) using the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic, which
//! yields shortest paths on this uniform-cost 4-connected grid, and with a deterministic
//! depth-first search that returns some path as a baseline. All randomness comes from a
//! caller-supplied [rand::Rng], so a seeded generator reproduces the same maze.
pub mod error;
pub mod generator;
pub mod maze_grid;
pub mod solver;

pub use error::MazeError;
pub use generator::{MazeBuilder, MazeConfig};
pub use maze_grid::{Cell, Coordinate, MazeGrid};
pub use solver::{
    astar::AstarSolver, bfs::BfsSolver, dfs::DfsSolver, GridSolver, Path, SearchMetrics,
    SearchOutcome,
};

use log::debug;
use rand::Rng;

/// Smallest supported side length.
pub const MIN_GRID_SIZE: usize = 2;
pub const DEFAULT_GRID_SIZE: usize = 30;
pub const DEFAULT_WALL_DENSITY: f64 = 0.05;
/// Side lengths offered to users picking a maze size.
pub const GRID_SIZE_OPTIONS: [usize; 3] = [10, 20, 30];
/// Wall densities offered to users picking a maze density.
pub const WALL_DENSITY_OPTIONS: [f64; 3] = [0.10, 0.20, 0.30];
/// Loop injection gives up after this many attempts per requested opening.
pub const LOOP_ATTEMPT_FACTOR: usize = 10;
/// An open border cell is blocked again with probability `density * BORDER_REBLOCK_FACTOR`.
pub const BORDER_REBLOCK_FACTOR: f64 = 0.3;
/// (row, column) steps in the order down, up, right, left. Carving, the goal neighbour fix-up
/// and every search enumerate neighbours in this order.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Generates a maze of `size` x `size` cells with the given wall density, keeping `start` and
/// `goal` open. The configuration is validated before any cell is carved.
pub fn generate_maze<R: Rng + ?Sized>(
    size: usize,
    density: f64,
    start: Coordinate,
    goal: Coordinate,
    rng: &mut R,
) -> Result<MazeGrid, MazeError> {
    MazeConfig::new(size, density)
        .with_start(start)
        .with_goal(goal)
        .generate(rng)
}

/// Shortest path from `start` to `goal` together with the number of nodes expanded. A start
/// that is not an open cell of `grid` gives no path and no expansions; use [solve] to have bad
/// endpoints reported as errors.
pub fn find_path_astar(
    grid: &MazeGrid,
    start: Coordinate,
    goal: Coordinate,
) -> (Option<Path>, usize) {
    if !grid.is_open(start) {
        return (None, 0);
    }
    let outcome = AstarSolver::new().search(grid, start, goal);
    (outcome.path, outcome.metrics.nodes_expanded)
}

/// Some path from `start` to `goal`, found by depth-first search. Not necessarily shortest.
/// Returns `None` when `start` is not an open cell of `grid`.
pub fn find_path_dfs(grid: &MazeGrid, start: Coordinate, goal: Coordinate) -> Option<Path> {
    if !grid.is_open(start) {
        return None;
    }
    DfsSolver.get_path(grid, start, goal)
}

/// Results of running both searches on the same maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveReport {
    pub astar: SearchOutcome,
    pub dfs: SearchOutcome,
}

impl SolveReport {
    /// Number of cells on the shortest path, start and goal included.
    pub fn path_length(&self) -> Option<usize> {
        self.astar.path_length()
    }
    pub fn solved(&self) -> bool {
        self.astar.found()
    }
}

/// Checks that both endpoints are open cells of `grid`, then runs the depth-first and the A*
/// search. Equal endpoints are accepted and give single-cell paths.
pub fn solve(grid: &MazeGrid, start: Coordinate, goal: Coordinate) -> Result<SolveReport, MazeError> {
    grid.validate_endpoint(start)?;
    grid.validate_endpoint(goal)?;
    let dfs = DfsSolver.search(grid, start, goal);
    let astar = AstarSolver::new().search(grid, start, goal);
    debug!(
        "Solved {} -> {}: A* length {:?}, DFS length {:?}",
        start,
        goal,
        astar.path_length(),
        dfs.path_length()
    );
    Ok(SolveReport { astar, dfs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = MazeGrid::open(3);
        let c = Coordinate::new(1, 1);
        let (path, expanded) = find_path_astar(&grid, c, c);
        assert_eq!(path, Some(vec![c]));
        assert_eq!(expanded, 0);
        assert_eq!(find_path_dfs(&grid, c, c), Some(vec![c]));
    }

    /// Start and goal sit on separate islands:
    ///  ____
    /// |S.##|
    /// |####|
    /// |##..|
    /// |##.G|
    ///  ____
    #[test]
    fn disconnected_islands() {
        let grid: MazeGrid = "S.##\n####\n##..\n##.G".parse().unwrap();
        let start = Coordinate::new(0, 0);
        let goal = Coordinate::new(3, 3);
        let (path, expanded) = find_path_astar(&grid, start, goal);
        assert!(path.is_none());
        assert_eq!(expanded, 2);
        assert!(find_path_dfs(&grid, start, goal).is_none());
        assert!(!grid.reachable(start, goal));
    }

    /// Asserts that the optimal 5 cell solution is found around the obstacle.
    #[test]
    fn solve_simple_problem() {
        //  ___
        // |S  |
        // | # |
        // |  G|
        //  ___
        let grid: MazeGrid = "...\n.#.\n...".parse().unwrap();
        let report = solve(&grid, Coordinate::new(0, 0), Coordinate::new(2, 2)).unwrap();
        assert_eq!(report.path_length(), Some(5));
        assert!(report.solved());
        let dfs_path = report.dfs.path.unwrap();
        assert!(grid.is_walkable_path(&dfs_path));
        assert!(dfs_path.len() >= 5);
    }

    #[test]
    fn start_off_grid_or_blocked_has_no_path() {
        let grid = MazeGrid::open(3);
        let goal = Coordinate::new(2, 2);
        let outside = Coordinate::new(-1, 0);
        assert_eq!(find_path_astar(&grid, outside, goal), (None, 0));
        assert_eq!(find_path_dfs(&grid, outside, goal), None);

        let grid: MazeGrid = "#.\n..".parse().unwrap();
        let blocked = Coordinate::new(0, 0);
        assert_eq!(find_path_astar(&grid, blocked, Coordinate::new(1, 1)), (None, 0));
        assert_eq!(find_path_dfs(&grid, blocked, blocked), None);
    }

    #[test]
    fn solve_rejects_bad_endpoints() {
        let grid: MazeGrid = "..\n#.".parse().unwrap();
        assert_eq!(
            solve(&grid, Coordinate::new(1, 0), Coordinate::new(1, 1)),
            Err(MazeError::BlockedEndpoint(Coordinate::new(1, 0)))
        );
        assert!(matches!(
            solve(&grid, Coordinate::new(0, 0), Coordinate::new(2, 1)),
            Err(MazeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn generate_then_solve() {
        let mut rng = StdRng::seed_from_u64(7);
        let start = Coordinate::new(0, 0);
        let goal = Coordinate::new(9, 9);
        let grid = generate_maze(10, 0.1, start, goal, &mut rng).unwrap();
        let report = solve(&grid, start, goal).unwrap();
        assert_eq!(report.solved(), grid.reachable(start, goal));
        assert_eq!(report.dfs.found(), report.astar.found());
    }

    #[test]
    fn generate_rejects_invalid_input() {
        let mut rng = StdRng::seed_from_u64(0);
        let c = Coordinate::new(0, 0);
        assert_eq!(
            generate_maze(5, 0.1, c, c, &mut rng),
            Err(MazeError::StartEqualsGoal(c))
        );
        assert_eq!(
            generate_maze(1, 0.1, c, Coordinate::new(0, 1), &mut rng),
            Err(MazeError::GridTooSmall { size: 1, min: 2 })
        );
    }
}
