use fxhash::FxHashMap;
use smallvec::SmallVec;

use crate::maze_grid::{Coordinate, MazeGrid};

pub mod astar;
pub mod bfs;
pub mod dfs;

/// Cells from start to goal inclusive, each 4-adjacent to the next.
pub type Path = Vec<Coordinate>;

/// Maps each discovered cell to the cell it was first (or best) reached from.
pub type PredecessorMap = FxHashMap<Coordinate, Coordinate>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchMetrics {
    /// Cells taken off the frontier and whose neighbours were processed.
    pub nodes_expanded: usize,
}

/// Result of a single search. A missing path is an ordinary outcome on a disconnected maze.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub path: Option<Path>,
    pub metrics: SearchMetrics,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
    /// Number of cells on the path, start and goal included.
    pub fn path_length(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }
}

/// Walks the predecessor links back from `terminal` until a cell without predecessor is
/// reached and returns the visited cells in forward order.
pub fn reconstruct_path(predecessors: &PredecessorMap, terminal: Coordinate) -> Path {
    let mut path: Path =
        std::iter::successors(Some(terminal), |c| predecessors.get(c).copied()).collect();
    path.reverse();
    path
}

pub trait GridSolver {
    fn search(&self, grid: &MazeGrid, start: Coordinate, goal: Coordinate) -> SearchOutcome;

    /// Cells reachable in one step, in the order down, up, right, left.
    fn successors(&self, grid: &MazeGrid, node: &Coordinate) -> SmallVec<[Coordinate; 4]> {
        grid.neighbours(*node)
    }

    fn get_path(&self, grid: &MazeGrid, start: Coordinate, goal: Coordinate) -> Option<Path> {
        self.search(grid, start, goal).path
    }

    /// Number of steps (moves) of the path found, if any.
    fn get_path_cost(&self, grid: &MazeGrid, start: Coordinate, goal: Coordinate) -> Option<usize> {
        self.get_path(grid, start, goal).map(|p| p.len() - 1)
    }
}
