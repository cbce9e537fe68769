use fxhash::FxHashSet;
use log::debug;

use crate::maze_grid::{Coordinate, MazeGrid};
use crate::solver::{reconstruct_path, GridSolver, PredecessorMap, SearchMetrics, SearchOutcome};

/// Depth-first search with an explicit stack. Cells are marked visited when pushed, so each
/// cell enters the stack at most once. Neighbours are pushed in the fixed order down, up,
/// right, left, which makes the returned path deterministic. It is usually not a shortest one.
#[derive(Clone, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    fn search(&self, grid: &MazeGrid, start: Coordinate, goal: Coordinate) -> SearchOutcome {
        let mut stack = vec![start];
        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut predecessors = PredecessorMap::default();
        let mut nodes_expanded = 0;
        while let Some(node) = stack.pop() {
            if node == goal {
                break;
            }
            nodes_expanded += 1;
            for successor in self.successors(grid, &node) {
                if visited.insert(successor) {
                    predecessors.insert(successor, node);
                    stack.push(successor);
                }
            }
        }
        // The chain only leads back to the start if the goal was discovered
        let path = reconstruct_path(&predecessors, goal);
        let path = (path.first() == Some(&start)).then_some(path);
        debug!(
            "DFS from {} to {}: path length {:?}, {} nodes expanded",
            start,
            goal,
            path.as_ref().map(Vec::len),
            nodes_expanded
        );
        SearchOutcome {
            path,
            metrics: SearchMetrics { nodes_expanded },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left is pushed last and therefore explored first.
    #[test]
    fn explores_in_fixed_order() {
        //  ___
        // |...|
        // |.S.|
        // |G..|
        //  ___
        let grid = MazeGrid::open(3);
        let start = Coordinate::new(1, 1);
        let goal = Coordinate::new(2, 0);
        let path = DfsSolver.get_path(&grid, start, goal).unwrap();
        assert_eq!(
            path,
            vec![start, Coordinate::new(1, 0), Coordinate::new(2, 0)]
        );
    }

    #[test]
    fn deterministic() {
        let grid: MazeGrid = "\
            .....
            .#.#.
            .....
            ##.#.
            ....."
            .parse()
            .unwrap();
        let start = Coordinate::new(0, 0);
        let goal = Coordinate::new(4, 4);
        let first = DfsSolver.search(&grid, start, goal);
        let second = DfsSolver.search(&grid, start, goal);
        assert!(first.found());
        assert_eq!(first, second);
        assert!(grid.is_walkable_path(first.path.as_ref().unwrap()));
    }

    #[test]
    fn unreachable_goal() {
        let grid: MazeGrid = ".#.\n##.\n...".parse().unwrap();
        let outcome = DfsSolver.search(&grid, Coordinate::new(0, 0), Coordinate::new(2, 2));
        assert!(outcome.path.is_none());
        assert_eq!(outcome.metrics.nodes_expanded, 1);
    }

    #[test]
    fn start_equals_goal() {
        let grid = MazeGrid::open(2);
        let c = Coordinate::new(1, 0);
        let outcome = DfsSolver.search(&grid, c, c);
        assert_eq!(outcome.path, Some(vec![c]));
        assert_eq!(outcome.metrics.nodes_expanded, 0);
    }
}
