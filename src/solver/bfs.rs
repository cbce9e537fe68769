use fxhash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

use crate::maze_grid::{Coordinate, MazeGrid};
use crate::solver::{reconstruct_path, GridSolver, PredecessorMap, SearchMetrics, SearchOutcome};

/// Breadth-first search. With unit step costs its paths are shortest, which makes it a
/// reference for checking the A* solver.
#[derive(Clone, Debug, Default)]
pub struct BfsSolver;

impl BfsSolver {
    /// Step distance from `source` to every open cell reachable from it.
    pub fn distance_map(&self, grid: &MazeGrid, source: Coordinate) -> FxHashMap<Coordinate, usize> {
        let mut distances = FxHashMap::default();
        if !grid.is_open(source) {
            return distances;
        }
        distances.insert(source, 0);
        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            let next = distances[&node] + 1;
            for successor in self.successors(grid, &node) {
                if !distances.contains_key(&successor) {
                    distances.insert(successor, next);
                    queue.push_back(successor);
                }
            }
        }
        distances
    }
}

impl GridSolver for BfsSolver {
    fn search(&self, grid: &MazeGrid, start: Coordinate, goal: Coordinate) -> SearchOutcome {
        let mut queue = VecDeque::from([start]);
        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut predecessors = PredecessorMap::default();
        let mut nodes_expanded = 0;
        while let Some(node) = queue.pop_front() {
            if node == goal {
                return SearchOutcome {
                    path: Some(reconstruct_path(&predecessors, goal)),
                    metrics: SearchMetrics { nodes_expanded },
                };
            }
            nodes_expanded += 1;
            for successor in self.successors(grid, &node) {
                if visited.insert(successor) {
                    predecessors.insert(successor, node);
                    queue.push_back(successor);
                }
            }
        }
        SearchOutcome {
            path: None,
            metrics: SearchMetrics { nodes_expanded },
        }
    }
}
