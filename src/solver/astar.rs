use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::maze_grid::{Coordinate, MazeGrid};
use crate::solver::{reconstruct_path, GridSolver, PredecessorMap, SearchMetrics, SearchOutcome};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

struct SmallestCostHolder {
    estimated_cost: i32,
    cost: i32,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: smallest estimated cost first, then smallest cost, then
        // the node discovered earliest
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// A* over 4-adjacent open cells with unit step cost and the Manhattan distance as heuristic.
///
/// A cell may sit in the frontier several times when a cheaper route to it is found later;
/// entries for cells that are already closed are skipped when popped.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }

    pub fn heuristic(&self, p1: &Coordinate, p2: &Coordinate) -> i32 {
        p1.manhattan_distance(p2)
    }
}

impl GridSolver for AstarSolver {
    fn search(&self, grid: &MazeGrid, start: Coordinate, goal: Coordinate) -> SearchOutcome {
        let mut to_see = BinaryHeap::new();
        // Best known cost per discovered cell; frontier entries refer to cells by index here
        let mut costs: FxIndexMap<Coordinate, i32> = FxIndexMap::default();
        let mut predecessors = PredecessorMap::default();
        let mut closed = FxHashSet::default();
        let mut nodes_expanded = 0;

        let (start_index, _) = costs.insert_full(start, 0);
        to_see.push(SmallestCostHolder {
            estimated_cost: self.heuristic(&start, &goal),
            cost: 0,
            index: start_index,
        });
        while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
            let Some((&current, _)) = costs.get_index(index) else {
                continue;
            };
            if current == goal {
                let path = reconstruct_path(&predecessors, goal);
                debug!(
                    "A* reached {} from {} in {} steps, {} nodes expanded",
                    goal,
                    start,
                    path.len() - 1,
                    nodes_expanded
                );
                return SearchOutcome {
                    path: Some(path),
                    metrics: SearchMetrics { nodes_expanded },
                };
            }
            // Stale entry of an already finalized cell
            if !closed.insert(current) {
                continue;
            }
            nodes_expanded += 1;
            for successor in self.successors(grid, &current) {
                if closed.contains(&successor) {
                    continue;
                }
                let new_cost = cost + 1;
                let n; // index for successor
                match costs.entry(successor) {
                    Vacant(e) => {
                        n = e.index();
                        e.insert(new_cost);
                    }
                    Occupied(mut e) => {
                        if *e.get() > new_cost {
                            n = e.index();
                            e.insert(new_cost);
                        } else {
                            continue;
                        }
                    }
                }
                predecessors.insert(successor, current);
                to_see.push(SmallestCostHolder {
                    estimated_cost: new_cost + self.heuristic(&successor, &goal),
                    cost: new_cost,
                    index: n,
                });
            }
        }
        debug!(
            "A* found no path from {} to {} after expanding {} nodes",
            start, goal, nodes_expanded
        );
        SearchOutcome {
            path: None,
            metrics: SearchMetrics { nodes_expanded },
        }
    }
}
