use fxhash::FxHashSet;
use grid_util::grid::{BoolGrid, ValueGrid};
use log::{debug, info, log_enabled, trace, warn, Level};
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

use crate::error::MazeError;
use crate::maze_grid::{Cell, Coordinate, MazeGrid};
use crate::{
    BORDER_REBLOCK_FACTOR, DEFAULT_GRID_SIZE, DEFAULT_WALL_DENSITY, LOOP_ATTEMPT_FACTOR,
    MIN_GRID_SIZE, NEIGHBOUR_OFFSETS,
};

/// Parameters of a generated maze. Start and goal default to the top-left and bottom-right
/// corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeConfig {
    pub size: usize,
    /// Fraction in `[0, 1)` steering how many loops are added and how the border is perturbed.
    pub density: f64,
    pub start: Coordinate,
    pub goal: Coordinate,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig::new(DEFAULT_GRID_SIZE, DEFAULT_WALL_DENSITY)
    }
}

impl MazeConfig {
    pub fn new(size: usize, density: f64) -> MazeConfig {
        let last = size as i32 - 1;
        MazeConfig {
            size,
            density,
            start: Coordinate::new(0, 0),
            goal: Coordinate::new(last, last),
        }
    }
    pub fn with_start(mut self, start: Coordinate) -> MazeConfig {
        self.start = start;
        self
    }
    pub fn with_goal(mut self, goal: Coordinate) -> MazeConfig {
        self.goal = goal;
        self
    }
    fn check_bounds(&self, c: Coordinate) -> Result<(), MazeError> {
        let n = self.size as i32;
        if (0..n).contains(&c.row) && (0..n).contains(&c.col) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                coordinate: c,
                size: self.size,
            })
        }
    }
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.size < MIN_GRID_SIZE {
            return Err(MazeError::GridTooSmall {
                size: self.size,
                min: MIN_GRID_SIZE,
            });
        }
        // Also rejects NaN
        if !(0.0..1.0).contains(&self.density) {
            return Err(MazeError::DensityOutOfRange(self.density));
        }
        self.check_bounds(self.start)?;
        self.check_bounds(self.goal)?;
        if self.start == self.goal {
            return Err(MazeError::StartEqualsGoal(self.start));
        }
        Ok(())
    }
    /// Number of extra openings loop injection tries to add.
    pub fn loop_count(&self) -> usize {
        ((self.size * self.size) as f64 * self.density).round() as usize
    }
    /// Runs every generation phase in order and freezes the result.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<MazeGrid, MazeError> {
        self.validate()?;
        let mut builder = MazeBuilder::new(self.size);
        builder.carve_passages(rng);
        let loops = builder.add_loops(self.loop_count(), rng);
        builder.perturb_border(self.density, self.start, self.goal, rng);
        builder.open_endpoints(self.start, self.goal);
        let grid = builder.build();
        if log_enabled!(Level::Info) {
            info!(
                "Generated {}x{} maze with density {}: {} open cells, {} loops added",
                self.size,
                self.size,
                self.density,
                grid.open_cell_count(),
                loops
            );
        }
        Ok(grid)
    }
}

/// Mutable cell buffer used while a maze is being generated. Each phase of generation is a
/// separate method so phases can be run and inspected on their own; [build](Self::build)
/// consumes the builder and hands out the read-only [MazeGrid].
#[derive(Clone, Debug)]
pub struct MazeBuilder {
    grid: BoolGrid,
    size: usize,
}

impl MazeBuilder {
    /// Starts from a fully blocked grid.
    pub fn new(size: usize) -> MazeBuilder {
        MazeBuilder {
            grid: BoolGrid::new(size, size, true),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn in_bounds(&self, c: Coordinate) -> bool {
        let n = self.size as i32;
        (0..n).contains(&c.row) && (0..n).contains(&c.col)
    }

    fn is_open(&self, c: Coordinate) -> bool {
        self.in_bounds(c) && !self.grid.get(c.col, c.row)
    }

    /// Sets an in-bounds cell, ignoring coordinates outside the grid.
    pub fn set(&mut self, c: Coordinate, cell: Cell) {
        if self.in_bounds(c) {
            self.grid.set(c.col, c.row, cell == Cell::Blocked);
        }
    }

    fn is_border(&self, c: Coordinate) -> bool {
        let last = self.size as i32 - 1;
        c.row == 0 || c.col == 0 || c.row == last || c.col == last
    }

    fn open_neighbour_count(&self, c: Coordinate) -> usize {
        c.neumann_neighbourhood()
            .iter()
            .filter(|n| self.is_open(**n))
            .count()
    }

    /// Randomized depth-first carving from (0, 0) over the cells two steps apart. Each move
    /// opens the target cell and the wall cell in between, producing a spanning tree of the
    /// sub-lattice.
    pub fn carve_passages<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let origin = Coordinate::new(0, 0);
        let mut stack = vec![origin];
        let mut visited = FxHashSet::default();
        visited.insert(origin);
        self.set(origin, Cell::Open);
        while let Some(&current) = stack.last() {
            let candidates = NEIGHBOUR_OFFSETS
                .iter()
                .map(|&(d_row, d_col)| {
                    (
                        current.offset(2 * d_row, 2 * d_col),
                        current.offset(d_row, d_col),
                    )
                })
                .filter(|(next, _)| self.in_bounds(*next) && !visited.contains(next))
                .collect::<SmallVec<[(Coordinate, Coordinate); 4]>>();
            match candidates.choose(rng) {
                Some(&(next, between)) => {
                    visited.insert(next);
                    self.set(next, Cell::Open);
                    self.set(between, Cell::Open);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
        debug!("Carved {} lattice cells", visited.len());
    }

    /// Opens up to `count` blocked interior cells that touch at least two open cells, which
    /// joins separate corridors into cycles. Gives up after `count * LOOP_ATTEMPT_FACTOR`
    /// random picks. Returns the number of cells opened.
    pub fn add_loops<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> usize {
        if count == 0 {
            return 0;
        }
        if self.size < 3 {
            debug!("No interior cells in a {}x{} grid, skipping loops", self.size, self.size);
            return 0;
        }
        let n = self.size as i32;
        let max_attempts = count * LOOP_ATTEMPT_FACTOR;
        let mut attempts = 0;
        let mut added = 0;
        while added < count && attempts < max_attempts {
            attempts += 1;
            let row = rng.gen_range(1..n - 1);
            let col = rng.gen_range(1..n - 1);
            let c = Coordinate::new(row, col);
            if !self.is_open(c) && self.open_neighbour_count(c) >= 2 {
                self.set(c, Cell::Open);
                added += 1;
            }
        }
        if added < count {
            warn!(
                "Loop injection added {} of {} openings within {} attempts",
                added, count, max_attempts
            );
        } else {
            debug!("Added {} loops in {} attempts", added, attempts);
        }
        added
    }

    /// Flips border cells independently: a blocked cell opens with probability `1 - density`,
    /// an open one closes with probability `density * BORDER_REBLOCK_FACTOR`. Start and goal
    /// are left alone. Exactly one random number is drawn per border cell considered.
    pub fn perturb_border<R: Rng + ?Sized>(
        &mut self,
        density: f64,
        start: Coordinate,
        goal: Coordinate,
        rng: &mut R,
    ) {
        let n = self.size as i32;
        for row in 0..n {
            for col in 0..n {
                let c = Coordinate::new(row, col);
                if c == start || c == goal || !self.is_border(c) {
                    continue;
                }
                let roll: f64 = rng.gen();
                if !self.is_open(c) {
                    if roll > density {
                        trace!("Opening border cell {}", c);
                        self.set(c, Cell::Open);
                    }
                } else if roll < density * BORDER_REBLOCK_FACTOR {
                    trace!("Blocking border cell {}", c);
                    self.set(c, Cell::Blocked);
                }
            }
        }
    }

    /// Opens start and goal, and the first in-bounds neighbour of the goal (down, up, right,
    /// left) so the goal is never walled in on all sides.
    pub fn open_endpoints(&mut self, start: Coordinate, goal: Coordinate) {
        self.set(start, Cell::Open);
        self.set(goal, Cell::Open);
        if let Some(neighbour) = goal
            .neumann_neighbourhood()
            .into_iter()
            .find(|n| self.in_bounds(*n))
        {
            self.set(neighbour, Cell::Open);
        }
    }

    pub fn build(self) -> MazeGrid {
        MazeGrid::from_bool_grid(self.grid)
    }
}
