use core::fmt;
use std::str::FromStr;

use grid_util::grid::{BoolGrid, ValueGrid};
use itertools::Itertools;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::MazeError;
use crate::NEIGHBOUR_OFFSETS;

/// A (row, column) cell position. Rows grow downwards, columns to the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    pub const fn new(row: i32, col: i32) -> Coordinate {
        Coordinate { row, col }
    }
    pub fn offset(&self, d_row: i32, d_col: i32) -> Coordinate {
        Coordinate::new(self.row + d_row, self.col + d_col)
    }
    /// Admissible and consistent estimate of the remaining steps on a 4-connected grid.
    pub fn manhattan_distance(&self, other: &Coordinate) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
    /// True if `other` is exactly one step away along a single axis.
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        self.manhattan_distance(other) == 1
    }
    /// The four cells one step away, in the crate-wide neighbour order.
    pub fn neumann_neighbourhood(&self) -> SmallVec<[Coordinate; 4]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(d_row, d_col)| self.offset(d_row, d_col))
            .collect()
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Open,
    Blocked,
}

impl Cell {
    fn from_blocked(blocked: bool) -> Cell {
        if blocked {
            Cell::Blocked
        } else {
            Cell::Open
        }
    }
}

/// An immutable square maze. Cell occupancy is kept in a [BoolGrid] where [true] marks a
/// blocked cell, together with a [UnionFind] over 4-adjacent open cells that answers
/// reachability queries without searching.
///
/// A [MazeGrid] can only be obtained from [MazeBuilder](crate::generator::MazeBuilder),
/// [MazeGrid::open] or by parsing its text form, so search code can never mutate it.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    grid: BoolGrid,
    size: usize,
    components: UnionFind<usize>,
}

impl MazeGrid {
    pub(crate) fn from_bool_grid(grid: BoolGrid) -> MazeGrid {
        let size = grid.width();
        let mut maze = MazeGrid {
            grid,
            size,
            components: UnionFind::new(size * size),
        };
        maze.generate_components();
        maze
    }

    /// A grid of the given side length without any walls.
    pub fn open(size: usize) -> MazeGrid {
        MazeGrid::from_bool_grid(BoolGrid::new(size, size, false))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, c: Coordinate) -> bool {
        let n = self.size as i32;
        (0..n).contains(&c.row) && (0..n).contains(&c.col)
    }

    /// State of an in-bounds cell, [None] otherwise.
    pub fn get(&self, c: Coordinate) -> Option<Cell> {
        self.in_bounds(c)
            .then(|| Cell::from_blocked(self.grid.get(c.col, c.row)))
    }

    pub fn is_open(&self, c: Coordinate) -> bool {
        self.get(c) == Some(Cell::Open)
    }

    /// Open in-bounds neighbours of `c` in the order down, up, right, left.
    pub fn neighbours(&self, c: Coordinate) -> SmallVec<[Coordinate; 4]> {
        c.neumann_neighbourhood()
            .into_iter()
            .filter(|n| self.is_open(*n))
            .collect()
    }

    /// Iterates over all coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let n = self.size as i32;
        (0..n)
            .cartesian_product(0..n)
            .map(|(row, col)| Coordinate::new(row, col))
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, Cell)> + '_ {
        self.coordinates().map(move |c| (c, Cell::from_blocked(self.grid.get(c.col, c.row))))
    }

    pub fn open_cell_count(&self) -> usize {
        self.cells().filter(|(_, cell)| *cell == Cell::Open).count()
    }

    /// Checks that `c` can serve as a start or goal: in bounds and open.
    pub fn validate_endpoint(&self, c: Coordinate) -> Result<(), MazeError> {
        match self.get(c) {
            None => Err(MazeError::OutOfBounds {
                coordinate: c,
                size: self.size,
            }),
            Some(Cell::Blocked) => Err(MazeError::BlockedEndpoint(c)),
            Some(Cell::Open) => Ok(()),
        }
    }

    /// Checks that every step of `path` moves to a 4-adjacent open cell.
    pub fn is_walkable_path(&self, path: &[Coordinate]) -> bool {
        path.iter().all(|c| self.is_open(*c))
            && path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
    }

    fn get_ix(&self, c: Coordinate) -> usize {
        c.row as usize * self.size + c.col as usize
    }

    /// Retrieves the component id of an in-bounds coordinate.
    pub fn component(&self, c: Coordinate) -> Option<usize> {
        self.in_bounds(c)
            .then(|| self.components.find(self.get_ix(c)))
    }

    /// Checks if both cells are open and on the same connected component.
    pub fn reachable(&self, start: Coordinate, goal: Coordinate) -> bool {
        self.is_open(start)
            && self.is_open(goal)
            && self.components.equiv(self.get_ix(start), self.get_ix(goal))
    }

    /// Links every open cell to its open right and lower neighbours.
    fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.size * self.size);
        for c in self.coordinates().filter(|c| self.is_open(*c)) {
            for n in [c.offset(1, 0), c.offset(0, 1)] {
                if self.is_open(n) {
                    components.union(self.get_ix(c), self.get_ix(n));
                }
            }
        }
        self.components = components;
    }
}

impl PartialEq for MazeGrid {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells().eq(other.cells())
    }
}

impl Eq for MazeGrid {}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.size as i32 {
            let line: String = (0..self.size as i32)
                .map(|col| {
                    if self.is_open(Coordinate::new(row, col)) {
                        '.'
                    } else {
                        '#'
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses one row per line, `#` for blocked and `.` for open. `S` and `G` are accepted as
/// open cells so that drawings with marked endpoints can be read back. Blank lines and
/// surrounding whitespace are ignored.
impl FromStr for MazeGrid {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let size = rows.len();
        if size == 0 {
            return Err(MazeError::EmptyGrid);
        }
        let mut grid = BoolGrid::new(size, size, true);
        for (row, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != size {
                return Err(MazeError::NotSquare {
                    rows: size,
                    width,
                    row,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let blocked = match ch {
                    '#' => true,
                    '.' | 'S' | 'G' => false,
                    _ => return Err(MazeError::InvalidCell { ch, row, col }),
                };
                grid.set(col as i32, row as i32, blocked);
            }
        }
        Ok(MazeGrid::from_bool_grid(grid))
    }
}
