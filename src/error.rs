use thiserror::Error;

use crate::maze_grid::Coordinate;

/// Errors raised when a maze configuration, an endpoint or a textual grid is rejected.
///
/// A search that finds no path is not an error; solvers report it as an absent path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    /// The requested side length is below the supported minimum.
    #[error("grid size {size} is below the minimum of {min}")]
    GridTooSmall { size: usize, min: usize },
    /// Wall density must lie in `[0, 1)`.
    #[error("wall density {0} is outside [0, 1)")]
    DensityOutOfRange(f64),
    #[error("{coordinate} is outside a {size}x{size} grid")]
    OutOfBounds { coordinate: Coordinate, size: usize },
    #[error("start and goal are both {0}")]
    StartEqualsGoal(Coordinate),
    /// Start and goal have to be placed on open cells.
    #[error("{0} is a blocked cell")]
    BlockedEndpoint(Coordinate),
    #[error("grid is not square: row {row} has width {width} but there are {rows} rows")]
    NotSquare { rows: usize, width: usize, row: usize },
    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    InvalidCell { ch: char, row: usize, col: usize },
    #[error("grid text contains no rows")]
    EmptyGrid,
}
