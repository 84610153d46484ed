use thiserror::Error;

use crate::Jump;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolitaireError {
    #[error("position {position} is outside the board (1..={nr_holes})")]
    OutOfRange { position: usize, nr_holes: usize },

    #[error("row {row}, column {col} is outside a board with {side} rows")]
    CoordOutOfRange { row: usize, col: usize, side: usize },

    #[error("jump {jump} is not legal on this board")]
    IllegalMove { jump: Jump },

    #[error("invalid board shape: {message}")]
    InvalidShape { message: String },

    #[error("invalid cell {value:?} in row {row}")]
    InvalidCell { value: String, row: usize },
}
