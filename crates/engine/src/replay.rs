//! Replays a solution against the coloured board it came from.

use glue_core::{Cell, EncodedOperation, Field, Piece};
use thiserror::Error;

use crate::line_clear::remove_line_clears;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("placement {index} needs {piece} at ({x}, {y})")]
    Uncovered {
        index: usize,
        piece: Piece,
        x: i8,
        y: i8,
    },
}

/// Applies each placement in the board's current frame: its four cells must
/// carry its colour, become filler, and rows of filler are removed. Returns
/// the final board, which holds no colour when the sequence is complete.
pub fn replay(field: &Field, sequence: &[EncodedOperation]) -> Result<Field, ReplayError> {
    let mut board = field.clone();
    for (index, encoded) in sequence.iter().enumerate() {
        let operation = encoded.decode();
        let cells = operation.cells();
        for &(x, y) in &cells {
            if board.at(x as i32, y as i32) != Cell::Mino(operation.piece) {
                return Err(ReplayError::Uncovered {
                    index,
                    piece: operation.piece,
                    x,
                    y,
                });
            }
        }
        for &(x, y) in &cells {
            board.set(x as usize, y as usize, Cell::Gray);
        }
        remove_line_clears(&mut board, Field::TOP);
    }
    Ok(board)
}
