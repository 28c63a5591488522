//! Glue core crate - pieces, boards and placements shared by the codec and
//! the reconstruction engine.

mod field;
mod operation;
mod piece;

pub use field::{Cell, Field, FieldParseError};
pub use operation::{AbsoluteOperation, EncodedOperation, Operation};
pub use piece::{Piece, Rotation, Shape};
