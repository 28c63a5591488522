//! Placements and their packed form.

use serde::{Deserialize, Serialize};

use crate::{Piece, Rotation};

/// A piece placement, positioned by its rotation centre.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub piece: Piece,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Operation {
    pub fn new(piece: Piece, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            piece,
            rotation,
            x,
            y,
        }
    }

    /// The four cells covered by this placement.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.piece
            .minos(self.rotation)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// An [`Operation`] that also remembers its row on the board before any
/// rows were cleared.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct AbsoluteOperation {
    pub operation: Operation,
    pub abs_y: i8,
}

const PIECE_BITS: u32 = 4;
const ROTATION_BITS: u32 = 2;
const X_BITS: u32 = 4;
const ROW_BITS: u32 = 5;

/// 20-bit packed placement, most significant first:
/// `piece(4) | rotation(2) | x(4) | abs_y(5) | y(5)`.
///
/// Only [`EncodedOperation::encode`] builds one, so every value decodes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EncodedOperation(u32);

fn checked_field(name: &str, value: i8, bits: u32) -> u32 {
    assert!(
        value >= 0 && (value as u32) < (1 << bits),
        "{name} {value} does not fit in {bits} bits"
    );
    value as u32
}

impl EncodedOperation {
    /// Panics when a field is out of range; board bounds rule that out, so a
    /// failure here is a scanner defect.
    pub fn encode(op: &AbsoluteOperation) -> Self {
        let AbsoluteOperation { operation, abs_y } = *op;
        let mut packed = operation.piece.index() as u32;
        packed = (packed << ROTATION_BITS) | operation.rotation.index() as u32;
        packed = (packed << X_BITS) | checked_field("x", operation.x, X_BITS);
        packed = (packed << ROW_BITS) | checked_field("absolute row", abs_y, ROW_BITS);
        packed = (packed << ROW_BITS) | checked_field("row", operation.y, ROW_BITS);
        debug_assert!(packed < 1 << (PIECE_BITS + ROTATION_BITS + X_BITS + 2 * ROW_BITS));
        Self(packed)
    }

    /// Recovers everything but the absolute row, which only matters for
    /// deduplication.
    pub fn decode(self) -> Operation {
        let mut packed = self.0;
        let y = (packed & mask(ROW_BITS)) as i8;
        packed >>= 2 * ROW_BITS;
        let x = (packed & mask(X_BITS)) as i8;
        packed >>= X_BITS;
        let rotation = Rotation::from_index((packed & mask(ROTATION_BITS)) as u8);
        packed >>= ROTATION_BITS;
        let piece = Piece::from_index(packed as u8);
        match (piece, rotation) {
            (Some(piece), Some(rotation)) => Operation::new(piece, rotation, x, y),
            _ => panic!("corrupt encoded operation {:#07x}", self.0),
        }
    }

    /// Identity of the physical placement: the packed value without the
    /// current-frame row.
    #[inline]
    pub fn placement_key(self) -> u32 {
        self.0 >> ROW_BITS
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl From<AbsoluteOperation> for EncodedOperation {
    fn from(op: AbsoluteOperation) -> Self {
        Self::encode(&op)
    }
}

#[inline]
const fn mask(bits: u32) -> u32 {
    (1 << bits) - 1
}
