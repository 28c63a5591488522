//! Conversions between `fumen` values and glue values.

use fumen::{CellColor, PieceType, RotationState};
use glue_core::{Cell, Field, Operation, Piece, Rotation};

use crate::FumenError;

fn cell_color(cell: Cell) -> CellColor {
    match cell {
        Cell::Empty => CellColor::Empty,
        Cell::Gray => CellColor::Grey,
        Cell::Mino(Piece::I) => CellColor::I,
        Cell::Mino(Piece::L) => CellColor::L,
        Cell::Mino(Piece::O) => CellColor::O,
        Cell::Mino(Piece::Z) => CellColor::Z,
        Cell::Mino(Piece::T) => CellColor::T,
        Cell::Mino(Piece::J) => CellColor::J,
        Cell::Mino(Piece::S) => CellColor::S,
    }
}

fn cell(color: CellColor) -> Cell {
    match color {
        CellColor::Empty => Cell::Empty,
        CellColor::Grey => Cell::Gray,
        CellColor::I => Cell::Mino(Piece::I),
        CellColor::L => Cell::Mino(Piece::L),
        CellColor::O => Cell::Mino(Piece::O),
        CellColor::Z => Cell::Mino(Piece::Z),
        CellColor::T => Cell::Mino(Piece::T),
        CellColor::J => Cell::Mino(Piece::J),
        CellColor::S => Cell::Mino(Piece::S),
    }
}

fn piece_type(piece: Piece) -> PieceType {
    match piece {
        Piece::I => PieceType::I,
        Piece::L => PieceType::L,
        Piece::O => PieceType::O,
        Piece::Z => PieceType::Z,
        Piece::T => PieceType::T,
        Piece::J => PieceType::J,
        Piece::S => PieceType::S,
    }
}

fn piece(kind: PieceType) -> Piece {
    match kind {
        PieceType::I => Piece::I,
        PieceType::L => Piece::L,
        PieceType::O => Piece::O,
        PieceType::Z => Piece::Z,
        PieceType::T => Piece::T,
        PieceType::J => Piece::J,
        PieceType::S => Piece::S,
    }
}

fn rotation_state(rotation: Rotation) -> RotationState {
    match rotation {
        Rotation::Spawn => RotationState::North,
        Rotation::Right => RotationState::East,
        Rotation::Reverse => RotationState::South,
        Rotation::Left => RotationState::West,
    }
}

fn rotation(state: RotationState) -> Rotation {
    match state {
        RotationState::North => Rotation::Spawn,
        RotationState::East => Rotation::Right,
        RotationState::South => Rotation::Reverse,
        RotationState::West => Rotation::Left,
    }
}

/// The reference cell must lie on the playfield.
pub(crate) fn to_piece(operation: &Operation) -> Result<fumen::Piece, FumenError> {
    let out_of_bounds = FumenError::OutOfBounds {
        x: operation.x,
        y: operation.y,
    };
    if !(0..Field::WIDTH as i8).contains(&operation.x) || !(0..Field::TOP as i8).contains(&operation.y) {
        return Err(out_of_bounds);
    }
    Ok(fumen::Piece {
        kind: piece_type(operation.piece),
        rotation: rotation_state(operation.rotation),
        x: operation.x.try_into().map_err(|_| out_of_bounds.clone())?,
        y: operation.y.try_into().map_err(|_| out_of_bounds)?,
    })
}

pub(crate) fn to_operation(placed: &fumen::Piece) -> Result<Operation, FumenError> {
    let x = i8::try_from(placed.x).ok();
    let y = i8::try_from(placed.y).ok();
    match (x, y) {
        (Some(x), Some(y)) => Ok(Operation::new(piece(placed.kind), rotation(placed.rotation), x, y)),
        _ => Err(FumenError::Malformed),
    }
}

/// Copy a glue field, garbage row included, onto a notation page.
pub(crate) fn write_field(field: &Field, page: &mut fumen::Page) {
    for (y, row) in page.field.iter_mut().enumerate().take(Field::TOP) {
        for (x, color) in row.iter_mut().enumerate().take(Field::WIDTH) {
            *color = cell_color(field.get(x, y));
        }
    }
    for (x, color) in page.garbage_row.iter_mut().enumerate().take(Field::WIDTH) {
        *color = cell_color(field.garbage(x));
    }
}

pub(crate) fn read_field(page: &fumen::Page) -> Field {
    let mut field = Field::new();
    for (y, row) in page.field.iter().enumerate().take(Field::TOP) {
        for (x, &color) in row.iter().enumerate().take(Field::WIDTH) {
            field.set(x, y, cell(color));
        }
    }
    for (x, &color) in page.garbage_row.iter().enumerate().take(Field::WIDTH) {
        field.set_garbage(x, cell(color));
    }
    field
}
