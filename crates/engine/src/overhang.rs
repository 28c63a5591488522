//! Where to resume scanning after a placement that cleared no rows.
//!
//! Resuming just right of the placed piece misses pieces whose scan cell
//! sits left of or below it, so a few hanging shapes are checked first.

use glue_core::{Cell, Field, Piece, Rotation};

use crate::scan::{match_shape, Cells, Cursor};

/// Whether the piece scanned at row `y` stands only on the piece colours
/// below it: no mino has filler reaching every row beneath `y`.
fn would_float(field: &Field, y: usize, cells: &Cells) -> bool {
    if y == 0 {
        return false;
    }
    let mut filler_rows = 0u32;
    for &(x, top) in cells {
        for below in 0..top {
            if field.get(x, below) == Cell::Gray {
                filler_rows |= 1 << below;
            }
        }
        if (0..y).all(|row| filler_rows & (1 << row) != 0) {
            return false;
        }
    }
    true
}

fn is_label(field: &Field, x: i32, y: i32, pieces: &[Piece]) -> bool {
    field.at(x, y).piece().is_some_and(|piece| pieces.contains(&piece))
}

fn fits(field: &Field, height: usize, x: i32, y: i32, piece: Piece, rotation: Rotation) -> bool {
    piece
        .scan_shape(rotation)
        .and_then(|shape| match_shape(field, height, x, y, piece, shape))
        .is_some()
}

/// Next cursor after placing `cells`, scanned at `(x, y)`, on the board as
/// it was before the placement.
pub(crate) fn next_start(field: &Field, height: usize, x: usize, y: usize, cells: &Cells) -> Cursor {
    if would_float(field, y, cells) {
        // restart low enough to clear the rows holding it up
        return Cursor::new(0, y.saturating_sub(4));
    }

    // the anchor can sit above the scan row; only scan-row minos count
    let (right_x, right_y) = cells
        .iter()
        .copied()
        .filter(|&(_, cy)| cy == y)
        .max_by_key(|&(cx, _)| cx)
        .unwrap_or((x, y));
    let (x, y) = (x as i32, y as i32);
    let (rx, ry) = (right_x as i32, right_y as i32);

    // J hanging from the left
    if x > 0
        && y > 0
        && is_label(field, x - 1, y - 1, &[Piece::J])
        && is_label(field, x, y + 1, &[Piece::J])
        && fits(field, height, x - 1, y - 1, Piece::J, Rotation::Right)
    {
        return Cursor::new((x - 1) as usize, (y - 1) as usize);
    }

    // L hanging from the right
    if y > 0
        && is_label(field, rx + 1, ry - 1, &[Piece::L])
        && is_label(field, rx, ry + 1, &[Piece::L])
        && fits(field, height, rx + 1, ry - 1, Piece::L, Rotation::Left)
    {
        return Cursor::new((rx + 1) as usize, (ry - 1) as usize);
    }

    // L or S two to the left
    if x >= 2 && y > 0 && is_label(field, x, y + 1, &[Piece::L, Piece::S]) {
        let hanging = match field.at(x - 2, y) {
            Cell::Mino(Piece::L) => fits(field, height, x - 2, y, Piece::L, Rotation::Reverse),
            Cell::Mino(Piece::S) => fits(field, height, x - 2, y, Piece::S, Rotation::Spawn),
            _ => false,
        };
        if hanging {
            return Cursor::new((x - 2) as usize, y as usize);
        }
    }

    // T, L or Z one to the left
    if x >= 1 && y > 0 && is_label(field, x, y + 1, &[Piece::T, Piece::L, Piece::Z]) {
        let hanging = match field.at(x - 1, y) {
            Cell::Mino(Piece::L) => fits(field, height, x - 1, y, Piece::L, Rotation::Reverse),
            Cell::Mino(Piece::Z) => fits(field, height, x - 1, y, Piece::Z, Rotation::Right),
            Cell::Mino(Piece::T) => {
                fits(field, height, x - 1, y, Piece::T, Rotation::Right)
                    || fits(field, height, x - 1, y, Piece::T, Rotation::Reverse)
            }
            _ => false,
        };
        if hanging {
            return Cursor::new((x - 1) as usize, y as usize);
        }
    }

    if right_x == Field::WIDTH - 1 {
        Cursor::new(0, y as usize + 1)
    } else {
        Cursor::new(right_x + 1, y as usize)
    }
}
