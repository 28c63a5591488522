//! Placement scanner: the backtracking search.
//!
//! Each frame owns its board, placements and cleared-row history; children
//! get fresh copies. The scan walks cells in raster order from the frame's
//! cursor, tries every rotation of the labelled piece anchored there, and
//! recurses on each placement that matches its colour and rests on the floor
//! or on filler.

use std::ops::ControlFlow;

use glue_core::{AbsoluteOperation, Cell, EncodedOperation, Field, Operation, Piece, Rotation, Shape};
use log::trace;

use crate::config::SearchConfig;
use crate::dedup::{Sequence, SolutionSet};
use crate::line_clear::{remove_line_clears, ClearedRows};
use crate::overhang::next_start;

const TETROMINO: usize = 4;

/// Four matched cells, anchor first.
pub type Cells = [(usize, usize); TETROMINO];

/// Raster position the next scan starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

impl Cursor {
    pub const ORIGIN: Cursor = Cursor { x: 0, y: 0 };

    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// One search branch.
#[derive(Clone, Debug)]
pub struct Frame<'o> {
    pub field: Field,
    /// Rows still in play; shrinks as rows clear.
    pub height: usize,
    pub cursor: Cursor,
    pub placements: Sequence,
    pub cleared: ClearedRows,
    /// Pieces still to place, when the order is known.
    pub order: Option<&'o [Piece]>,
}

impl<'o> Frame<'o> {
    /// Root frame for a whole board.
    pub fn root(field: Field, order: Option<&'o [Piece]>) -> Self {
        let height = field.height();
        Self {
            field,
            height,
            cursor: Cursor::ORIGIN,
            placements: Vec::new(),
            cleared: ClearedRows::new(),
            order,
        }
    }
}

/// Every piece colour must cover a whole number of pieces.
pub fn is_glueable(field: &Field) -> bool {
    field.piece_counts().iter().all(|count| count % TETROMINO == 0)
}

/// Cells of `shape` anchored at the scan cell `(x, y)`, if all of them lie
/// inside the first `height` rows and carry `piece`.
pub fn match_shape(
    field: &Field,
    height: usize,
    x: i32,
    y: i32,
    piece: Piece,
    shape: &Shape,
) -> Option<Cells> {
    let mut cells = [(0, 0); TETROMINO];
    for (cell, &(dx, dy)) in cells.iter_mut().zip(shape) {
        let cx = x + dx as i32;
        let cy = y + dy as i32;
        let inside = (0..Field::WIDTH as i32).contains(&cx) && (0..height as i32).contains(&cy);
        if !inside || field.get(cx as usize, cy as usize) != Cell::Mino(piece) {
            return None;
        }
        *cell = (cx as usize, cy as usize);
    }
    Some(cells)
}

/// No cell on the floor and none directly on filler.
pub fn is_floating(field: &Field, cells: &Cells) -> bool {
    cells
        .iter()
        .all(|&(x, y)| y != 0 && field.get(x, y - 1) != Cell::Gray)
}

/// Runs the search for one board and collects its solutions.
pub struct Scanner<'c> {
    config: &'c SearchConfig,
    solutions: SolutionSet,
    attempts: Vec<Field>,
}

impl<'c> Scanner<'c> {
    pub fn new(config: &'c SearchConfig) -> Self {
        Self {
            config,
            solutions: SolutionSet::new(),
            attempts: Vec::new(),
        }
    }

    pub fn solutions(&self) -> &SolutionSet {
        &self.solutions
    }

    /// Solutions plus, when visualizing, one board per attempted rotation.
    pub fn finish(self) -> (SolutionSet, Vec<Field>) {
        (self.solutions, self.attempts)
    }

    fn limit_reached(&self) -> bool {
        self.config
            .limit()
            .is_some_and(|limit| self.solutions.len() >= limit)
    }

    /// Explore `frame` and everything below it. Breaks once the solution
    /// limit is reached.
    pub fn search(&mut self, frame: &Frame<'_>) -> ControlFlow<()> {
        let field = &frame.field;
        for y in frame.cursor.y..frame.height {
            let first_x = if y == frame.cursor.y { frame.cursor.x } else { 0 };
            for x in first_x..Field::WIDTH {
                let Some(piece) = field.get(x, y).piece() else {
                    continue;
                };
                if frame.order.is_some_and(|order| order.first() != Some(&piece)) {
                    continue;
                }
                // only an I fits flat in the top row
                if y == frame.height - 1 && piece != Piece::I {
                    continue;
                }

                for (&rotation, shape) in Rotation::ALL.iter().zip(piece.rotation_states()) {
                    if self.config.visualize {
                        self.record_attempt(frame, x, y, piece, shape);
                    }
                    let Some(cells) = match_shape(field, frame.height, x as i32, y as i32, piece, shape)
                    else {
                        continue;
                    };
                    if is_floating(field, &cells) {
                        continue;
                    }
                    self.place(frame, (x, y), piece, rotation, &cells)?;
                }
            }
        }

        if !field.has_piece_cells() && self.solutions.insert(frame.placements.clone()) {
            trace!(
                "solution {} with {} placements",
                self.solutions.len(),
                frame.placements.len()
            );
        }
        ControlFlow::Continue(())
    }

    fn place(
        &mut self,
        frame: &Frame<'_>,
        (x, y): (usize, usize),
        piece: Piece,
        rotation: Rotation,
        cells: &Cells,
    ) -> ControlFlow<()> {
        let mut field = frame.field.clone();
        for &(cx, cy) in cells {
            field.set(cx, cy, Cell::Gray);
        }
        let cleared_now = remove_line_clears(&mut field, frame.height);

        let (anchor_x, anchor_y) = cells[0];
        let operation = AbsoluteOperation {
            operation: Operation::new(piece, rotation, anchor_x as i8, anchor_y as i8),
            abs_y: frame.cleared.absolute_row(anchor_y) as i8,
        };

        let (cleared, cursor) = if !cleared_now.is_empty() {
            (frame.cleared.with_cleared(&cleared_now), Cursor::ORIGIN)
        } else if frame.order.is_some() {
            (frame.cleared.clone(), Cursor::ORIGIN)
        } else {
            let cursor = next_start(&frame.field, frame.height, x, y, cells);
            (frame.cleared.clone(), cursor)
        };

        let mut placements = frame.placements.clone();
        placements.push(EncodedOperation::encode(&operation));
        trace!(
            "place {piece} {} at ({anchor_x}, {anchor_y}) abs {} cleared {:?}",
            rotation.name(),
            operation.abs_y,
            cleared_now.as_slice()
        );

        if self.config.fast && self.solutions.is_partial_duplicate(&placements) {
            return ControlFlow::Continue(());
        }

        let child = Frame {
            field,
            height: frame.height - cleared_now.len(),
            cursor,
            placements,
            cleared,
            order: frame.order.map(|order| order.get(1..).unwrap_or_default()),
        };
        self.search(&child)?;

        if self.limit_reached() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Blanked board with the attempted shape drawn wherever it lies inside.
    fn record_attempt(&mut self, frame: &Frame<'_>, x: usize, y: usize, piece: Piece, shape: &Shape) {
        let mut attempt = frame.field.blanked();
        for &(dx, dy) in shape {
            let cx = x as i32 + dx as i32;
            let cy = y as i32 + dy as i32;
            if (0..Field::WIDTH as i32).contains(&cx) && (0..frame.height as i32).contains(&cy) {
                attempt.set(cx as usize, cy as usize, Cell::Mino(piece));
            }
        }
        self.attempts.push(attempt);
    }
}
