//! Labelled 10-wide playfield with a garbage row underneath.
//!
//! Row 0 is the bottom playfield row. The garbage row sits below it and only
//! matters to the board notation (raise flag); the search never reads it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Operation, Piece};

/// One cell label.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Mino(Piece),
    /// Filler: a placed-and-confirmed mino.
    Gray,
}

impl Cell {
    /// Board-notation number: Empty = 0, pieces 1..=7, Gray = 8.
    pub fn number(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Mino(piece) => piece.index(),
            Cell::Gray => 8,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            0 => Some(Cell::Empty),
            8 => Some(Cell::Gray),
            n => Piece::from_index(n).map(Cell::Mino),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::Mino(piece) => piece.to_char(),
            Cell::Gray => 'X',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Gray),
            c => Piece::from_char(c).map(Cell::Mino),
        }
    }

    #[inline]
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Mino(piece) => Some(piece),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldParseError {
    #[error("row {row} has {len} cells, expected 10")]
    BadWidth { row: usize, len: usize },
    #[error("unknown cell label {0:?}")]
    UnknownCell(char),
    #[error("{0} rows do not fit in the playfield")]
    TooTall(usize),
}

#[derive(Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct Field {
    rows: [[Cell; Field::WIDTH]; Field::TOP],
    garbage: [Cell; Field::WIDTH],
}

impl Field {
    pub const WIDTH: usize = 10;
    /// Playfield rows.
    pub const TOP: usize = 23;
    /// Playfield plus garbage row.
    pub const BLOCKS: usize = (Field::TOP + 1) * Field::WIDTH;

    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Like [`Field::get`] but anything outside the playfield reads as empty.
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> Cell {
        if (0..Self::WIDTH as i32).contains(&x) && (0..Self::TOP as i32).contains(&y) {
            self.rows[y as usize][x as usize]
        } else {
            Cell::Empty
        }
    }

    pub fn garbage(&self, x: usize) -> Cell {
        self.garbage[x]
    }

    pub fn set_garbage(&mut self, x: usize, cell: Cell) {
        self.garbage[x] = cell;
    }

    pub fn row(&self, y: usize) -> &[Cell; Field::WIDTH] {
        &self.rows[y]
    }

    pub fn set_row(&mut self, y: usize, row: [Cell; Field::WIDTH]) {
        self.rows[y] = row;
    }

    /// Highest playfield row holding a piece colour or filler, plus one.
    pub fn height(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.is_empty()))
            .map_or(0, |y| y + 1)
    }

    /// Copy with every piece colour blanked, leaving filler and empty cells.
    pub fn blanked(&self) -> Field {
        let mut blank = self.clone();
        for row in blank.rows.iter_mut() {
            for cell in row.iter_mut() {
                if cell.piece().is_some() {
                    *cell = Cell::Empty;
                }
            }
        }
        blank
    }

    pub fn has_piece_cells(&self) -> bool {
        self.rows.iter().flatten().any(|cell| cell.piece().is_some())
    }

    /// Playfield cell count per piece colour, indexed like [`Piece::ALL`].
    pub fn piece_counts(&self) -> [usize; 7] {
        let mut counts = [0usize; 7];
        for piece in self.rows.iter().flatten().filter_map(|cell| cell.piece()) {
            counts[piece as usize] += 1;
        }
        counts
    }

    /// Paint an operation's cells with its piece. Cells outside the
    /// playfield are dropped.
    pub fn fill(&mut self, operation: &Operation) {
        for (x, y) in operation.cells() {
            if (0..Self::WIDTH as i8).contains(&x) && (0..Self::TOP as i8).contains(&y) {
                self.rows[y as usize][x as usize] = Cell::Mino(operation.piece);
            }
        }
    }

    /// Remove every row without an empty cell, shifting the rest down.
    pub fn clear_lines(&mut self) -> usize {
        let kept: Vec<[Cell; Field::WIDTH]> = self
            .rows
            .iter()
            .filter(|row| row.iter().any(|cell| cell.is_empty()))
            .copied()
            .collect();
        let cleared = Self::TOP - kept.len();
        if cleared > 0 {
            let mut rows = [[Cell::Empty; Field::WIDTH]; Field::TOP];
            rows[..kept.len()].copy_from_slice(&kept);
            self.rows = rows;
        }
        cleared
    }

    /// Push the garbage row in from below and reset it.
    pub fn rise_garbage(&mut self) {
        self.rows.copy_within(0..Self::TOP - 1, 1);
        self.rows[0] = self.garbage;
        self.garbage = [Cell::Empty; Field::WIDTH];
    }

    pub fn mirror(&mut self) {
        for row in self.rows.iter_mut() {
            row.reverse();
        }
    }
}

/// Rows from the top non-empty row down to row 0, one line each.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height()).rev() {
            for cell in &self.rows[y] {
                write!(f, "{}", cell.to_char())?;
            }
            if y > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Parses the [`Display`](fmt::Display) form. The last line is row 0;
/// blank lines and surrounding whitespace are ignored.
impl FromStr for Field {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() > Self::TOP {
            return Err(FieldParseError::TooTall(lines.len()));
        }

        let mut field = Field::new();
        for (row, line) in lines.iter().rev().enumerate() {
            let len = line.chars().count();
            if len != Self::WIDTH {
                return Err(FieldParseError::BadWidth { row, len });
            }
            for (x, c) in line.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or(FieldParseError::UnknownCell(c))?;
                field.rows[row][x] = cell;
            }
        }
        Ok(field)
    }
}
