//! Piece types, rotation states and mino tables.
//!
//! Two frames are kept side by side:
//! - [`Piece::minos`] gives centre-relative offsets for every rotation, the
//!   convention the board notation uses for operation coordinates.
//! - [`Piece::rotation_states`] gives the distinct orientations as offsets from
//!   the bottom-most, left-most mino. The raster scan reaches that mino first,
//!   so the scanner anchors candidates there. The first offset of every state
//!   is the rotation centre.

use serde::{Deserialize, Serialize};

/// Four `(dx, dy)` offsets making up one orientation.
pub type Shape = [(i8, i8); 4];

/// Ordered to match the board notation's numbering (`I` = 1 ... `S` = 7).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Piece {
    I,
    L,
    O,
    Z,
    T,
    J,
    S,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    Spawn,
    Right,
    Reverse,
    Left,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Spawn,
        Rotation::Right,
        Rotation::Reverse,
        Rotation::Left,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Rotation::Spawn => "spawn",
            Rotation::Right => "right",
            Rotation::Reverse => "reverse",
            Rotation::Left => "left",
        }
    }
}

const I_STATES: [Shape; 2] = [
    [(1, 0), (0, 0), (2, 0), (3, 0)],
    [(0, 2), (0, 0), (0, 1), (0, 3)],
];

const L_STATES: [Shape; 4] = [
    [(1, 0), (0, 0), (2, 0), (2, 1)],
    [(0, 1), (0, 0), (1, 0), (0, 2)],
    [(1, 1), (0, 0), (0, 1), (2, 1)],
    [(0, 1), (0, 0), (0, 2), (-1, 2)],
];

const O_STATES: [Shape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const Z_STATES: [Shape; 2] = [
    [(0, 0), (1, 0), (-1, 1), (0, 1)],
    [(0, 1), (0, 0), (1, 1), (1, 2)],
];

const T_STATES: [Shape; 4] = [
    [(1, 0), (0, 0), (1, 1), (2, 0)],
    [(0, 1), (0, 0), (1, 1), (0, 2)],
    [(0, 1), (0, 0), (-1, 1), (1, 1)],
    [(0, 1), (0, 0), (-1, 1), (0, 2)],
];

const J_STATES: [Shape; 4] = [
    [(1, 0), (0, 0), (0, 1), (2, 0)],
    [(0, 1), (0, 0), (0, 2), (1, 2)],
    [(-1, 1), (0, 0), (-2, 1), (0, 1)],
    [(1, 1), (0, 0), (1, 0), (1, 2)],
];

const S_STATES: [Shape; 2] = [
    [(1, 0), (0, 0), (1, 1), (2, 1)],
    [(-1, 1), (0, 0), (0, 1), (-1, 2)],
];

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::L,
        Piece::O,
        Piece::Z,
        Piece::T,
        Piece::J,
        Piece::S,
    ];

    /// Notation index, 1..=7.
    pub fn index(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_index(index: u8) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize).copied())
    }

    pub fn to_char(self) -> char {
        match self {
            Piece::I => 'I',
            Piece::L => 'L',
            Piece::O => 'O',
            Piece::Z => 'Z',
            Piece::T => 'T',
            Piece::J => 'J',
            Piece::S => 'S',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(Piece::I),
            'L' => Some(Piece::L),
            'O' => Some(Piece::O),
            'Z' => Some(Piece::Z),
            'T' => Some(Piece::T),
            'J' => Some(Piece::J),
            'S' => Some(Piece::S),
            _ => None,
        }
    }

    /// Distinct orientations in scan frame, indexed by [`Rotation::index`].
    /// I, S and Z only need two states and O one; the rest are mirror images
    /// already covered by those.
    pub fn rotation_states(self) -> &'static [Shape] {
        match self {
            Piece::I => &I_STATES,
            Piece::L => &L_STATES,
            Piece::O => &O_STATES,
            Piece::Z => &Z_STATES,
            Piece::T => &T_STATES,
            Piece::J => &J_STATES,
            Piece::S => &S_STATES,
        }
    }

    /// Scan-frame shape for a rotation, if the piece distinguishes it.
    pub fn scan_shape(self, rotation: Rotation) -> Option<&'static Shape> {
        self.rotation_states().get(rotation.index() as usize)
    }

    /// Get mino offsets for this piece at given rotation.
    /// Returns 4 (x, y) offsets relative to the rotation centre.
    pub fn minos(self, rotation: Rotation) -> Shape {
        let spawn: Shape = match self {
            Piece::I => [(0, 0), (-1, 0), (1, 0), (2, 0)],
            Piece::L => [(0, 0), (-1, 0), (1, 0), (1, 1)],
            Piece::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Piece::Z => [(0, 0), (1, 0), (0, 1), (-1, 1)],
            Piece::T => [(0, 0), (-1, 0), (1, 0), (0, 1)],
            Piece::J => [(0, 0), (-1, 0), (1, 0), (-1, 1)],
            Piece::S => [(0, 0), (-1, 0), (0, 1), (1, 1)],
        };
        spawn.map(|(x, y)| match rotation {
            Rotation::Spawn => (x, y),
            Rotation::Right => (y, -x),
            Rotation::Reverse => (-x, -y),
            Rotation::Left => (-y, x),
        })
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
