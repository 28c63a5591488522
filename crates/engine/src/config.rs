//! Search configuration.
//!
//! Presets cover the two modes the command line exposes; everything else is
//! set through the `with_*` builders.

use glue_core::Piece;
use serde::{Deserialize, Serialize};

use crate::GlueError;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Abandon a branch once its placements are contained in a known
    /// solution. Faster, but may miss solutions.
    pub fast: bool,
    /// Stop once this many distinct solutions are found (`None` or 0 =
    /// unlimited).
    pub expected_solutions: Option<usize>,
    /// Known piece order; every placement must take the next piece.
    pub order: Option<Vec<Piece>>,
    /// Record every attempted placement for the debug trace
    pub visualize: bool,
}

impl SearchConfig {
    /// Finds every distinct reconstruction.
    pub fn exhaustive() -> Self {
        Self::default()
    }

    pub fn fast() -> Self {
        Self {
            fast: true,
            ..Self::default()
        }
    }

    pub fn with_fast(mut self, fast: bool) -> Self {
        self.fast = fast;
        self
    }

    pub fn with_expected_solutions(mut self, limit: usize) -> Self {
        self.expected_solutions = Some(limit);
        self
    }

    pub fn with_order(mut self, order: Vec<Piece>) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_visualize(mut self, visualize: bool) -> Self {
        self.visualize = visualize;
        self
    }

    /// The effective solution limit.
    pub fn limit(&self) -> Option<usize> {
        self.expected_solutions.filter(|&n| n > 0)
    }
}

/// Parse a piece order such as `"TILJ"`. Whitespace and commas are skipped.
pub fn parse_order(text: &str) -> Result<Vec<Piece>, GlueError> {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| Piece::from_char(c).ok_or(GlueError::UnknownPiece(c)))
        .collect()
}
