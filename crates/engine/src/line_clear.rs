//! Row-clear compaction and the cleared-row history that maps the shrinking
//! search board back onto the original board's rows.

use glue_core::{Cell, Field};
use smallvec::SmallVec;

/// Rows removed by one placement, each given as the number of surviving
/// rows below it at the moment it was removed. Two cleared bottom rows
/// read `[0, 0]`.
pub type ClearedNow = SmallVec<[usize; 4]>;

/// Remove every row below `height` made entirely of filler, shifting the
/// rows above down.
pub fn remove_line_clears(field: &mut Field, height: usize) -> ClearedNow {
    let mut cleared = ClearedNow::new();
    let mut current = 0;
    for source in 0..height {
        let row = *field.row(source);
        if row.iter().all(|&cell| cell == Cell::Gray) {
            cleared.push(current);
            continue;
        }
        if current != source {
            field.set_row(current, row);
        }
        current += 1;
    }
    for y in current..height {
        field.set_row(y, [Cell::Empty; Field::WIDTH]);
    }
    cleared
}

/// Ascending absolute rows already removed on this search branch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClearedRows(SmallVec<[usize; 8]>);

impl ClearedRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Original-board row of a current-frame row: one higher for every
    /// removed row at or below it.
    pub fn absolute_row(&self, row: usize) -> usize {
        let mut absolute = row;
        for &removed in &self.0 {
            if removed > absolute {
                break;
            }
            absolute += 1;
        }
        absolute
    }

    /// History for the child branch after `cleared` rows were removed.
    pub fn with_cleared(&self, cleared: &[usize]) -> Self {
        let mut next = self.clone();
        for &row in cleared {
            let mut absolute = row;
            let mut at = 0;
            while at < next.0.len() && next.0[at] <= absolute {
                absolute += 1;
                at += 1;
            }
            next.0.insert(at, absolute);
        }
        next
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
