//! Turns a solution into board-notation pages.

use glue_core::{EncodedOperation, Field};
use glue_fumen::Page;

/// The blanked board with the first placement, then one page per later
/// placement. Pages lock, so playback rebuilds the board step by step. An
/// empty sequence gives the blank board alone.
pub fn assemble(blank: &Field, sequence: &[EncodedOperation]) -> Vec<Page> {
    let mut operations = sequence.iter().map(|op| op.decode());
    let mut first = Page::new().with_field(blank.clone());
    if let Some(operation) = operations.next() {
        first = first.with_operation(operation);
    }
    std::iter::once(first)
        .chain(operations.map(|operation| Page::new().with_operation(operation)))
        .collect()
}
