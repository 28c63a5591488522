//! Pages of a board-notation sequence.

use glue_core::{Field, Operation};

/// Comments starting with this mark a quiz page.
pub const QUIZ_PREFIX: &str = "#Q=";

/// Per-page playback flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flags {
    /// Lock the operation into the field before the next page.
    pub lock: bool,
    /// Push the garbage row up after locking.
    pub rise: bool,
    /// Mirror the field after locking.
    pub mirror: bool,
    /// Read only; derived from the comment when decoding.
    pub quiz: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            lock: true,
            rise: false,
            mirror: false,
            quiz: false,
        }
    }
}

/// One page. When encoding, a page without a field continues from the field
/// the previous page left behind, and a page without a comment keeps the
/// previous comment. Decoded pages always carry both, an unset comment
/// reading as empty.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Page {
    pub field: Option<Field>,
    pub operation: Option<Operation>,
    pub comment: Option<String>,
    pub flags: Flags,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }
}

/// Field handed to the next page: lock, clear, then rise and mirror.
pub(crate) fn advance(field: &mut Field, operation: Option<&Operation>, flags: &Flags) {
    if !flags.lock {
        return;
    }
    if let Some(operation) = operation {
        field.fill(operation);
    }
    field.clear_lines();
    if flags.rise {
        field.rise_garbage();
    }
    if flags.mirror {
        field.mirror();
    }
}
