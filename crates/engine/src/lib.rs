//! glue-engine - rebuilds ordered placement sequences from boards whose
//! cells are coloured by the piece that covers them.
//!
//! [`glue_field`] searches one board; [`glue_codes`] runs the whole
//! decode / search / encode pipeline over board-notation codes.

pub mod assemble;
pub mod config;
pub mod dedup;
pub mod glue;
pub mod line_clear;
mod overhang;
pub mod replay;
pub mod scan;

pub use assemble::assemble;
pub use config::{parse_order, SearchConfig};
pub use dedup::{is_duplicate, is_partial_duplicate, Sequence, SolutionSet};
pub use glue::{
    glue_code, glue_codes, glue_field, split_codes, CodeReport, GlueError, GlueReport, PageReport,
    SearchOutcome,
};
pub use line_clear::{remove_line_clears, ClearedRows};
pub use replay::{replay, ReplayError};
pub use scan::{is_glueable, Cursor, Frame, Scanner};
