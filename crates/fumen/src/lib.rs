//! Board-notation pages for the glue tools.
//!
//! The `fumen` crate does the digit, field and comment coding. This crate
//! maps its pages onto [`glue_core::Field`] and [`glue_core::Operation`],
//! fills in pages that continue from the previous field, and accepts viewer
//! URLs as input.

mod convert;
mod decode;
mod encode;
mod page;

use thiserror::Error;

pub use decode::decode;
pub use encode::encode;
pub use page::{Flags, Page, QUIZ_PREFIX};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FumenError {
    #[error("unsupported board notation version")]
    UnsupportedVersion,
    #[error("malformed board notation data")]
    Malformed,
    #[error("operation at ({x}, {y}) is outside the board")]
    OutOfBounds { x: i8, y: i8 },
}
