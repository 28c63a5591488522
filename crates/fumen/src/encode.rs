use fumen::Fumen;
use glue_core::Field;

use crate::convert::{to_piece, write_field};
use crate::page::{advance, Page};
use crate::FumenError;

/// Encode pages as a `v115@` string.
///
/// Every page is written with its resolved field and the comment in force.
/// An empty slice encodes as one empty page. Fails only when an
/// operation's reference cell lies outside the grid.
pub fn encode(pages: &[Page]) -> Result<String, FumenError> {
    if pages.is_empty() {
        return encode(&[Page::new()]);
    }
    let mut fumen = Fumen::default();
    fumen.guideline = true;
    let mut prev = Field::new();
    let mut comment: Option<String> = None;

    for page in pages {
        let mut field = page.field.clone().unwrap_or_else(|| prev.clone());
        if page.comment.is_some() {
            comment.clone_from(&page.comment);
        }

        let out = fumen.add_page();
        write_field(&field, out);
        out.piece = page.operation.as_ref().map(to_piece).transpose()?;
        out.lock = page.flags.lock;
        out.rise = page.flags.rise;
        out.mirror = page.flags.mirror;
        out.comment = comment.clone();

        advance(&mut field, page.operation.as_ref(), &page.flags);
        prev = field;
    }

    Ok(fumen.encode())
}
