use fumen::Fumen;

use crate::convert::{read_field, to_operation};
use crate::page::{Flags, Page, QUIZ_PREFIX};
use crate::FumenError;

/// Decode a board-notation string into its pages.
///
/// Accepts bare data (`v115@...`, `m115@...`, `d115@...`) as well as a full
/// viewer URL; anything before the version tag and after the first `&` is
/// ignored, as are `?` separators and whitespace.
pub fn decode(input: &str) -> Result<Vec<Page>, FumenError> {
    let data = extract(input)?;
    let fumen = Fumen::decode(&format!("v115@{data}")).map_err(|_| FumenError::Malformed)?;

    let mut comment = String::new();
    let mut pages = Vec::with_capacity(fumen.pages.len());
    for page in &fumen.pages {
        if let Some(text) = &page.comment {
            comment.clone_from(text);
        }
        pages.push(Page {
            field: Some(read_field(page)),
            operation: page.piece.as_ref().map(to_operation).transpose()?,
            comment: Some(comment.clone()),
            flags: Flags {
                lock: page.lock,
                rise: page.rise,
                mirror: page.mirror,
                quiz: comment.starts_with(QUIZ_PREFIX),
            },
        });
    }
    Ok(pages)
}

fn extract(input: &str) -> Result<String, FumenError> {
    let input = input.split('&').next().unwrap_or(input);
    let (at, _) = input
        .match_indices("115@")
        .find(|&(at, _)| at > 0 && matches!(input.as_bytes()[at - 1], b'v' | b'm' | b'd'))
        .ok_or(FumenError::UnsupportedVersion)?;
    Ok(input[at + "115@".len()..]
        .chars()
        .filter(|c| *c != '?' && !c.is_whitespace())
        .collect())
}
