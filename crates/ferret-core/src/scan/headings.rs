use crate::models::{Headings, empty_headings};
use crate::scan::tokens::{Token, tokenize};

/// Count `h1`..`h6` start tags over the whole document.
pub fn count_headings(html: &str) -> Headings {
    let mut headings = empty_headings();

    for token in tokenize(html) {
        if let Token::StartTag(tag) = token {
            if let Some(count) = headings.get_mut(&tag.name) {
                *count += 1;
            }
        }
    }

    headings
}
