use crate::error::ScanError;
use crate::scan::tokens::{Token, tokenize};

/// Extract the trimmed text of the `<title>` inside `<head>`.
///
/// A `<title>` anywhere else is ignored. An empty `<title></title>` yields an
/// empty string rather than an error.
pub fn page_title(html: &str) -> Result<String, ScanError> {
    let mut in_head = false;
    let mut in_title = false;

    for token in tokenize(html) {
        match token {
            Token::StartTag(tag) if tag.name == "head" => in_head = true,
            Token::StartTag(tag) if tag.name == "title" && in_head => in_title = true,
            Token::Text(text) if in_title => return Ok(text.trim().to_string()),
            Token::EndTag(name) if name == "title" && in_title => return Ok(String::new()),
            Token::EndTag(name) if name == "head" => {
                return Err(if in_head {
                    ScanError::NoTitleNode
                } else {
                    ScanError::NoHeadElement
                });
            }
            _ => {}
        }
    }
    Err(ScanError::NoHeadElement)
}
