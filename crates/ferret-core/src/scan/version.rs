use crate::error::ScanError;
use crate::scan::tokens::{Doctype, Token, tokenize};

/// Label reported for `<!DOCTYPE html>`.
pub const HTML5_LABEL: &str = "HTML5 and beyond";

/// Detect the document version from its DOCTYPE declaration.
///
/// Legacy doctypes carry a formal public identifier such as
/// `-//W3C//DTD HTML 4.01//EN`; the label is its second `//` segment.
pub fn page_version(html: &str) -> Result<String, ScanError> {
    tokenize(html)
        .into_iter()
        .find_map(|token| match token {
            Token::Doctype(doctype) => Some(version_label(&doctype)),
            _ => None,
        })
        .unwrap_or(Err(ScanError::NoDoctype))
}

fn version_label(doctype: &Doctype) -> Result<String, ScanError> {
    let public_id = match (doctype.name.as_deref(), doctype.public_id.as_deref()) {
        (Some("html"), None) => return Ok(HTML5_LABEL.to_string()),
        (_, Some(public_id)) => public_id,
        (_, None) => return Err(ScanError::MalformedDoctype(declaration(doctype))),
    };

    let malformed = || ScanError::MalformedDoctype(declaration(doctype));

    let parts: Vec<&str> = public_id.split("-//").collect();
    if parts.len() != 2 {
        return Err(malformed());
    }

    let segments: Vec<&str> = parts[1].split("//").collect();
    if segments.len() < 3 {
        return Err(malformed());
    }

    Ok(segments[1].to_string())
}

/// The declaration as it would be written back, for error messages.
fn declaration(doctype: &Doctype) -> String {
    let mut text = doctype.name.clone().unwrap_or_default();
    match (&doctype.public_id, &doctype.system_id) {
        (Some(public_id), Some(system_id)) => {
            text.push_str(&format!(" PUBLIC \"{public_id}\" \"{system_id}\""));
        }
        (Some(public_id), None) => text.push_str(&format!(" PUBLIC \"{public_id}\"")),
        (None, Some(system_id)) => text.push_str(&format!(" SYSTEM \"{system_id}\"")),
        (None, None) => {}
    }
    text
}
