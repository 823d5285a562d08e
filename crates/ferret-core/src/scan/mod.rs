//! Single-pass feature scanners over the HTML token stream.
//!
//! Every scanner tokenizes the document from the start on its own, so they
//! can run in any order and fail independently.

pub mod headings;
pub mod login;
pub mod title;
pub mod tokens;
pub mod version;

pub use headings::count_headings;
pub use login::has_login_form;
pub use title::page_title;
pub use tokens::{Tag, Token, tokenize};
pub use version::page_version;
