//! Flat token stream from the html5ever tokenizer.
//!
//! Only the tokenizer runs; no tree is built. The sink switches the tokenizer
//! into raw-text mode after `<title>`, `<script>` and the other raw-text
//! elements, which is what html5ever's tree builder would do, so their
//! content comes back as text and never as tags.
//!
//! Tag and attribute names arrive lowercased and character references are
//! already decoded. Comments and NUL characters are dropped, and adjacent
//! character runs are merged into a single `Text` token.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token as RawToken, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub self_closing: bool,
}

impl Tag {
    /// Value of the named attribute (names are lowercase).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// True if the attribute is present and equal to `value`, ignoring ASCII case.
    pub fn attr_eq(&self, name: &str, value: &str) -> bool {
        self.attr(name)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
    }
}

/// A `<!DOCTYPE>` split into its parts. The name is lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doctype {
    pub name: Option<String>,
    pub public_id: Option<String>,
    pub system_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Doctype(Doctype),
    StartTag(Tag),
    EndTag(String),
    Text(String),
}

/// Tokenize the whole document.
pub fn tokenize(html: &str) -> Vec<Token> {
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));

    let mut tokenizer = Tokenizer::new(Collector::default(), TokenizerOpts::default());
    // The sink never asks for a script pause, so one feed drains the queue.
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    std::mem::take(&mut tokenizer.sink.tokens)
}

#[derive(Default)]
struct Collector {
    tokens: Vec<Token>,
}

impl Collector {
    fn push_text(&mut self, text: &str) {
        match self.tokens.last_mut() {
            Some(Token::Text(run)) => run.push_str(text),
            _ => self.tokens.push(Token::Text(text.to_string())),
        }
    }
}

impl TokenSink for Collector {
    type Handle = ();

    fn process_token(&mut self, token: RawToken, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            RawToken::DoctypeToken(doctype) => {
                self.tokens.push(Token::Doctype(Doctype {
                    name: doctype.name.map(|t| t.to_string()),
                    public_id: doctype.public_id.map(|t| t.to_string()),
                    system_id: doctype.system_id.map(|t| t.to_string()),
                }));
            }
            RawToken::TagToken(tag) => {
                let name = tag.name.to_string();
                match tag.kind {
                    TagKind::StartTag => {
                        let next = raw_text_mode(&name);
                        self.tokens.push(Token::StartTag(Tag {
                            name,
                            attrs: tag
                                .attrs
                                .into_iter()
                                .map(|a| Attribute {
                                    name: a.name.local.to_string(),
                                    value: a.value.to_string(),
                                })
                                .collect(),
                            self_closing: tag.self_closing,
                        }));
                        return next;
                    }
                    TagKind::EndTag => self.tokens.push(Token::EndTag(name)),
                }
            }
            RawToken::CharacterTokens(text) => self.push_text(&text),
            RawToken::CommentToken(_)
            | RawToken::NullCharacterToken
            | RawToken::EOFToken
            | RawToken::ParseError(_) => {}
        }
        TokenSinkResult::Continue
    }
}

/// Tokenizer state to switch to after a start tag with this name.
fn raw_text_mode(name: &str) -> TokenSinkResult<()> {
    match name {
        "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
            TokenSinkResult::RawData(RawKind::Rawtext)
        }
        "script" => TokenSinkResult::RawData(RawKind::ScriptData),
        "plaintext" => TokenSinkResult::Plaintext,
        _ => TokenSinkResult::Continue,
    }
}
