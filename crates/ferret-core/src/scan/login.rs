//! Login form detection.
//!
//! A form counts as a login form when, between `<form>` and `</form>`, it has
//! a password input and a submit control labelled with a login phrase.

use crate::scan::tokens::{Tag, Token, tokenize};

/// Submit labels that mark a form as a login form (compared case-insensitively).
pub const LOGIN_PHRASES: [&str; 4] = ["Login", "Log In", "SignIn", "Sign In"];

pub fn is_login_phrase(text: &str) -> bool {
    let text = text.trim();
    LOGIN_PHRASES
        .iter()
        .any(|phrase| phrase.eq_ignore_ascii_case(text))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Not inside any `<form>`.
    Outside,
    InForm,
    /// Just evaluated an `<input>`; it is void, so the next token is seen from `InForm`.
    InFormInput,
    /// Inside `<button type=submit>`, waiting for its label text.
    InFormButton,
}

/// State machine fed one token at a time.
#[derive(Debug)]
pub struct LoginFormScanner {
    state: FormState,
    has_password: bool,
    has_login_button: bool,
}

impl Default for LoginFormScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginFormScanner {
    pub fn new() -> Self {
        Self {
            state: FormState::Outside,
            has_password: false,
            has_login_button: false,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Feed one token. Returns `true` once a complete login form was closed.
    pub fn step(&mut self, token: &Token) -> bool {
        let state = match self.state {
            FormState::InFormInput => FormState::InForm,
            state => state,
        };

        self.state = match (state, token) {
            (_, Token::StartTag(tag)) if tag.name == "form" => {
                self.reset_flags();
                FormState::InForm
            }
            (FormState::Outside, _) => FormState::Outside,

            (_, Token::EndTag(name)) if name == "form" => {
                if self.has_password && self.has_login_button {
                    self.state = FormState::Outside;
                    return true;
                }
                self.reset_flags();
                FormState::Outside
            }

            (FormState::InForm, Token::StartTag(tag)) if tag.name == "input" => {
                self.inspect_input(tag);
                FormState::InFormInput
            }
            (FormState::InForm, Token::StartTag(tag))
                if tag.name == "button" && tag.attr_eq("type", "submit") =>
            {
                FormState::InFormButton
            }

            (FormState::InFormButton, Token::Text(text)) => {
                if is_login_phrase(text) {
                    self.has_login_button = true;
                }
                FormState::InFormButton
            }
            (FormState::InFormButton, Token::EndTag(name)) if name == "button" => {
                FormState::InForm
            }

            (state, _) => state,
        };
        false
    }

    fn inspect_input(&mut self, tag: &Tag) {
        if tag.attr_eq("type", "password") {
            self.has_password = true;
        }
        if tag.attr_eq("type", "submit") && tag.attr("value").is_some_and(is_login_phrase) {
            self.has_login_button = true;
        }
    }

    fn reset_flags(&mut self) {
        self.has_password = false;
        self.has_login_button = false;
    }
}

/// True if the document contains at least one login form.
pub fn has_login_form(html: &str) -> bool {
    let mut scanner = LoginFormScanner::new();
    tokenize(html).iter().any(|token| scanner.step(token))
}
