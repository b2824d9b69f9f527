use smallvec::SmallVec;

use crate::{
    errors::errors::Error,
    lexer::{lexer::Lexer, tokens::Token},
};

/// Tokens that can be handed back at once.
pub const LOOKAHEAD: usize = 2;

/// The lexer plus a small pushback buffer.
///
/// Pushed-back tokens are returned unchanged, last in first out, so a
/// two-token lookahead is undone by pushing the second token before the first.
pub struct TokenStream {
    lexer: Lexer,
    pushed: SmallVec<[Token; LOOKAHEAD]>,
}

impl TokenStream {
    pub fn new(lexer: Lexer) -> Self {
        TokenStream {
            lexer,
            pushed: SmallVec::new(),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, Error> {
        match self.pushed.pop() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    pub fn push_back(&mut self, token: Token) {
        debug_assert!(self.pushed.len() < LOOKAHEAD, "pushback buffer is full");
        self.pushed.push(token);
    }
}
