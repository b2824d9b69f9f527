//! Context-sensitive classification of the token stream.
//!
//! This module drives the lexer through a small pushback buffer and keeps a
//! stack of declarative frames. It includes:
//!
//! - `TokenStream`, the lexer plus a two-token lookahead buffer
//! - `ContextFrame`/`ContextStack`, the frames and their stack
//! - `Tracker`, the state machine that registers and types identifiers
//! - `classify`, the entry point producing the lexeme log and symbol table

pub mod frames;
pub mod stream;
pub mod tracker;
