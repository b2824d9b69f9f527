//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for the context tracker. It handles:
//!
//! - Maximal-munch scanning driven by an ordered regex pattern table
//! - Case-insensitive recognition of reserved words
//! - Integer/real constants and string/char literals
//! - Line tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
