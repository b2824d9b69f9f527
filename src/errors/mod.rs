//! Error types and error handling for the front end.
//!
//! This module defines the error types shared by the lexer, the symbol
//! table and the context tracker. It includes:
//!
//! - Error structures carrying the offending source line
//! - Specific error variants for scanning and classification failures
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions
//!
//! Every error is fatal: the run stops at the first one.

pub mod errors;
