//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed symbols
//!
//! These macros reduce boilerplate in the pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$line` - The 1-based source line
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntConst, "42".to_string(), 3);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            line: $line,
        }
    };
}

/// Creates a default lexer handler for a fixed symbol.
///
/// The generated handler emits a token with the given kind and the literal
/// text, on the lexer's current line. The cursor is advanced by the caller.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new(r"\A\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _matched: &str| -> Result<Option<Token>, Error> {
            Ok(Some(MK_TOKEN!($kind, String::from($value), lexer.line())))
        }
    };
}
