use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{reserved_kind, TokenKind},
    Position,
};

use super::types::TypeCode;

/// Identifiers are stored using only this many leading characters.
pub const MAX_LEXEME_LEN: usize = 35;

/// A symbol keeps at most this many occurrence lines.
pub const MAX_LINES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    /// 1-based, in order of first sight
    pub entry: usize,
    pub kind: TokenKind,
    pub lexeme: String,
    pub len_before: usize,
    pub len_after: usize,
    pub type_code: TypeCode,
    pub lines: Vec<u32>,
}

/// Symbols keyed by truncated lexeme, kept in entry order.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: IndexMap<String, SymbolRecord>,
    file: Rc<String>,
}

pub fn truncate(lexeme: &str) -> &str {
    match lexeme.char_indices().nth(MAX_LEXEME_LEN) {
        Some((end, _)) => &lexeme[..end],
        None => lexeme,
    }
}

impl SymbolTable {
    pub fn new(file: Rc<String>) -> Self {
        SymbolTable {
            symbols: IndexMap::new(),
            file,
        }
    }

    /// Registers an occurrence of `lexeme` on `line`, returning its entry.
    pub fn define_or_get(&mut self, lexeme: &str, line: u32, kind: TokenKind) -> Result<usize, Error> {
        let truncated = truncate(lexeme);

        if reserved_kind(truncated).is_some() {
            return Err(Error::new(
                ErrorImpl::ReservedWord { word: truncated.to_string() },
                Position(line, Rc::clone(&self.file)),
            ));
        }

        if let Some(record) = self.symbols.get_mut(truncated) {
            if record.lines.len() < MAX_LINES && record.lines.last() != Some(&line) {
                record.lines.push(line);
            }
            return Ok(record.entry);
        }

        let entry = self.symbols.len() + 1;
        debug!("defined symbol {} as entry {} on line {}", truncated, entry, line);

        self.symbols.insert(
            truncated.to_string(),
            SymbolRecord {
                entry,
                kind,
                lexeme: truncated.to_string(),
                len_before: lexeme.chars().count(),
                len_after: truncated.chars().count(),
                type_code: TypeCode::Void,
                lines: vec![line],
            },
        );

        Ok(entry)
    }

    /// Overwrites the type of `lexeme` when `code` is one of the known type
    /// codes. Unknown lexemes and unknown codes are ignored.
    pub fn set_type(&mut self, lexeme: &str, code: &str) {
        if let Some(type_code) = TypeCode::from_code(code) {
            self.set_type_code(lexeme, type_code);
        }
    }

    pub fn set_type_code(&mut self, lexeme: &str, type_code: TypeCode) {
        if let Some(record) = self.symbols.get_mut(truncate(lexeme)) {
            debug!("typed symbol {} as {}", record.lexeme, type_code);
            record.type_code = type_code;
        }
    }

    pub fn lookup_index(&self, lexeme: &str) -> Option<usize> {
        self.symbols.get(truncate(lexeme)).map(|record| record.entry)
    }

    pub fn get(&self, lexeme: &str) -> Option<&SymbolRecord> {
        self.symbols.get(truncate(lexeme))
    }

    /// Every record, by ascending entry number.
    pub fn records(&self) -> Vec<&SymbolRecord> {
        self.symbols.values().collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
