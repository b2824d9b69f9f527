//! Unit tests for the symbol table and type codes.

use std::rc::Rc;

use test_case::test_case;

use crate::lexer::tokens::TokenKind;

use super::{
    symbol_table::{truncate, SymbolTable, MAX_LEXEME_LEN},
    types::{BaseType, TypeCode},
};

fn table() -> SymbolTable {
    SymbolTable::new(Rc::new("test.txt".to_string()))
}

#[test]
fn test_entries_are_sequential() {
    let mut symbols = table();

    assert_eq!(symbols.define_or_get("alpha", 1, TokenKind::Identifier).unwrap(), 1);
    assert_eq!(symbols.define_or_get("beta", 1, TokenKind::Identifier).unwrap(), 2);
    assert_eq!(symbols.define_or_get("alpha", 2, TokenKind::Identifier).unwrap(), 1);
    assert_eq!(symbols.define_or_get("gamma", 3, TokenKind::Identifier).unwrap(), 3);

    let lexemes: Vec<&str> = symbols.records().iter().map(|record| record.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["alpha", "beta", "gamma"]);
    assert_eq!(symbols.len(), 3);
}

#[test]
fn test_new_symbol_defaults() {
    let mut symbols = table();
    symbols.define_or_get("count", 4, TokenKind::Identifier).unwrap();

    let record = symbols.get("count").unwrap();
    assert_eq!(record.entry, 1);
    assert_eq!(record.kind, TokenKind::Identifier);
    assert_eq!(record.type_code, TypeCode::Void);
    assert_eq!(record.lines, vec![4]);
    assert_eq!(record.len_before, 5);
    assert_eq!(record.len_after, 5);
}

#[test]
fn test_lexemes_are_case_sensitive() {
    let mut symbols = table();

    assert_eq!(symbols.define_or_get("total", 1, TokenKind::Identifier).unwrap(), 1);
    assert_eq!(symbols.define_or_get("Total", 1, TokenKind::Identifier).unwrap(), 2);
}

#[test]
fn test_truncation_aliases_long_identifiers() {
    let prefix = "a".repeat(MAX_LEXEME_LEN);
    let first = format!("{}_first", prefix);
    let second = format!("{}_second", prefix);
    let mut symbols = table();

    assert_eq!(symbols.define_or_get(&first, 1, TokenKind::Identifier).unwrap(), 1);
    assert_eq!(symbols.define_or_get(&second, 3, TokenKind::Identifier).unwrap(), 1);
    assert_eq!(symbols.define_or_get(&first, 3, TokenKind::Identifier).unwrap(), 1);
    assert_eq!(symbols.define_or_get(&second, 4, TokenKind::Identifier).unwrap(), 1);

    assert_eq!(symbols.len(), 1);
    let record = symbols.get(&second).unwrap();
    assert_eq!(record.lexeme, prefix);
    assert_eq!(record.len_before, MAX_LEXEME_LEN + 6);
    assert_eq!(record.len_after, MAX_LEXEME_LEN);
    assert_eq!(record.lines, vec![1, 3, 4]);
}

#[test]
fn test_truncate_short_lexeme() {
    assert_eq!(truncate("short"), "short");
    assert_eq!(truncate(&"x".repeat(40)).len(), MAX_LEXEME_LEN);
}

#[test]
fn test_lines_skip_consecutive_duplicates() {
    let mut symbols = table();

    for line in [1, 1, 2, 2, 1] {
        symbols.define_or_get("x", line, TokenKind::Identifier).unwrap();
    }

    assert_eq!(symbols.get("x").unwrap().lines, vec![1, 2, 1]);
}

#[test]
fn test_lines_are_capped() {
    let mut symbols = table();

    for line in 1..=9 {
        symbols.define_or_get("x", line, TokenKind::Identifier).unwrap();
    }

    assert_eq!(symbols.get("x").unwrap().lines, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_reserved_word_is_rejected() {
    let mut symbols = table();
    let error = symbols.define_or_get("While", 6, TokenKind::Identifier).unwrap_err();

    assert_eq!(error.get_error_name(), "ReservedWord");
    assert_eq!(error.get_line(), 6);
    assert!(symbols.is_empty());
}

#[test]
fn test_set_type() {
    let mut symbols = table();
    symbols.define_or_get("x", 1, TokenKind::Identifier).unwrap();

    symbols.set_type("x", "IN");
    assert_eq!(symbols.get("x").unwrap().type_code, TypeCode::Integer);

    symbols.set_type("x", "AF");
    assert_eq!(symbols.get("x").unwrap().type_code, TypeCode::FloatArray);
}

#[test]
fn test_set_type_rejects_unknown_codes() {
    let mut symbols = table();
    symbols.define_or_get("x", 1, TokenKind::Identifier).unwrap();
    symbols.set_type("x", "ST");

    for code in ["", "XX", "in", "AV", "INT"] {
        symbols.set_type("x", code);
        assert_eq!(symbols.get("x").unwrap().type_code, TypeCode::String);
    }
}

#[test]
fn test_set_type_on_missing_symbol() {
    let mut symbols = table();
    symbols.set_type("ghost", "IN");

    assert!(symbols.get("ghost").is_none());
    assert!(symbols.is_empty());
}

#[test]
fn test_set_type_uses_truncated_key() {
    let long = "b".repeat(MAX_LEXEME_LEN + 10);
    let mut symbols = table();
    symbols.define_or_get(&long, 1, TokenKind::Identifier).unwrap();
    symbols.set_type(&format!("{}zzz", "b".repeat(MAX_LEXEME_LEN)), "BL");

    assert_eq!(symbols.get(&long).unwrap().type_code, TypeCode::Bool);
}

#[test]
fn test_lookup_index_does_not_mutate() {
    let mut symbols = table();
    symbols.define_or_get("x", 1, TokenKind::Identifier).unwrap();

    assert_eq!(symbols.lookup_index("x"), Some(1));
    assert_eq!(symbols.lookup_index("y"), None);
    assert_eq!(symbols.get("x").unwrap().lines, vec![1]);
    assert_eq!(symbols.len(), 1);
}

#[test_case(BaseType::Real, false, "FP")]
#[test_case(BaseType::Integer, false, "IN")]
#[test_case(BaseType::String, false, "ST")]
#[test_case(BaseType::Character, false, "CH")]
#[test_case(BaseType::Boolean, false, "BL")]
#[test_case(BaseType::Void, false, "VD")]
#[test_case(BaseType::Real, true, "AF")]
#[test_case(BaseType::Integer, true, "AI")]
#[test_case(BaseType::String, true, "AS")]
#[test_case(BaseType::Character, true, "AC")]
#[test_case(BaseType::Boolean, true, "AB")]
#[test_case(BaseType::Void, true, "VD")]
fn test_type_code_mapping(base: BaseType, array: bool, expected: &str) {
    let type_code = TypeCode::new(base, array);

    assert_eq!(type_code.code(), expected);
    assert_eq!(TypeCode::from_code(expected), Some(type_code));
    assert_eq!(type_code.is_array(), array && base != BaseType::Void);
}

#[test]
fn test_base_type_from_kind() {
    assert_eq!(BaseType::from_kind(TokenKind::Integer), Some(BaseType::Integer));
    assert_eq!(BaseType::from_kind(TokenKind::Void), Some(BaseType::Void));
    assert_eq!(BaseType::from_kind(TokenKind::Identifier), None);
}
