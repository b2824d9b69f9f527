//! Unit tests for the report writers.

use crate::context::tracker::classify;

use super::report::{write_lexeme_report, write_symbol_report, ReportHeader};

fn render(source: &str) -> (String, String) {
    let analysis = classify(source.to_string(), Some("demo.txt".to_string())).unwrap();
    let header = ReportHeader::new("demo.txt");

    let mut lex = Vec::new();
    write_lexeme_report(&mut lex, &header, &analysis.records).unwrap();

    let mut tab = Vec::new();
    write_symbol_report(&mut tab, &header, &analysis.symbols.records()).unwrap();

    (String::from_utf8(lex).unwrap(), String::from_utf8(tab).unwrap())
}

#[test]
fn test_header_block() {
    let (lex, tab) = render("x");

    assert!(lex.starts_with(&format!("{} {}\n", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))));
    assert!(lex.contains("Source: demo.txt\n"));
    assert!(lex.contains("LEXICAL ANALYSIS REPORT\n"));
    assert!(tab.contains("SYMBOL TABLE REPORT\n"));
}

#[test]
fn test_lexeme_lines() {
    let (lex, _) = render("VARTYPE INTEGER : x;\nx := 2;");

    let body: Vec<&str> = lex.lines().filter(|line| line.starts_with("Lexeme:")).collect();
    assert_eq!(body.len(), 10);
    assert_eq!(body[0], "Lexeme: VARTYPE, Code: VARTYPE, SymbolIndex: -, Line: 1");
    assert_eq!(body[3], "Lexeme: x, Code: IDENT, SymbolIndex: 1, Line: 1");
    assert_eq!(body[5], "Lexeme: x, Code: IDENT, SymbolIndex: 1, Line: 2");
    assert_eq!(body[6], "Lexeme: :=, Code: ASSIGN, SymbolIndex: -, Line: 2");
    assert_eq!(body[9], "Lexeme: , Code: END_OF_FILE, SymbolIndex: -, Line: 2");
}

#[test]
fn test_symbol_blocks_in_entry_order() {
    let (_, tab) = render("VARTYPE REAL[] : zeta;\nalpha zeta");

    let zeta = tab.find("Entry: 1, Code: IDENT").unwrap();
    let alpha = tab.find("Entry: 2, Code: IDENT").unwrap();
    assert!(zeta < alpha);
    assert!(tab.contains("Lexeme: zeta, LengthBefore: 4, LengthAfter: 4, Type: AF\nLines: (1, 2)\n"));
    assert!(tab.contains("Lexeme: alpha, LengthBefore: 5, LengthAfter: 5, Type: VD\nLines: (2)\n"));
}

#[test]
fn test_empty_symbol_table() {
    let (_, tab) = render("// nothing");

    assert!(!tab.contains("Entry:"));
}

#[test]
fn test_report_paths() {
    use std::path::{Path, PathBuf};

    use super::report::report_paths;

    let (lex, tab) = report_paths(Path::new("samples/prog.251"), None);
    assert_eq!(lex, PathBuf::from("samples/prog.LEX"));
    assert_eq!(tab, PathBuf::from("samples/prog.TAB"));

    let (lex, _) = report_paths(Path::new("prog.251"), Some(Path::new("build")));
    assert_eq!(lex, PathBuf::from("build/prog.LEX"));

    let (lex, _) = report_paths(Path::new("prog"), None);
    assert_eq!(lex, PathBuf::from("prog.LEX"));
}
