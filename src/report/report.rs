use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    context::tracker::{Analysis, LexemeRecord},
    symbols::symbol_table::SymbolRecord,
};

/// Header block printed atop both reports.
#[derive(Debug, Clone)]
pub struct ReportHeader {
    pub tool: String,
    pub version: String,
    pub source: String,
}

impl ReportHeader {
    pub fn new(source: impl Into<String>) -> Self {
        ReportHeader {
            tool: String::from(env!("CARGO_PKG_NAME")),
            version: String::from(env!("CARGO_PKG_VERSION")),
            source: source.into(),
        }
    }

    fn write<W: Write>(&self, out: &mut W, title: &str) -> io::Result<()> {
        writeln!(out, "{} {}", self.tool, self.version)?;
        writeln!(out, "Source: {}", self.source)?;
        writeln!(out, "{}", title)?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out)
    }
}

/// Token listing: one line per lexeme, in emission order.
pub fn write_lexeme_report<W: Write>(
    out: &mut W,
    header: &ReportHeader,
    records: &[LexemeRecord],
) -> io::Result<()> {
    header.write(out, "LEXICAL ANALYSIS REPORT")?;

    for record in records {
        let index = match record.index {
            Some(index) => index.to_string(),
            None => String::from("-"),
        };

        writeln!(
            out,
            "Lexeme: {}, Code: {}, SymbolIndex: {}, Line: {}",
            record.lexeme,
            record.kind.code(),
            index,
            record.line
        )?;
    }

    Ok(())
}

/// Symbol listing: one block per symbol, by ascending entry.
pub fn write_symbol_report<W: Write>(
    out: &mut W,
    header: &ReportHeader,
    symbols: &[&SymbolRecord],
) -> io::Result<()> {
    header.write(out, "SYMBOL TABLE REPORT")?;

    for symbol in symbols {
        let lines = symbol
            .lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(out, "Entry: {}, Code: {}", symbol.entry, symbol.kind.code())?;
        writeln!(
            out,
            "Lexeme: {}, LengthBefore: {}, LengthAfter: {}, Type: {}",
            symbol.lexeme, symbol.len_before, symbol.len_after, symbol.type_code
        )?;
        writeln!(out, "Lines: ({})", lines)?;
        writeln!(out, "{}", "-".repeat(60))?;
    }

    Ok(())
}

/// `<dir>/<stem>.LEX` and `<dir>/<stem>.TAB` for a source file. Without an
/// explicit directory the reports go next to the source.
pub fn report_paths(source: &Path, out_dir: Option<&Path>) -> (PathBuf, PathBuf) {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("out"));
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    (dir.join(format!("{}.LEX", stem)), dir.join(format!("{}.TAB", stem)))
}

/// Writes both reports to their files.
pub fn write_report_files(
    analysis: &Analysis,
    header: &ReportHeader,
    lex_path: &Path,
    tab_path: &Path,
) -> io::Result<()> {
    let mut lex = BufWriter::new(File::create(lex_path)?);
    write_lexeme_report(&mut lex, header, &analysis.records)?;
    lex.flush()?;

    let mut tab = BufWriter::new(File::create(tab_path)?);
    write_symbol_report(&mut tab, header, &analysis.symbols.records())?;
    tab.flush()
}
