use std::{
    fs::read_to_string,
    io::{self, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use frontend::{
    context::tracker::classify,
    display_error,
    lexer::lexer::tokenize,
    report::report::{report_paths, write_lexeme_report, write_report_files, write_symbol_report, ReportHeader},
};
use log::{info, LevelFilter};

/// Scans a source file and writes its token listing (.LEX) and symbol table (.TAB).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source file to analyse
    source: PathBuf,

    /// Directory for the reports (defaults to the source's directory)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Print both reports to stdout instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Print the raw token stream before classifying
    #[arg(long)]
    dump_tokens: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let file_name = cli
        .source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.source.to_string_lossy().into_owned());

    let source = read_to_string(&cli.source)
        .with_context(|| format!("failed to read {}", cli.source.display()))?;

    let start = Instant::now();

    if cli.dump_tokens {
        match tokenize(source.clone(), Some(file_name.clone())) {
            Ok(tokens) => tokens.iter().for_each(|token| token.debug()),
            Err(error) => {
                display_error(&error, &source);
                bail!("{}", error);
            }
        }
    }

    let analysis = match classify(source.clone(), Some(file_name.clone())) {
        Ok(analysis) => analysis,
        Err(error) => {
            display_error(&error, &source);
            bail!("analysis of {} failed", file_name);
        }
    };

    info!(
        "classified {} lexemes and {} symbols in {:?}",
        analysis.records.len(),
        analysis.symbols.len(),
        start.elapsed()
    );

    let header = ReportHeader::new(file_name);

    if cli.stdout {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_lexeme_report(&mut out, &header, &analysis.records)?;
        writeln!(out)?;
        write_symbol_report(&mut out, &header, &analysis.symbols.records())?;
        return Ok(());
    }

    let (lex_path, tab_path) = report_paths(&cli.source, cli.out_dir.as_deref());
    write_report_files(&analysis, &header, &lex_path, &tab_path)
        .with_context(|| format!("failed to write reports for {}", cli.source.display()))?;

    info!("wrote {} and {}", lex_path.display(), tab_path.display());

    Ok(())
}
