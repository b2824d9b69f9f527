//! Human-readable reports.
//!
//! Two listings are produced from a successful run: the token listing
//! (`.LEX`) and the symbol table listing (`.TAB`). Both are written to any
//! `std::io::Write` sink.

pub mod report;

#[cfg(test)]
mod tests;
