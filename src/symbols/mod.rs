//! Symbol table for identifiers seen in the source.
//!
//! Each distinct identifier (after truncation to its first 35 characters)
//! gets one record holding its entry number, its type code and the lines it
//! was seen on.

pub mod symbol_table;
pub mod types;

#[cfg(test)]
mod tests;
