#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod context;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod report;
pub mod symbols;

extern crate regex;

/// 1-based source line plus the name of the file it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

/// Text of the given 1-based line, without its line terminator.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    let index = (line as usize).checked_sub(1)?;

    source
        .split('\n')
        .nth(index)
        .map(|text| text.trim_end_matches('\r'))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nsecond\r\n\nTesting { }\n";

        assert_eq!(super::get_line_at_position(source, 1), Some("Hello, world!"));
        assert_eq!(super::get_line_at_position(source, 2), Some("second"));
        assert_eq!(super::get_line_at_position(source, 3), Some(""));
        assert_eq!(super::get_line_at_position(source, 4), Some("Testing { }"));
        assert_eq!(super::get_line_at_position(source, 0), None);
        assert_eq!(super::get_line_at_position(source, 9), None);
    }
}

pub fn display_error(error: &Error, source: &str) {
    /*
        Error: message (tip)
        -> prog.251
           |
        20 | VARTYPE INTEGER : while;
           | ^^^^^^^^^^^^^^^^^^^^^^^
    */

    let position = error.get_position();
    let line_string = position.0.to_string();
    let padding = line_string.len() + 2;

    match error.get_tip() {
        ErrorTip::None => eprintln!("Error: {}", error),
        tip => eprintln!("Error: {} ({})", error, tip),
    }
    eprintln!("-> {}", position.1);

    let Some(line_text) = get_line_at_position(source, position.0) else {
        return;
    };

    let text = remove_starting_whitespace(line_text).trim_end();

    eprintln!("{:>padding$}", "|");
    eprintln!("{} | {}", line_string, text);
    eprintln!("{:>padding$} {}", "|", "^".repeat(text.chars().count().max(1)));
}

fn remove_starting_whitespace(string: &str) -> &str {
    string.trim_start_matches([' ', '\t'])
}
