use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{reserved_kind, Token, TokenKind};

/// Handles one pattern match. The cursor and line counter have already been
/// moved past `matched`; returning `None` skips the text.
pub type RegexHandler = fn(&mut Lexer, &str) -> Result<Option<Token>, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // First match wins, so two-character symbols precede their one-character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"\A[ \t\r\n]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"\A//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"\A/\*(?s:.*?)(?:\*/|\z)").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"\A[0-9]+(?:\.[0-9]*)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"\A[A-Za-z0-9_]+").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r#"\A"[^"]*""#).unwrap(), handler: literal_handler },
        RegexPattern { regex: Regex::new(r"\A'[^']*'").unwrap(), handler: literal_handler },
        RegexPattern { regex: Regex::new(r#"\A["']"#).unwrap(), handler: unterminated_handler },
        RegexPattern { regex: Regex::new(r"\A:=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, ":=") },
        RegexPattern { regex: Regex::new(r"\A<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new(r"\A>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new(r"\A==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new(r"\A!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new(r"\A;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new(r"\A:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(r"\A,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"\A\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"\A\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"\A\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"\A\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new(r"\A\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new(r"\A\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new(r"\A\?").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Question, "?") },
        RegexPattern { regex: Regex::new(r"\A<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(r"\A>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new(r"\A=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Hash, "=") },
        RegexPattern { regex: Regex::new(r"\A!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Hash, "!") },
        RegexPattern { regex: Regex::new(r"\A\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new(r"\A-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new(r"\A\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new(r"\A/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new(r"\A%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
    ];
}

/// Pull-based scanner over an in-memory source buffer.
pub struct Lexer {
    source: Rc<str>,
    pos: usize,
    line: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: Rc::from(source),
            pos: 0,
            line: 1,
            file: file_name,
        }
    }

    /// Current 1-based line.
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn position(&self) -> Position {
        Position(self.line, Rc::clone(&self.file))
    }

    pub fn at(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Scans the next token. Once the input is exhausted every call yields
    /// an end-of-file token.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        let source = Rc::clone(&self.source);

        while !self.at_eof() {
            let remainder = &source[self.pos..];
            let matched = PATTERNS
                .iter()
                .find_map(|pattern| pattern.regex.find(remainder).map(|m| (pattern.handler, m.as_str())));

            let Some((handler, text)) = matched else {
                let token = self.at().map(String::from).unwrap_or_default();
                return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, self.position()));
            };

            self.pos += text.len();
            self.line += text.matches('\n').count() as u32;

            if let Some(token) = handler(self, text)? {
                trace!("scanned {} {:?} on line {}", token.kind, token.value, token.line);
                return Ok(token);
            }
        }

        Ok(MK_TOKEN!(TokenKind::EndOfFile, String::new(), self.line))
    }
}

fn skip_handler(_lexer: &mut Lexer, _matched: &str) -> Result<Option<Token>, Error> {
    Ok(None)
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    let kind = if matched.contains('.') {
        TokenKind::RealConst
    } else {
        TokenKind::IntConst
    };

    Ok(Some(MK_TOKEN!(kind, matched.to_string(), lexer.line())))
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    let kind = reserved_kind(matched).unwrap_or(TokenKind::Identifier);

    Ok(Some(MK_TOKEN!(kind, matched.to_string(), lexer.line())))
}

fn literal_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    let kind = if matched.starts_with('"') {
        TokenKind::StringConst
    } else {
        TokenKind::CharConst
    };
    let contents = &matched[1..matched.len() - 1];

    Ok(Some(MK_TOKEN!(kind, contents.to_string(), lexer.line())))
}

fn unterminated_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    Err(Error::new(
        ErrorImpl::UnterminatedLiteral { quote: matched.to_string() },
        lexer.position(),
    ))
}

/// Scans the whole source, returning every token up to and including the
/// end-of-file token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.kind == TokenKind::EndOfFile;
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}
