use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    /// Reserved words, keyed by their upper-case spelling.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("PROGRAM", TokenKind::Program);
        map.insert("DECLARATIONS", TokenKind::Declarations);
        map.insert("ENDDECLARATIONS", TokenKind::EndDeclarations);
        map.insert("FUNCTIONS", TokenKind::Functions);
        map.insert("ENDFUNCTION", TokenKind::EndFunction);
        map.insert("ENDFUNCTIONS", TokenKind::EndFunctions);
        map.insert("ENDPROGRAM", TokenKind::EndProgram);
        map.insert("VARTYPE", TokenKind::VarType);
        map.insert("FUNCTYPE", TokenKind::FuncType);
        map.insert("IF", TokenKind::If);
        map.insert("ELSE", TokenKind::Else);
        map.insert("ENDIF", TokenKind::EndIf);
        map.insert("WHILE", TokenKind::While);
        map.insert("ENDWHILE", TokenKind::EndWhile);
        map.insert("RETURN", TokenKind::Return);
        map.insert("BREAK", TokenKind::Break);
        map.insert("PRINT", TokenKind::Print);
        map.insert("PARAMTYPE", TokenKind::ParamType);
        map.insert("TRUE", TokenKind::True);
        map.insert("FALSE", TokenKind::False);
        map.insert("REAL", TokenKind::Real);
        map.insert("INTEGER", TokenKind::Integer);
        map.insert("STRING", TokenKind::String);
        map.insert("BOOLEAN", TokenKind::Boolean);
        map.insert("CHARACTER", TokenKind::Character);
        map.insert("VOID", TokenKind::Void);
        map
    };
}

/// Looks a word up in the reserved table, ignoring case.
pub fn reserved_kind(word: &str) -> Option<TokenKind> {
    RESERVED_LOOKUP.get(word.to_ascii_uppercase().as_str()).copied()
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EndOfFile,

    // Reserved
    Program,
    Declarations,
    EndDeclarations,
    Functions,
    EndFunction,
    EndFunctions,
    EndProgram,
    VarType,
    FuncType,
    If,
    Else,
    EndIf,
    While,
    EndWhile,
    Return,
    Break,
    Print,
    ParamType,
    True,
    False,

    // Types
    Real,
    Integer,
    String,
    Boolean,
    Character,
    Void,

    Semicolon,
    Colon,
    Comma,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    Question,

    Assignment, // :=
    LessEquals,
    Less,
    Greater,
    GreaterEquals,
    Equals,    // ==
    NotEquals, // !=
    Hash,      // lone = or !

    Plus,
    Dash,
    Star,
    Slash,
    Percent,

    Identifier,
    IntConst,
    RealConst,
    StringConst,
    CharConst,
}

impl TokenKind {
    /// The upper-case atom code printed in the reports.
    pub fn code(&self) -> &'static str {
        match self {
            TokenKind::EndOfFile => "END_OF_FILE",
            TokenKind::Program => "PROGRAM",
            TokenKind::Declarations => "DECLARATIONS",
            TokenKind::EndDeclarations => "ENDDECLARATIONS",
            TokenKind::Functions => "FUNCTIONS",
            TokenKind::EndFunction => "ENDFUNCTION",
            TokenKind::EndFunctions => "ENDFUNCTIONS",
            TokenKind::EndProgram => "ENDPROGRAM",
            TokenKind::VarType => "VARTYPE",
            TokenKind::FuncType => "FUNCTYPE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::EndIf => "ENDIF",
            TokenKind::While => "WHILE",
            TokenKind::EndWhile => "ENDWHILE",
            TokenKind::Return => "RETURN",
            TokenKind::Break => "BREAK",
            TokenKind::Print => "PRINT",
            TokenKind::ParamType => "PARAMTYPE",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Real => "REAL",
            TokenKind::Integer => "INTEGER",
            TokenKind::String => "STRING",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Character => "CHARACTER",
            TokenKind::Void => "VOID",
            TokenKind::Semicolon => "SEMI",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::OpenBracket => "LBRACK",
            TokenKind::CloseBracket => "RBRACK",
            TokenKind::OpenParen => "LPAREN",
            TokenKind::CloseParen => "RPAREN",
            TokenKind::OpenCurly => "LBRACE",
            TokenKind::CloseCurly => "RBRACE",
            TokenKind::Question => "QUESTION",
            TokenKind::Assignment => "ASSIGN",
            TokenKind::LessEquals => "LE",
            TokenKind::Less => "LT",
            TokenKind::Greater => "GT",
            TokenKind::GreaterEquals => "GE",
            TokenKind::Equals => "EQ",
            TokenKind::NotEquals => "NE",
            TokenKind::Hash => "HASH",
            TokenKind::Plus => "PLUS",
            TokenKind::Dash => "MINUS",
            TokenKind::Star => "MUL",
            TokenKind::Slash => "DIV",
            TokenKind::Percent => "MOD",
            TokenKind::Identifier => "IDENT",
            TokenKind::IntConst => "INTCONST",
            TokenKind::RealConst => "REALCONST",
            TokenKind::StringConst => "STRINGCONST",
            TokenKind::CharConst => "CHARCONST",
        }
    }

    /// True for every kind produced from the reserved table.
    pub fn is_reserved(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }

    /// True for REAL, INTEGER, STRING, BOOLEAN, CHARACTER and VOID.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            TokenKind::Real
                | TokenKind::Integer
                | TokenKind::String
                | TokenKind::Boolean
                | TokenKind::Character
                | TokenKind::Void
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {},\nline: {}}}", self.kind, self.value, self.line)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[
            TokenKind::Identifier,
            TokenKind::IntConst,
            TokenKind::RealConst,
            TokenKind::StringConst,
            TokenKind::CharConst,
        ]) {
            println!("{} ({}) @{}", self.kind, self.value, self.line);
        } else {
            println!("{} () @{}", self.kind, self.line);
        }
    }
}
