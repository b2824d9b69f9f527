use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// Primitive type named by a type keyword.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BaseType {
    Real,
    Integer,
    String,
    Character,
    Boolean,
    Void,
}

impl BaseType {
    pub fn from_kind(kind: TokenKind) -> Option<BaseType> {
        match kind {
            TokenKind::Real => Some(BaseType::Real),
            TokenKind::Integer => Some(BaseType::Integer),
            TokenKind::String => Some(BaseType::String),
            TokenKind::Character => Some(BaseType::Character),
            TokenKind::Boolean => Some(BaseType::Boolean),
            TokenKind::Void => Some(BaseType::Void),
            _ => None,
        }
    }
}

/// Two-letter type tag stored per symbol.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TypeCode {
    Float,
    Integer,
    String,
    Char,
    Bool,
    Void,
    FloatArray,
    IntegerArray,
    StringArray,
    CharArray,
    BoolArray,
}

pub const TYPE_CODES: [(&str, TypeCode); 11] = [
    ("FP", TypeCode::Float),
    ("IN", TypeCode::Integer),
    ("ST", TypeCode::String),
    ("CH", TypeCode::Char),
    ("BL", TypeCode::Bool),
    ("VD", TypeCode::Void),
    ("AF", TypeCode::FloatArray),
    ("AI", TypeCode::IntegerArray),
    ("AS", TypeCode::StringArray),
    ("AC", TypeCode::CharArray),
    ("AB", TypeCode::BoolArray),
];

impl TypeCode {
    /// Derives the code for a declaration. Void has no array form.
    pub fn new(base: BaseType, array: bool) -> TypeCode {
        match (base, array) {
            (BaseType::Real, false) => TypeCode::Float,
            (BaseType::Integer, false) => TypeCode::Integer,
            (BaseType::String, false) => TypeCode::String,
            (BaseType::Character, false) => TypeCode::Char,
            (BaseType::Boolean, false) => TypeCode::Bool,
            (BaseType::Real, true) => TypeCode::FloatArray,
            (BaseType::Integer, true) => TypeCode::IntegerArray,
            (BaseType::String, true) => TypeCode::StringArray,
            (BaseType::Character, true) => TypeCode::CharArray,
            (BaseType::Boolean, true) => TypeCode::BoolArray,
            (BaseType::Void, _) => TypeCode::Void,
        }
    }

    pub fn from_code(code: &str) -> Option<TypeCode> {
        TYPE_CODES
            .iter()
            .find(|(text, _)| *text == code)
            .map(|(_, type_code)| *type_code)
    }

    pub fn code(&self) -> &'static str {
        TYPE_CODES
            .iter()
            .find(|(_, type_code)| type_code == self)
            .map(|(text, _)| *text)
            .unwrap_or("VD")
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            TypeCode::FloatArray
                | TypeCode::IntegerArray
                | TypeCode::StringArray
                | TypeCode::CharArray
                | TypeCode::BoolArray
        )
    }
}

impl Display for TypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
