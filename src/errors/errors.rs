use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone)]
#[error("{internal_error} (line {})", .position.0)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> u32 {
        self.position.0
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedLiteral { .. } => "UnterminatedLiteral",
            ErrorImpl::ReservedWord { .. } => "ReservedWord",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::InvalidArraySize { .. } => "InvalidArraySize",
            ErrorImpl::MalformedParameterType { .. } => "MalformedParameterType",
            ErrorImpl::FunctionNotTerminated { .. } => "FunctionNotTerminated",
            ErrorImpl::WhileNotTerminated => "WhileNotTerminated",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedLiteral { quote } => ErrorTip::Suggestion(format!(
                "Literal opened with {} is never closed, add the matching quote",
                quote
            )),
            ErrorImpl::ReservedWord { word } => ErrorTip::Suggestion(format!(
                "`{}` is a reserved word and cannot be used as a name, rename it",
                word
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEndOfInput { construct } => ErrorTip::Suggestion(format!(
                "Input ended inside {}, is a closing token missing?",
                construct
            )),
            ErrorImpl::InvalidArraySize { token } => ErrorTip::Suggestion(format!(
                "Array size must be an integer constant, found `{}`",
                token
            )),
            ErrorImpl::MalformedParameterType { token } => ErrorTip::Suggestion(format!(
                "Expected a parameter type such as INTEGER or REAL, found `{}`",
                token
            )),
            ErrorImpl::FunctionNotTerminated { function } => ErrorTip::Suggestion(format!(
                "Function `{}` is missing a closing brace",
                function
            )),
            ErrorImpl::WhileNotTerminated => ErrorTip::Suggestion(String::from(
                "WHILE block is missing a closing brace",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated literal starting with {quote}")]
    UnterminatedLiteral { quote: String },
    #[error("reserved word {word:?} cannot be used as an identifier")]
    ReservedWord { word: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of input inside {construct}")]
    UnexpectedEndOfInput { construct: String },
    #[error("array size must be an integer constant, found {token:?}")]
    InvalidArraySize { token: String },
    #[error("malformed parameter type: {token:?}")]
    MalformedParameterType { token: String },
    #[error("function {function:?} does not terminate with closing brace")]
    FunctionNotTerminated { function: String },
    #[error("while block does not terminate with closing brace")]
    WhileNotTerminated,
}
