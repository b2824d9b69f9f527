//! Context tracker: the stack machine that classifies identifiers.
//!
//! The tracker pulls tokens one at a time, keeps a stack of declarative
//! frames up to date and, for every identifier, registers it in the symbol
//! table and derives its type code from the surrounding declaration.
//! Function declarations and WHILE blocks are scanned synchronously by
//! dedicated routines that consume their whole construct.

use std::rc::Rc;

use log::{debug, trace, warn};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    symbols::{
        symbol_table::SymbolTable,
        types::{BaseType, TypeCode},
    },
    Position,
};

use super::{
    frames::{ContextFrame, ContextStack},
    stream::TokenStream,
};

const FUNCTION_DECLARATION: &str = "function declaration";
const PARAMETER_LIST: &str = "parameter list";
const WHILE_CONDITION: &str = "WHILE condition";
const WHILE_BLOCK: &str = "WHILE block";

/// One consumed token, resolved for the token listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexemeRecord {
    pub lexeme: String,
    pub kind: TokenKind,
    /// Symbol table entry, identifiers only
    pub index: Option<usize>,
    pub line: u32,
}

/// Everything produced by a successful run.
#[derive(Debug)]
pub struct Analysis {
    pub records: Vec<LexemeRecord>,
    pub symbols: SymbolTable,
}

/// What a brace-delimited body belongs to.
enum Block {
    Function,
    While,
}

pub struct Tracker {
    stream: TokenStream,
    symbols: SymbolTable,
    stack: ContextStack,
    records: Vec<LexemeRecord>,
    current_type: Option<BaseType>,
    array: bool,
    /// Names of the functions whose bodies are being scanned, innermost last
    functions: Vec<String>,
    file: Rc<String>,
}

impl Tracker {
    pub fn new(source: String, file: Option<String>) -> Self {
        let lexer = Lexer::new(source, file);
        let file = lexer.file();

        Tracker {
            stream: TokenStream::new(lexer),
            symbols: SymbolTable::new(Rc::clone(&file)),
            stack: ContextStack::default(),
            records: vec![],
            current_type: None,
            array: false,
            functions: vec![],
            file,
        }
    }

    pub fn top(&self) -> ContextFrame {
        self.stack.top()
    }

    pub fn stack(&self) -> &ContextStack {
        &self.stack
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn records(&self) -> &[LexemeRecord] {
        &self.records
    }

    pub fn finish(self) -> Analysis {
        Analysis {
            records: self.records,
            symbols: self.symbols,
        }
    }

    /// Consumes tokens until end of input. The end-of-file token is recorded
    /// as the last lexeme.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            let token = self.advance()?;

            if token.kind == TokenKind::EndOfFile {
                self.record(&token, None);
                return Ok(());
            }

            self.step(token)?;
        }
    }

    /// Applies the transition for a single token.
    pub fn step(&mut self, token: Token) -> Result<(), Error> {
        match (self.stack.top(), token.kind) {
            (ContextFrame::VariableDecl, kind)
                if kind.is_reserved()
                    && !kind.is_type()
                    && !matches!(kind, TokenKind::True | TokenKind::False) =>
            {
                Err(Error::new(
                    ErrorImpl::ReservedWord { word: token.value.clone() },
                    self.position(&token),
                ))
            }
            // A declaration names its type once; a second type keyword stands where a name belongs.
            (ContextFrame::VariableDecl, kind) if kind.is_type() && self.current_type.is_some() => {
                Err(Error::new(
                    ErrorImpl::ReservedWord { word: token.value.clone() },
                    self.position(&token),
                ))
            }
            (_, TokenKind::Program) => {
                self.record(&token, None);
                self.push(ContextFrame::Global);
                Ok(())
            }
            (_, TokenKind::Declarations) => {
                self.record(&token, None);
                self.push(ContextFrame::Declarations);
                Ok(())
            }
            (_, TokenKind::Functions) => {
                self.record(&token, None);
                self.push(ContextFrame::Functions);
                Ok(())
            }
            (_, TokenKind::EndDeclarations | TokenKind::EndFunctions) => {
                self.record(&token, None);
                self.pop();
                Ok(())
            }
            (_, TokenKind::VarType) => {
                self.record(&token, None);
                self.current_type = None;
                self.array = false;
                self.push(ContextFrame::VariableDecl);
                Ok(())
            }
            (_, TokenKind::FuncType) => {
                self.record(&token, None);
                self.function_declaration()
            }
            (ContextFrame::FunctionDecl, TokenKind::OpenParen) => {
                self.record(&token, None);
                self.push(ContextFrame::FunctionParams);
                Ok(())
            }
            (ContextFrame::FunctionParams, TokenKind::CloseParen) => {
                self.record(&token, None);
                self.pop();
                Ok(())
            }
            (_, TokenKind::OpenBracket) => {
                self.record(&token, None);
                self.array = true;
                Ok(())
            }
            (_, TokenKind::CloseBracket) => {
                self.record(&token, None);
                self.array = false;
                Ok(())
            }
            (ContextFrame::VariableDecl | ContextFrame::FunctionDecl, TokenKind::Semicolon) => {
                self.record(&token, None);
                self.pop();
                Ok(())
            }
            (_, kind) if kind.is_type() => self.type_keyword(token),
            (_, TokenKind::Identifier) => self.identifier(token),
            (_, TokenKind::While) => {
                self.record(&token, None);
                self.while_block()
            }
            _ => {
                self.record(&token, None);
                Ok(())
            }
        }
    }

    fn advance(&mut self) -> Result<Token, Error> {
        self.stream.next_token()
    }

    fn position(&self, token: &Token) -> Position {
        Position(token.line, Rc::clone(&self.file))
    }

    fn push(&mut self, frame: ContextFrame) {
        self.stack.push(frame);
        debug!("entered {} (depth {})", frame, self.stack.depth());
    }

    fn pop(&mut self) {
        match self.stack.pop() {
            Some(frame) => debug!("left {} (depth {})", frame, self.stack.depth()),
            None => warn!("ignored pop of the global frame"),
        }
    }

    fn record(&mut self, token: &Token, index: Option<usize>) {
        trace!("{} {:?} line {} in {}", token.kind, token.value, token.line, self.stack.top());
        self.records.push(LexemeRecord {
            lexeme: token.value.clone(),
            kind: token.kind,
            index,
            line: token.line,
        });
    }

    /// Registers an identifier and records it with its entry.
    fn reference(&mut self, token: &Token) -> Result<usize, Error> {
        let index = self.symbols.define_or_get(&token.value, token.line, token.kind)?;
        self.record(token, Some(index));
        Ok(index)
    }

    fn unexpected(&self, token: &Token, message: &str, construct: &str) -> Error {
        let error_impl = if token.kind == TokenKind::EndOfFile {
            ErrorImpl::UnexpectedEndOfInput { construct: construct.to_string() }
        } else {
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: message.to_string(),
            }
        };

        Error::new(error_impl, self.position(token))
    }

    fn expect(&mut self, expected_kind: TokenKind, construct: &str) -> Result<Token, Error> {
        let token = self.advance()?;

        if token.kind != expected_kind {
            let message = format!("expected {} in {}", expected_kind, construct);
            return Err(self.unexpected(&token, &message, construct));
        }

        self.record(&token, None);
        Ok(token)
    }

    /// Reads an identifier where a name is required.
    fn expect_name(&mut self, construct: &str) -> Result<Token, Error> {
        let token = self.advance()?;

        match token.kind {
            TokenKind::Identifier => Ok(token),
            kind if kind.is_reserved() => Err(Error::new(
                ErrorImpl::ReservedWord { word: token.value.clone() },
                self.position(&token),
            )),
            _ => {
                let message = format!("expected identifier in {}", construct);
                Err(self.unexpected(&token, &message, construct))
            }
        }
    }

    fn type_keyword(&mut self, token: Token) -> Result<(), Error> {
        self.record(&token, None);

        let Some(base) = BaseType::from_kind(token.kind) else {
            return Ok(());
        };

        self.current_type = Some(base);
        self.array = base != BaseType::Void && self.array_marker()?;
        Ok(())
    }

    /// Consumes an empty `[ ]` pair if the next two tokens form one; otherwise
    /// both tokens go back to the stream.
    fn array_marker(&mut self) -> Result<bool, Error> {
        let open = self.advance()?;
        if open.kind != TokenKind::OpenBracket {
            self.stream.push_back(open);
            return Ok(false);
        }

        let close = self.advance()?;
        if close.kind != TokenKind::CloseBracket {
            self.stream.push_back(close);
            self.stream.push_back(open);
            return Ok(false);
        }

        self.record(&open, None);
        self.record(&close, None);
        Ok(true)
    }

    /// Consumes an optional `[ INTCONST ]` suffix. The size itself is not kept.
    fn array_size(&mut self) -> Result<bool, Error> {
        let open = self.advance()?;
        if open.kind != TokenKind::OpenBracket {
            self.stream.push_back(open);
            return Ok(false);
        }
        self.record(&open, None);

        let size = self.advance()?;
        if size.kind != TokenKind::IntConst {
            return Err(Error::new(
                ErrorImpl::InvalidArraySize { token: size.value.clone() },
                self.position(&size),
            ));
        }
        self.record(&size, None);

        self.expect(TokenKind::CloseBracket, "array size")?;
        Ok(true)
    }

    fn identifier(&mut self, token: Token) -> Result<(), Error> {
        self.reference(&token)?;

        if self.stack.top() != ContextFrame::VariableDecl {
            return Ok(());
        }

        let sized = self.array_size()?;
        if let Some(base) = self.current_type {
            self.symbols
                .set_type_code(&token.value, TypeCode::new(base, self.array || sized));
        }

        Ok(())
    }

    fn function_declaration(&mut self) -> Result<(), Error> {
        self.push(ContextFrame::FunctionDecl);
        let depth = self.stack.depth();

        let return_type = self.advance()?;
        let Some(base) = BaseType::from_kind(return_type.kind) else {
            return Err(self.unexpected(&return_type, "expected return type after FUNCTYPE", FUNCTION_DECLARATION));
        };
        self.record(&return_type, None);
        let array = base != BaseType::Void && self.array_marker()?;

        self.expect(TokenKind::Colon, FUNCTION_DECLARATION)?;

        let name = self.expect_name(FUNCTION_DECLARATION)?;
        self.reference(&name)?;
        self.symbols.set_type_code(&name.value, TypeCode::new(base, array));

        self.expect(TokenKind::OpenParen, FUNCTION_DECLARATION)?;
        self.push(ContextFrame::FunctionParams);
        self.parameters()?;

        self.expect(TokenKind::OpenCurly, FUNCTION_DECLARATION)?;
        self.functions.push(name.value.clone());
        self.body(Block::Function)?;
        self.functions.pop();
        self.expect(TokenKind::EndFunction, FUNCTION_DECLARATION)?;

        // Calls inside the body may leave unbalanced parameter frames behind.
        self.stack.unwind_to(depth);
        self.pop();
        Ok(())
    }

    /// Scans the parameter list after `(` up to and including `)`.
    fn parameters(&mut self) -> Result<(), Error> {
        let first = self.advance()?;
        match first.kind {
            TokenKind::CloseParen => {
                self.record(&first, None);
                self.pop();
                return Ok(());
            }
            TokenKind::Void => {
                self.record(&first, None);
                self.expect(TokenKind::CloseParen, PARAMETER_LIST)?;
                self.pop();
                return Ok(());
            }
            _ => self.stream.push_back(first),
        }

        loop {
            let mut type_token = self.advance()?;
            if type_token.kind == TokenKind::ParamType {
                self.record(&type_token, None);
                type_token = self.advance()?;
            }

            let base = match BaseType::from_kind(type_token.kind) {
                Some(base) if base != BaseType::Void => base,
                _ if type_token.kind == TokenKind::EndOfFile => {
                    return Err(self.unexpected(&type_token, "", PARAMETER_LIST));
                }
                _ => {
                    return Err(Error::new(
                        ErrorImpl::MalformedParameterType { token: type_token.value.clone() },
                        self.position(&type_token),
                    ));
                }
            };
            self.record(&type_token, None);
            let array = self.array_marker()?;

            self.expect(TokenKind::Colon, PARAMETER_LIST)?;

            loop {
                let name = self.expect_name(PARAMETER_LIST)?;
                self.reference(&name)?;
                let sized = self.array_size()?;
                self.symbols
                    .set_type_code(&name.value, TypeCode::new(base, array || sized));

                let separator = self.advance()?;
                match separator.kind {
                    TokenKind::Comma => self.record(&separator, None),
                    TokenKind::Semicolon => {
                        self.record(&separator, None);
                        break;
                    }
                    TokenKind::CloseParen => {
                        self.record(&separator, None);
                        self.pop();
                        return Ok(());
                    }
                    _ => {
                        return Err(self.unexpected(
                            &separator,
                            "expected ',', ';' or ')' after parameter",
                            PARAMETER_LIST,
                        ));
                    }
                }
            }
        }
    }

    /// Scans a body whose opening `{` has been consumed, up to and including
    /// the matching `}`.
    fn body(&mut self, block: Block) -> Result<(), Error> {
        let mut depth = 1usize;

        loop {
            let token = self.advance()?;

            match token.kind {
                TokenKind::EndOfFile => return Err(self.not_terminated(&block, &token)),
                TokenKind::EndFunctions if !self.functions.is_empty() => {
                    return Err(self.not_terminated(&Block::Function, &token));
                }
                TokenKind::OpenCurly => {
                    self.record(&token, None);
                    depth += 1;
                }
                TokenKind::CloseCurly => {
                    self.record(&token, None);
                    depth -= 1;

                    if depth == 0 {
                        return Ok(());
                    }
                }
                TokenKind::Semicolon => {
                    self.record(&token, None);

                    if self.stack.top() == ContextFrame::VariableDecl {
                        self.pop();
                    }
                }
                _ => self.step(token)?,
            }
        }
    }

    fn not_terminated(&self, block: &Block, token: &Token) -> Error {
        let error_impl = match block {
            Block::Function => ErrorImpl::FunctionNotTerminated {
                function: self.functions.last().cloned().unwrap_or_default(),
            },
            Block::While => ErrorImpl::WhileNotTerminated,
        };

        Error::new(error_impl, self.position(token))
    }

    fn while_block(&mut self) -> Result<(), Error> {
        self.expect(TokenKind::OpenParen, WHILE_CONDITION)?;

        let mut depth = 1usize;
        while depth > 0 {
            let token = self.advance()?;

            match token.kind {
                TokenKind::EndOfFile => return Err(self.unexpected(&token, "", WHILE_CONDITION)),
                TokenKind::Identifier => {
                    self.reference(&token)?;
                }
                TokenKind::OpenParen => {
                    self.record(&token, None);
                    depth += 1;
                }
                TokenKind::CloseParen => {
                    self.record(&token, None);
                    depth -= 1;
                }
                _ => self.record(&token, None),
            }
        }

        self.expect(TokenKind::OpenCurly, WHILE_BLOCK)?;
        self.body(Block::While)?;
        self.expect(TokenKind::EndWhile, WHILE_BLOCK)?;
        Ok(())
    }
}

/// Runs the tracker over a whole source buffer.
pub fn classify(source: String, file: Option<String>) -> Result<Analysis, Error> {
    let mut tracker = Tracker::new(source, file);
    tracker.run()?;
    Ok(tracker.finish())
}
