use std::collections::VecDeque;
use thiserror::Error;

use crate::lexer::{Token, TokenKind, tokenize};
use crate::source::Span;
use crate::types::Expr;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected '(' but found '{found}'")]
    ExpectedList { found: Token },
    #[error("unexpected end of input, expected '('")]
    UnexpectedEof,
}

impl ParseError {
    /// The source location of the failure, where one exists.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::ExpectedList { found } => Some(found.span),
            ParseError::UnexpectedEof => None,
        }
    }
}

type ParseResult<T> = Result<T, ParseError>;

/// Recursive descent over an owned queue of tokens, consumed front to back.
pub struct Parser {
    tokens: VecDeque<Token>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: tokens.into(),
        }
    }

    /// Parses the single top-level form: the first token must open a list.
    /// Tokens left over after the form closes are ignored.
    pub fn parse(mut self) -> ParseResult<Expr> {
        self.parse_list().map(Expr::List)
    }

    fn parse_list(&mut self) -> ParseResult<Vec<Expr>> {
        match self.tokens.pop_front() {
            Some(Token {
                kind: TokenKind::LParen,
                ..
            }) => Ok(self.parse_items()),
            Some(found) => Err(ParseError::ExpectedList { found }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// Accumulates list items after an opening paren. A closing paren
    /// terminates the current list; running out of tokens first terminates
    /// silently with whatever was accumulated.
    fn parse_items(&mut self) -> Vec<Expr> {
        let mut items = Vec::new();
        while let Some(token) = self.tokens.pop_front() {
            match token.kind {
                TokenKind::Integer(n) => items.push(Expr::Integer(n)),
                TokenKind::Symbol(s) => items.push(Expr::Symbol(s)),
                TokenKind::LParen => items.push(Expr::List(self.parse_items())),
                TokenKind::RParen => return items,
            }
        }
        items
    }
}

/// Lexes and parses one top-level form, keeping the spanned error channel.
/// Used by tests and by the REPL's diagnostics.
pub fn parse_str(input: &str) -> ParseResult<Expr> {
    Parser::new(tokenize(input)).parse()
}

/// The public parse entry point: structural failures are returned as
/// ordinary `Expr::Error` values, not a distinct error channel.
pub fn parse(input: &str) -> Expr {
    match parse_str(input) {
        Ok(expr) => expr,
        Err(err) => Expr::Error(err.to_string()),
    }
}
