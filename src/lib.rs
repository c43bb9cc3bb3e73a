// Declare modules publicly so they are part of the library interface
pub mod environment;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod pretty_print;
pub mod source;
pub mod types;

pub use environment::Environment;
pub use evaluator::evaluate;
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::{ParseError, Parser, parse, parse_str};
pub use source::Span;
pub use types::{Expr, Lambda};
