use logos::Logos;
use std::fmt;

use crate::source::Span;

// Raw shapes, before words are classified. Parens delimit; everything else
// that is not whitespace is a word.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")] // Skip whitespace
enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[regex(r"[^()\s]+", |lex| lex.slice().to_string())]
    Word(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    Integer(i64),
    Symbol(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Integer(n) => write!(f, "{}", n),
            TokenKind::Symbol(s) => write!(f, "{}", s),
        }
    }
}

// A word that parses as an i64 is an integer literal; any parse failure,
// out-of-range digits included, leaves it a symbol.
fn classify(word: String) -> TokenKind {
    match word.parse::<i64>() {
        Ok(n) => TokenKind::Integer(n),
        Err(_) => TokenKind::Symbol(word),
    }
}

/// Splits source text into a flat token sequence. Empty input yields an
/// empty sequence; lexing never fails, since every non-delimiter word is at
/// worst a symbol.
pub fn tokenize(input: &str) -> Vec<Token> {
    RawToken::lexer(input)
        .spanned()
        .map(|(result, range)| {
            let kind = match result {
                Ok(RawToken::LParen) => TokenKind::LParen,
                Ok(RawToken::RParen) => TokenKind::RParen,
                Ok(RawToken::Word(word)) => classify(word),
                // The word rule covers all non-delimiter text; classify the
                // raw slice.
                Err(()) => classify(input[range.clone()].to_string()),
            };
            Token {
                kind,
                span: Span::new(range.start, range.end),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to simplify testing token sequences
    fn assert_tokens(input: &str, expected: Vec<TokenKind>) {
        let kinds: Vec<TokenKind> = tokenize(input).into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, expected, "Input: '{}'", input);
    }

    fn sym(s: &str) -> TokenKind {
        TokenKind::Symbol(s.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_tokens("", vec![]);
        assert_tokens("   \t\n  ", vec![]);
    }

    #[test]
    fn test_parentheses() {
        assert_tokens("()", vec![TokenKind::LParen, TokenKind::RParen]);
        assert_tokens("( )", vec![TokenKind::LParen, TokenKind::RParen]);
        assert_tokens(
            "(()",
            vec![TokenKind::LParen, TokenKind::LParen, TokenKind::RParen],
        );
    }

    #[test]
    fn test_integers() {
        assert_tokens("123", vec![TokenKind::Integer(123)]);
        assert_tokens("-45", vec![TokenKind::Integer(-45)]);
        assert_tokens("+10", vec![TokenKind::Integer(10)]);
        assert_tokens("0", vec![TokenKind::Integer(0)]);
        assert_tokens(
            "9223372036854775807",
            vec![TokenKind::Integer(i64::MAX)],
        );
    }

    #[test]
    fn test_symbols() {
        assert_tokens("foo", vec![sym("foo")]);
        assert_tokens("+", vec![sym("+")]);
        assert_tokens("-", vec![sym("-")]);
        assert_tokens("!=", vec![sym("!=")]);
        assert_tokens("a-symbol-with-hyphens", vec![sym("a-symbol-with-hyphens")]);
        assert_tokens("sym123", vec![sym("sym123")]);
    }

    #[test]
    fn test_integer_like_symbols() {
        // These fail integer parsing and stay symbols
        assert_tokens("1-2", vec![sym("1-2")]);
        assert_tokens("--5", vec![sym("--5")]);
        assert_tokens("1.5", vec![sym("1.5")]);
        assert_tokens("12a", vec![sym("12a")]);
    }

    #[test]
    fn test_overflowing_integer_stays_symbol() {
        // Digits that do not fit in an i64 fail the parse like any other
        // non-numeric word, so the raw text survives as a symbol
        assert_tokens(
            "99999999999999999999",
            vec![sym("99999999999999999999")],
        );
        assert_tokens(
            "-99999999999999999999",
            vec![sym("-99999999999999999999")],
        );
    }

    #[test]
    fn test_sequences_and_whitespace() {
        assert_tokens(
            "(+ 1 2)",
            vec![
                TokenKind::LParen,
                sym("+"),
                TokenKind::Integer(1),
                TokenKind::Integer(2),
                TokenKind::RParen,
            ],
        );
        assert_tokens(
            "  ( define x 10 )  ",
            vec![
                TokenKind::LParen,
                sym("define"),
                sym("x"),
                TokenKind::Integer(10),
                TokenKind::RParen,
            ],
        );
        // Parens split words without surrounding whitespace
        assert_tokens(
            "(define(x)1)",
            vec![
                TokenKind::LParen,
                sym("define"),
                TokenKind::LParen,
                sym("x"),
                TokenKind::RParen,
                TokenKind::Integer(1),
                TokenKind::RParen,
            ],
        );
    }

    #[test]
    fn test_tokenize_spans() {
        let input = "(+ 1)";
        let tokens = tokenize(input);

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].kind, TokenKind::LParen);
        assert_eq!(tokens[0].span, Span::new(0, 1));
        assert_eq!(tokens[1].kind, sym("+"));
        assert_eq!(tokens[1].span, Span::new(1, 2));
        assert_eq!(tokens[2].kind, TokenKind::Integer(1));
        assert_eq!(tokens[2].span, Span::new(3, 4));
        assert_eq!(tokens[3].kind, TokenKind::RParen);
        assert_eq!(tokens[3].span, Span::new(4, 5));
    }
}
