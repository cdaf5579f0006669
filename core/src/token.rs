//! Tokens as handed over by the lexer.
//!
//! The core only relies on two things from a token: its source text and, for
//! numeric literals, its typed value. Leaf nodes hold one shared token each.

use alloc::rc::Rc;
use core::fmt;

use crate::String;

/// Shared, read-only token reference held by leaf nodes.
pub type TokenRef = Rc<Token>;

/// The lexical class of a token together with its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Int(i64),
    Float(f64),
    Str,
    Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    line: usize,
    text: String,
    kind: TokenKind,
}

impl Token {
    pub fn int(line: usize, value: i64) -> TokenRef {
        Rc::new(Token {
            line,
            text: value.to_string(),
            kind: TokenKind::Int(value),
        })
    }

    pub fn float(line: usize, value: f64) -> TokenRef {
        Rc::new(Token {
            line,
            text: value.to_string(),
            kind: TokenKind::Float(value),
        })
    }

    /// A string literal token. `content` is the literal without quotes.
    pub fn string(line: usize, content: impl Into<String>) -> TokenRef {
        Rc::new(Token {
            line,
            text: content.into(),
            kind: TokenKind::Str,
        })
    }

    /// An identifier token. Operators and reserved words are identifiers too.
    pub fn identifier(line: usize, name: impl Into<String>) -> TokenRef {
        Rc::new(Token {
            line,
            text: name.into(),
            kind: TokenKind::Identifier,
        })
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    pub fn int_value(&self) -> Option<i64> {
        match self.kind {
            TokenKind::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn float_value(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier)
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, TokenKind::Str)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' at line {}", self.text, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_values_match_the_kind() {
        let int = Token::int(1, 42);
        assert_eq!(int.int_value(), Some(42));
        assert_eq!(int.float_value(), None);
        assert_eq!(int.text(), "42");

        let float = Token::float(2, 0.5);
        assert_eq!(float.float_value(), Some(0.5));
        assert_eq!(float.int_value(), None);
    }

    #[test]
    fn test_text_tokens_have_no_numeric_value() {
        let name = Token::identifier(3, "x");
        let string = Token::string(3, "hi");
        assert!(name.is_identifier());
        assert!(string.is_string());
        assert!(!string.is_identifier());
        for token in [name, string] {
            assert_eq!(token.int_value(), None);
            assert_eq!(token.float_value(), None);
        }
    }

    #[test]
    fn test_display_names_the_line() {
        assert_eq!(Token::identifier(7, "foo").to_string(), "'foo' at line 7");
    }
}
