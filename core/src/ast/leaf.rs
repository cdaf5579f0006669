//! Leaf nodes: literals and identifiers, each wrapping exactly one token.

use core::cell::Cell;

use super::{NodeKind, StructureError};
use crate::{
    String,
    token::{Token, TokenRef},
};

fn wrong_token(kind: NodeKind, token: &Token) -> StructureError {
    StructureError::WrongToken {
        kind,
        token: token.to_string(),
    }
}

/// Integer literal. Holds its index into the integer constant pool once
/// resolved.
#[derive(Debug)]
pub struct IntLiteral {
    token: TokenRef,
    value: i64,
    index: Cell<Option<usize>>,
}

impl IntLiteral {
    pub fn new(token: TokenRef) -> Result<Self, StructureError> {
        let value = token
            .int_value()
            .ok_or_else(|| wrong_token(NodeKind::Int, &token))?;
        Ok(Self {
            token,
            value,
            index: Cell::new(None),
        })
    }

    pub fn from_value(line: usize, value: i64) -> Self {
        Self {
            token: Token::int(line, value),
            value,
            index: Cell::new(None),
        }
    }

    pub fn token(&self) -> &TokenRef {
        &self.token
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Constant pool index, `None` until resolved.
    pub fn index(&self) -> Option<usize> {
        self.index.get()
    }

    pub(crate) fn set_index(&self, index: usize) {
        self.index.set(Some(index));
    }
}

/// Floating point literal.
#[derive(Debug)]
pub struct FloatLiteral {
    token: TokenRef,
    value: f64,
    index: Cell<Option<usize>>,
}

impl FloatLiteral {
    pub fn new(token: TokenRef) -> Result<Self, StructureError> {
        let value = token
            .float_value()
            .ok_or_else(|| wrong_token(NodeKind::Float, &token))?;
        Ok(Self {
            token,
            value,
            index: Cell::new(None),
        })
    }

    pub fn from_value(line: usize, value: f64) -> Self {
        Self {
            token: Token::float(line, value),
            value,
            index: Cell::new(None),
        }
    }

    pub fn token(&self) -> &TokenRef {
        &self.token
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn index(&self) -> Option<usize> {
        self.index.get()
    }

    pub(crate) fn set_index(&self, index: usize) {
        self.index.set(Some(index));
    }
}

/// String literal. The token text is the content without quotes.
#[derive(Debug)]
pub struct StrLiteral {
    token: TokenRef,
    index: Cell<Option<usize>>,
}

impl StrLiteral {
    pub fn new(token: TokenRef) -> Result<Self, StructureError> {
        if !token.is_string() {
            return Err(wrong_token(NodeKind::Str, &token));
        }
        Ok(Self {
            token,
            index: Cell::new(None),
        })
    }

    pub fn from_content(line: usize, content: impl Into<String>) -> Self {
        Self {
            token: Token::string(line, content),
            index: Cell::new(None),
        }
    }

    pub fn token(&self) -> &TokenRef {
        &self.token
    }

    pub fn content(&self) -> &str {
        self.token.text()
    }

    pub fn index(&self) -> Option<usize> {
        self.index.get()
    }

    pub(crate) fn set_index(&self, index: usize) {
        self.index.set(Some(index));
    }
}

/// How an identifier is accessed at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentKind {
    /// Slot in the current function's frame.
    Local,
    /// Slot in the frame of the lexically enclosing function.
    Closure,
    /// Looked up by name.
    Global,
}

/// Result of resolving an identifier.
///
/// Indices are signed so that an inconsistent resolution (a negative slot) can
/// be represented and rejected by the backends instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Local(i32),
    Closure(i32),
    Global,
}

impl Resolution {
    pub fn kind(self) -> IdentKind {
        match self {
            Resolution::Local(_) => IdentKind::Local,
            Resolution::Closure(_) => IdentKind::Closure,
            Resolution::Global => IdentKind::Global,
        }
    }

    /// Frame index for local and closure identifiers.
    pub fn index(self) -> Option<i32> {
        match self {
            Resolution::Local(index) | Resolution::Closure(index) => Some(index),
            Resolution::Global => None,
        }
    }
}

#[derive(Debug)]
pub struct Identifier {
    token: TokenRef,
    resolution: Cell<Option<Resolution>>,
}

impl Identifier {
    pub fn new(token: TokenRef) -> Result<Self, StructureError> {
        if !token.is_identifier() {
            return Err(wrong_token(NodeKind::Identifier, &token));
        }
        Ok(Self {
            token,
            resolution: Cell::new(None),
        })
    }

    /// Identifier over a fresh identifier token.
    pub fn named(line: usize, name: impl Into<String>) -> Self {
        Self {
            token: Token::identifier(line, name),
            resolution: Cell::new(None),
        }
    }

    pub fn token(&self) -> &TokenRef {
        &self.token
    }

    pub fn name(&self) -> &str {
        self.token.text()
    }

    /// `None` until the resolver has visited this identifier.
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution.get()
    }

    pub fn kind(&self) -> Option<IdentKind> {
        self.resolution.get().map(Resolution::kind)
    }

    pub(crate) fn set_resolution(&self, resolution: Resolution) {
        self.resolution.set(Some(resolution));
    }
}
