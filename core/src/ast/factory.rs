//! Building nodes from a kind tag, the way a grammar-driven parser does.
//!
//! A parser rule knows which [`NodeKind`] it produces and collects the
//! children it matched. [`list`] checks that the children fit the kind and
//! builds the typed node. Ignorable kinds with a single child are pruned to
//! that child, so a primary expression without postfix operations does not
//! show up in the tree.

use alloc::rc::Rc;

use super::{
    Arguments, ArrayRef, BinaryExpr, BlockStmnt, ClassBody, ClassStmnt, DefStmnt, Dot,
    FloatLiteral, Identifier, IfStmnt, IntLiteral, LambdaExpr, NegativeExpr, Node, NodeKind,
    ParameterList, Postfix, PrimaryExpr, StrLiteral, StructureError, WhileStmnt,
};
use crate::{Vec, token::TokenRef};

/// Build a leaf node of `kind` wrapping `token`.
pub fn leaf(kind: NodeKind, token: TokenRef) -> Result<Node, StructureError> {
    let node = match kind {
        NodeKind::Int => Node::Int(Rc::new(IntLiteral::new(token)?)),
        NodeKind::Float => Node::Float(Rc::new(FloatLiteral::new(token)?)),
        NodeKind::Str => Node::Str(Rc::new(StrLiteral::new(token)?)),
        NodeKind::Identifier => Node::Identifier(Rc::new(Identifier::new(token)?)),
        _ => return Err(StructureError::NotALeaf { kind }),
    };
    Ok(node)
}

/// Build a list node of `kind` from `children`.
pub fn list(kind: NodeKind, children: Vec<Node>) -> Result<Node, StructureError> {
    if kind.is_leaf() {
        return Err(StructureError::NotAList { kind });
    }
    // An empty ignorable node prunes to the null statement.
    if kind.is_ignorable() && children.len() <= 1 {
        return Ok(children.into_iter().next().unwrap_or(Node::Null));
    }

    let shape = Shape { kind, children };
    let node = match kind {
        NodeKind::Primary => {
            shape.arity(2, usize::MAX, "at least two")?;
            let mut children = shape.children.into_iter();
            let operand = children.next().unwrap_or(Node::Null);
            if !operand.kind().is_evaluable() {
                return Err(StructureError::ChildKind {
                    kind,
                    index: 0,
                    expected: "an operand",
                    got: operand.kind(),
                });
            }
            let postfixes = children
                .enumerate()
                .map(|(i, child)| {
                    Postfix::from_node(&child).ok_or(StructureError::ChildKind {
                        kind,
                        index: i + 1,
                        expected: "a postfix operation",
                        got: child.kind(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Node::Primary(Rc::new(PrimaryExpr::new(operand, postfixes)))
        }
        NodeKind::Negative => {
            shape.arity(1, 1, "exactly one")?;
            Node::Negative(Rc::new(NegativeExpr::new(shape.take(0))))
        }
        NodeKind::Binary => {
            shape.arity(3, 3, "exactly three")?;
            let operator = shape.identifier(1)?;
            Node::Binary(Rc::new(BinaryExpr::new(
                shape.take(0),
                operator,
                shape.take(2),
            )?))
        }
        NodeKind::Block => Node::Block(Rc::new(BlockStmnt::new(shape.children))),
        NodeKind::If => {
            shape.arity(2, 3, "two or three")?;
            let else_block = (shape.children.len() == 3).then(|| shape.take(2));
            Node::If(Rc::new(IfStmnt::new(
                shape.take(0),
                shape.take(1),
                else_block,
            )))
        }
        NodeKind::While => {
            shape.arity(2, 2, "exactly two")?;
            Node::While(Rc::new(WhileStmnt::new(shape.take(0), shape.take(1))))
        }
        NodeKind::Null => {
            shape.arity(0, 0, "no")?;
            Node::Null
        }
        NodeKind::Params => {
            let params = (0..shape.children.len())
                .map(|i| shape.identifier(i))
                .collect::<Result<Vec<_>, _>>()?;
            Node::Params(Rc::new(ParameterList::new(params)))
        }
        NodeKind::Def => {
            shape.arity(3, 3, "exactly three")?;
            Node::Def(Rc::new(DefStmnt::new(
                shape.identifier(0)?,
                shape.params(1)?,
                shape.block(2)?,
            )))
        }
        NodeKind::Arguments => Node::Arguments(Rc::new(Arguments::new(shape.children))),
        NodeKind::Dot => {
            shape.arity(1, 1, "exactly one")?;
            Node::Dot(Rc::new(Dot::new(shape.identifier(0)?)))
        }
        NodeKind::Index => {
            shape.arity(1, 1, "exactly one")?;
            Node::Index(Rc::new(ArrayRef::new(shape.take(0))))
        }
        NodeKind::Lambda => {
            shape.arity(2, 2, "exactly two")?;
            Node::Lambda(Rc::new(LambdaExpr::new(shape.params(0)?, shape.block(1)?)))
        }
        NodeKind::Class => {
            shape.arity(2, 3, "two or three")?;
            let body_at = shape.children.len() - 1;
            let super_name = if body_at == 2 {
                Some(shape.identifier(1)?)
            } else {
                None
            };
            let body = match &shape.children[body_at] {
                Node::ClassBody(body) => body.clone(),
                other => {
                    return Err(StructureError::ChildKind {
                        kind,
                        index: body_at,
                        expected: "a class body",
                        got: other.kind(),
                    });
                }
            };
            Node::Class(Rc::new(ClassStmnt::new(
                shape.identifier(0)?,
                super_name,
                body,
            )))
        }
        NodeKind::ClassBody => Node::ClassBody(Rc::new(ClassBody::new(shape.children))),
        NodeKind::Int | NodeKind::Float | NodeKind::Str | NodeKind::Identifier => {
            return Err(StructureError::NotAList { kind });
        }
    };
    Ok(node)
}

/// Children of a list node being checked against its kind.
struct Shape {
    kind: NodeKind,
    children: Vec<Node>,
}

impl Shape {
    fn arity(&self, min: usize, max: usize, expected: &'static str) -> Result<(), StructureError> {
        let got = self.children.len();
        if got < min || got > max {
            return Err(StructureError::Arity {
                kind: self.kind,
                expected,
                got,
            });
        }
        Ok(())
    }

    /// Clone out the child at `i`. Callers check arity first.
    fn take(&self, i: usize) -> Node {
        self.children.get(i).cloned().unwrap_or(Node::Null)
    }

    fn mismatch(&self, index: usize, expected: &'static str) -> StructureError {
        StructureError::ChildKind {
            kind: self.kind,
            index,
            expected,
            got: self.take(index).kind(),
        }
    }

    fn identifier(&self, i: usize) -> Result<Rc<Identifier>, StructureError> {
        match self.children.get(i) {
            Some(Node::Identifier(id)) => Ok(id.clone()),
            _ => Err(self.mismatch(i, "an identifier")),
        }
    }

    fn params(&self, i: usize) -> Result<Rc<ParameterList>, StructureError> {
        match self.children.get(i) {
            Some(Node::Params(params)) => Ok(params.clone()),
            _ => Err(self.mismatch(i, "a parameter list")),
        }
    }

    fn block(&self, i: usize) -> Result<Rc<BlockStmnt>, StructureError> {
        match self.children.get(i) {
            Some(Node::Block(block)) => Ok(block.clone()),
            _ => Err(self.mismatch(i, "a block")),
        }
    }
}
