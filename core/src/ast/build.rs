//! Typed shorthands for building trees by hand.
//!
//! Hosts without a parser and tests use these to spell programs directly.
//! Tokens created here carry line 0.
//!
//! ```
//! use sparrow_core::ast::{BinaryOp, build::*};
//!
//! // def add(a, b) { a + b }
//! let def = def("add", &["a", "b"], vec![binary(ident("a"), BinaryOp::Add, ident("b"))]);
//! assert_eq!(def.info(), "(def add (a b) ((a + b)))");
//! ```

use alloc::rc::Rc;

use super::{
    Arguments, ArrayRef, BinaryExpr, BinaryOp, BlockStmnt, ClassBody, ClassStmnt, DefStmnt, Dot,
    FloatLiteral, Identifier, IfStmnt, IntLiteral, LambdaExpr, NegativeExpr, Node, Operator,
    ParameterList, Postfix, PrimaryExpr, StrLiteral, WhileStmnt,
};
use crate::Vec;

const LINE: usize = 0;

pub fn int(value: i64) -> Node {
    Node::Int(Rc::new(IntLiteral::from_value(LINE, value)))
}

pub fn float(value: f64) -> Node {
    Node::Float(Rc::new(FloatLiteral::from_value(LINE, value)))
}

pub fn string(content: &str) -> Node {
    Node::Str(Rc::new(StrLiteral::from_content(LINE, content)))
}

pub fn name(name: &str) -> Rc<Identifier> {
    Rc::new(Identifier::named(LINE, name))
}

pub fn ident(name: &str) -> Node {
    Node::Identifier(self::name(name))
}

pub fn neg(operand: Node) -> Node {
    Node::Negative(Rc::new(NegativeExpr::new(operand)))
}

pub fn binary(left: Node, op: BinaryOp, right: Node) -> Node {
    Node::Binary(Rc::new(BinaryExpr::with_operator(
        left,
        Operator::Binary(op),
        right,
        LINE,
    )))
}

/// `target = value`. The target is an identifier or a primary expression
/// ending in member or index access.
pub fn assign(target: Node, value: Node) -> Node {
    Node::Binary(Rc::new(BinaryExpr::with_operator(
        target,
        Operator::Assign,
        value,
        LINE,
    )))
}

pub fn block(statements: Vec<Node>) -> Node {
    Node::Block(Rc::new(BlockStmnt::new(statements)))
}

pub fn if_then(condition: Node, then_block: Node) -> Node {
    Node::If(Rc::new(IfStmnt::new(condition, then_block, None)))
}

pub fn if_else(condition: Node, then_block: Node, else_block: Node) -> Node {
    Node::If(Rc::new(IfStmnt::new(condition, then_block, Some(else_block))))
}

pub fn while_loop(condition: Node, body: Node) -> Node {
    Node::While(Rc::new(WhileStmnt::new(condition, body)))
}

pub fn null() -> Node {
    Node::Null
}

pub fn params(names: &[&str]) -> Rc<ParameterList> {
    Rc::new(ParameterList::new(names.iter().map(|n| name(n)).collect()))
}

/// `def name(params) { body }`.
pub fn def(name: &str, params: &[&str], body: Vec<Node>) -> Node {
    Node::Def(Rc::new(DefStmnt::new(
        self::name(name),
        self::params(params),
        Rc::new(BlockStmnt::new(body)),
    )))
}

/// `fun (params) { body }`.
pub fn lambda(params: &[&str], body: Vec<Node>) -> Node {
    Node::Lambda(Rc::new(LambdaExpr::new(
        self::params(params),
        Rc::new(BlockStmnt::new(body)),
    )))
}

/// `class name [extends super_name] { members }`.
pub fn class(name: &str, super_name: Option<&str>, members: Vec<Node>) -> Node {
    Node::Class(Rc::new(ClassStmnt::new(
        self::name(name),
        super_name.map(self::name),
        Rc::new(ClassBody::new(members)),
    )))
}

pub fn arguments(args: Vec<Node>) -> Postfix {
    Postfix::Arguments(Rc::new(Arguments::new(args)))
}

pub fn dot(member: &str) -> Postfix {
    Postfix::Dot(Rc::new(Dot::new(name(member))))
}

pub fn subscript(index: Node) -> Postfix {
    Postfix::Index(Rc::new(ArrayRef::new(index)))
}

/// Apply `postfixes` to `operand`.
///
/// An operand that is already a primary expression is extended rather than
/// nested, so chains read the way a parser would build them. Without
/// postfixes the operand is returned unchanged.
pub fn primary(operand: Node, postfixes: Vec<Postfix>) -> Node {
    if postfixes.is_empty() {
        return operand;
    }
    match operand {
        Node::Primary(inner) => {
            let mut all = inner.postfixes().to_vec();
            all.extend(postfixes);
            Node::Primary(Rc::new(PrimaryExpr::new(inner.operand().clone(), all)))
        }
        operand => Node::Primary(Rc::new(PrimaryExpr::new(operand, postfixes))),
    }
}

/// `callee(args)`.
pub fn call(callee: Node, args: Vec<Node>) -> Node {
    primary(callee, vec![arguments(args)])
}

/// `object.member`.
pub fn member(object: Node, member: &str) -> Node {
    primary(object, vec![dot(member)])
}

/// `array[index]`.
pub fn index(array: Node, index: Node) -> Node {
    primary(array, vec![subscript(index)])
}
