//! List nodes: expressions, statements and definitions built from children.

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use super::{Identifier, Node, StructureError};
use crate::{String, Vec};

/// Non-assignment binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Operator of a binary expression: assignment or a value operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Assign,
    Binary(BinaryOp),
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        let op = match symbol {
            "=" => return Some(Operator::Assign),
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Rem,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::Ne,
            "<" => BinaryOp::Lt,
            ">" => BinaryOp::Gt,
            "<=" => BinaryOp::Le,
            ">=" => BinaryOp::Ge,
            _ => return None,
        };
        Some(Operator::Binary(op))
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Assign => "=",
            Operator::Binary(op) => op.symbol(),
        }
    }
}

/// An operation applied to the value on its left: a call, a member access or
/// an index access.
#[derive(Debug, Clone)]
pub enum Postfix {
    Arguments(Rc<Arguments>),
    Dot(Rc<Dot>),
    Index(Rc<ArrayRef>),
}

impl Postfix {
    pub fn to_node(&self) -> Node {
        match self {
            Postfix::Arguments(a) => Node::Arguments(a.clone()),
            Postfix::Dot(d) => Node::Dot(d.clone()),
            Postfix::Index(r) => Node::Index(r.clone()),
        }
    }

    /// Convert a node of a postfix kind back into a `Postfix`.
    pub fn from_node(node: &Node) -> Option<Postfix> {
        match node {
            Node::Arguments(a) => Some(Postfix::Arguments(a.clone())),
            Node::Dot(d) => Some(Postfix::Dot(d.clone())),
            Node::Index(r) => Some(Postfix::Index(r.clone())),
            _ => None,
        }
    }
}

/// An operand followed by zero or more postfix operations, applied left to
/// right.
#[derive(Debug)]
pub struct PrimaryExpr {
    operand: Node,
    postfixes: Vec<Postfix>,
}

impl PrimaryExpr {
    pub fn new(operand: Node, postfixes: Vec<Postfix>) -> Self {
        Self { operand, postfixes }
    }

    pub fn operand(&self) -> &Node {
        &self.operand
    }

    pub fn postfixes(&self) -> &[Postfix] {
        &self.postfixes
    }
}

#[derive(Debug)]
pub struct NegativeExpr {
    operand: Node,
}

impl NegativeExpr {
    pub fn new(operand: Node) -> Self {
        Self { operand }
    }

    pub fn operand(&self) -> &Node {
        &self.operand
    }
}

#[derive(Debug)]
pub struct BinaryExpr {
    left: Node,
    operator: Operator,
    operator_leaf: Rc<Identifier>,
    right: Node,
}

impl BinaryExpr {
    /// Build a binary expression. The operator leaf's text must be a known
    /// operator symbol.
    pub fn new(
        left: Node,
        operator_leaf: Rc<Identifier>,
        right: Node,
    ) -> Result<Self, StructureError> {
        let operator = Operator::from_symbol(operator_leaf.name())
            .ok_or_else(|| StructureError::UnknownOperator(String::from(operator_leaf.name())))?;
        Ok(Self {
            left,
            operator,
            operator_leaf,
            right,
        })
    }

    /// Build a binary expression from a typed operator, creating its leaf.
    pub fn with_operator(left: Node, operator: Operator, right: Node, line: usize) -> Self {
        Self {
            left,
            operator,
            operator_leaf: Rc::new(Identifier::named(line, operator.symbol())),
            right,
        }
    }

    pub fn left(&self) -> &Node {
        &self.left
    }

    pub fn right(&self) -> &Node {
        &self.right
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operator_leaf(&self) -> &Rc<Identifier> {
        &self.operator_leaf
    }
}

#[derive(Debug)]
pub struct BlockStmnt {
    statements: Vec<Node>,
}

impl BlockStmnt {
    pub fn new(statements: Vec<Node>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Node] {
        &self.statements
    }
}

#[derive(Debug)]
pub struct IfStmnt {
    condition: Node,
    then_block: Node,
    else_block: Option<Node>,
}

impl IfStmnt {
    pub fn new(condition: Node, then_block: Node, else_block: Option<Node>) -> Self {
        Self {
            condition,
            then_block,
            else_block,
        }
    }

    pub fn condition(&self) -> &Node {
        &self.condition
    }

    pub fn then_block(&self) -> &Node {
        &self.then_block
    }

    pub fn else_block(&self) -> Option<&Node> {
        self.else_block.as_ref()
    }
}

#[derive(Debug)]
pub struct WhileStmnt {
    condition: Node,
    body: Node,
}

impl WhileStmnt {
    pub fn new(condition: Node, body: Node) -> Self {
        Self { condition, body }
    }

    pub fn condition(&self) -> &Node {
        &self.condition
    }

    pub fn body(&self) -> &Node {
        &self.body
    }
}

/// Formal parameters of a function or closure.
///
/// Not evaluable by itself; see `Evaluator::bind_params`.
#[derive(Debug)]
pub struct ParameterList {
    params: Vec<Rc<Identifier>>,
}

impl ParameterList {
    pub fn new(params: Vec<Rc<Identifier>>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &[Rc<Identifier>] {
        &self.params
    }

    pub fn param_name(&self, i: usize) -> Option<&str> {
        self.params.get(i).map(|p| p.name())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// `def name(params) { body }`.
#[derive(Debug)]
pub struct DefStmnt {
    name: Rc<Identifier>,
    params: Rc<ParameterList>,
    body: Rc<BlockStmnt>,
    frame_size: Cell<usize>,
}

impl DefStmnt {
    pub fn new(name: Rc<Identifier>, params: Rc<ParameterList>, body: Rc<BlockStmnt>) -> Self {
        Self {
            name,
            params,
            body,
            frame_size: Cell::new(0),
        }
    }

    pub fn name(&self) -> &str {
        self.name.name()
    }

    pub fn name_leaf(&self) -> &Rc<Identifier> {
        &self.name
    }

    pub fn params(&self) -> &Rc<ParameterList> {
        &self.params
    }

    pub fn body(&self) -> &Rc<BlockStmnt> {
        &self.body
    }

    /// Number of frame slots (parameters and locals) recorded by the resolver.
    pub fn frame_size(&self) -> usize {
        self.frame_size.get()
    }

    pub(crate) fn set_frame_size(&self, size: usize) {
        self.frame_size.set(size);
    }
}

/// Actual arguments of a call.
#[derive(Debug)]
pub struct Arguments {
    args: Vec<Node>,
}

impl Arguments {
    pub fn new(args: Vec<Node>) -> Self {
        Self { args }
    }

    pub fn args(&self) -> &[Node] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// `.name` member access.
#[derive(Debug)]
pub struct Dot {
    name: Rc<Identifier>,
}

impl Dot {
    pub fn new(name: Rc<Identifier>) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &str {
        self.name.name()
    }

    pub fn name_leaf(&self) -> &Rc<Identifier> {
        &self.name
    }
}

/// `[index]` array access.
#[derive(Debug)]
pub struct ArrayRef {
    index: Node,
}

impl ArrayRef {
    pub fn new(index: Node) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &Node {
        &self.index
    }
}

/// `fun (params) { body }`: evaluates to a function value.
#[derive(Debug)]
pub struct LambdaExpr {
    params: Rc<ParameterList>,
    body: Rc<BlockStmnt>,
    frame_size: Cell<usize>,
}

impl LambdaExpr {
    /// Name given to the function values a closure literal creates.
    pub const NAME: &'static str = "fun";

    pub fn new(params: Rc<ParameterList>, body: Rc<BlockStmnt>) -> Self {
        Self {
            params,
            body,
            frame_size: Cell::new(0),
        }
    }

    pub fn params(&self) -> &Rc<ParameterList> {
        &self.params
    }

    pub fn body(&self) -> &Rc<BlockStmnt> {
        &self.body
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size.get()
    }

    pub(crate) fn set_frame_size(&self, size: usize) {
        self.frame_size.set(size);
    }
}

/// `class Name [extends Super] { members }`.
#[derive(Debug)]
pub struct ClassStmnt {
    name: Rc<Identifier>,
    super_name: Option<Rc<Identifier>>,
    body: Rc<ClassBody>,
    frame_size: Cell<usize>,
}

impl ClassStmnt {
    pub fn new(
        name: Rc<Identifier>,
        super_name: Option<Rc<Identifier>>,
        body: Rc<ClassBody>,
    ) -> Self {
        Self {
            name,
            super_name,
            body,
            frame_size: Cell::new(0),
        }
    }

    pub fn name(&self) -> &str {
        self.name.name()
    }

    pub fn name_leaf(&self) -> &Rc<Identifier> {
        &self.name
    }

    pub fn super_name(&self) -> Option<&Rc<Identifier>> {
        self.super_name.as_ref()
    }

    pub fn body(&self) -> &Rc<ClassBody> {
        &self.body
    }

    /// Number of field and method slots declared by the body.
    pub fn frame_size(&self) -> usize {
        self.frame_size.get()
    }

    pub(crate) fn set_frame_size(&self, size: usize) {
        self.frame_size.set(size);
    }
}

/// Member declarations of a class, run in each new instance's environment.
#[derive(Debug)]
pub struct ClassBody {
    members: Vec<Node>,
}

impl ClassBody {
    pub fn new(members: Vec<Node>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Node] {
        &self.members
    }
}
