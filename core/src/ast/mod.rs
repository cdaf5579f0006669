//! Syntax tree.
//!
//! The parser builds a tree of [`Node`]s, either through the typed
//! constructors of the node structs or through [`factory`], which builds a node
//! from a [`NodeKind`] tag and a child list the way a grammar-driven parser
//! produces them.
//!
//! Nodes are built once. Afterwards only the resolver writes into them
//! (identifier resolutions, literal pool indices and frame sizes), through
//! interior cells. Both backends then read those results:
//!
//! - [`Node::eval`] walks the tree (see [`crate::evaluator`]).
//! - [`Node::compile`] emits bytecode (see [`crate::compiler`]).
//!
//! ## Structure
//!
//! Every node exposes its children uniformly through [`Node::num_children`],
//! [`Node::child`] and [`Node::children`]. Children are cheap handles (`Rc`
//! clones), so the same subtree can be shared by the tree and by the function
//! values created from it at run time.

pub mod build;
pub mod factory;
mod leaf;
mod list;

#[cfg(test)]
mod ast_test;

pub use leaf::{FloatLiteral, IdentKind, Identifier, IntLiteral, Resolution, StrLiteral};
pub use list::{
    Arguments, ArrayRef, BinaryExpr, BinaryOp, BlockStmnt, ClassBody, ClassStmnt, DefStmnt, Dot,
    IfStmnt, LambdaExpr, NegativeExpr, Operator, ParameterList, Postfix, PrimaryExpr, WhileStmnt,
};

use alloc::rc::Rc;
use core::fmt;

use crate::{
    String, Vec,
    compiler::{CompileError, Compiler},
    env::Env,
    evaluator::{EvalError, Evaluator},
    resolver::{ResolveError, Resolver},
    values::Value,
};

/// The closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Int,
    Float,
    Str,
    Identifier,
    Primary,
    Negative,
    Binary,
    Block,
    If,
    While,
    Null,
    Params,
    Def,
    Arguments,
    Dot,
    Index,
    Lambda,
    Class,
    ClassBody,
}

impl NodeKind {
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::Int | NodeKind::Float | NodeKind::Str | NodeKind::Identifier
        )
    }

    /// Kinds whose nodes are replaced by their only child when built through
    /// the factory with fewer than two children.
    pub fn is_ignorable(self) -> bool {
        matches!(self, NodeKind::Primary)
    }

    /// Kinds that only make sense applied to a caller object.
    pub fn is_postfix(self) -> bool {
        matches!(self, NodeKind::Arguments | NodeKind::Dot | NodeKind::Index)
    }

    /// Kinds that can be handed to the generic evaluation entry point.
    pub fn is_evaluable(self) -> bool {
        !self.is_postfix() && !matches!(self, NodeKind::Params | NodeKind::ClassBody)
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Int => "int literal",
            NodeKind::Float => "float literal",
            NodeKind::Str => "string literal",
            NodeKind::Identifier => "identifier",
            NodeKind::Primary => "primary expression",
            NodeKind::Negative => "negative expression",
            NodeKind::Binary => "binary expression",
            NodeKind::Block => "block",
            NodeKind::If => "if statement",
            NodeKind::While => "while statement",
            NodeKind::Null => "null statement",
            NodeKind::Params => "parameter list",
            NodeKind::Def => "function definition",
            NodeKind::Arguments => "arguments",
            NodeKind::Dot => "member access",
            NodeKind::Index => "index access",
            NodeKind::Lambda => "closure",
            NodeKind::Class => "class statement",
            NodeKind::ClassBody => "class body",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Misuse of the tree structure. Always a programming error in the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    #[error("no children for {kind}")]
    NoChildren { kind: NodeKind },

    #[error("{kind} cannot be evaluated on its own")]
    NotEvaluable { kind: NodeKind },

    #[error("{kind} is a leaf kind")]
    NotAList { kind: NodeKind },

    #[error("{kind} is not a leaf kind")]
    NotALeaf { kind: NodeKind },

    #[error("{kind} expects {expected} children, got {got}")]
    Arity {
        kind: NodeKind,
        expected: &'static str,
        got: usize,
    },

    #[error("child {index} of {kind} must be {expected}, got {got}")]
    ChildKind {
        kind: NodeKind,
        index: usize,
        expected: &'static str,
        got: NodeKind,
    },

    #[error("cannot build {kind} from token {token}")]
    WrongToken { kind: NodeKind, token: String },

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
}

/// A syntax tree node.
#[derive(Clone)]
pub enum Node {
    Int(Rc<IntLiteral>),
    Float(Rc<FloatLiteral>),
    Str(Rc<StrLiteral>),
    Identifier(Rc<Identifier>),
    Primary(Rc<PrimaryExpr>),
    Negative(Rc<NegativeExpr>),
    Binary(Rc<BinaryExpr>),
    Block(Rc<BlockStmnt>),
    If(Rc<IfStmnt>),
    While(Rc<WhileStmnt>),
    Null,
    Params(Rc<ParameterList>),
    Def(Rc<DefStmnt>),
    Arguments(Rc<Arguments>),
    Dot(Rc<Dot>),
    Index(Rc<ArrayRef>),
    Lambda(Rc<LambdaExpr>),
    Class(Rc<ClassStmnt>),
    ClassBody(Rc<ClassBody>),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Int(_) => NodeKind::Int,
            Node::Float(_) => NodeKind::Float,
            Node::Str(_) => NodeKind::Str,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::Primary(_) => NodeKind::Primary,
            Node::Negative(_) => NodeKind::Negative,
            Node::Binary(_) => NodeKind::Binary,
            Node::Block(_) => NodeKind::Block,
            Node::If(_) => NodeKind::If,
            Node::While(_) => NodeKind::While,
            Node::Null => NodeKind::Null,
            Node::Params(_) => NodeKind::Params,
            Node::Def(_) => NodeKind::Def,
            Node::Arguments(_) => NodeKind::Arguments,
            Node::Dot(_) => NodeKind::Dot,
            Node::Index(_) => NodeKind::Index,
            Node::Lambda(_) => NodeKind::Lambda,
            Node::Class(_) => NodeKind::Class,
            Node::ClassBody(_) => NodeKind::ClassBody,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind().is_leaf()
    }

    /// Number of children. Zero for leaves.
    pub fn num_children(&self) -> usize {
        match self {
            Node::Int(_) | Node::Float(_) | Node::Str(_) | Node::Identifier(_) | Node::Null => 0,
            Node::Primary(p) => 1 + p.postfixes().len(),
            Node::Negative(_) | Node::Dot(_) | Node::Index(_) => 1,
            Node::Binary(_) => 3,
            Node::Block(b) => b.statements().len(),
            Node::If(i) => 2 + usize::from(i.else_block().is_some()),
            Node::While(_) => 2,
            Node::Params(p) => p.len(),
            Node::Def(_) => 3,
            Node::Arguments(a) => a.len(),
            Node::Lambda(_) => 2,
            Node::Class(c) => 2 + usize::from(c.super_name().is_some()),
            Node::ClassBody(b) => b.members().len(),
        }
    }

    /// The `i`-th child, or `None` for leaves and out-of-range positions.
    pub fn child(&self, i: usize) -> Option<Node> {
        match self {
            Node::Int(_) | Node::Float(_) | Node::Str(_) | Node::Identifier(_) | Node::Null => None,
            Node::Primary(p) => match i {
                0 => Some(p.operand().clone()),
                _ => p.postfixes().get(i - 1).map(Postfix::to_node),
            },
            Node::Negative(n) => (i == 0).then(|| n.operand().clone()),
            Node::Binary(b) => match i {
                0 => Some(b.left().clone()),
                1 => Some(Node::Identifier(b.operator_leaf().clone())),
                2 => Some(b.right().clone()),
                _ => None,
            },
            Node::Block(b) => b.statements().get(i).cloned(),
            Node::If(s) => match i {
                0 => Some(s.condition().clone()),
                1 => Some(s.then_block().clone()),
                2 => s.else_block().cloned(),
                _ => None,
            },
            Node::While(w) => match i {
                0 => Some(w.condition().clone()),
                1 => Some(w.body().clone()),
                _ => None,
            },
            Node::Params(p) => p.params().get(i).cloned().map(Node::Identifier),
            Node::Def(d) => match i {
                0 => Some(Node::Identifier(d.name_leaf().clone())),
                1 => Some(Node::Params(d.params().clone())),
                2 => Some(Node::Block(d.body().clone())),
                _ => None,
            },
            Node::Arguments(a) => a.args().get(i).cloned(),
            Node::Dot(d) => (i == 0).then(|| Node::Identifier(d.name_leaf().clone())),
            Node::Index(r) => (i == 0).then(|| r.index().clone()),
            Node::Lambda(l) => match i {
                0 => Some(Node::Params(l.params().clone())),
                1 => Some(Node::Block(l.body().clone())),
                _ => None,
            },
            Node::Class(c) => {
                let body_at = 1 + usize::from(c.super_name().is_some());
                match (i, c.super_name()) {
                    (0, _) => Some(Node::Identifier(c.name_leaf().clone())),
                    (1, Some(super_name)) => Some(Node::Identifier(super_name.clone())),
                    (i, _) if i == body_at => Some(Node::ClassBody(c.body().clone())),
                    _ => None,
                }
            }
            Node::ClassBody(b) => b.members().get(i).cloned(),
        }
    }

    /// Iterate over the children.
    ///
    /// Fails for leaf nodes, which have no child list at all.
    pub fn children(&self) -> Result<Children<'_>, StructureError> {
        if self.is_leaf() {
            return Err(StructureError::NoChildren { kind: self.kind() });
        }
        Ok(Children {
            node: self,
            position: 0,
            len: self.num_children(),
        })
    }

    /// Debug description of the node. Leaves describe their literal value.
    pub fn info(&self) -> String {
        match self {
            Node::Int(i) => i.value().to_string(),
            Node::Float(f) => f.value().to_string(),
            Node::Str(s) => String::from(s.content()),
            Node::Identifier(id) => String::from(id.name()),
            Node::Negative(n) => format!("-{}", n.operand().info()),
            Node::If(s) => match s.else_block() {
                Some(else_block) => format!(
                    "(if {} {} else {})",
                    s.condition().info(),
                    s.then_block().info(),
                    else_block.info()
                ),
                None => format!("(if {} {})", s.condition().info(), s.then_block().info()),
            },
            Node::While(w) => format!("(while {} {})", w.condition().info(), w.body().info()),
            Node::Def(d) => format!(
                "(def {} {} {})",
                d.name(),
                Node::Params(d.params().clone()).info(),
                Node::Block(d.body().clone()).info()
            ),
            Node::Lambda(l) => format!(
                "(fun {} {})",
                Node::Params(l.params().clone()).info(),
                Node::Block(l.body().clone()).info()
            ),
            Node::Class(c) => {
                let body = Node::ClassBody(c.body().clone()).info();
                match c.super_name() {
                    Some(super_name) => {
                        format!("(class {} extends {} {})", c.name(), super_name.name(), body)
                    }
                    None => format!("(class {} {})", c.name(), body),
                }
            }
            Node::Dot(d) => format!(".{}", d.name()),
            Node::Index(r) => format!("[{}]", r.index().info()),
            _ => {
                let parts: Vec<String> = (0..self.num_children())
                    .filter_map(|i| self.child(i))
                    .map(|child| child.info())
                    .collect();
                format!("({})", parts.join(" "))
            }
        }
    }

    /// Run the resolution pass over this subtree.
    pub fn resolve(&self, resolver: &mut Resolver<'_>) -> Result<(), ResolveError> {
        resolver.resolve(self)
    }

    /// Evaluate this node in `env` with default evaluator options.
    pub fn eval(&self, env: &Env) -> Result<Value, EvalError> {
        Evaluator::default().eval(self, env)
    }

    /// Emit this node into the compiler's current compile target.
    pub fn compile(&self, compiler: &mut Compiler) -> Result<(), CompileError> {
        compiler.compile_node(self)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.info())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.info())
    }
}

/// Forward iterator over the children of a list node.
///
/// Finite, and restartable through [`Children::restart`].
#[derive(Clone)]
pub struct Children<'a> {
    node: &'a Node,
    position: usize,
    len: usize,
}

impl Children<'_> {
    pub fn restart(&mut self) {
        self.position = 0;
    }
}

impl Iterator for Children<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        if self.position >= self.len {
            return None;
        }
        let child = self.node.child(self.position);
        self.position += 1;
        child
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Children<'_> {}
