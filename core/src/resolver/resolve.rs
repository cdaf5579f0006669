//! The resolution walk.

use tracing::{debug, trace};

use super::{ConstantPools, FrameKind, NOT_FOUND, RESERVED_FRAME_SLOTS, ResolveError, Symbols};
use crate::ast::{BlockStmnt, Identifier, Node, Operator, ParameterList, Postfix, Resolution};

/// Walks a tree once, pre-order and left to right.
pub struct Resolver<'p> {
    pools: &'p mut ConstantPools,
    symbols: Symbols,
}

impl<'p> Resolver<'p> {
    /// A resolver at the top level, interning literals into `pools`.
    pub fn new(pools: &'p mut ConstantPools) -> Self {
        Self {
            pools,
            symbols: Symbols::new(),
        }
    }

    /// A resolver that already knows `names` are bound in the global
    /// environment, so functions assigning them update the global binding.
    pub fn with_globals<I, S>(pools: &'p mut ConstantPools, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolver = Self::new(pools);
        for name in names {
            resolver.symbols.declare_global(name.as_ref());
        }
        resolver
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    /// Resolve a tree.
    ///
    /// At the top level every name the tree binds outside of a function or
    /// class is recorded as a global first, so functions defined earlier in
    /// the tree already see it.
    pub fn resolve(&mut self, node: &Node) -> Result<(), ResolveError> {
        if self.symbols.is_top_level() {
            self.collect_globals(node);
        }
        self.resolve_node(node)
    }

    fn collect_globals(&mut self, node: &Node) {
        match node {
            Node::Block(block) => {
                for statement in block.statements() {
                    self.collect_globals(statement);
                }
            }
            Node::If(stmt) => {
                self.collect_globals(stmt.then_block());
                if let Some(else_block) = stmt.else_block() {
                    self.collect_globals(else_block);
                }
            }
            Node::While(stmt) => self.collect_globals(stmt.body()),
            Node::Binary(binary) if binary.operator() == Operator::Assign => {
                if let Node::Identifier(target) = binary.left() {
                    self.symbols.declare_global(target.name());
                }
                self.collect_globals(binary.right());
            }
            Node::Def(def) => self.symbols.declare_global(def.name()),
            Node::Class(class) => self.symbols.declare_global(class.name()),
            _ => {}
        }
    }

    fn resolve_node(&mut self, node: &Node) -> Result<(), ResolveError> {
        match node {
            Node::Int(lit) => lit.set_index(self.pools.int_index(lit.value())?),
            Node::Float(lit) => lit.set_index(self.pools.float_index(lit.value())?),
            Node::Str(lit) => lit.set_index(self.pools.str_index(lit.content())?),
            Node::Identifier(id) => self.resolve_identifier(id),
            Node::Primary(primary) => {
                self.resolve_node(primary.operand())?;
                for postfix in primary.postfixes() {
                    self.resolve_postfix(postfix)?;
                }
            }
            Node::Negative(neg) => self.resolve_node(neg.operand())?,
            Node::Binary(binary) => {
                if binary.operator() == Operator::Assign {
                    if let Node::Identifier(target) = binary.left() {
                        self.declare_implicit(target)?;
                    }
                }
                self.resolve_node(binary.left())?;
                self.resolve_node(binary.right())?;
            }
            Node::Block(block) => self.resolve_block(block)?,
            Node::If(stmt) => {
                self.resolve_node(stmt.condition())?;
                self.resolve_node(stmt.then_block())?;
                if let Some(else_block) = stmt.else_block() {
                    self.resolve_node(else_block)?;
                }
            }
            Node::While(stmt) => {
                self.resolve_node(stmt.condition())?;
                self.resolve_node(stmt.body())?;
            }
            Node::Null => {}
            Node::Params(params) => self.declare_params(params)?,
            Node::Def(def) => {
                self.symbols.declare(def.name())?;
                self.resolve_identifier(def.name_leaf());
                let size = self.resolve_function(def.params(), def.body())?;
                def.set_frame_size(size);
                debug!(name = def.name(), frame_size = size, "resolved function");
            }
            Node::Lambda(lambda) => {
                let size = self.resolve_function(lambda.params(), lambda.body())?;
                lambda.set_frame_size(size);
            }
            Node::Class(class) => {
                self.symbols.declare(class.name())?;
                self.resolve_identifier(class.name_leaf());
                if let Some(super_name) = class.super_name() {
                    self.resolve_identifier(super_name);
                }
                self.symbols.push(FrameKind::Class {
                    inherits: class.super_name().is_some(),
                });
                let members = class
                    .body()
                    .members()
                    .iter()
                    .try_for_each(|member| self.resolve_node(member));
                let size = self.symbols.pop_frame();
                members?;
                class.set_frame_size(size);
                debug!(name = class.name(), frame_size = size, "resolved class");
            }
            Node::ClassBody(body) => {
                for member in body.members() {
                    self.resolve_node(member)?;
                }
            }
            Node::Arguments(_) | Node::Dot(_) | Node::Index(_) => {
                if let Some(postfix) = Postfix::from_node(node) {
                    self.resolve_postfix(&postfix)?;
                }
            }
        }
        Ok(())
    }

    fn resolve_postfix(&mut self, postfix: &Postfix) -> Result<(), ResolveError> {
        match postfix {
            Postfix::Arguments(args) => {
                for arg in args.args() {
                    self.resolve_node(arg)?;
                }
            }
            // Member names are looked up on the receiver at run time.
            Postfix::Dot(_) => {}
            Postfix::Index(index) => self.resolve_node(index.index())?,
        }
        Ok(())
    }

    fn resolve_block(&mut self, block: &BlockStmnt) -> Result<(), ResolveError> {
        for statement in block.statements() {
            self.resolve_node(statement)?;
        }
        Ok(())
    }

    /// Open a frame, declare the parameters, resolve the body and close the
    /// frame again. Returns the frame size.
    fn resolve_function(
        &mut self,
        params: &ParameterList,
        body: &BlockStmnt,
    ) -> Result<usize, ResolveError> {
        self.symbols.push_frame();
        let result = self
            .declare_params(params)
            .and_then(|()| self.resolve_block(body));
        let size = self.symbols.pop_frame();
        result.map(|()| size)
    }

    fn declare_params(&mut self, params: &ParameterList) -> Result<(), ResolveError> {
        for param in params.params() {
            self.symbols.declare(param.name())?;
            self.resolve_identifier(param);
        }
        Ok(())
    }

    /// An assignment to a name no open frame declares makes it a local of the
    /// innermost frame, unless a function is assigning a known global or a
    /// possibly inherited field. Those stay global and are written through
    /// the environment chain. Class bodies always declare their fields.
    fn declare_implicit(&mut self, target: &Identifier) -> Result<(), ResolveError> {
        let name = target.name();
        if self.symbols.is_declared(name) {
            return Ok(());
        }
        let in_class_body = matches!(self.symbols.current_kind(), Some(FrameKind::Class { .. }));
        if !in_class_body && (self.symbols.is_global(name) || self.symbols.in_inheriting_method()) {
            trace!(name, "assignment writes through the environment");
            return Ok(());
        }
        self.symbols.declare(name)?;
        Ok(())
    }

    fn resolve_identifier(&mut self, id: &Identifier) {
        let index = self.symbols.runtime_index(id.name());
        let resolution = if index >= 0 {
            Resolution::Local(index)
        } else if index == NOT_FOUND {
            Resolution::Global
        } else {
            Resolution::Closure((-index - 2) + RESERVED_FRAME_SLOTS)
        };
        trace!(name = id.name(), ?resolution, "resolved identifier");
        id.set_resolution(resolution);
    }
}
