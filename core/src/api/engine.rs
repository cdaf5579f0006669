//! The embedding engine.

use tracing::debug;

use super::Error;
use crate::{
    ast::Node,
    bytecode::Program,
    compiler::Compiler,
    env::Env,
    evaluator::{Evaluator, EvaluatorOptions},
    resolver::{ConstantPools, Resolver},
    stdlib,
    values::Value,
};

/// Resolves and runs trees against one global environment.
///
/// Every tree handed to the engine is resolved exactly once, into the
/// engine's constant pools, so literal indices stay stable across runs and
/// compiled programs can share one set of pools.
#[derive(Debug)]
pub struct Engine {
    pools: ConstantPools,
    globals: Env,
    options: EvaluatorOptions,
}

impl Engine {
    /// Create an engine with the native functions registered.
    ///
    /// `init` runs afterwards and may define more globals (or shadow a
    /// native).
    pub fn new(options: EvaluatorOptions, init: impl FnOnce(&Env)) -> Self {
        let globals = Env::new();
        stdlib::register(&globals);
        init(&globals);
        Self {
            pools: ConstantPools::new(),
            globals,
            options,
        }
    }

    pub fn globals(&self) -> &Env {
        &self.globals
    }

    pub fn pools(&self) -> &ConstantPools {
        &self.pools
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    /// Resolve `tree` and evaluate it in the global environment.
    ///
    /// Top-level assignments and definitions persist in the globals, so later
    /// runs see them.
    pub fn run(&mut self, tree: &Node) -> Result<Value, Error> {
        self.resolve(tree)?;
        let mut evaluator = Evaluator::new(self.options.clone());
        Ok(evaluator.eval(tree, &self.globals)?)
    }

    /// Resolve `tree` and compile it as a whole program.
    pub fn compile(&mut self, tree: &Node) -> Result<Program, Error> {
        self.resolve(tree)?;
        let program = Compiler::compile(tree)?;
        debug!(
            functions = program.functions.len(),
            instructions = program.main.instructions().len(),
            "compiled program"
        );
        Ok(program)
    }

    fn resolve(&mut self, tree: &Node) -> Result<(), Error> {
        Resolver::with_globals(&mut self.pools, self.globals.local_names()).resolve(tree)?;
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EvaluatorOptions::default(), |_| {})
    }
}
