//! Bytecode compiler implementation.

use tracing::{debug, trace};

use crate::{
    String, Vec,
    ast::{
        BinaryExpr, BlockStmnt, ClassBody, ClassStmnt, Identifier, LambdaExpr, Node, Operator,
        ParameterList, Postfix, PrimaryExpr, Resolution,
    },
    bytecode::{FunctionCode, Instruction, Program},
    compiler::CompileError::{self, *},
};

/// Name of the top-level code of a program.
const MAIN: &str = "main";

/// Bytecode compiler for resolved trees.
///
/// Instructions go into the function on top of the compile target stack.
/// Compiling a function, closure or class body pushes a fresh target, and
/// pops it into the list of finished functions once the body is done, so
/// nested definitions compile independently of their enclosing code.
#[derive(Debug, Default)]
pub struct Compiler {
    /// Functions being compiled, innermost last.
    targets: Vec<FunctionCode>,

    /// Finished function and class bodies, addressed by `MakeFunction` and
    /// `MakeClass` operands.
    functions: Vec<FunctionCode>,
}

impl Compiler {
    /// Create a compiler with no compile target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience method to compile a whole program in one call.
    pub fn compile(root: &Node) -> Result<Program, CompileError> {
        let mut compiler = Self::new();
        compiler.begin(FunctionCode::new(MAIN, 0, 0));
        let result = compiler
            .compile_node(root)
            .and_then(|()| compiler.emit(Instruction::Return));
        let main = compiler.finish()?;
        result?;
        Ok(Program {
            main,
            functions: compiler.functions,
        })
    }

    /// Make `code` the current compile target.
    pub fn begin(&mut self, code: FunctionCode) {
        self.targets.push(code);
    }

    /// Remove the current compile target and return it.
    pub fn finish(&mut self) -> Result<FunctionCode, CompileError> {
        self.targets.pop().ok_or(NoCompileTarget)
    }

    /// Functions and class bodies finished so far.
    pub fn functions(&self) -> &[FunctionCode] {
        &self.functions
    }

    fn current(&mut self) -> Result<&mut FunctionCode, CompileError> {
        self.targets.last_mut().ok_or(NoCompileTarget)
    }

    fn emit(&mut self, instruction: Instruction) -> Result<(), CompileError> {
        self.current()?.emit(instruction);
        Ok(())
    }

    // === Jumps ===

    fn jump_placeholder(&mut self) -> Result<usize, CompileError> {
        Ok(self.current()?.jump_placeholder())
    }

    fn label(&mut self) -> Result<usize, CompileError> {
        Ok(self.current()?.label())
    }

    fn patch_jump(
        &mut self,
        placeholder_index: usize,
        target_label: usize,
        make_jump: fn(i32) -> Instruction,
    ) -> Result<(), CompileError> {
        self.current()?
            .patch_jump(placeholder_index, target_label, make_jump)
            .ok_or(OperandOverflow {
                operand: "jump offset",
            })
    }

    // === Nodes ===

    /// Emit `node` into the current compile target. The emitted code leaves
    /// exactly one value on the stack.
    pub fn compile_node(&mut self, node: &Node) -> Result<(), CompileError> {
        match node {
            Node::Int(lit) => {
                let index = pool_index(lit.index(), node)?;
                self.current()?.iconst(index);
            }
            Node::Float(lit) => {
                let index = pool_index(lit.index(), node)?;
                self.current()?.fconst(index);
            }
            Node::Str(lit) => {
                let index = pool_index(lit.index(), node)?;
                self.current()?.sconst(index);
            }
            Node::Identifier(id) => self.load_identifier(id)?,
            Node::Primary(primary) => self.compile_primary(primary)?,
            Node::Negative(neg) => {
                self.compile_node(neg.operand())?;
                self.emit(Instruction::Neg)?;
            }
            Node::Binary(binary) => self.compile_binary(binary)?,
            Node::Block(block) => self.compile_block(block)?,
            Node::If(stmt) => {
                self.compile_node(stmt.condition())?;
                let else_jump = self.jump_placeholder()?;

                self.compile_node(stmt.then_block())?;
                let end_jump = self.jump_placeholder()?;

                let else_label = self.label()?;
                self.patch_jump(else_jump, else_label, Instruction::JumpIfFalse)?;
                match stmt.else_block() {
                    Some(else_block) => self.compile_node(else_block)?,
                    None => self.emit(Instruction::Nil)?,
                }

                let end_label = self.label()?;
                self.patch_jump(end_jump, end_label, Instruction::Jump)?;
            }
            Node::While(stmt) => {
                let start_label = self.label()?;
                self.compile_node(stmt.condition())?;
                let exit_jump = self.jump_placeholder()?;

                self.compile_node(stmt.body())?;
                self.emit(Instruction::Pop)?;
                let back_jump = self.jump_placeholder()?;
                self.patch_jump(back_jump, start_label, Instruction::Jump)?;

                let end_label = self.label()?;
                self.patch_jump(exit_jump, end_label, Instruction::JumpIfFalse)?;
                self.emit(Instruction::Nil)?;
            }
            Node::Null => self.emit(Instruction::Nil)?,
            Node::Def(def) => {
                let k =
                    self.compile_function(def.name(), def.params(), def.body(), def.frame_size())?;
                self.emit(Instruction::MakeFunction(k))?;
                self.store_identifier(def.name_leaf())?;
                self.emit(Instruction::Pop)?;
                self.emit(Instruction::Nil)?;
            }
            Node::Lambda(lambda) => {
                let k = self.compile_function(
                    LambdaExpr::NAME,
                    lambda.params(),
                    lambda.body(),
                    lambda.frame_size(),
                )?;
                self.emit(Instruction::MakeFunction(k))?;
            }
            Node::Class(class) => self.compile_class(class)?,
            Node::Params(_)
            | Node::ClassBody(_)
            | Node::Arguments(_)
            | Node::Dot(_)
            | Node::Index(_) => return Err(NotCompilable { kind: node.kind() }),
        }
        Ok(())
    }

    /// Statements separated by `Pop`, so only the last value remains.
    fn compile_block(&mut self, block: &BlockStmnt) -> Result<(), CompileError> {
        let Some((first, rest)) = block.statements().split_first() else {
            return self.emit(Instruction::Nil);
        };
        self.compile_node(first)?;
        for statement in rest {
            self.emit(Instruction::Pop)?;
            self.compile_node(statement)?;
        }
        Ok(())
    }

    fn compile_primary(&mut self, primary: &PrimaryExpr) -> Result<(), CompileError> {
        self.compile_node(primary.operand())?;
        for postfix in primary.postfixes() {
            self.compile_postfix(postfix)?;
        }
        Ok(())
    }

    /// Emit one postfix operation applied to the value on top of the stack.
    fn compile_postfix(&mut self, postfix: &Postfix) -> Result<(), CompileError> {
        match postfix {
            Postfix::Arguments(args) => {
                for arg in args.args() {
                    self.compile_node(arg)?;
                }
                let count = operand(args.len(), "argument count")?;
                self.emit(Instruction::Call(count))
            }
            Postfix::Dot(dot) => {
                self.member_name(dot.name())?;
                self.emit(Instruction::GetMember)
            }
            Postfix::Index(index) => {
                self.compile_node(index.index())?;
                self.emit(Instruction::GetIndex)
            }
        }
    }

    fn member_name(&mut self, name: &str) -> Result<(), CompileError> {
        let code = self.current()?;
        let index = operand(code.runtime_index(name), "name index")?;
        code.raw_string(index);
        Ok(())
    }

    fn compile_binary(&mut self, binary: &BinaryExpr) -> Result<(), CompileError> {
        match binary.operator() {
            Operator::Assign => {
                self.compile_node(binary.right())?;
                self.assign(binary.left())
            }
            Operator::Binary(op) => {
                self.compile_node(binary.left())?;
                self.compile_node(binary.right())?;
                self.emit(Instruction::BinOp(op))
            }
        }
    }

    /// Store the value on top of the stack into `target`, keeping it there.
    fn assign(&mut self, target: &Node) -> Result<(), CompileError> {
        let invalid = || InvalidAssignTarget {
            target: target.info(),
        };
        let primary = match target {
            Node::Identifier(id) => return self.store_identifier(id),
            Node::Primary(primary) => primary,
            _ => return Err(invalid()),
        };
        let Some((last, init)) = primary.postfixes().split_last() else {
            return Err(invalid());
        };

        self.compile_node(primary.operand())?;
        for postfix in init {
            self.compile_postfix(postfix)?;
        }

        match last {
            Postfix::Dot(dot) => {
                self.member_name(dot.name())?;
                self.emit(Instruction::SetMember)
            }
            Postfix::Index(index) => {
                self.compile_node(index.index())?;
                self.emit(Instruction::SetIndex)
            }
            Postfix::Arguments(_) => Err(invalid()),
        }
    }

    fn load_identifier(&mut self, id: &Identifier) -> Result<(), CompileError> {
        let resolution = resolution(id)?;
        trace!(name = id.name(), ?resolution, "load");
        let code = self.current()?;
        match resolution {
            Resolution::Local(index) => code.load(slot(id, index)?),
            Resolution::Closure(index) => code.cload(slot(id, index)?),
            Resolution::Global => {
                let index = operand(code.runtime_index(id.name()), "name index")?;
                code.gload(index);
            }
        }
        Ok(())
    }

    fn store_identifier(&mut self, id: &Identifier) -> Result<(), CompileError> {
        let resolution = resolution(id)?;
        trace!(name = id.name(), ?resolution, "store");
        let code = self.current()?;
        match resolution {
            Resolution::Local(index) => code.store(slot(id, index)?),
            Resolution::Closure(index) => code.cstore(slot(id, index)?),
            Resolution::Global => {
                let index = operand(code.runtime_index(id.name()), "name index")?;
                code.gstore(index);
            }
        }
        Ok(())
    }

    /// Compile a function body into its own target and return the operand
    /// for `MakeFunction`.
    fn compile_function(
        &mut self,
        name: &str,
        params: &ParameterList,
        body: &BlockStmnt,
        frame_size: usize,
    ) -> Result<u32, CompileError> {
        self.begin(FunctionCode::new(name, params.len(), frame_size));
        let result = self
            .compile_block(body)
            .and_then(|()| self.emit(Instruction::Return));
        let code = self.finish()?;
        result?;
        debug!(
            name,
            arity = code.arity(),
            instructions = code.instructions().len(),
            "compiled function"
        );
        self.add_function(code)
    }

    fn compile_class(&mut self, class: &ClassStmnt) -> Result<(), CompileError> {
        if let Some(super_name) = class.super_name() {
            self.load_identifier(super_name)?;
        }

        self.begin(FunctionCode::new(class.name(), 0, class.frame_size()));
        let result = self.compile_class_body(class.body());
        let code = self.finish()?;
        result?;
        debug!(
            name = class.name(),
            instructions = code.instructions().len(),
            "compiled class"
        );
        let k = self.add_function(code)?;

        self.emit(Instruction::MakeClass {
            body: k,
            extends: class.super_name().is_some(),
        })?;
        self.store_identifier(class.name_leaf())?;
        self.emit(Instruction::Pop)?;
        self.emit(Instruction::Nil)
    }

    /// Members run for their side effects on the instance frame.
    fn compile_class_body(&mut self, body: &ClassBody) -> Result<(), CompileError> {
        for member in body.members() {
            self.compile_node(member)?;
            self.emit(Instruction::Pop)?;
        }
        self.emit(Instruction::Nil)?;
        self.emit(Instruction::Return)
    }

    fn add_function(&mut self, code: FunctionCode) -> Result<u32, CompileError> {
        let k = operand(self.functions.len(), "function index")?;
        self.functions.push(code);
        Ok(k)
    }
}

fn resolution(id: &Identifier) -> Result<Resolution, CompileError> {
    id.resolution().ok_or_else(|| Unresolved {
        node: String::from(id.name()),
    })
}

/// Frame slot of a local or closure variable.
fn slot(id: &Identifier, index: i32) -> Result<u32, CompileError> {
    u32::try_from(index).map_err(|_| InvalidLocalIndex {
        name: String::from(id.name()),
        index,
    })
}

fn pool_index(index: Option<usize>, node: &Node) -> Result<u32, CompileError> {
    let index = index.ok_or_else(|| Unresolved { node: node.info() })?;
    operand(index, "constant index")
}

fn operand(value: usize, operand: &'static str) -> Result<u32, CompileError> {
    u32::try_from(value).map_err(|_| OperandOverflow { operand })
}
