//! Core evaluation logic.

use alloc::rc::Rc;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    String,
    ast::{
        Arguments, ArrayRef, BinaryExpr, BlockStmnt, Dot, Identifier, LambdaExpr, Node, Operator,
        ParameterList, Postfix, PrimaryExpr, Resolution, StructureError,
    },
    env::Env,
    evaluator::{
        EvalError, Evaluator,
        ResourceExceeded::*,
        RuntimeError::{self, *},
        operators,
    },
    values::{ClassInfo, ClassInstance, Function, Value},
};

/// Remaining stack below which evaluation switches to a fresh segment.
const RED_ZONE: usize = 128 * 1024;

/// Size of each segment allocated when the stack runs low.
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

impl Evaluator {
    /// Evaluate `node` in `env`.
    pub fn eval(&mut self, node: &Node, env: &Env) -> Result<Value, EvalError> {
        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            return Err(StackOverflow {
                depth: self.depth,
                max_depth: self.options.max_depth,
            }
            .into());
        }

        self.depth += 1;
        let result = stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
            self.eval_inner(node, env)
        });
        self.depth -= 1;

        result
    }

    /// Inner evaluation logic (no depth tracking).
    fn eval_inner(&mut self, node: &Node, env: &Env) -> Result<Value, EvalError> {
        match node {
            Node::Int(lit) => Ok(Value::Int(lit.value())),
            Node::Float(lit) => Ok(Value::Float(lit.value())),
            Node::Str(lit) => Ok(Value::str(lit.content())),
            Node::Identifier(id) => Ok(read_identifier(id, env)?),
            Node::Primary(primary) => self.eval_primary(primary, env),
            Node::Negative(neg) => {
                let value = self.eval(neg.operand(), env)?;
                Ok(operators::negate(&value)?)
            }
            Node::Binary(binary) => self.eval_binary(binary, env),
            Node::Block(block) => self.eval_block(block, env),
            Node::If(stmt) => {
                if self.eval(stmt.condition(), env)?.is_truthy() {
                    self.eval(stmt.then_block(), env)
                } else if let Some(else_block) = stmt.else_block() {
                    self.eval(else_block, env)
                } else {
                    Ok(Value::Nil)
                }
            }
            Node::While(stmt) => {
                let mut iterations = 0usize;
                while self.eval(stmt.condition(), env)?.is_truthy() {
                    if let Some(max_iterations) = self.options.max_iterations {
                        if iterations >= max_iterations {
                            return Err(IterationLimit { max_iterations }.into());
                        }
                    }
                    iterations += 1;
                    self.eval(stmt.body(), env)?;
                }
                Ok(Value::Nil)
            }
            Node::Null => Ok(Value::Nil),
            Node::Def(def) => {
                let function = Function::new(
                    def.name(),
                    def.params().clone(),
                    def.body().clone(),
                    env.clone(),
                );
                debug!(name = def.name(), "defined function");
                write_identifier(def.name_leaf(), Value::Function(Rc::new(function)), env)?;
                Ok(Value::Nil)
            }
            Node::Lambda(lambda) => {
                let function = Function::new(
                    LambdaExpr::NAME,
                    lambda.params().clone(),
                    lambda.body().clone(),
                    env.clone(),
                );
                Ok(Value::Function(Rc::new(function)))
            }
            Node::Class(class) => {
                let info = ClassInfo::new(class.clone(), env.clone())?;
                debug!(
                    name = class.name(),
                    super_class = info.super_class().map(|s| s.name()),
                    "defined class"
                );
                write_identifier(class.name_leaf(), Value::Class(Rc::new(info)), env)?;
                Ok(Value::Nil)
            }
            Node::Params(_)
            | Node::ClassBody(_)
            | Node::Arguments(_)
            | Node::Dot(_)
            | Node::Index(_) => Err(StructureError::NotEvaluable { kind: node.kind() }.into()),
        }
    }

    /// Evaluate statements in sequence. The value of a block is the value of
    /// its last statement, `Nil` if it is empty.
    fn eval_block(&mut self, block: &BlockStmnt, env: &Env) -> Result<Value, EvalError> {
        let mut result = Value::Nil;
        for statement in block.statements() {
            result = self.eval(statement, env)?;
        }
        Ok(result)
    }

    fn eval_primary(&mut self, primary: &PrimaryExpr, env: &Env) -> Result<Value, EvalError> {
        let mut value = self.eval(primary.operand(), env)?;
        for postfix in primary.postfixes() {
            value = self.eval_postfix(postfix, env, value)?;
        }
        Ok(value)
    }

    /// Apply one postfix operation to `caller`, the value of everything to
    /// its left.
    pub fn eval_postfix(
        &mut self,
        postfix: &Postfix,
        env: &Env,
        caller: Value,
    ) -> Result<Value, EvalError> {
        match postfix {
            Postfix::Arguments(args) => self.call(args, env, caller),
            Postfix::Dot(dot) => self.eval_dot(dot, caller),
            Postfix::Index(index) => {
                let array = match caller {
                    Value::Array(array) => array,
                    other => {
                        return Err(BadIndexReceiver {
                            type_name: other.type_name(),
                        }
                        .into());
                    }
                };
                let i = self.eval_index(index, env)?;
                Ok(array.get(i)?)
            }
        }
    }

    fn eval_index(&mut self, index: &ArrayRef, env: &Env) -> Result<i64, EvalError> {
        let value = self.eval(index.index(), env)?;
        value.as_int().ok_or_else(|| {
            BadIndex {
                type_name: value.type_name(),
            }
            .into()
        })
    }

    fn call(&mut self, args: &Arguments, env: &Env, callee: Value) -> Result<Value, EvalError> {
        match callee {
            Value::Function(function) => {
                if args.len() != function.arity() {
                    return Err(ArityMismatch {
                        name: String::from(function.name()),
                        expected: function.arity(),
                        got: args.len(),
                    }
                    .into());
                }
                trace!(name = function.name(), depth = self.depth, "call");
                let activation = function.runtime_env();
                self.bind_params(function.params(), args, env, &activation)?;
                self.eval_block(function.body(), &activation)
            }
            Value::Native(native) => {
                let values = args
                    .args()
                    .iter()
                    .map(|arg| self.eval(arg, env))
                    .collect::<Result<SmallVec<[Value; 4]>, _>>()?;
                trace!(name = native.name(), "native call");
                Ok(native.invoke(&values)?)
            }
            other => Err(NotCallable {
                type_name: other.type_name(),
            }
            .into()),
        }
    }

    /// Evaluate `args` in `caller_env`, left to right, and define them by
    /// position in `callee_env`.
    pub fn bind_params(
        &mut self,
        params: &ParameterList,
        args: &Arguments,
        caller_env: &Env,
        callee_env: &Env,
    ) -> Result<(), EvalError> {
        for (param, arg) in params.params().iter().zip(args.args()) {
            let value = self.eval(arg, caller_env)?;
            callee_env.define(param.name(), value);
        }
        Ok(())
    }

    fn eval_dot(&mut self, dot: &Dot, caller: Value) -> Result<Value, EvalError> {
        match caller {
            Value::Class(class) if dot.name() == "new" => {
                let instance = self.instantiate(&class)?;
                Ok(Value::Instance(instance))
            }
            Value::Instance(instance) => Ok(instance.read(dot.name())?),
            other => Err(BadMemberReceiver {
                member: String::from(dot.name()),
                type_name: other.type_name(),
            }
            .into()),
        }
    }

    /// Create an instance of `class`: run every class body, outermost
    /// ancestor first, in a fresh environment chained to the class's
    /// defining environment.
    fn instantiate(&mut self, class: &Rc<ClassInfo>) -> Result<Rc<ClassInstance>, EvalError> {
        let env = Env::with_outer(class.environment());
        for body in class.bodies() {
            for member in body.members() {
                self.eval(member, &env)?;
            }
        }
        debug!(class = class.name(), "created instance");
        Ok(Rc::new(ClassInstance::new(class.clone(), env)))
    }

    fn eval_binary(&mut self, binary: &BinaryExpr, env: &Env) -> Result<Value, EvalError> {
        match binary.operator() {
            Operator::Assign => {
                let value = self.eval(binary.right(), env)?;
                self.assign(binary.left(), value.clone(), env)?;
                Ok(value)
            }
            Operator::Binary(op) => {
                let left = self.eval(binary.left(), env)?;
                let right = self.eval(binary.right(), env)?;
                Ok(operators::binary_op(op, &left, &right)?)
            }
        }
    }

    /// Store `value` into an assignment target: an identifier, or a primary
    /// expression ending in member or index access.
    fn assign(&mut self, target: &Node, value: Value, env: &Env) -> Result<(), EvalError> {
        let invalid = || InvalidAssignTarget {
            target: target.info(),
        };
        let primary = match target {
            Node::Identifier(id) => return Ok(write_identifier(id, value, env)?),
            Node::Primary(primary) => primary,
            _ => return Err(invalid().into()),
        };
        let Some((last, init)) = primary.postfixes().split_last() else {
            return Err(invalid().into());
        };

        let mut object = self.eval(primary.operand(), env)?;
        for postfix in init {
            object = self.eval_postfix(postfix, env, object)?;
        }

        match (last, object) {
            (Postfix::Dot(dot), Value::Instance(instance)) => {
                instance.write(dot.name(), value)?;
            }
            (Postfix::Dot(dot), other) => {
                return Err(BadMemberReceiver {
                    member: String::from(dot.name()),
                    type_name: other.type_name(),
                }
                .into());
            }
            (Postfix::Index(index), Value::Array(array)) => {
                let i = self.eval_index(index, env)?;
                array.set(i, value)?;
            }
            (Postfix::Index(_), other) => {
                return Err(BadIndexReceiver {
                    type_name: other.type_name(),
                }
                .into());
            }
            (Postfix::Arguments(_), _) => return Err(invalid().into()),
        }
        Ok(())
    }
}

/// Check a resolution's frame index.
fn check_index(id: &Identifier, index: i32) -> Result<(), RuntimeError> {
    if index < 0 {
        return Err(InvalidLocalIndex {
            name: String::from(id.name()),
            index,
        });
    }
    Ok(())
}

fn resolution(id: &Identifier) -> Result<Resolution, RuntimeError> {
    id.resolution().ok_or_else(|| Unresolved {
        name: String::from(id.name()),
    })
}

fn undefined(id: &Identifier) -> RuntimeError {
    UndefinedName {
        name: String::from(id.name()),
    }
}

/// The definition environment of the running function.
fn outer_env(id: &Identifier, env: &Env) -> Result<Env, RuntimeError> {
    env.outer().ok_or_else(|| NoOuterEnv {
        name: String::from(id.name()),
    })
}

fn read_identifier(id: &Identifier, env: &Env) -> Result<Value, RuntimeError> {
    match resolution(id)? {
        Resolution::Local(index) => {
            check_index(id, index)?;
            env.get_local(id.name()).ok_or_else(|| undefined(id))
        }
        Resolution::Closure(index) => {
            check_index(id, index)?;
            outer_env(id, env)?
                .get(id.name())
                .ok_or_else(|| undefined(id))
        }
        Resolution::Global => env.get(id.name()).ok_or_else(|| undefined(id)),
    }
}

fn write_identifier(id: &Identifier, value: Value, env: &Env) -> Result<(), RuntimeError> {
    match resolution(id)? {
        Resolution::Local(index) => {
            check_index(id, index)?;
            env.define(id.name(), value);
        }
        Resolution::Closure(index) => {
            check_index(id, index)?;
            outer_env(id, env)?.put(id.name(), value);
        }
        Resolution::Global => env.put(id.name(), value),
    }
    Ok(())
}
