//! Instruction set of the stack machine the compiler targets.
//!
//! # Stack Discipline
//!
//! Stack effect notation: `[..., operand1, operand2] -> [..., result]`
//!
//! Every compiled expression or statement leaves exactly one value on the
//! stack. Stores leave the stored value in place so that an assignment is an
//! expression like any other; statement sequences discard intermediate values
//! with `Pop`.
//!
//! # Operands
//!
//! - Constant operands are indices into the [`ConstantPools`] the tree was
//!   resolved with.
//! - `Load`/`Store` take a frame slot, `CLoad`/`CStore` a slot of the
//!   enclosing frame (already offset by the reserved slots).
//! - `GLoad`/`GStore`/`RawString` take an index into the name table of the
//!   function being executed (see [`FunctionCode::names`]).
//! - Jump offsets are relative to the next instruction:
//!   `target = addr + 1 + offset`.
//!
//! [`ConstantPools`]: crate::resolver::ConstantPools
//! [`FunctionCode::names`]: super::FunctionCode::names

use core::fmt;

use crate::ast::BinaryOp;

/// A single instruction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Placeholder for a jump that has not been patched yet. Does nothing.
    Nop,

    // ========================================================================
    // Constants
    // ========================================================================
    /// Push integer constant from the int pool
    /// Stack: [...] -> [..., int]
    IConst(u32),

    /// Push float constant from the float pool
    /// Stack: [...] -> [..., float]
    FConst(u32),

    /// Push string constant from the string pool
    /// Stack: [...] -> [..., string]
    SConst(u32),

    /// Push nil
    /// Stack: [...] -> [..., nil]
    Nil,

    /// Push a name from the function's name table as a raw string
    /// (member names for `GetMember`/`SetMember`)
    /// Stack: [...] -> [..., name]
    RawString(u32),

    // ========================================================================
    // Variables
    // ========================================================================
    /// Load local variable
    /// Stack: [...] -> [..., value]
    Load(u32),

    /// Store to local variable, keeping the value
    /// Stack: [..., value] -> [..., value]
    Store(u32),

    /// Load a variable of the enclosing function's frame
    /// Stack: [...] -> [..., value]
    CLoad(u32),

    /// Store to a variable of the enclosing function's frame, keeping the value
    /// Stack: [..., value] -> [..., value]
    CStore(u32),

    /// Load global by name index
    /// Stack: [...] -> [..., value]
    GLoad(u32),

    /// Store global by name index, keeping the value
    /// Stack: [..., value] -> [..., value]
    GStore(u32),

    // ========================================================================
    // Stack & Arithmetic
    // ========================================================================
    /// Pop top value
    /// Stack: [..., a] -> [...]
    Pop,

    /// Unary minus
    /// Stack: [..., a] -> [..., -a]
    Neg,

    /// Any non-assignment binary operator, applied with the same rules as the
    /// tree-walking evaluator (see [`crate::evaluator::binary_op`])
    /// Stack: [..., a, b] -> [..., a op b]
    BinOp(BinaryOp),

    // ========================================================================
    // Control Flow
    // ========================================================================
    /// Unconditional jump
    /// Stack: [...] -> [...]
    Jump(i32),

    /// Pop condition and jump if it is not truthy
    /// Stack: [..., cond] -> [...]
    JumpIfFalse(i32),

    // ========================================================================
    // Functions & Objects
    // ========================================================================
    /// Call with N arguments
    /// Stack: [..., callee, arg1, ..., argN] -> [..., result]
    Call(u32),

    /// Create a function value from compiled function K, capturing the
    /// current frame
    /// Stack: [...] -> [..., function]
    MakeFunction(u32),

    /// Create a class whose body is compiled function K. When `extends` is
    /// set the superclass is taken from the stack.
    /// Stack: [..., super?] -> [..., class]
    MakeClass { body: u32, extends: bool },

    /// Read a member (`new` on a class instantiates it)
    /// Stack: [..., object, name] -> [..., value]
    GetMember,

    /// Write an existing member, keeping the value
    /// Stack: [..., value, object, name] -> [..., value]
    SetMember,

    /// Read an array element
    /// Stack: [..., array, index] -> [..., value]
    GetIndex,

    /// Write an array element, keeping the value
    /// Stack: [..., value, array, index] -> [..., value]
    SetIndex,

    /// Return top of stack to the caller
    /// Stack: [..., value] -> (caller)
    Return,
}

impl Instruction {
    /// Jump offset, if this is a jump.
    pub fn jump_offset(&self) -> Option<i32> {
        match self {
            Instruction::Jump(offset) | Instruction::JumpIfFalse(offset) => Some(*offset),
            _ => None,
        }
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Nop => write!(f, "Nop"),
            Instruction::IConst(i) => write!(f, "IConst({})", i),
            Instruction::FConst(i) => write!(f, "FConst({})", i),
            Instruction::SConst(i) => write!(f, "SConst({})", i),
            Instruction::Nil => write!(f, "Nil"),
            Instruction::RawString(i) => write!(f, "RawString({})", i),
            Instruction::Load(i) => write!(f, "Load({})", i),
            Instruction::Store(i) => write!(f, "Store({})", i),
            Instruction::CLoad(i) => write!(f, "CLoad({})", i),
            Instruction::CStore(i) => write!(f, "CStore({})", i),
            Instruction::GLoad(i) => write!(f, "GLoad({})", i),
            Instruction::GStore(i) => write!(f, "GStore({})", i),
            Instruction::Pop => write!(f, "Pop"),
            Instruction::Neg => write!(f, "Neg"),
            Instruction::BinOp(op) => write!(f, "BinOp({})", op.symbol()),
            Instruction::Jump(offset) => write!(f, "Jump({:+})", offset),
            Instruction::JumpIfFalse(offset) => write!(f, "JumpIfFalse({:+})", offset),
            Instruction::Call(n) => write!(f, "Call({})", n),
            Instruction::MakeFunction(k) => write!(f, "MakeFunction({})", k),
            Instruction::MakeClass { body, extends } => {
                write!(f, "MakeClass({}", body)?;
                if *extends {
                    write!(f, ", extends")?;
                }
                write!(f, ")")
            }
            Instruction::GetMember => write!(f, "GetMember"),
            Instruction::SetMember => write!(f, "SetMember"),
            Instruction::GetIndex => write!(f, "GetIndex"),
            Instruction::SetIndex => write!(f, "SetIndex"),
            Instruction::Return => write!(f, "Return"),
        }
    }
}
