//! Bytecode compiler.
//!
//! Translates a resolved tree into [`Instruction`](crate::bytecode::Instruction)s
//! with the same observable behavior as the tree-walking
//! [`evaluator`](crate::evaluator).
//!
//! ## Design
//!
//! - Compile targets form an explicit stack inside [`Compiler`]; nothing is
//!   global, so independent programs can be compiled side by side
//! - Operands come from the resolution pass: constant pool indices, frame
//!   slots, closure slots. Global and member names go through each function's
//!   name table
//! - Jumps are emitted as placeholders and patched once the target is known
//!
//! ```
//! use sparrow_core::ast::{BinaryOp, build::*};
//! use sparrow_core::bytecode::Instruction;
//! use sparrow_core::compiler::Compiler;
//! use sparrow_core::resolver::{ConstantPools, Resolver};
//!
//! let tree = binary(int(1), BinaryOp::Add, int(2));
//! let mut pools = ConstantPools::new();
//! Resolver::new(&mut pools).resolve(&tree).unwrap();
//!
//! let program = Compiler::compile(&tree).unwrap();
//! assert_eq!(
//!     program.main.instructions(),
//!     &[
//!         Instruction::IConst(0),
//!         Instruction::IConst(1),
//!         Instruction::BinOp(BinaryOp::Add),
//!         Instruction::Return,
//!     ]
//! );
//! ```

mod bytecode;
mod error;


pub use bytecode::Compiler;
pub use error::CompileError;
