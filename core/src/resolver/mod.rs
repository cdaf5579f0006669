//! Static resolution pass.
//!
//! Runs once over a tree before it is evaluated or compiled and writes its
//! results into the nodes:
//!
//! - every identifier is classified as [`Local`](crate::ast::Resolution::Local),
//!   [`Closure`](crate::ast::Resolution::Closure) or
//!   [`Global`](crate::ast::Resolution::Global);
//! - every literal gets its index in the matching [`ConstantPools`] pool;
//! - function, closure and class definitions record their frame size.
//!
//! Both backends read the same results, so a tree resolved once behaves the
//! same whether it is evaluated or compiled.
//!
//! ```
//! use sparrow_core::ast::{Node, build::*};
//! use sparrow_core::resolver::{ConstantPools, Resolver};
//!
//! // fun (a) { b = a }
//! let tree = lambda(&["a"], vec![assign(ident("b"), ident("a"))]);
//! let mut pools = ConstantPools::new();
//! Resolver::new(&mut pools).resolve(&tree).unwrap();
//!
//! // The parameter and the implicitly declared `b` fill two slots.
//! if let Node::Lambda(lambda) = &tree {
//!     assert_eq!(lambda.frame_size(), 2);
//! }
//! ```

mod pool;
mod resolve;
mod symbols;


pub use pool::{ConstantPools, MAX_POOL_ENTRIES, Pool};
pub use resolve::Resolver;
pub use symbols::{FrameKind, MAX_FRAME_SLOTS, NOT_FOUND, RESERVED_FRAME_SLOTS, Symbols};

use crate::String;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("too many variables in one frame at '{name}' (limit {limit})")]
    TooManyLocals { name: String, limit: usize },

    #[error("{pool} constant pool is full (limit {limit})")]
    PoolOverflow { pool: &'static str, limit: usize },
}
