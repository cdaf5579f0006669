//! Semantic core of the Sparrow scripting language.
//!
//! A parser (not part of this crate) produces a tree of [`ast::Node`]s. The
//! [`resolver`] walks it once to classify identifiers and intern literals,
//! after which the tree can either be evaluated directly by the
//! [`evaluator`] or compiled to [`bytecode`] by the [`compiler`].
//!
//! Runtime [`values`] live in [`env::Env`] chains. Functions capture the
//! environment they were defined in, which is what makes closures and class
//! instances work.

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod api;
pub mod ast;
pub mod bytecode;
pub mod compiler;
pub mod env;
pub mod evaluator;
pub mod resolver;
pub mod stdlib;
pub mod token;
pub mod values;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_closure_capture() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
