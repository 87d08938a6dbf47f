//! Expression evaluation seam.
//!
//! The engine never parses math itself. It compiles source text through an
//! [`Evaluator`] and evaluates the result per sample point. Any library can
//! be plugged in by implementing the two traits below; [`BuiltinEvaluator`]
//! is a small recursive-descent implementation used by default.

mod builtin;
mod lexer;
mod parser;

pub use builtin::BuiltinEvaluator;

use crate::error::{CompileError, EvalError};

/// Variable values for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bindings {
    /// Value bound to `x`.
    pub x: f64,
    /// Value bound to `y`, if any.
    pub y: Option<f64>,
}

impl Bindings {
    /// Bind only `x`.
    pub const fn x(x: f64) -> Self {
        Self { x, y: None }
    }

    /// Bind both `x` and `y`.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y: Some(y) }
    }
}

/// Compiles expression source into an evaluable form.
pub trait Evaluator: Send + Sync {
    /// Compile `source`, failing on malformed syntax.
    fn compile(&self, source: &str) -> Result<Box<dyn CompiledExpr>, CompileError>;
}

/// A compiled expression.
pub trait CompiledExpr: Send + Sync {
    /// Evaluate under `bindings`.
    fn evaluate(&self, bindings: Bindings) -> Result<f64, EvalError>;
}
