//! Error types shared across the crate.

use thiserror::Error;

use crate::axis::Axis;

/// Rejected viewport input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewportError {
    #[error("{axis} range has a non-finite bound ({min}, {max})")]
    NonFinite { axis: Axis, min: f64, max: f64 },

    #[error("{axis} range is empty or inverted: min {min} >= max {max}")]
    EmptyRange { axis: Axis, min: f64, max: f64 },

    #[error("zoom factor must be finite and positive, got {0}")]
    InvalidZoomFactor(f64),
}

/// Expression failed to compile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected '{found}' at {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unbalanced parenthesis at {pos}")]
    UnbalancedParen { pos: usize },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("function '{name}' takes {expected} argument{s}, found {found}", s = plural(.expected))]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("{0}")]
    Other(String),
}

/// Expression failed to evaluate at one sample point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("variable '{0}' is not bound")]
    UnboundVariable(String),

    #[error("undefined symbol '{0}'")]
    UndefinedSymbol(String),

    #[error("{0}")]
    Other(String),
}

fn plural(count: &usize) -> &'static str {
    if *count == 1 { "" } else { "s" }
}

/// Malformed color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color '{0}', expected #rgb or #rrggbb")]
pub struct ColorParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message_pluralizes() {
        let one = CompileError::Arity {
            name: "sin".into(),
            expected: 1,
            found: 2,
        };
        assert_eq!(one.to_string(), "function 'sin' takes 1 argument, found 2");
        let two = CompileError::Arity {
            name: "atan2".into(),
            expected: 2,
            found: 1,
        };
        assert_eq!(two.to_string(), "function 'atan2' takes 2 arguments, found 1");
    }

    #[test]
    fn viewport_error_names_axis() {
        let err = ViewportError::EmptyRange {
            axis: Axis::Y,
            min: 1.0,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "y range is empty or inverted: min 1 >= max 1");
    }
}
