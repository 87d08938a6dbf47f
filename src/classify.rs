//! Explicit/implicit classification of expression strings.
//!
//! A source containing `=` is an implicit curve `lhs - rhs = 0`, split on
//! the first `=` only. Anything else is an explicit curve `y = g(x)`.

use std::fmt;

use crate::error::CompileError;
use crate::expr::{Bindings, CompiledExpr, Evaluator};

/// A scalar field over math space whose zero set is the curve.
pub trait ScalarField {
    /// Field value at `(x, y)`; NaN where undefined.
    fn value(&self, x: f64, y: f64) -> f64;
}

impl<F> ScalarField for F
where
    F: Fn(f64, f64) -> f64,
{
    fn value(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Curve given as `y = g(x)`.
pub struct ExplicitCurve {
    g: Box<dyn CompiledExpr>,
}

impl ExplicitCurve {
    /// `g(x)`; NaN where evaluation fails.
    pub fn eval(&self, x: f64) -> f64 {
        self.g.evaluate(Bindings::x(x)).unwrap_or(f64::NAN)
    }
}

impl ScalarField for ExplicitCurve {
    fn value(&self, x: f64, y: f64) -> f64 {
        y - self.eval(x)
    }
}

/// Curve given as `lhs(x, y) = rhs(x, y)`.
pub struct ImplicitCurve {
    lhs: Box<dyn CompiledExpr>,
    rhs: Box<dyn CompiledExpr>,
}

impl ScalarField for ImplicitCurve {
    fn value(&self, x: f64, y: f64) -> f64 {
        let bindings = Bindings::xy(x, y);
        match (self.lhs.evaluate(bindings), self.rhs.evaluate(bindings)) {
            (Ok(lhs), Ok(rhs)) => lhs - rhs,
            _ => f64::NAN,
        }
    }
}

/// Result of classifying one expression.
pub enum Classified {
    /// `y = g(x)`, sampled per pixel column.
    Explicit(ExplicitCurve),
    /// `f(x, y) = 0`, sampled over a grid.
    Implicit(ImplicitCurve),
    /// Compilation failed; never sampled.
    Invalid(CompileError),
}

impl Classified {
    /// Check whether the expression failed to compile.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Compile error, if any.
    pub fn error(&self) -> Option<&CompileError> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Debug for Classified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(_) => write!(f, "Classified::Explicit(..)"),
            Self::Implicit(_) => write!(f, "Classified::Implicit(..)"),
            Self::Invalid(err) => f.debug_tuple("Classified::Invalid").field(err).finish(),
        }
    }
}

/// Classify `source` and compile it with `evaluator`.
pub fn classify(evaluator: &dyn Evaluator, source: &str) -> Classified {
    let compiled = match source.split_once('=') {
        Some((lhs, rhs)) => evaluator.compile(lhs).and_then(|lhs| {
            let rhs = evaluator.compile(rhs)?;
            Ok(Classified::Implicit(ImplicitCurve { lhs, rhs }))
        }),
        None => evaluator
            .compile(source)
            .map(|g| Classified::Explicit(ExplicitCurve { g })),
    };
    compiled.unwrap_or_else(Classified::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::BuiltinEvaluator;

    fn classify_builtin(source: &str) -> Classified {
        classify(&BuiltinEvaluator, source)
    }

    #[test]
    fn equals_sign_means_implicit() {
        assert!(matches!(classify_builtin("y = x^2"), Classified::Implicit(_)));
        assert!(matches!(
            classify_builtin("x^2 - y = 0"),
            Classified::Implicit(_)
        ));
    }

    #[test]
    fn plain_expression_means_explicit() {
        assert!(matches!(classify_builtin("x^2"), Classified::Explicit(_)));
        assert!(matches!(classify_builtin("sin(x)"), Classified::Explicit(_)));
    }

    #[test]
    fn malformed_input_is_invalid() {
        assert!(classify_builtin("x^^2").is_invalid());
        assert!(classify_builtin("x^2 =").is_invalid());
        assert!(classify_builtin("x = y = 1").is_invalid());
    }

    #[test]
    fn implicit_field_is_lhs_minus_rhs() {
        let Classified::Implicit(curve) = classify_builtin("x^2 + y^2 = 4") else {
            panic!("expected implicit");
        };
        assert_eq!(curve.value(2.0, 0.0), 0.0);
        assert_eq!(curve.value(3.0, 1.0), 6.0);
    }

    #[test]
    fn explicit_field_is_y_minus_g() {
        let Classified::Explicit(curve) = classify_builtin("2x + 1") else {
            panic!("expected explicit");
        };
        assert_eq!(curve.eval(1.0), 3.0);
        assert_eq!(curve.value(1.0, 5.0), 2.0);
    }

    #[test]
    fn evaluation_faults_become_nan() {
        let Classified::Explicit(curve) = classify_builtin("x + y") else {
            panic!("expected explicit");
        };
        assert!(curve.eval(1.0).is_nan());
        let Classified::Implicit(curve) = classify_builtin("k x = y") else {
            panic!("expected implicit");
        };
        assert!(curve.value(1.0, 1.0).is_nan());
    }
}
