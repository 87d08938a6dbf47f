use super::parser::{BinaryOp, Func, Node, parse};
use super::{Bindings, CompiledExpr, Evaluator};
use crate::error::{CompileError, EvalError};

/// Recursive-descent evaluator for common real-valued math.
///
/// Supports `+ - * / % ^`, implicit multiplication (`2x`, `3(x+1)`), the
/// variables `x` and `y`, the constants `pi`, `e`, `tau` and `phi`, and the
/// usual elementary functions. Arithmetic follows IEEE 754, so `1/0` is
/// infinite and `sqrt(-1)` is NaN rather than an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEvaluator;

impl BuiltinEvaluator {
    /// Create the evaluator.
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for BuiltinEvaluator {
    fn compile(&self, source: &str) -> Result<Box<dyn CompiledExpr>, CompileError> {
        let root = parse(source)?;
        Ok(Box::new(Program { root }))
    }
}

#[derive(Debug)]
struct Program {
    root: Node,
}

impl CompiledExpr for Program {
    fn evaluate(&self, bindings: Bindings) -> Result<f64, EvalError> {
        eval(&self.root, bindings)
    }
}

fn eval(node: &Node, bindings: Bindings) -> Result<f64, EvalError> {
    let value = match node {
        Node::Number(value) => *value,
        Node::X => bindings.x,
        Node::Y => bindings
            .y
            .ok_or_else(|| EvalError::UnboundVariable("y".into()))?,
        Node::Symbol(name) => return Err(EvalError::UndefinedSymbol(name.clone())),
        Node::Neg(inner) => -eval(inner, bindings)?,
        Node::Binary(op, lhs, rhs) => {
            let a = eval(lhs, bindings)?;
            let b = eval(rhs, bindings)?;
            match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
                BinaryOp::Rem => a % b,
                BinaryOp::Pow => a.powf(b),
            }
        }
        Node::Call(func, args) => {
            let mut values = [0.0; 2];
            for (slot, arg) in values.iter_mut().zip(args) {
                *slot = eval(arg, bindings)?;
            }
            call(*func, values[0], values[1], args.len())
        }
    };
    Ok(value)
}

fn call(func: Func, a: f64, b: f64, argc: usize) -> f64 {
    match func {
        Func::Sin => a.sin(),
        Func::Cos => a.cos(),
        Func::Tan => a.tan(),
        Func::Sec => a.cos().recip(),
        Func::Csc => a.sin().recip(),
        Func::Cot => a.tan().recip(),
        Func::Asin => a.asin(),
        Func::Acos => a.acos(),
        Func::Atan => a.atan(),
        Func::Sinh => a.sinh(),
        Func::Cosh => a.cosh(),
        Func::Tanh => a.tanh(),
        Func::Asinh => a.asinh(),
        Func::Acosh => a.acosh(),
        Func::Atanh => a.atanh(),
        Func::Sqrt => a.sqrt(),
        Func::Cbrt => a.cbrt(),
        Func::Abs => a.abs(),
        Func::Exp => a.exp(),
        Func::Ln => a.ln(),
        Func::Log if argc == 2 => a.log(b),
        Func::Log => a.ln(),
        Func::Log10 => a.log10(),
        Func::Log2 => a.log2(),
        Func::Floor => a.floor(),
        Func::Ceil => a.ceil(),
        Func::Round => a.round(),
        Func::Sign if a == 0.0 || a.is_nan() => a,
        Func::Sign => a.signum(),
        Func::Atan2 => a.atan2(b),
        Func::Pow => a.powf(b),
        Func::Min => a.min(b),
        Func::Max => a.max(b),
        Func::Mod => a.rem_euclid(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eval_x(source: &str, x: f64) -> Result<f64, EvalError> {
        BuiltinEvaluator
            .compile(source)
            .expect("compiles")
            .evaluate(Bindings::x(x))
    }

    #[test]
    fn arithmetic_and_precedence() {
        assert_relative_eq!(eval_x("1 + 2 * 3 - 4 / 2", 0.0).unwrap(), 5.0);
        assert_relative_eq!(eval_x("-x^2", 3.0).unwrap(), -9.0);
        assert_relative_eq!(eval_x("2^-1", 0.0).unwrap(), 0.5);
        assert_relative_eq!(eval_x("2x + 3(x - 1)", 2.0).unwrap(), 7.0);
        assert_relative_eq!(eval_x("7 % 4", 0.0).unwrap(), 3.0);
    }

    #[test]
    fn functions_and_constants() {
        assert_relative_eq!(eval_x("sin(pi / 2)", 0.0).unwrap(), 1.0);
        assert_relative_eq!(eval_x("log(8, 2)", 0.0).unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(eval_x("ln(e^2)", 0.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(eval_x("max(x, 1) + min(x, 1)", 4.0).unwrap(), 5.0);
        assert_relative_eq!(eval_x("mod(-1, 3)", 0.0).unwrap(), 2.0);
        assert_eq!(eval_x("sign(x)", -0.5).unwrap(), -1.0);
        assert_eq!(eval_x("sign(x)", 0.0).unwrap(), 0.0);
    }

    #[test]
    fn ieee_results_are_not_errors() {
        assert_eq!(eval_x("1/x", 0.0).unwrap(), f64::INFINITY);
        assert!(eval_x("sqrt(x)", -1.0).unwrap().is_nan());
    }

    #[test]
    fn unbound_y_and_unknown_symbols_fail_at_evaluation() {
        assert_eq!(
            eval_x("x + y", 1.0),
            Err(EvalError::UnboundVariable("y".into()))
        );
        assert_eq!(
            eval_x("a * x", 1.0),
            Err(EvalError::UndefinedSymbol("a".into()))
        );
        let both = BuiltinEvaluator.compile("x + y").unwrap();
        assert_relative_eq!(both.evaluate(Bindings::xy(1.0, 2.0)).unwrap(), 3.0);
    }
}
