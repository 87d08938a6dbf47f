// Recursive-descent parser producing an expression tree.
//
// additive := term (('+' | '-') term)*
// term     := unary (('*' | '/' | '%') unary | power)*     (juxtaposition multiplies)
// unary    := ('+' | '-') unary | power
// power    := primary ('^' unary)?
// primary  := number | ident | ident '(' args ')' | '(' additive ')'

use std::f64::consts::{E, PI, TAU};

use super::lexer::{Token, TokenKind, tokenize};
use crate::error::CompileError;

const MAX_DEPTH: usize = 256;
const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Func {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Sqrt,
    Cbrt,
    Abs,
    Exp,
    Ln,
    Log,
    Log10,
    Log2,
    Floor,
    Ceil,
    Round,
    Sign,
    Atan2,
    Pow,
    Min,
    Max,
    Mod,
}

impl Func {
    fn lookup(name: &str) -> Option<Self> {
        let func = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "sec" => Self::Sec,
            "csc" => Self::Csc,
            "cot" => Self::Cot,
            "asin" | "arcsin" => Self::Asin,
            "acos" | "arccos" => Self::Acos,
            "atan" | "arctan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "asinh" => Self::Asinh,
            "acosh" => Self::Acosh,
            "atanh" => Self::Atanh,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            "exp" => Self::Exp,
            "ln" => Self::Ln,
            "log" => Self::Log,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "sign" | "sgn" => Self::Sign,
            "atan2" => Self::Atan2,
            "pow" => Self::Pow,
            "min" => Self::Min,
            "max" => Self::Max,
            "mod" => Self::Mod,
            _ => return None,
        };
        Some(func)
    }

    /// Accepted argument counts, inclusive.
    fn arity(self) -> (usize, usize) {
        match self {
            Self::Log => (1, 2),
            Self::Atan2 | Self::Pow | Self::Min | Self::Max | Self::Mod => (2, 2),
            _ => (1, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Node {
    Number(f64),
    X,
    Y,
    Symbol(String),
    Neg(Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Call(Func, Vec<Node>),
}

pub(super) fn parse(source: &str) -> Result<Node, CompileError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(CompileError::Empty);
    }
    let mut parser = Parser {
        tokens,
        index: 0,
        depth: 0,
    };
    let node = parser.additive()?;
    match parser.peek() {
        None => Ok(node),
        Some(token) if token.kind == TokenKind::CloseParen => {
            Err(CompileError::UnbalancedParen { pos: token.pos })
        }
        Some(token) => Err(unexpected(token)),
    }
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|token| &token.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn additive(&mut self) -> Result<Node, CompileError> {
        self.enter()?;
        let mut node = self.term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.index += 1;
            let rhs = self.term()?;
            node = Node::Binary(op, Box::new(node), Box::new(rhs));
        }
        self.depth -= 1;
        Ok(node)
    }

    fn term(&mut self) -> Result<Node, CompileError> {
        let mut node = self.unary()?;
        loop {
            let (op, rhs) = match self.peek_kind() {
                Some(TokenKind::Star) => {
                    self.index += 1;
                    (BinaryOp::Mul, self.unary()?)
                }
                Some(TokenKind::Slash) => {
                    self.index += 1;
                    (BinaryOp::Div, self.unary()?)
                }
                Some(TokenKind::Percent) => {
                    self.index += 1;
                    (BinaryOp::Rem, self.unary()?)
                }
                Some(TokenKind::Number(_) | TokenKind::Ident(_) | TokenKind::OpenParen) => {
                    (BinaryOp::Mul, self.power()?)
                }
                _ => break,
            };
            node = Node::Binary(op, Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn unary(&mut self) -> Result<Node, CompileError> {
        self.enter()?;
        let node = if self.eat(&TokenKind::Minus) {
            Node::Neg(Box::new(self.unary()?))
        } else if self.eat(&TokenKind::Plus) {
            self.unary()?
        } else {
            self.power()?
        };
        self.depth -= 1;
        Ok(node)
    }

    fn power(&mut self) -> Result<Node, CompileError> {
        let base = self.primary()?;
        if self.eat(&TokenKind::Caret) {
            let exponent = self.unary()?;
            return Ok(Node::Binary(
                BinaryOp::Pow,
                Box::new(base),
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, CompileError> {
        let token = self.next().ok_or(CompileError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(value) => Ok(Node::Number(value)),
            TokenKind::OpenParen => {
                let inner = self.additive()?;
                if !self.eat(&TokenKind::CloseParen) {
                    return Err(CompileError::UnbalancedParen { pos: token.pos });
                }
                Ok(inner)
            }
            TokenKind::Ident(name) => self.identifier(name),
            _ => Err(unexpected(&token)),
        }
    }

    fn identifier(&mut self, name: String) -> Result<Node, CompileError> {
        let value = match name.as_str() {
            "x" => Some(Node::X),
            "y" => Some(Node::Y),
            "pi" | "PI" => Some(Node::Number(PI)),
            "e" | "E" => Some(Node::Number(E)),
            "tau" => Some(Node::Number(TAU)),
            "phi" => Some(Node::Number(GOLDEN_RATIO)),
            _ => None,
        };
        if let Some(value) = value {
            return Ok(value);
        }

        if self.peek_kind() != Some(&TokenKind::OpenParen) {
            return Ok(Node::Symbol(name));
        }
        let func = Func::lookup(&name).ok_or_else(|| CompileError::UnknownFunction {
            name: name.clone(),
        })?;
        let open = self.next().map(|token| token.pos).unwrap_or_default();

        let mut args = Vec::new();
        if !self.eat(&TokenKind::CloseParen) {
            loop {
                args.push(self.additive()?);
                if self.eat(&TokenKind::Comma) {
                    continue;
                }
                if self.eat(&TokenKind::CloseParen) {
                    break;
                }
                return match self.peek() {
                    Some(token) => Err(unexpected(token)),
                    None => Err(CompileError::UnbalancedParen { pos: open }),
                };
            }
        }

        let (min, max) = func.arity();
        if args.len() < min || args.len() > max {
            return Err(CompileError::Arity {
                name,
                expected: if args.len() < min { min } else { max },
                found: args.len(),
            });
        }
        Ok(Node::Call(func, args))
    }

    fn enter(&mut self) -> Result<(), CompileError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CompileError::Other("expression is nested too deeply".into()));
        }
        Ok(())
    }
}

fn unexpected(token: &Token) -> CompileError {
    CompileError::UnexpectedToken {
        found: token.kind.describe(),
        pos: token.pos,
    }
}
