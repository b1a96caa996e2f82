use crate::error::CalcError;
use std::fmt;

mod evaluator;
mod normalizer;
mod parser;

pub use evaluator::Evaluator;
pub use normalizer::{normalize, Normalized};
pub use parser::{ExpressionParser as Parser, DEFAULT_MAX_NESTING_DEPTH};

/// Parsed form of a normalized expression. Every node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    /// A bare identifier. Only the whitelisted constants evaluate; the rest fail.
    Constant(String),
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<ASTNode>,
    },
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    FunctionCall {
        name: String,
        args: Vec<ASTNode>,
    },
}

// Dropping is iterative so that long operator chains cannot exhaust the stack.
impl Drop for ASTNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            take_children(&mut node, &mut pending);
        }
    }
}

fn take_children(node: &mut ASTNode, pending: &mut Vec<ASTNode>) {
    match node {
        ASTNode::UnaryOperation { operand, .. } => {
            pending.push(std::mem::replace(operand.as_mut(), ASTNode::Number(0.0)));
        }
        ASTNode::BinaryOperation { left, right, .. } => {
            pending.push(std::mem::replace(left.as_mut(), ASTNode::Number(0.0)));
            pending.push(std::mem::replace(right.as_mut(), ASTNode::Number(0.0)));
        }
        ASTNode::FunctionCall { args, .. } => pending.append(args),
        ASTNode::Number(_) | ASTNode::Constant(_) => {}
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Power,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "**",
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> Result<f64, CalcError> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            Operator::Power => {
                if left == 0.0 && right < 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    Ok(left.powf(right))
                }
            }
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = CalcError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "**" => Ok(Operator::Power),
            _ => Err(CalcError::UnsupportedOperator(value.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
}

impl UnaryOperator {
    pub fn apply(&self, operand: f64) -> Result<f64, CalcError> {
        match self {
            UnaryOperator::Negate => Ok(-operand),
        }
    }
}

impl TryFrom<&str> for UnaryOperator {
    type Error = CalcError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "-" => Ok(UnaryOperator::Negate),
            _ => Err(CalcError::UnsupportedOperator(format!("unary {}", value))),
        }
    }
}
