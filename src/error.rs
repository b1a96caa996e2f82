use std::fmt;
use thiserror::Error;

/// Every way a calculation can fail. The `Display` text is what ends up in the
/// `error` field of a [`crate::Calculation`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Expression cannot be empty")]
    EmptyExpression,

    #[error("Expression is too long: {length} characters (limit is {limit})")]
    InputTooLong { length: usize, limit: usize },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Unsupported function: {0}")]
    UnsupportedFunction(String),

    #[error("Unsupported identifier: {0}")]
    UnsupportedIdentifier(String),

    #[error("Unsupported AST node: {0}")]
    UnsupportedNode(String),

    #[error("{function}() takes {} but {} given", describe_arity(.min, .max), describe_given(.found))]
    Arity {
        function: String,
        min: usize,
        max: usize,
        found: usize,
    },

    #[error("Math domain error: {0}")]
    Domain(String),

    #[error("Division by zero")]
    DivisionByZero,
}

fn describe_arity(min: &usize, max: &usize) -> String {
    match (*min, *max) {
        (1, 1) => "exactly 1 argument".to_string(),
        (min, max) if min == max => format!("exactly {} arguments", min),
        (min, max) => format!("from {} to {} arguments", min, max),
    }
}

fn describe_given(found: &usize) -> String {
    match *found {
        1 => "1 was".to_string(),
        n => format!("{} were", n),
    }
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::EmptyExpression => ErrorKind::EmptyExpression,
            CalcError::InputTooLong { .. } => ErrorKind::InputTooLong,
            CalcError::Parse(_) => ErrorKind::ParseError,
            CalcError::UnsupportedOperator(_) => ErrorKind::UnsupportedOperator,
            CalcError::UnsupportedFunction(_) => ErrorKind::UnsupportedFunction,
            CalcError::UnsupportedIdentifier(_) => ErrorKind::UnsupportedIdentifier,
            CalcError::UnsupportedNode(_) => ErrorKind::UnsupportedNode,
            CalcError::Arity { .. } => ErrorKind::ArityError,
            CalcError::Domain(_) => ErrorKind::DomainError,
            CalcError::DivisionByZero => ErrorKind::DivisionByZero,
        }
    }

    /// True for the allow-list failures: the input parsed but named something
    /// outside the operator or function tables.
    pub fn is_sandbox_violation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UnsupportedOperator
                | ErrorKind::UnsupportedFunction
                | ErrorKind::UnsupportedIdentifier
                | ErrorKind::UnsupportedNode
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyExpression,
    InputTooLong,
    ParseError,
    UnsupportedOperator,
    UnsupportedFunction,
    UnsupportedIdentifier,
    UnsupportedNode,
    ArityError,
    DomainError,
    DivisionByZero,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
