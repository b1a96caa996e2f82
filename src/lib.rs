//! Sandboxed evaluation of arithmetic expressions typed by students or passed
//! along by an agent.
//!
//! Input is normalized, parsed with a fixed grammar and evaluated strictly
//! through the whitelisted operators and functions. Anything else comes back as
//! a structured error; no input can reach code outside the allow-list.
//!
//! ```
//! let calculation = safecalc_rs::calculate("2^10");
//! assert_eq!(calculation.result, Some(1024.0));
//! ```

pub mod ast;
pub mod calculator;
pub mod config;
pub mod error;
pub mod functions;

pub use calculator::{Calculation, Calculator, Status};
pub use config::CalculatorConfig;
pub use error::{CalcError, ErrorKind};

/// Evaluates `expression` with the default limits. Never fails; errors are
/// reported inside the returned [`Calculation`].
pub fn calculate(expression: &str) -> Calculation {
    Calculator::new().calculate(expression)
}

pub fn evaluate_expression(expression: &str) -> Result<f64, CalcError> {
    Calculator::new().evaluate(expression)
}
