use crate::ast::{Evaluator, Normalized, Parser};
use crate::config::CalculatorConfig;
use crate::error::{CalcError, ErrorKind};
use crate::functions::{constants::CONSTANTS, FunctionTable};
use log::debug;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// The record handed back to callers. Serializes to
/// `{"status", "result" | "error", "expression"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub kind: Option<ErrorKind>,
    /// The caller's input, verbatim.
    pub expression: String,
}

impl Calculation {
    pub fn success(expression: &str, result: f64) -> Self {
        Self {
            status: Status::Success,
            result: Some(result),
            error: None,
            kind: None,
            expression: expression.to_string(),
        }
    }

    pub fn failure(expression: &str, error: &CalcError) -> Self {
        Self {
            status: Status::Error,
            result: None,
            error: Some(error.to_string()),
            kind: Some(error.kind()),
            expression: expression.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator {
    config: CalculatorConfig,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Runs the whole pipeline and returns the typed outcome.
    pub fn evaluate(&self, expression: &str) -> Result<f64, CalcError> {
        let length = expression.chars().count();
        if length > self.config.max_expression_length {
            return Err(CalcError::InputTooLong {
                length,
                limit: self.config.max_expression_length,
            });
        }

        let normalized = Normalized::new(expression)?;
        let ast = Parser::parse_normalized(&normalized, self.config.max_nesting_depth)?;
        Evaluator::new().evaluate(&ast)
    }

    /// Evaluates `expression` and always returns a record; failures never escape.
    pub fn calculate(&self, expression: &str) -> Calculation {
        match self.evaluate(expression) {
            Ok(result) => {
                debug!("Calculated {:?} = {}", expression, result);
                Calculation::success(expression, result)
            }
            Err(err) => {
                debug!("Calculation of {:?} failed ({}): {}", expression, err.kind(), err);
                Calculation::failure(expression, &err)
            }
        }
    }

    /// Evaluates independent expressions in parallel. Output order matches input order.
    pub fn calculate_batch<S>(&self, expressions: &[S]) -> Vec<Calculation>
    where
        S: AsRef<str> + Sync,
    {
        expressions
            .par_iter()
            .map(|expression| self.calculate(expression.as_ref()))
            .collect()
    }

    /// Whitelisted function names followed by the named constants.
    pub fn supported_functions() -> Vec<&'static str> {
        let mut names = FunctionTable::global().names();
        names.extend(CONSTANTS.iter().map(|(name, _)| *name));
        names
    }
}
