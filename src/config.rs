use crate::ast::DEFAULT_MAX_NESTING_DEPTH;
use serde::Deserialize;

pub const DEFAULT_MAX_EXPRESSION_LENGTH: usize = 1000;

/// Limits applied to every calculation. Loadable from JSON by a host service;
/// missing fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Longest accepted input, in characters, before normalization.
    pub max_expression_length: usize,
    /// Deepest accepted parenthesis nesting.
    pub max_nesting_depth: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_expression_length: DEFAULT_MAX_EXPRESSION_LENGTH,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl CalculatorConfig {
    pub fn with_max_expression_length(mut self, max_expression_length: usize) -> Self {
        self.max_expression_length = max_expression_length;
        self
    }

    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }
}
