use crate::ast::{ASTNode, Operator};
use crate::error::CalcError;
use crate::functions::{constants, FunctionTable};
use log::{debug, trace};

/// Evaluates an AST by dispatching only through the operator enums and the
/// global [`FunctionTable`]. Holds no per-call state.
#[derive(Clone, Copy)]
pub struct Evaluator {
    functions: &'static FunctionTable,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            functions: FunctionTable::global(),
        }
    }

    /// Evaluates an `ASTNode` to a finite `f64`.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if every node evaluates to a finite value.
    /// * `Err(CalcError)` for names outside the whitelist, wrong argument counts,
    ///   division by zero, or any value that is NaN or infinite.
    pub fn evaluate(&self, ast: &ASTNode) -> Result<f64, CalcError> {
        let result = self.evaluate_node(ast);
        debug!("Evaluated AST: {:?}", result);
        result
    }

    fn evaluate_node(&self, ast: &ASTNode) -> Result<f64, CalcError> {
        let value = match ast {
            ASTNode::Number(n) => *n,

            ASTNode::Constant(name) => constants::lookup(name)
                .ok_or_else(|| CalcError::UnsupportedIdentifier(name.clone()))?,

            ASTNode::UnaryOperation { operator, operand } => {
                let operand_value = self.evaluate_node(operand)?;
                operator.apply(operand_value)?
            }

            ASTNode::BinaryOperation {
                left,
                operator: Operator::Power,
                right,
            } => {
                let base = self.evaluate_node(left)?;
                let exponent = self.evaluate_node(right)?;
                trace!("Applying ** to {} and {}", base, exponent);
                Operator::Power.apply(base, exponent)?
            }

            ASTNode::BinaryOperation { .. } => self.evaluate_left_chain(ast)?,

            ASTNode::FunctionCall { name, args } => {
                let function = self
                    .functions
                    .get(name)
                    .ok_or_else(|| CalcError::UnsupportedFunction(name.clone()))?;

                let values = args
                    .iter()
                    .map(|arg| self.evaluate_node(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                trace!("Calling {}({:?})", name, values);
                function(&values)?
            }
        };

        ensure_finite(value)
    }

    // Walks down the left spine of a + - * / chain instead of recursing into
    // it, then applies the operators from the innermost outwards.
    fn evaluate_left_chain(&self, ast: &ASTNode) -> Result<f64, CalcError> {
        let mut spine = Vec::new();
        let mut current = ast;
        while let ASTNode::BinaryOperation {
            left,
            operator,
            right,
        } = current
        {
            if *operator == Operator::Power {
                break;
            }
            spine.push((*operator, right.as_ref()));
            current = left.as_ref();
        }

        let mut value = self.evaluate_node(current)?;
        for (operator, right) in spine.into_iter().rev() {
            let right_value = self.evaluate_node(right)?;
            trace!("Applying {} to {} and {}", operator, value, right_value);
            value = ensure_finite(operator.apply(value, right_value)?)?;
        }
        Ok(value)
    }
}

fn ensure_finite(value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Domain(format!(
            "result is not a finite real number ({})",
            value
        )))
    }
}
