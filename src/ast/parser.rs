use crate::ast::normalizer::Normalized;
use crate::ast::{ASTNode, Operator, UnaryOperator};
use crate::error::CalcError;
use log::debug;
use pest::error::LineColLocation;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

#[derive(Parser)]
#[grammar = "./expression.pest"] // Link to the grammar file
pub struct ExpressionParser;

type BuildFn = for<'i> fn(&AstBuilder, Pair<'i, Rule>, usize) -> Result<ASTNode, CalcError>;

impl ExpressionParser {
    /// Parses normalized text (see [`crate::ast::normalize`]) into an AST.
    pub fn parse_expression(input: &str) -> Result<ASTNode, CalcError> {
        Self::parse_with_depth_limit(input, DEFAULT_MAX_NESTING_DEPTH)
    }

    /// Parses with an explicit nesting limit. Parentheses, function calls,
    /// unary operators and `**` links each count as one level.
    pub fn parse_with_depth_limit(input: &str, max_depth: usize) -> Result<ASTNode, CalcError> {
        parse_source(input, max_depth, |position| position)
    }

    /// Like [`Self::parse_with_depth_limit`], but error positions refer to the
    /// raw input the text was normalized from.
    pub fn parse_normalized(normalized: &Normalized, max_depth: usize) -> Result<ASTNode, CalcError> {
        parse_source(normalized.as_str(), max_depth, |position| {
            normalized.original_position(position)
        })
    }
}

fn parse_source(
    input: &str,
    max_depth: usize,
    origin: impl Fn(usize) -> usize,
) -> Result<ASTNode, CalcError> {
    debug!("Parsing expression: {}", input);
    check_parentheses(input, max_depth, &origin)?;

    let parse_result = ExpressionParser::parse(Rule::expression, input)
        .map_err(|e| describe_error(e, &origin))?
        .next()
        .ok_or_else(|| CalcError::Parse("failed to parse expression".to_string()))?;

    debug!("Parse result: {:#?}", parse_result);
    let sum = next_pair(&mut parse_result.into_inner(), "expression")?;
    AstBuilder { max_depth }.build_sum(sum, 0)
}

/// Turns pest pairs into an [`ASTNode`], tracking how deeply the tree nests.
struct AstBuilder {
    max_depth: usize,
}

impl AstBuilder {
    fn descend(&self, depth: usize) -> Result<usize, CalcError> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(CalcError::Parse(format!(
                "expression nested deeper than {} levels",
                self.max_depth
            )));
        }
        Ok(depth)
    }

    fn build_sum(&self, pair: Pair<Rule>, depth: usize) -> Result<ASTNode, CalcError> {
        self.build_left_associative(pair, depth, AstBuilder::build_product)
    }

    fn build_product(&self, pair: Pair<Rule>, depth: usize) -> Result<ASTNode, CalcError> {
        self.build_left_associative(pair, depth, AstBuilder::build_power)
    }

    // Chains of + - * / grow the tree to the left only; the evaluator walks
    // that spine iteratively, so the chain length is not a nesting level.
    fn build_left_associative(
        &self,
        pair: Pair<Rule>,
        depth: usize,
        build_operand: BuildFn,
    ) -> Result<ASTNode, CalcError> {
        debug!("Building {:?}: {}", pair.as_rule(), pair.as_str());
        let mut pairs = pair.into_inner();
        let mut node = build_operand(self, next_pair(&mut pairs, "operand")?, depth)?;

        while let Some(operator_pair) = pairs.next() {
            let operator = Operator::try_from(operator_pair.as_str())?;
            let right = build_operand(self, next_pair(&mut pairs, "right operand")?, depth)?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    // a ** b ** c groups as a ** (b ** c)
    fn build_power(&self, pair: Pair<Rule>, depth: usize) -> Result<ASTNode, CalcError> {
        let mut pairs = pair.into_inner();
        let mut operands = vec![self.build_unary(next_pair(&mut pairs, "base")?, depth)?];
        let mut operators = Vec::new();
        let mut link_depth = depth;

        while let Some(operator_pair) = pairs.next() {
            operators.push(Operator::try_from(operator_pair.as_str())?);
            link_depth = self.descend(link_depth)?;
            operands.push(self.build_unary(next_pair(&mut pairs, "exponent")?, link_depth)?);
        }

        let mut node = operands
            .pop()
            .ok_or_else(|| CalcError::Parse("missing exponent".to_string()))?;
        for (left, operator) in operands.into_iter().zip(operators).rev() {
            node = ASTNode::BinaryOperation {
                left: Box::new(left),
                operator,
                right: Box::new(node),
            };
        }

        Ok(node)
    }

    fn build_unary(&self, pair: Pair<Rule>, depth: usize) -> Result<ASTNode, CalcError> {
        let mut operators = Vec::new();
        let mut depth = depth;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::NEGATE | Rule::POSITIVE => {
                    operators.push(UnaryOperator::try_from(inner.as_str())?);
                    depth = self.descend(depth)?;
                }
                _ => {
                    let mut node = self.build_primary(inner, depth)?;
                    for operator in operators.into_iter().rev() {
                        node = ASTNode::UnaryOperation {
                            operator,
                            operand: Box::new(node),
                        };
                    }
                    return Ok(node);
                }
            }
        }

        Err(CalcError::Parse(
            "missing operand after unary operator".to_string(),
        ))
    }

    fn build_primary(&self, pair: Pair<Rule>, depth: usize) -> Result<ASTNode, CalcError> {
        match pair.as_rule() {
            Rule::number => {
                let text = pair.as_str();
                let value = text
                    .parse::<f64>()
                    .map_err(|e| CalcError::Parse(format!("invalid number '{}': {}", text, e)))?;
                Ok(ASTNode::Number(value))
            }
            Rule::identifier => Ok(ASTNode::Constant(pair.as_str().to_string())),
            Rule::group => {
                let inner = next_pair(&mut pair.into_inner(), "parenthesized expression")?;
                self.build_sum(inner, self.descend(depth)?)
            }
            Rule::function_call => self.build_function_call(pair, depth),
            rule => {
                debug_assert!(false, "unexpected rule in primary position: {:?}", rule);
                Err(CalcError::UnsupportedNode(format!("{:?}", rule)))
            }
        }
    }

    fn build_function_call(&self, pair: Pair<Rule>, depth: usize) -> Result<ASTNode, CalcError> {
        let depth = self.descend(depth)?;
        let mut inner = pair.into_inner();
        let name = next_pair(&mut inner, "function name")?.as_str().to_string();
        let args = next_pair(&mut inner, "argument list")?
            .into_inner()
            .map(|arg| self.build_sum(arg, depth))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ASTNode::FunctionCall { name, args })
    }
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, what: &str) -> Result<Pair<'i, Rule>, CalcError> {
    pairs
        .next()
        .ok_or_else(|| CalcError::Parse(format!("missing {}", what)))
}

/// Rejects unbalanced or overly deep parentheses before pest recurses into them.
fn check_parentheses(
    input: &str,
    max_depth: usize,
    origin: &impl Fn(usize) -> usize,
) -> Result<(), CalcError> {
    let mut depth = 0usize;
    for (index, c) in input.chars().enumerate() {
        match c {
            '(' => {
                depth += 1;
                if depth > max_depth {
                    return Err(CalcError::Parse(format!(
                        "parentheses nested deeper than {} levels",
                        max_depth
                    )));
                }
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    CalcError::Parse(format!(
                        "unbalanced parentheses: unexpected ')' at position {}",
                        origin(index + 1)
                    ))
                })?;
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(CalcError::Parse(
            "unbalanced parentheses: missing ')'".to_string(),
        ));
    }
    Ok(())
}

fn describe_rule(rule: &Rule) -> String {
    match rule {
        Rule::number => "number".to_string(),
        Rule::identifier => "identifier".to_string(),
        Rule::function_call => "function call".to_string(),
        Rule::group => "'('".to_string(),
        Rule::unary => "operand".to_string(),
        Rule::PLUS | Rule::POSITIVE => "'+'".to_string(),
        Rule::MINUS | Rule::NEGATE => "'-'".to_string(),
        Rule::STAR => "'*'".to_string(),
        Rule::SLASH => "'/'".to_string(),
        Rule::FLOOR_SLASH => "'//'".to_string(),
        Rule::PERCENT => "'%'".to_string(),
        Rule::POW => "'**'".to_string(),
        Rule::EOI => "end of expression".to_string(),
        other => format!("{:?}", other),
    }
}

fn describe_error(error: pest::error::Error<Rule>, origin: &impl Fn(usize) -> usize) -> CalcError {
    let position = match error.line_col {
        LineColLocation::Pos((_, col)) | LineColLocation::Span((_, col), _) => col,
    };
    let error = error.renamed_rules(describe_rule);
    CalcError::Parse(format!(
        "{} at position {}",
        error.variant.message(),
        origin(position)
    ))
}
