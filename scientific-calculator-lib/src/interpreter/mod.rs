pub mod angle;
pub mod error;
pub mod evaluator;
pub mod formatter;
pub mod function;
pub mod lexer;
pub mod normalizer;
pub mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

use crate::interpreter::angle::AngleMode;
use crate::interpreter::error::EvaluationError;
use crate::interpreter::formatter::format_result;
use crate::interpreter::token::Token;
use anyhow::{Context, Result};
use log::debug;
use string_builder::Builder;
use syntax::expression_tree::Node;

/// Evaluates the given expression and formats the result for display.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format. Unclosed parentheses are
///   closed automatically.
/// * `angle_mode`: The unit trigonometric functions work in.
///
/// returns: The formatted result, or why there is none.
///
/// # Examples
///
/// ```
/// use scientific_calculator::interpreter::angle::AngleMode;
/// use scientific_calculator::interpreter::calculate;
///
/// let result = calculate("sin(30", AngleMode::Degrees);
/// assert_eq!(result, Ok("0.5".to_string()));
/// ```
pub fn calculate(expression: &str, angle_mode: AngleMode) -> Result<String, EvaluationError> {
    let value = evaluate(expression, angle_mode)?;
    let value = EvaluationError::check_finite(value)?;
    Ok(format_result(value))
}

/// Evaluates the given expression to its raw numeric value.
///
/// Division by zero and out-of-domain arguments are not errors here; they
/// produce an infinity or NaN.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
/// * `angle_mode`: The unit trigonometric functions work in.
///
/// returns: The value of the expression.
pub fn evaluate(expression: &str, angle_mode: AngleMode) -> Result<f64, EvaluationError> {
    if expression.trim().is_empty() {
        return Err(EvaluationError::EmptyExpression);
    }
    let tree = convert(expression).map_err(EvaluationError::from_pipeline)?;
    let value = evaluator::evaluate(&tree, angle_mode);
    debug!("{} = {} ({})", expression, value, angle_mode);
    Ok(value)
}

/// Converts the given input string into an equivalent expression tree,
/// which is easier to evaluate than the original string.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use scientific_calculator::interpreter::convert;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let expression = "2^3";
/// let tree = convert(expression)?;
/// let regenerated_tokens = tree.to_infix();
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn convert(expression: &str) -> Result<Node> {
    let tokens = normalizer::normalize(expression)
        .with_context(|| format!("Could not read '{}'", expression))?;
    debug!("canonical tokens: {:?}", tokens);
    let expression_tree = parser::parse(tokens)?;
    Ok(expression_tree)
}

/// Rewrites the given expression in canonical form: constants resolved,
/// factorials and scientific notation expanded, redundant parentheses removed.
///
/// # Examples
///
/// ```
/// use scientific_calculator::interpreter::canonicalize;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let canonical = canonicalize("((2))×3!")?;
/// assert_eq!(canonical, "2 * 6");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn canonicalize(expression: &str) -> Result<String> {
    let tree = convert(expression)?;
    tokens_to_string(tree.to_infix()?)
}

/// Pretty-prints the given vector of tokens with added whitespace.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use scientific_calculator::interpreter::tokens_to_string;
/// use scientific_calculator::interpreter::token::Token;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = vec![
///     Token::Literal(2.0),
///     Token::Caret,
///     Token::Negation,
///     Token::Literal(1.0),
/// ];
/// let pretty_printed_tokens = tokens_to_string(tokens)?;
/// assert_eq!(pretty_printed_tokens, "2^-1");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: Vec<Token>) -> Result<String> {
    let mut builder = Builder::new(tokens.len());

    for token in tokens {
        match token {
            Token::Plus | Token::Dash | Token::Asterisk | Token::ForwardSlash | Token::Percent => {
                builder.append(" ");
                builder.append(token.to_string());
                builder.append(" ");
            }
            _ => builder.append(token.to_string()),
        }
    }

    builder.string().context("Failed to build token string")
}

#[cfg(test)]
mod interpreter_tests {
    use super::*;
    use parameterized_macro::parameterized;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_expression_regenerates_to_itself() {
        let expression = "1 + 2";

        let regenerated_expression = canonicalize(expression).unwrap();

        assert_eq!(regenerated_expression, expression)
    }

    #[test]
    fn complex_expression_regenerates_to_itself() {
        let expression = "1 + 2 * (3 - 4) / sin(5)^2 % 7";

        let regenerated_expression = canonicalize(expression).unwrap();

        assert_eq!(regenerated_expression, expression)
    }

    #[test]
    fn redundant_parentheses_are_stripped_when_regenerating() {
        let redundant_expression = "1 + ((2) * ((3 - 4)) / (5^2))";
        let expected_expression = "1 + 2 * (3 - 4) / 5^2";

        let regenerated_expression = canonicalize(redundant_expression).unwrap();

        assert_eq!(regenerated_expression, expected_expression)
    }

    #[test]
    fn leading_minus_regenerates_as_subtraction_from_zero() {
        let regenerated_expression = canonicalize("-2^2").unwrap();

        assert_eq!(regenerated_expression, "0 - 2^2")
    }

    #[parameterized(
    expression = {
    "2+3*4",
    "10/4",
    "2^10",
    "5!",
    "(2+3",
    "√(16",
    "6÷4×2",
    "π",
    "1/3",
    "0.1+0.2",
    "2E12+0.5",
    "4.0*1",
    },
    expected_result = {
    "14",
    "2.5",
    "1024",
    "120",
    "5",
    "4",
    "3",
    "3.1415926536",
    "0.3333333333",
    "0.3",
    "2.0000E+12",
    "4",
    }
    )]
    fn calculate_expression_returns_formatted_result(expression: &str, expected_result: &str) {
        let actual_result = calculate(expression, AngleMode::Raw).unwrap();
        pretty_assertions::assert_eq!(actual_result, expected_result);
    }

    #[test]
    fn sine_of_ninety_depends_on_angle_mode() {
        assert_eq!(calculate("sin(90)", AngleMode::Degrees).unwrap(), "1");
        assert_eq!(
            calculate("sin(90)", AngleMode::Radians).unwrap(),
            format_result(90f64.sin())
        );
        assert_eq!(
            calculate("sin(90)", AngleMode::Raw),
            calculate("sin(90)", AngleMode::Radians)
        );
    }

    #[test]
    fn unclosed_bracket_previews_like_closed_one() {
        assert_eq!(
            calculate("sin(30", AngleMode::Degrees),
            calculate("sin(30)", AngleMode::Degrees)
        );
    }

    #[test]
    fn inverse_trigonometry_in_degrees() {
        assert_eq!(calculate("asin(1)", AngleMode::Degrees).unwrap(), "90");
        assert_eq!(calculate("atan(1)", AngleMode::Degrees).unwrap(), "45");
    }

    #[parameterized(
    expression = {
    "5/0",
    "-5/0",
    "asin(2)",
    "sqrt(-1)",
    "ln(0)",
    "",
    "   ",
    "21!",
    "(-1)!",
    "2+",
    "sin(",
    "5+(-)3",
    "2*()3",
    },
    expected_error = {
    EvaluationError::DivisionByInfinity,
    EvaluationError::DivisionByInfinity,
    EvaluationError::InvalidOperation,
    EvaluationError::InvalidOperation,
    EvaluationError::DivisionByInfinity,
    EvaluationError::EmptyExpression,
    EvaluationError::EmptyExpression,
    EvaluationError::FactorialDomain("Factorial too large".into()),
    EvaluationError::FactorialDomain("Factorial only applies directly to a number".into()),
    EvaluationError::Syntax(String::new()),
    EvaluationError::Syntax(String::new()),
    EvaluationError::Syntax(String::new()),
    EvaluationError::Syntax(String::new()),
    }
    )]
    fn calculate_expression_returns_error_kind(expression: &str, expected_error: EvaluationError) {
        let actual_error = calculate(expression, AngleMode::Raw).unwrap_err();

        match expected_error {
            EvaluationError::Syntax(_) => {
                assert!(matches!(actual_error, EvaluationError::Syntax(_)))
            }
            expected_error => pretty_assertions::assert_eq!(actual_error, expected_error),
        }
    }

    #[test]
    fn syntax_error_message_names_the_problem() {
        let error = calculate("2+", AngleMode::Raw).unwrap_err();

        assert_eq!(
            error.to_string(),
            "Invalid expression: Expected an operand at the end"
        );
    }
}
