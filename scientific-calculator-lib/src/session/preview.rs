//! Live preview of an expression that is still being typed.

use crate::interpreter::angle::AngleMode;
use crate::interpreter::calculate;
use crate::interpreter::error::EvaluationError;
use crate::interpreter::normalizer::complete_brackets;
use lazy_static::lazy_static;
use regex::Regex;

const OPERATOR_SYMBOLS: [char; 8] = ['+', '-', '*', '/', '^', '%', '×', '÷'];

lazy_static! {
    /// A number with nothing to calculate, optionally negative.
    static ref BARE_NUMBER: Regex = Regex::new(r"^-?\d+(\.\d+)?$").unwrap();

    /// Any operator, function name, constant, factorial or exponent marker.
    static ref CALCULATION: Regex = Regex::new(r"[-+*/^%×÷a-zπ√!E]").unwrap();
}

/// What the display shows after an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewResult {
    pub expression_text: String,
    /// The formatted value of the expression so far, if there is anything
    /// worth showing.
    pub preview_text: Option<String>,
    /// Set when a preview was attempted but the expression did not evaluate to a
    /// finite number.
    pub is_error: bool,
}

/// Best-effort value of an expression that may still be incomplete.
///
/// Nothing is previewed for an empty expression, one ending in an operator,
/// a bare number, or text containing nothing to calculate. Unclosed
/// parentheses are closed before evaluating.
///
/// returns: `Ok(None)` when there is nothing to preview, the formatted value,
/// or the reason evaluation failed.
pub fn live_preview(
    expression: &str,
    angle_mode: AngleMode,
) -> Result<Option<String>, EvaluationError> {
    if expression.is_empty() || ends_with_operator(expression) {
        return Ok(None);
    }
    let completed = complete_brackets(expression);
    if !is_evaluable(&completed) {
        return Ok(None);
    }
    calculate(&completed, angle_mode).map(Some)
}

pub(crate) fn is_operator_symbol(character: char) -> bool {
    OPERATOR_SYMBOLS.contains(&character)
}

pub(crate) fn ends_with_operator(expression: &str) -> bool {
    expression.chars().last().map_or(false, is_operator_symbol)
}

/// Whether the expression does anything beyond stating a number.
fn is_evaluable(expression: &str) -> bool {
    !is_bare_number(expression) && CALCULATION.is_match(expression)
}

fn is_bare_number(expression: &str) -> bool {
    BARE_NUMBER.is_match(expression)
}
