//! Rewrites surface syntax into the canonical token stream the parser accepts.

use crate::interpreter::error::EvaluationError;
use crate::interpreter::lexer;
use crate::interpreter::token::Token;
use anyhow::{bail, Result};

/// Largest argument whose factorial still fits in a `u64`.
const MAX_FACTORIAL: u64 = 20;

/// Converts raw expression text into canonical tokens.
///
/// The passes run in a fixed order: glyph substitution, bracket completion,
/// tokenizing (which resolves constants), the leading-minus rewrite, the
/// scientific-notation rewrite, factorial pre-evaluation and finally the
/// marking of signed operands.
///
/// # Arguments
///
/// * `expression`: The expression as the user typed it, possibly incomplete.
///
/// returns: Tokens in infix order, ready for [`crate::interpreter::parser::parse`].
pub fn normalize(expression: &str) -> Result<Vec<Token>> {
    let substituted = substitute_symbols(expression);
    let completed = complete_brackets(&substituted);
    let tokens = lexer::tokenize(&completed)?;
    let tokens = wrap_leading_minus(tokens);
    let tokens = expand_scientific_notation(tokens);
    let tokens = expand_factorials(tokens)?;
    Ok(mark_negations(tokens))
}

pub fn substitute_symbols(expression: &str) -> String {
    expression
        .replace('×', "*")
        .replace('÷', "/")
        .replace('√', "sqrt")
}

/// Closes every unmatched `(` so that incomplete input such as `sin(30` can be
/// previewed.
pub fn complete_brackets(expression: &str) -> String {
    let opened = expression.matches('(').count();
    let closed = expression.matches(')').count();
    let missing = opened.saturating_sub(closed);
    format!("{}{}", expression, ")".repeat(missing))
}

/// `-<rest>` becomes `(0-<rest>)`, so a leading minus applies to the whole first
/// term: `-2^2` is `-4`.
fn wrap_leading_minus(tokens: Vec<Token>) -> Vec<Token> {
    if tokens.first() != Some(&Token::Dash) {
        return tokens;
    }
    let mut wrapped = Vec::with_capacity(tokens.len() + 3);
    wrapped.push(Token::LeftParentheses);
    wrapped.push(Token::Literal(0.0));
    wrapped.extend(tokens);
    wrapped.push(Token::RightParentheses);
    wrapped
}

/// `5E3` becomes `5*10^(3)` and `5E-3` becomes `5*10^(-3)`.
///
/// A marker that is not between a number and an integer exponent is left in
/// place for the parser to reject.
fn expand_scientific_notation(tokens: Vec<Token>) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut index = 0;

    while index < tokens.len() {
        if tokens[index] == Token::ExponentMarker
            && matches!(output.last(), Some(Token::Literal(_)))
        {
            if let Some((sign, exponent, consumed)) = read_exponent(&tokens[index + 1..]) {
                output.extend([
                    Token::Asterisk,
                    Token::Literal(10.0),
                    Token::Caret,
                    Token::LeftParentheses,
                ]);
                if let Some(sign) = sign {
                    output.push(sign);
                }
                output.push(Token::Literal(exponent));
                output.push(Token::RightParentheses);
                index += 1 + consumed;
                continue;
            }
        }
        output.push(tokens[index].clone());
        index += 1;
    }

    output
}

/// Reads `[+|-]digits` following an exponent marker, returning the sign to keep,
/// the exponent and how many tokens were consumed.
fn read_exponent(tokens: &[Token]) -> Option<(Option<Token>, f64, usize)> {
    let (sign, rest) = match tokens.first()? {
        Token::Plus => (None, &tokens[1..]),
        Token::Dash => (Some(Token::Dash), &tokens[1..]),
        _ => (None, tokens),
    };
    let consumed = tokens.len() - rest.len() + 1;
    match rest.first()? {
        Token::Literal(exponent) if exponent.fract() == 0.0 => Some((sign, *exponent, consumed)),
        _ => None,
    }
}

/// Replaces every `n!` by the value of `n!`, left to right, so `3!!` is `720`.
fn expand_factorials(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        if token != Token::Exclamation {
            output.push(token);
            continue;
        }
        match output.pop() {
            Some(Token::Literal(value)) => output.push(Token::Literal(factorial(value)?)),
            Some(Token::RightParentheses) | Some(Token::Constant(_)) => {
                return Err(EvaluationError::FactorialDomain(
                    "Factorial only applies directly to a number".into(),
                )
                .into());
            }
            _ => bail!("Factorial is missing its operand"),
        }
    }

    Ok(output)
}

/// `n!` for whole numbers `0 ≤ n ≤ 20`.
pub fn factorial(value: f64) -> Result<f64> {
    if value < 0.0 {
        return Err(EvaluationError::FactorialDomain("Negative factorial".into()).into());
    }
    if value.fract() != 0.0 {
        return Err(EvaluationError::FactorialDomain(
            "Factorial requires a non-negative whole number".into(),
        )
        .into());
    }
    if value > MAX_FACTORIAL as f64 {
        return Err(EvaluationError::FactorialDomain("Factorial too large".into()).into());
    }
    let product: u64 = (2..=value as u64).product();
    Ok(product as f64)
}

/// A `-` where an operand is expected negates only the operand that follows:
/// `a+-b` is `a+(0-b)` and `a--b` is `a+b`.
fn mark_negations(tokens: Vec<Token>) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        let in_operand_position = match output.last() {
            None => true,
            Some(previous) => previous.expects_operand(),
        };
        if token == Token::Dash && in_operand_position {
            output.push(Token::Negation);
        } else {
            output.push(token);
        }
    }

    output
}
