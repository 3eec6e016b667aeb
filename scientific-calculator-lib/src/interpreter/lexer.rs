use crate::interpreter::function::{Constant, Function};
use crate::interpreter::token::Token;
use anyhow::{bail, Context, Result};
use itertools::Itertools;
use std::iter::Peekable;
use std::str::Chars;

/// Splits canonical expression text into tokens.
///
/// Identifiers are read as whole lowercase runs, so the constant `e` is only
/// recognised when it stands alone and can never be confused with the `e`
/// inside `exp`.
///
/// # Arguments
///
/// * `expression`: Text where visual glyphs have already been substituted.
///
/// returns: The tokens of the expression, in infix order.
pub fn tokenize(expression: &str) -> Result<Vec<Token>> {
    let mut characters = expression.chars().peekable();
    let mut tokens = Vec::new();

    while let Some(&character) = characters.peek() {
        let token = match character {
            character if character.is_whitespace() => {
                characters.next();
                continue;
            }
            '0'..='9' | '.' => read_number(&mut characters)?,
            'a'..='z' => read_identifier(&mut characters)?,
            _ => {
                characters.next();
                read_symbol(character)?
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn read_number(characters: &mut Peekable<Chars>) -> Result<Token> {
    let mut text = String::new();
    while let Some(&character) = characters.peek() {
        if !(character.is_ascii_digit() || character == '.') {
            break;
        }
        text.push(character);
        characters.next();
    }
    let value = text
        .parse::<f64>()
        .with_context(|| format!("Malformed number '{}'", text))?;
    Ok(Token::Literal(value))
}

fn read_identifier(characters: &mut Peekable<Chars>) -> Result<Token> {
    let mut name = String::new();
    while let Some(&character) = characters.peek() {
        if !(character.is_ascii_lowercase() || character.is_ascii_digit()) {
            break;
        }
        name.push(character);
        characters.next();
    }

    if name == "e" {
        return Ok(Token::Constant(Constant::Euler));
    }
    match Function::lookup(&name) {
        Some(function) => Ok(Token::Function(function)),
        None => bail!(
            "Unknown identifier '{}', expected one of {}",
            name,
            Function::names().join(", ")
        ),
    }
}

fn read_symbol(character: char) -> Result<Token> {
    let token = match character {
        '+' => Token::Plus,
        '-' => Token::Dash,
        '*' => Token::Asterisk,
        '/' => Token::ForwardSlash,
        '^' => Token::Caret,
        '%' => Token::Percent,
        '!' => Token::Exclamation,
        'E' => Token::ExponentMarker,
        '(' => Token::LeftParentheses,
        ')' => Token::RightParentheses,
        'π' => Token::Constant(Constant::Pi),
        other => bail!("Unexpected character '{}'", other),
    };
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_expression_returns_tokens() {
        let tokens = tokenize("2 + 3.5*4").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Literal(2.0),
                Token::Plus,
                Token::Literal(3.5),
                Token::Asterisk,
                Token::Literal(4.0),
            ]
        );
    }

    #[test]
    fn functions_and_constants_are_recognised() {
        let tokens = tokenize("exp(e)+sin(π)").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Function(Function::Exp),
                Token::LeftParentheses,
                Token::Constant(Constant::Euler),
                Token::RightParentheses,
                Token::Plus,
                Token::Function(Function::Sin),
                Token::LeftParentheses,
                Token::Constant(Constant::Pi),
                Token::RightParentheses,
            ]
        );
    }

    #[test]
    fn log10_is_a_single_identifier() {
        let tokens = tokenize("log10(100)").unwrap();

        assert_eq!(tokens[0], Token::Function(Function::CommonLogarithm));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn scientific_and_factorial_markers_are_kept() {
        let tokens = tokenize("5E3!").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Literal(5.0),
                Token::ExponentMarker,
                Token::Literal(3.0),
                Token::Exclamation,
            ]
        );
    }

    #[test]
    fn unknown_identifier_returns_err() {
        let error = tokenize("foo(2)").expect_err("Should return Err");
        assert!(error.to_string().starts_with("Unknown identifier 'foo'"));
        assert!(error.to_string().ends_with("sqrt, exp"));
        tokenize("ee").expect_err("Should return Err");
    }

    #[test]
    fn malformed_number_returns_err() {
        tokenize("1.2.3").expect_err("Should return Err");
        tokenize(".").expect_err("Should return Err");
    }

    #[test]
    fn unexpected_character_returns_err() {
        tokenize("2 & 3").expect_err("Should return Err");
    }

    #[test]
    fn empty_input_returns_no_tokens() {
        assert!(tokenize("  ").unwrap().is_empty());
    }
}
