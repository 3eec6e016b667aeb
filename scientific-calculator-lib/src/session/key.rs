use crate::interpreter::function::{Constant, Function};
use crate::interpreter::operator::BinaryOperator;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// A single keystroke on the calculator keypad.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Point,
    Operator(BinaryOperator),
    OpenParenthesis,
    CloseParenthesis,
    Function(Function),
    Constant(Constant),
    Factorial,
    /// The `E` of scientific notation.
    Exponent,
    /// Squares the preceding operand by appending `^2`.
    Square,
    /// Inserts the last successfully calculated result.
    Answer,
}

impl Key {
    /// Whether this key starts a new expression when pressed right after a
    /// result is shown, rather than continuing from it.
    pub(crate) fn starts_fresh(&self) -> bool {
        matches!(
            self,
            Key::Digit(_)
                | Key::Point
                | Key::OpenParenthesis
                | Key::Function(_)
                | Key::Constant(_)
        )
    }

    /// The text this key appends to the expression, ignoring the inverse flag.
    pub(crate) fn text(&self) -> String {
        match self {
            Key::Digit(digit) => digit.to_string(),
            Key::Point => ".".into(),
            Key::Operator(operator) => operator.to_string(),
            Key::OpenParenthesis => "(".into(),
            Key::CloseParenthesis => ")".into(),
            Key::Function(Function::SquareRoot) => "√(".into(),
            Key::Function(function) => format!("{}(", function),
            Key::Constant(constant) => constant.to_string(),
            Key::Factorial => "!".into(),
            Key::Exponent => "E".into(),
            Key::Square => "^2".into(),
            Key::Answer => String::new(),
        }
    }

    /// The text this key appends while the inverse flag is set, if it has an
    /// inverse at all.
    pub(crate) fn inverse_text(&self) -> Option<&'static str> {
        match self {
            Key::Function(Function::Sin) => Some("asin("),
            Key::Function(Function::Cos) => Some("acos("),
            Key::Function(Function::Tan) => Some("atan("),
            Key::Function(Function::NaturalLogarithm) => Some("exp("),
            Key::Function(Function::CommonLogarithm) => Some("10^("),
            _ => None,
        }
    }
}

impl FromStr for Key {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Key, Self::Err> {
        let key = match input {
            digit if digit.len() == 1 && digit.chars().all(|c| c.is_ascii_digit()) => {
                Key::Digit(digit.chars().next().unwrap_or('0'))
            }
            "." => Key::Point,
            "+" => Key::Operator(BinaryOperator::Add),
            "-" => Key::Operator(BinaryOperator::Subtract),
            "*" | "×" => Key::Operator(BinaryOperator::Multiply),
            "/" | "÷" => Key::Operator(BinaryOperator::Divide),
            "^" => Key::Operator(BinaryOperator::Exponentiate),
            "%" => Key::Operator(BinaryOperator::Modulo),
            "(" => Key::OpenParenthesis,
            ")" => Key::CloseParenthesis,
            "!" => Key::Factorial,
            "E" => Key::Exponent,
            "x²" | "^2" => Key::Square,
            "π" | "pi" => Key::Constant(Constant::Pi),
            "e" => Key::Constant(Constant::Euler),
            "√" => Key::Function(Function::SquareRoot),
            "ans" => Key::Answer,
            name => Key::Function(
                Function::lookup(name).ok_or_else(|| anyhow!("Unknown key '{}'", name))?,
            ),
        };
        Ok(key)
    }
}
