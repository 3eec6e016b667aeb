use crate::interpreter::function::{Constant, Function};
use std::fmt;
use std::fmt::Formatter;

/// A discrete part of an expression.
#[derive(Clone, PartialEq)]
pub enum Token {
    Literal(f64),
    Constant(Constant),
    Function(Function),
    Plus,
    Dash,
    Asterisk,
    ForwardSlash,
    Caret,
    Percent,
    /// A `-` in operand position, negating only the operand that follows it.
    /// Never produced by the lexer, only by the normalizer.
    Negation,
    Exclamation,
    /// The `E` of a scientific-notation literal such as `5E3`.
    ExponentMarker,
    LeftParentheses,
    RightParentheses,
}

impl Token {
    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            Token::Plus
                | Token::Dash
                | Token::Asterisk
                | Token::ForwardSlash
                | Token::Caret
                | Token::Percent
        )
    }

    /// Whether a `-` following this token starts a signed operand instead of
    /// being a subtraction.
    pub(crate) fn expects_operand(&self) -> bool {
        self.is_binary_operator()
            || matches!(
                self,
                Token::Negation | Token::LeftParentheses | Token::Function(_)
            )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(value) => write!(f, "{}", value),
            Token::Constant(constant) => write!(f, "{}", constant),
            Token::Function(function) => write!(f, "{}", function),
            Token::Plus => write!(f, "+"),
            Token::Dash | Token::Negation => write!(f, "-"),
            Token::Asterisk => write!(f, "*"),
            Token::ForwardSlash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::Percent => write!(f, "%"),
            Token::Exclamation => write!(f, "!"),
            Token::ExponentMarker => write!(f, "E"),
            Token::LeftParentheses => write!(f, "("),
            Token::RightParentheses => write!(f, ")"),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Negation => write!(f, "neg"),
            _ => write!(f, "{}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_expect_an_operand_after_them() {
        assert!(Token::Asterisk.expects_operand());
        assert!(Token::LeftParentheses.expects_operand());
        assert!(!Token::Literal(2.0).expects_operand());
        assert!(!Token::RightParentheses.expects_operand());
    }

    #[test]
    fn negation_displays_as_a_dash() {
        assert_eq!(Token::Negation.to_string(), "-");
        assert_eq!(format!("{:?}", Token::Negation), "neg");
    }
}
