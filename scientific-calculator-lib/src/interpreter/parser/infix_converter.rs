use crate::interpreter::operator::{Associativity, BinaryOperator, UnaryOperator};
use crate::interpreter::token::Token;
use anyhow::{bail, Context, Result};
use std::collections::VecDeque;

/// Reorders infix tokens into postfix order using the shunting-yard algorithm.
///
/// Functions must be directly followed by `(`, and are emitted once their
/// argument's closing parenthesis is reached. Operands and operators must
/// alternate: an operator or `)` where an operand belongs, and an operand or
/// `(` directly after another operand, are rejected.
pub(super) fn infix_to_postfix(original_tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut tokens: VecDeque<Token> = VecDeque::from(original_tokens);
    let mut operators: VecDeque<Token> = VecDeque::new();
    let mut output: Vec<Token> = vec![];
    let mut expects_operand = true;

    while let Some(token) = tokens.pop_front() {
        match token {
            Token::Literal(_) | Token::Constant(_) => {
                if !expects_operand {
                    bail!("Missing operator before '{}'", token);
                }
                output.push(token);
                expects_operand = false;
            }
            Token::Function(function) => {
                if !expects_operand {
                    bail!("Missing operator before '{}'", function);
                }
                if tokens.front() != Some(&Token::LeftParentheses) {
                    bail!("Function '{}' must be followed by '('", function);
                }
                operators.push_front(token)
            }
            Token::LeftParentheses | Token::Negation => {
                if !expects_operand {
                    bail!("Missing operator before '{}'", token);
                }
                operators.push_front(token)
            }
            Token::RightParentheses => {
                if expects_operand {
                    bail!("Missing operand before ')'");
                }
                parse_closing_parenthesis_token(&mut operators, &mut output)?
            }
            Token::Plus
            | Token::Dash
            | Token::Asterisk
            | Token::ForwardSlash
            | Token::Caret
            | Token::Percent => {
                if expects_operand {
                    bail!("Missing operand before '{}'", token);
                }
                parse_operator_token(&mut operators, &mut output, token)?;
                expects_operand = true;
            }
            Token::Exclamation | Token::ExponentMarker => {
                bail!("Unexpected '{}'", token)
            }
        };
    }

    if expects_operand {
        bail!("Expected an operand at the end");
    }
    transfer_leftover_operators(&mut operators, &mut output)?;

    Ok(output)
}

fn transfer_leftover_operators(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
) -> Result<()> {
    while let Some(operator) = operators.pop_front() {
        match operator {
            Token::LeftParentheses | Token::RightParentheses => {
                bail!("Mismatched parenthesis");
            }
            operator => output.push(operator),
        }
    }
    Ok(())
}

fn parse_closing_parenthesis_token(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
) -> Result<()> {
    loop {
        match operators.front() {
            None => {
                bail!("Mismatched parenthesis");
            }
            Some(top_of_operator_stack) => {
                if Token::LeftParentheses.eq(top_of_operator_stack) {
                    break;
                }
                let operator = operators
                    .pop_front()
                    .with_context(|| "No operators left.")?;
                output.push(operator);
            }
        }
    }
    // Discard the open parenthesis.
    operators.pop_front();

    if let Some(Token::Function(_)) = operators.front() {
        let function = operators
            .pop_front()
            .with_context(|| "No operators left.")?;
        output.push(function);
    }
    Ok(())
}

fn parse_operator_token(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
    token: Token,
) -> Result<()> {
    let operator = BinaryOperator::from_token(&token)
        .with_context(|| format!("Token {} is not an operator", token))?;

    while let Some(top_of_operator_stack) = operators.front() {
        let (other_precedence, _) = match stacked_precedence(top_of_operator_stack) {
            Some(ordering) => ordering,
            None => break,
        };
        let should_pop = other_precedence > operator.precedence()
            || (other_precedence == operator.precedence()
                && operator.associativity() == Associativity::Left);
        if !should_pop {
            break;
        }

        let other_operator_token = operators
            .pop_front()
            .with_context(|| "No operators left.")?;
        output.push(other_operator_token);
    }

    operators.push_front(token);
    Ok(())
}

/// Precedence and associativity of an operator waiting on the stack, or `None`
/// for tokens that stop popping, such as `(`.
fn stacked_precedence(token: &Token) -> Option<(u8, Associativity)> {
    if *token == Token::Negation {
        let negate = UnaryOperator::Negate;
        return Some((negate.precedence(), negate.associativity()));
    }
    BinaryOperator::from_token(token).map(|operator| (operator.precedence(), operator.associativity()))
}
