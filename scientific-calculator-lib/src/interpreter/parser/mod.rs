mod infix_converter;

use crate::interpreter::parser::infix_converter::infix_to_postfix;
use crate::interpreter::syntax::expression_tree;
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;
use anyhow::{bail, Result};

/// Parses the given canonical tokens into an equivalent expression tree,
/// which is easier to evaluate than the original string.
///
/// # Arguments
///
/// * `infix_tokens`: The tokens to parse, in infix format.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use scientific_calculator::interpreter::parser::parse;
/// use scientific_calculator::interpreter::token::Token;
///
/// let infix_tokens = vec![
///     Token::Literal(3.0),
///     Token::Caret,
///     Token::Literal(2.0),
/// ];
/// let tree = parse(infix_tokens)?;
/// let regenerated_tokens = tree.to_infix();
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn parse(infix_tokens: Vec<Token>) -> Result<Node> {
    if infix_tokens.is_empty() {
        bail!("Nothing to parse");
    }
    let postfix_tokens = infix_to_postfix(infix_tokens)?;
    let tree = expression_tree::new_tree(postfix_tokens)?;
    Ok(tree)
}
