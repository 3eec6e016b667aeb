use crate::interpreter::function::{Constant, Function};
use crate::interpreter::operator::{Associativity, BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_function_call, walk_unary_operation, SyntaxVisitor,
};
use crate::interpreter::token::Token;
use anyhow::{bail, Context, Result};
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, PartialEq)]
pub enum Node {
    // Terminal symbols (leaves)
    Literal(f64),
    Constant(Constant),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Node>,
    },
    FunctionCall {
        function: Function,
        argument: Box<Node>,
    },
}

impl Node {
    pub fn new_literal(value: f64) -> Node {
        Node::Literal(value)
    }

    pub fn new_constant(constant: Constant) -> Node {
        Node::Constant(constant)
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Node,
        right_operand: Node,
    ) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_unary_operation(operator: UnaryOperator, operand: Node) -> Node {
        Node::UnaryOperation {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn new_function_call(function: Function, argument: Node) -> Node {
        Node::FunctionCall {
            function,
            argument: Box::new(argument),
        }
    }

    pub fn as_binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Node::BinaryOperation { operator, .. } => Some(*operator),
            _ => None,
        }
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::Literal(value) => visitor.visit_literal(*value),
            Node::Constant(constant) => visitor.visit_constant(*constant),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Node::UnaryOperation { operator, operand } => {
                visitor.visit_unary_operation(operator, operand)
            }
            Node::FunctionCall { function, argument } => {
                visitor.visit_function_call(function, argument)
            }
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(value) => write!(f, "{:?}", value),
            Node::Constant(constant) => write!(f, "{:?}", constant),
            Node::BinaryOperation { operator, .. } => write!(f, "{:?}", operator),
            Node::UnaryOperation { operator, .. } => write!(f, "{:?}", operator),
            Node::FunctionCall { function, .. } => write!(f, "{:?}", function),
        }
    }
}

/// Generates an expression tree based off of the given tokens.
///
/// # Arguments
///
/// * `postfix_tokens`: Tokens, ordered in postfix notation, to convert to an expression tree.
///
/// returns: The root of the generated expression tree.
pub fn new_tree(mut tokens: Vec<Token>) -> Result<Node> {
    tokens.reverse();
    let mut operands: Vec<Node> = Vec::new();

    while let Some(token) = tokens.pop() {
        match token {
            Token::Literal(value) => operands.push(Node::new_literal(value)),
            Token::Constant(constant) => operands.push(Node::new_constant(constant)),
            Token::Function(function) => {
                let argument = operands.pop().context("Expected a function argument")?;
                operands.push(Node::new_function_call(function, argument));
            }
            Token::Negation => {
                let operand = operands.pop().context("Expected an operand to negate")?;
                operands.push(Node::new_unary_operation(UnaryOperator::Negate, operand));
            }
            Token::LeftParentheses | Token::RightParentheses => {
                bail!("There should not be any parenthesis present in the input")
            }
            _ => {
                let operator = BinaryOperator::from_token(&token)
                    .with_context(|| format!("Unexpected '{}'", token))?;
                let operand_two = operands.pop().context("Expected a second operand")?;
                let operand_one = operands.pop().context("Expected a first operand")?;
                operands.push(Node::new_binary_operation(operator, operand_one, operand_two));
            }
        }
    }

    let root = operands.pop().context("No tree root found")?;
    if !operands.is_empty() {
        bail!("Missing operator between operands");
    }
    Ok(root)
}

impl Node {
    /// Regenerates infix tokens, with only the parentheses that precedence and
    /// associativity require.
    pub fn to_infix(&self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        self.build_expression(&mut tokens);
        Ok(tokens)
    }

    fn build_expression(&self, tokens: &mut Vec<Token>) {
        match self {
            Node::Literal(value) => tokens.push(Token::Literal(*value)),
            Node::Constant(constant) => tokens.push(Token::Constant(*constant)),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => {
                let parenthesize_left = match left_operand.as_ref() {
                    Node::UnaryOperation { .. } => *operator == BinaryOperator::Exponentiate,
                    child => needs_parentheses(child, operator, Associativity::Right),
                };
                let parenthesize_right =
                    needs_parentheses(right_operand, operator, Associativity::Left);

                parenthesize_if(tokens, parenthesize_left, |tokens| {
                    left_operand.build_expression(tokens)
                });
                tokens.push(operator.token());
                parenthesize_if(tokens, parenthesize_right, |tokens| {
                    right_operand.build_expression(tokens)
                });
            }
            Node::UnaryOperation { operator, operand } => {
                tokens.push(operator.token());
                parenthesize_if(tokens, operand.as_binary_operator().is_some(), |tokens| {
                    operand.build_expression(tokens)
                });
            }
            Node::FunctionCall { function, argument } => {
                tokens.push(Token::Function(*function));
                parenthesize_if(tokens, true, |tokens| argument.build_expression(tokens));
            }
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_literal(&mut self, value: f64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_constant(&mut self, constant: Constant) {
        self.builder.add_empty_child(constant.to_string());
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
        self.builder.begin_child(format!("{:?}", operator));
        walk_unary_operation(self, operand);
        self.builder.end_child();
    }
    fn visit_function_call(&mut self, function: &Function, argument: &Node) {
        self.builder.begin_child(function.to_string());
        walk_function_call(self, argument);
        self.builder.end_child();
    }
}

/// Whether `child` must be wrapped when it is an operand of `parent`. A child of
/// equal precedence needs wrapping on the side opposite to the parent's
/// associativity, as in `a - (b - c)` or `(a^b)^c`.
fn needs_parentheses(child: &Node, parent: &BinaryOperator, wrap_when: Associativity) -> bool {
    match child.as_binary_operator() {
        Some(child_operator) => {
            parent.precedence_gt(&child_operator)
                || (parent.precedence_eq(&child_operator) && parent.associativity() == wrap_when)
        }
        None => false,
    }
}

fn parenthesize_if(
    tokens: &mut Vec<Token>,
    predicate: bool,
    build_interior: impl FnOnce(&mut Vec<Token>),
) {
    if predicate {
        tokens.push(Token::LeftParentheses);
    }

    build_interior(tokens);

    if predicate {
        tokens.push(Token::RightParentheses);
    }
}
