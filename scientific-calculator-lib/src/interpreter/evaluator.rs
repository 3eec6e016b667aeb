use crate::interpreter::angle::AngleMode;
use crate::interpreter::syntax::expression_tree::Node;

/// Computes the value of an expression tree, bottom-up.
///
/// Evaluation itself cannot fail: division by zero gives a signed infinity and
/// out-of-domain function arguments give NaN, both left for the caller to
/// report.
///
/// # Arguments
///
/// * `tree`: The root of the expression tree.
/// * `angle_mode`: The unit trigonometric functions work in.
///
/// returns: The numeric value, possibly infinite or NaN.
pub fn evaluate(tree: &Node, angle_mode: AngleMode) -> f64 {
    match tree {
        Node::Literal(value) => *value,
        Node::Constant(constant) => constant.value(),
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => {
            let left = evaluate(left_operand, angle_mode);
            let right = evaluate(right_operand, angle_mode);
            operator.evaluate(left, right)
        }
        Node::UnaryOperation { operator, operand } => {
            operator.evaluate(evaluate(operand, angle_mode))
        }
        Node::FunctionCall { function, argument } => {
            function.apply(evaluate(argument, angle_mode), angle_mode)
        }
    }
}
