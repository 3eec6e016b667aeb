use crate::interpreter::function::{Constant, Function};
use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::expression_tree::Node;

/// Read-only traversal of an expression tree. Unimplemented methods descend
/// into the children, so an implementor only handles the nodes it cares about.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_literal(&mut self, _value: f64) {}
    fn visit_constant(&mut self, _constant: Constant) {}
    fn visit_binary_operation(
        &mut self,
        _operation: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_binary_operation(self, left_operand, right_operand)
    }
    fn visit_unary_operation(&mut self, _operation: &UnaryOperator, operand: &Node) {
        walk_unary_operation(self, operand)
    }
    fn visit_function_call(&mut self, _function: &Function, argument: &Node) {
        walk_function_call(self, argument)
    }
}

pub(crate) fn walk_binary_operation(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Node,
    right_operand: &Node,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

pub(crate) fn walk_unary_operation(visitor: &mut impl SyntaxVisitor, operand: &Node) {
    operand.accept(visitor);
}

pub(crate) fn walk_function_call(visitor: &mut impl SyntaxVisitor, argument: &Node) {
    argument.accept(visitor);
}
