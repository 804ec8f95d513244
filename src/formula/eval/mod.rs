//! Tree-walking evaluation of parsed formulas.
//!
//! Evaluation never fails. Unbound names, non-numeric operands, bad indexes
//! and the like all produce [`Value::Empty`], which then propagates through
//! every operator that needed a number.

pub(crate) mod ops;

use smallvec::SmallVec;

use super::ast::Node;
use crate::bindings::Bindings;
use crate::value::{LazyArray, Value};

/// Evaluate `node` against `bindings`.
pub(crate) fn evaluate<'a>(node: &'a Node, bindings: &'a Bindings) -> Value<'a> {
    match node {
        Node::Constant(value) => Value::Number(*value),
        Node::Argument(name) => match bindings.get(name) {
            Some(value) => Value::Number(value),
            None => Value::Empty,
        },
        Node::Unary { op, operand } => match evaluate(operand, bindings)
            .as_number()
            .and_then(|value| ops::apply_unary(*op, value))
        {
            Some(value) => Value::Number(value),
            None => Value::Empty,
        },
        Node::Binary { op, left, right } => {
            let left = evaluate(left, bindings).as_number();
            let right = evaluate(right, bindings).as_number();
            match (left, right) {
                (Some(l), Some(r)) => Value::Number(ops::apply_binary(*op, l, r)),
                _ => Value::Empty,
            }
        },
        Node::Ternary {
            condition,
            then_branch,
            else_branch,
        } => match evaluate(condition, bindings).as_number() {
            Some(flag) if ops::is_truthy(flag) => evaluate(then_branch, bindings),
            Some(_) => evaluate(else_branch, bindings),
            None => Value::Empty,
        },
        Node::Array(elements) => Value::Array(LazyArray::new(elements, bindings)),
        Node::Index { array, index } => {
            let array = evaluate(array, bindings).as_array();
            let index = evaluate(index, bindings).as_number();
            match (array, index) {
                (Some(array), Some(index)) => array.at(index),
                _ => Value::Empty,
            }
        },
        Node::Call { function, args } => {
            let mut values: SmallVec<[f64; 4]> = SmallVec::with_capacity(args.len());
            for arg in args {
                match evaluate(arg, bindings).as_number() {
                    Some(value) => values.push(value),
                    None => return Value::Empty,
                }
            }
            Value::Number(function.apply(&values))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::ast::{BinaryOp, UnaryOp};
    use crate::formula::functions::Function;

    fn num(value: f64) -> Node {
        Node::Constant(value)
    }

    fn name(id: &str) -> Node {
        Node::Argument(id.to_string())
    }

    #[test]
    fn test_unbound_name_is_empty() {
        let bindings = Bindings::selection(1.0, 0);
        assert!(evaluate(&name("y"), &bindings).is_empty());
    }

    #[test]
    fn test_empty_propagates_through_operators() {
        let bindings = Bindings::selection(1.0, 0);
        let sum = Node::binary(BinaryOp::Add, num(1.0), name("y"));
        assert!(evaluate(&sum, &bindings).is_empty());

        let negated = Node::unary(UnaryOp::Negate, name("y"));
        assert!(evaluate(&negated, &bindings).is_empty());

        let call = Node::Call {
            function: Function::Max,
            args: vec![num(1.0), name("y")],
        };
        assert!(evaluate(&call, &bindings).is_empty());
    }

    #[test]
    fn test_array_operand_is_not_a_number() {
        let bindings = Bindings::selection(1.0, 0);
        let sum = Node::binary(BinaryOp::Add, Node::Array(vec![num(1.0)]), num(1.0));
        assert!(evaluate(&sum, &bindings).is_empty());
    }

    #[test]
    fn test_negate_node() {
        let bindings = Bindings::selection(4.0, 0);
        let negated = Node::unary(UnaryOp::Negate, name("x"));
        assert_eq!(evaluate(&negated, &bindings).as_number(), Some(-4.0));
    }

    #[test]
    fn test_not_node_is_empty() {
        let bindings = Bindings::selection(0.0, 0);
        let not = Node::unary(UnaryOp::Not, num(0.0));
        assert!(evaluate(&not, &bindings).is_empty());
    }

    #[test]
    fn test_shift_nodes() {
        let bindings = Bindings::selection(0.0, 0);
        let shl = Node::binary(BinaryOp::Shl, num(1.0), num(4.0));
        let ushr = Node::binary(BinaryOp::UShr, num(-1.0), num(28.0));
        assert_eq!(evaluate(&shl, &bindings).as_number(), Some(16.0));
        assert_eq!(evaluate(&ushr, &bindings).as_number(), Some(15.0));
    }

    #[test]
    fn test_ternary_only_evaluates_taken_branch() {
        let bindings = Bindings::selection(0.0, 0);
        // The untaken branch would be Empty; it must not leak into the result.
        let node = Node::Ternary {
            condition: Box::new(name("x")),
            then_branch: Box::new(name("zzz")),
            else_branch: Box::new(num(5.0)),
        };
        assert_eq!(evaluate(&node, &bindings).as_number(), Some(5.0));
    }

    #[test]
    fn test_ternary_with_empty_condition() {
        let bindings = Bindings::selection(0.0, 0);
        let node = Node::Ternary {
            condition: Box::new(name("zzz")),
            then_branch: Box::new(num(1.0)),
            else_branch: Box::new(num(2.0)),
        };
        assert!(evaluate(&node, &bindings).is_empty());
    }

    #[test]
    fn test_index_requires_array_and_number() {
        let bindings = Bindings::selection(0.0, 0);
        let on_number = Node::Index {
            array: Box::new(num(3.0)),
            index: Box::new(num(0.0)),
        };
        assert!(evaluate(&on_number, &bindings).is_empty());

        let with_array_index = Node::Index {
            array: Box::new(Node::Array(vec![num(1.0)])),
            index: Box::new(Node::Array(vec![num(0.0)])),
        };
        assert!(evaluate(&with_array_index, &bindings).is_empty());
    }
}
