//! AST types for formula expressions.
//!
//! A tree is built once by the parser and never mutated afterwards.

use std::fmt;

use super::functions::Function;

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    BitNot,
    Not,
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Rem,
    BitOr,
    BitAnd,
    BitXor,
    Or,
    And,
    Shl,
    Shr,
    UShr,
    Eq,
    Le,
    Ge,
    Lt,
    Gt,
}

impl UnaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::BitNot => "~",
            UnaryOp::Not => "!",
        }
    }
}

impl BinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
            BinaryOp::Rem => "%",
            BinaryOp::BitOr => "|",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::Eq => "==",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression tree of a formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric literal.
    Constant(f64),
    /// Lookup of a bound name such as `x`, `i` or `PI`.
    Argument(String),
    /// Prefix operation, e.g. `~x`.
    Unary { op: UnaryOp, operand: Box<Node> },
    /// Infix operation, e.g. `x * 2`.
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `condition ? then_branch : else_branch`; only the taken branch is evaluated.
    Ternary {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },
    /// `[a, b, c]`; elements are evaluated on access.
    Array(Vec<Node>),
    /// `array[index]`.
    Index { array: Box<Node>, index: Box<Node> },
    /// Call of a table function, e.g. `max(x, 1)`.
    Call { function: Function, args: Vec<Node> },
}

impl Node {
    pub(crate) fn unary(op: UnaryOp, operand: Node) -> Self {
        Node::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub(crate) fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Whether any call in this subtree draws from the random source.
    pub fn calls_random(&self) -> bool {
        match self {
            Node::Constant(_) | Node::Argument(_) => false,
            Node::Unary { operand, .. } => operand.calls_random(),
            Node::Binary { left, right, .. } => left.calls_random() || right.calls_random(),
            Node::Ternary {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.calls_random() || then_branch.calls_random() || else_branch.calls_random()
            },
            Node::Array(elements) => elements.iter().any(Node::calls_random),
            Node::Index { array, index } => array.calls_random() || index.calls_random(),
            Node::Call { function, args } => {
                *function == Function::Random || args.iter().any(Node::calls_random)
            },
        }
    }
}

/// Fully parenthesized rendering, mainly for diagnostics and tests.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Constant(value) => {
                let mut buf = String::new();
                crate::value::write_number(&mut buf, *value);
                f.write_str(&buf)
            },
            Node::Argument(name) => f.write_str(name),
            Node::Unary { op, operand } => write!(f, "({op}{operand})"),
            Node::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Node::Ternary {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "({condition} ? {then_branch} : {else_branch})"),
            Node::Array(elements) => {
                f.write_str("[")?;
                for (idx, element) in elements.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            },
            Node::Index { array, index } => write!(f, "{array}[{index}]"),
            Node::Call { function, args } => {
                write!(f, "{}(", function.name())?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            },
        }
    }
}
