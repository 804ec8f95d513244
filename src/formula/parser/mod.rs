//! Formula text to AST.
//!
//! There is no tokenizer. The parser works directly on substrings:
//!
//! 1. Trim the text, remembering how much leading whitespace went away.
//! 2. Check bracket nesting.
//! 3. Try each precedence level from lowest to highest. A binary level splits
//!    at the rightmost top-level occurrence of its operator and recurses into
//!    both sides, which yields left-associative trees.
//! 4. Otherwise fall back to groups, arrays, indexing, calls, names and
//!    numbers.
//!
//! Errors carry byte offsets relative to the text handed to [`resolve`]; every
//! recursive step shifts them by the start of the slice it recursed into.

pub(crate) mod literal;
mod operator;

use log::trace;

use crate::error::{ErrorKind, ParseError, Result};
use crate::formula::ast::{BinaryOp, Node, UnaryOp};
use crate::formula::functions::Function;
use crate::formula::scan::{find_all_top_level, find_last_top_level, validate_brackets};
use literal::{is_function_name, is_identifier, parse_number_literal};
use operator::{Level, try_match};

/// Precedence levels, lowest first.
const PRECEDENCE: [Level; 22] = [
    Level::Ternary,
    Level::Binary(BinaryOp::Or),
    Level::Binary(BinaryOp::And),
    Level::Binary(BinaryOp::BitOr),
    Level::Binary(BinaryOp::BitXor),
    Level::Binary(BinaryOp::BitAnd),
    Level::Binary(BinaryOp::Eq),
    Level::Binary(BinaryOp::Le),
    Level::Binary(BinaryOp::Ge),
    Level::Binary(BinaryOp::Lt),
    Level::Binary(BinaryOp::Gt),
    Level::Binary(BinaryOp::Shl),
    Level::Binary(BinaryOp::Shr),
    Level::Binary(BinaryOp::UShr),
    Level::Binary(BinaryOp::Add),
    Level::Binary(BinaryOp::Sub),
    Level::Binary(BinaryOp::Mul),
    Level::Binary(BinaryOp::Div),
    Level::Binary(BinaryOp::Rem),
    Level::Binary(BinaryOp::Pow),
    Level::Prefix(UnaryOp::BitNot),
    Level::Prefix(UnaryOp::Not),
];

/// Parse `s` into a tree. Error offsets are bytes into `s`.
pub(crate) fn resolve(s: &str) -> Result<Node> {
    let rest = s.trim_start();
    let leading = s.len() - rest.len();
    resolve_trimmed(rest.trim_end()).map_err(|err| err.shifted(leading))
}

fn resolve_trimmed(s: &str) -> Result<Node> {
    validate_brackets(s)?;
    if s.is_empty() {
        return Err(ParseError::new(ErrorKind::EmptyInput, 0));
    }

    for level in PRECEDENCE {
        if let Some(result) = try_match(s, level) {
            trace!("{level:?} matched {s:?}");
            return result;
        }
    }

    resolve_operand(s)
}

/// Forms without a top-level operator.
fn resolve_operand(s: &str) -> Result<Node> {
    if s.starts_with('(') && s.ends_with(')') {
        return resolve(&s[1..s.len() - 1]).map_err(|err| err.shifted(1));
    }
    if s.ends_with(']') {
        return resolve_bracket_suffix(s);
    }
    if s.ends_with(')') {
        return resolve_call(s);
    }
    if is_identifier(s) {
        return Ok(Node::Argument(s.to_string()));
    }
    match parse_number_literal(s) {
        Some(value) => Ok(Node::Constant(value)),
        None => Err(ParseError::new(ErrorKind::UnparsableToken, 0)),
    }
}

/// `[a, b, ...]` when the bracket opens the text, `array[index]` otherwise.
fn resolve_bracket_suffix(s: &str) -> Result<Node> {
    let close = s.len() - 1;
    let Some(open) = find_last_top_level(s, "[") else {
        return Err(ParseError::new(ErrorKind::UnbalancedParentheses, close));
    };

    if open == 0 {
        return resolve_list(&s[1..close], 1).map(Node::Array);
    }

    let array = resolve(&s[..open])?;
    let index = resolve(&s[open + 1..close]).map_err(|err| err.shifted(open + 1))?;
    Ok(Node::Index {
        array: Box::new(array),
        index: Box::new(index),
    })
}

/// `name(args)` checked against the function table.
fn resolve_call(s: &str) -> Result<Node> {
    let invalid = || ParseError::new(ErrorKind::InvalidFunctionSyntax, 0);
    let paren = s.find('(').ok_or_else(invalid)?;
    let name = &s[..paren];
    if !is_function_name(name) {
        return Err(invalid());
    }

    let args = resolve_list(&s[paren + 1..s.len() - 1], paren + 1)?;

    let function = Function::from_name(name)
        .ok_or(ParseError::new(ErrorKind::UnknownFunction, 0))?;
    if !function.arity().accepts(args.len()) {
        return Err(ParseError::new(ErrorKind::WrongArgumentCount, 0));
    }

    Ok(Node::Call { function, args })
}

/// Resolve the comma-separated items of `list`, which starts `offset` bytes
/// into the text being parsed. Nothing at all between the brackets is an
/// empty list; a blank item is an error.
fn resolve_list(list: &str, offset: usize) -> Result<Vec<Node>> {
    if list.is_empty() {
        return Ok(Vec::new());
    }

    let commas = find_all_top_level(list, ",");
    let mut items = Vec::with_capacity(commas.len() + 1);
    let mut start = 0;
    for end in commas.into_iter().chain(std::iter::once(list.len())) {
        let item = resolve(&list[start..end]).map_err(|err| err.shifted(offset + start))?;
        items.push(item);
        start = end + 1;
    }

    Ok(items)
}
