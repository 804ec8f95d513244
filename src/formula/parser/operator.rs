//! Operator matching for one precedence level.
//!
//! Each matcher returns `None` when its operator does not apply, so the
//! caller moves on to the next level, and `Some` with the finished node or
//! the error that stops parsing.

use log::trace;

use super::resolve;
use crate::error::{ErrorKind, ParseError, Result};
use crate::formula::ast::{BinaryOp, Node, UnaryOp};
use crate::formula::scan::find_last_top_level;

/// One row of the precedence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Level {
    /// `cond ? a : b`
    Ternary,
    /// Split at the rightmost top-level occurrence of the operator.
    Binary(BinaryOp),
    /// Operator at the very start of the text.
    Prefix(UnaryOp),
}

pub(super) fn try_match(s: &str, level: Level) -> Option<Result<Node>> {
    match level {
        Level::Ternary => match_ternary(s),
        Level::Binary(op) => match_binary(s, op),
        Level::Prefix(op) => match_prefix(s, op),
    }
}

fn match_prefix(s: &str, op: UnaryOp) -> Option<Result<Node>> {
    let symbol = op.symbol();
    let rest = s.strip_prefix(symbol)?;
    Some(
        resolve(rest)
            .map(|operand| Node::unary(op, operand))
            .map_err(|err| err.shifted(symbol.len())),
    )
}

fn match_binary(s: &str, op: BinaryOp) -> Option<Result<Node>> {
    let symbol = op.symbol();
    let at = find_last_top_level(s, symbol)?;
    let right_start = at + symbol.len();

    let operands = resolve(&s[..at]).and_then(|left| {
        let right = resolve(&s[right_start..]).map_err(|err| err.shifted(right_start))?;
        Ok((left, right))
    });

    match operands {
        Ok((left, right)) => Some(Ok(Node::binary(op, left, right))),
        // A bad operand around `*` hands the text on to the lower levels
        // instead of failing, so `2**3` can still reach `**`.
        Err(err) if op == BinaryOp::Mul => {
            trace!("`*` at {at} did not split {s:?} ({err}); trying later levels");
            None
        },
        Err(err) => Some(Err(err)),
    }
}

fn match_ternary(s: &str) -> Option<Result<Node>> {
    let question = find_last_top_level(s, "?");
    let colon = find_last_top_level(s, ":");

    let (question, colon) = match (question, colon) {
        (None, None) => return None,
        (Some(q), Some(c)) if q < c => (q, c),
        // One symbol without the other is reported against the whole segment
        _ => return Some(Err(ParseError::new(ErrorKind::UnparsableToken, 0))),
    };

    let segment = |start: usize, end: usize| {
        resolve(&s[start..end]).map_err(|err| err.shifted(start))
    };

    Some(segment(0, question).and_then(|condition| {
        let then_branch = segment(question + 1, colon)?;
        let else_branch = segment(colon + 1, s.len())?;
        Ok(Node::Ternary {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }))
}
