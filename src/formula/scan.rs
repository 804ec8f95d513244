//! Bracket-aware scanning over formula text.
//!
//! Operators and separators only count at the top level, i.e. where neither
//! a `(` nor a `[` is left open. All offsets are byte offsets; every token the
//! parser looks for is ASCII, so they always land on character boundaries.
use smallvec::SmallVec;

use crate::error::{ErrorKind, ParseError, Result};

/// Offsets of every top-level occurrence of `token`, left to right.
///
/// Depth is updated before the token test, so an opening bracket itself is
/// already nested and a closing bracket is back at its outer depth.
pub fn find_all_top_level(s: &str, token: &str) -> SmallVec<[usize; 8]> {
    let bytes = s.as_bytes();
    let mut depth: i32 = 0;
    let mut found = SmallVec::new();

    for i in 0..bytes.len() {
        match bytes[i] {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth -= 1,
            _ => {},
        }
        if depth == 0 && bytes[i..].starts_with(token.as_bytes()) {
            found.push(i);
        }
    }

    found
}

/// Offset of the rightmost top-level occurrence of `token`.
///
/// The walk runs right to left, so closers open a level and openers close it.
/// Splitting at the rightmost operator and recursing into the left side is
/// what makes binary operators left-associative.
pub fn find_last_top_level(s: &str, token: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth: i32 = 0;

    for i in (0..bytes.len()).rev() {
        match bytes[i] {
            b'(' | b'[' => depth -= 1,
            b')' | b']' => depth += 1,
            _ => {},
        }
        if depth == 0 && bytes[i..].starts_with(token.as_bytes()) {
            return Some(i);
        }
    }

    None
}

/// Check bracket nesting in one pass.
///
/// A closer that does not match the innermost open bracket is reported at
/// the closer. When the scan ends with brackets still open, the outermost
/// unclosed opener is reported.
pub fn validate_brackets(s: &str) -> Result<()> {
    let mut open: SmallVec<[(u8, usize); 16]> = SmallVec::new();

    for (i, &b) in s.as_bytes().iter().enumerate() {
        match b {
            b'(' | b'[' => open.push((b, i)),
            b')' | b']' => {
                let expected = if b == b')' { b'(' } else { b'[' };
                match open.pop() {
                    Some((opener, _)) if opener == expected => {},
                    _ => return Err(ParseError::new(ErrorKind::UnbalancedParentheses, i)),
                }
            },
            _ => {},
        }
    }

    match open.first() {
        Some(&(_, at)) => Err(ParseError::new(ErrorKind::UnbalancedParentheses, at)),
        None => Ok(()),
    }
}
