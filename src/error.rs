//! Parse-time error types.
//!
//! Only parsing can fail. Evaluation never returns an error: anything that
//! goes wrong at evaluation time collapses to [`Value::Empty`](crate::Value::Empty).
use thiserror::Error;

/// The closed set of reasons a formula can be rejected.
///
/// Every kind maps to an opaque message key (see [`ErrorKind::key`]) that a
/// host translates into localized text. The `Display` text is the English
/// fallback.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    /// Nothing but whitespace where an expression was expected
    #[error("expression is empty")]
    EmptyInput,

    /// A closing bracket without a matching opener, or an opener never closed
    #[error("parentheses are unbalanced")]
    UnbalancedParentheses,

    /// Text that is neither an operator expression, a name nor a number
    #[error("cannot parse token")]
    UnparsableToken,

    /// Something ending in `)` that is not `name(args)`
    #[error("invalid function call syntax")]
    InvalidFunctionSyntax,

    /// A call to a name missing from the function table
    #[error("unknown function")]
    UnknownFunction,

    /// A known function called with the wrong number of arguments
    #[error("wrong number of function arguments")]
    WrongArgumentCount,
}

impl ErrorKind {
    /// Opaque message key handed to the host for localization.
    pub const fn key(self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "map.error.empty",
            ErrorKind::UnbalancedParentheses => "map.error.parentheses",
            ErrorKind::UnparsableToken => "map.error.unparsable",
            ErrorKind::InvalidFunctionSyntax => "map.error.function.invalid",
            ErrorKind::UnknownFunction => "map.error.function.unknown",
            ErrorKind::WrongArgumentCount => "map.error.function.argument",
        }
    }
}

/// A rejected formula: what went wrong and where.
///
/// `location` is a character offset into the untrimmed formula
/// text as the user typed it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} (column {})", .location + 1)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub location: usize,
}

impl ParseError {
    pub(crate) const fn new(kind: ErrorKind, location: usize) -> Self {
        Self { kind, location }
    }

    /// Move the error further into the enclosing text.
    #[inline]
    pub(crate) const fn shifted(self, by: usize) -> Self {
        Self {
            kind: self.kind,
            location: self.location + by,
        }
    }

    /// Opaque message key of the error kind.
    #[inline]
    pub fn key(&self) -> &'static str {
        self.kind.key()
    }

    /// 1-based column for display.
    #[inline]
    pub fn column(&self) -> usize {
        self.location + 1
    }

    /// Rewrite a byte offset into `source` as a character offset.
    pub(crate) fn into_char_offset(self, source: &str) -> Self {
        let byte = self.location.min(source.len());
        let chars = source
            .char_indices()
            .take_while(|(idx, _)| *idx < byte)
            .count();
        Self {
            kind: self.kind,
            location: chars,
        }
    }
}

/// Result alias for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;
