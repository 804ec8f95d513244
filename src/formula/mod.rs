//! The formula language: parsing and evaluation.
//!
//! A [`Formula`] is parsed once and then evaluated per selection, each time
//! with that selection's `x` and `i`.
//!
//! # Example
//!
//! ```
//! use cursor_formula::Formula;
//!
//! let formula = Formula::parse("x * 2 + i").unwrap();
//! assert_eq!(formula.apply(10.0, 0), "20");
//! assert_eq!(formula.apply(10.0, 3), "23");
//! ```

pub mod ast;
pub(crate) mod eval;
pub mod functions;
pub(crate) mod parser;
pub mod scan;

pub use parser::literal::coerce_number;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::bindings::Bindings;
use crate::error::Result;
use crate::value::Value;
use ast::Node;

/// A parsed formula, reusable across any number of evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    root: Node,
}

impl Formula {
    /// Parse formula text.
    ///
    /// The error location is a character offset into `text` as given,
    /// including any leading whitespace.
    pub fn parse(text: &str) -> Result<Self> {
        match parser::resolve(text) {
            Ok(root) => Ok(Self {
                source: text.to_string(),
                root,
            }),
            Err(err) => {
                let err = err.into_char_offset(text);
                debug!("rejected formula {text:?}: {} at {}", err.key(), err.location);
                Err(err)
            },
        }
    }

    /// Check formula text without keeping the tree, for live feedback while
    /// the user types.
    pub fn validate(text: &str) -> Result<()> {
        Self::parse(text).map(|_| ())
    }

    /// Text the formula was parsed from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// False when the formula calls `random()` anywhere, so two evaluations
    /// with equal bindings may differ.
    pub fn is_deterministic(&self) -> bool {
        !self.root.calls_random()
    }

    /// Evaluate against `bindings`.
    pub fn evaluate<'a>(&'a self, bindings: &'a Bindings) -> Value<'a> {
        eval::evaluate(&self.root, bindings)
    }

    /// Evaluate for one selection and render the replacement text.
    pub fn apply(&self, x: f64, index: usize) -> String {
        let bindings = Bindings::selection(x, index);
        self.evaluate(&bindings).render()
    }
}

impl FromStr for Formula {
    type Err = crate::error::ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
