//! Cursor Formula - per-selection arithmetic for multi-cursor editors
//!
//! Each selection's text is converted to a number `x`, a user formula is
//! evaluated with `x` and the selection index `i`, and the rendered result
//! replaces the selection.
//!
//! # Features
//!
//! - **Formula language**: arithmetic, bitwise, logical and comparison
//!   operators, ternaries, array literals with indexing, and the `Math`-style
//!   function table (`pow`, `max`, `round`, `random`, ...)
//! - **Positioned errors**: every rejected formula reports an error kind, an
//!   opaque message key and a character offset
//! - **Lazy arrays**: elements are evaluated on access, so untaken branches
//!   and unread elements cost nothing
//! - **Batch commands**: `index`, `increment`, `decrement` and `map` over a set
//!   of selections, with optional rayon parallelism
//!
//! # Example - Evaluating a formula
//!
//! ```
//! use cursor_formula::Formula;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let formula = Formula::parse("x > 5 ? [10, 20][i % 2] : pow(x, 2)")?;
//! assert_eq!(formula.apply(3.0, 0), "9");
//! assert_eq!(formula.apply(8.0, 1), "20");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Mapping selections
//!
//! ```
//! use cursor_formula::selection;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let replaced = selection::map("x * 2 + i", &["1", "2", "3"])?;
//! assert_eq!(replaced, ["2", "5", "8"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Reporting errors
//!
//! ```
//! use cursor_formula::{ErrorKind, Formula};
//!
//! let err = Formula::validate("1 + pow(2)").unwrap_err();
//! assert_eq!(err.kind, ErrorKind::WrongArgumentCount);
//! assert_eq!(err.key(), "map.error.function.argument");
//! assert_eq!(err.location, 4);
//! ```

pub mod bindings;
pub mod error;
pub mod formula;
pub mod selection;
pub mod value;

pub use bindings::Bindings;
pub use error::{ErrorKind, ParseError, Result};
pub use formula::Formula;
pub use formula::ast::{BinaryOp, Node, UnaryOp};
pub use formula::coerce_number;
pub use formula::functions::{Arity, Function};
pub use value::{LazyArray, Value};
