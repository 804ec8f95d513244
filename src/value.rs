//! Evaluation results.
//!
//! A [`Value`] is a number, a lazy array, or [`Value::Empty`], the silent
//! "no result" marker. Operators that need a number and get anything else
//! produce `Empty` instead of failing.
use std::fmt;

use smallvec::SmallVec;

use crate::bindings::Bindings;
use crate::formula::ast::Node;
use crate::formula::eval::evaluate;

/// Result of evaluating a formula or one of its subtrees.
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    Number(f64),
    Array(LazyArray<'a>),
    Empty,
}

impl<'a> Value<'a> {
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<LazyArray<'a>> {
        match self {
            Value::Array(array) => Some(*array),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Text that replaces the selection.
    ///
    /// Numbers use their shortest round-trip form, arrays are comma-joined
    /// (which evaluates every element), and `Empty` renders as "".
    pub fn render(&self) -> String {
        let mut buf = String::new();
        self.write_to(&mut buf);
        buf
    }

    fn write_to(&self, buf: &mut String) {
        match self {
            Value::Number(n) => write_number(buf, *n),
            Value::Array(array) => {
                for (idx, element) in array.iter().enumerate() {
                    if idx > 0 {
                        buf.push(',');
                    }
                    element.write_to(buf);
                }
            },
            Value::Empty => {},
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Array whose elements are re-evaluated from their source nodes on every
/// access. Nothing is cached, so an element calling `random()` yields a fresh
/// number each time it is read.
#[derive(Clone, Copy)]
pub struct LazyArray<'a> {
    elements: &'a [Node],
    bindings: &'a Bindings,
}

impl<'a> LazyArray<'a> {
    pub(crate) fn new(elements: &'a [Node], bindings: &'a Bindings) -> Self {
        Self { elements, bindings }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at zero-based `index`, evaluated now.
    pub fn get(&self, index: usize) -> Option<Value<'a>> {
        self.elements
            .get(index)
            .map(|node| evaluate(node, self.bindings))
    }

    /// Element at a formula number.
    ///
    /// The index is truncated toward zero (NaN counts as 0). Negative
    /// positions and positions past the end give `Empty`.
    pub fn at(&self, index: f64) -> Value<'a> {
        let index = if index.is_nan() { 0.0 } else { index.trunc() };
        if index < 0.0 || index >= self.len() as f64 {
            return Value::Empty;
        }
        self.get(index as usize).unwrap_or(Value::Empty)
    }

    /// Evaluate every element in order.
    pub fn iter(self) -> impl Iterator<Item = Value<'a>> {
        let bindings = self.bindings;
        self.elements.iter().map(move |node| evaluate(node, bindings))
    }
}

impl fmt::Debug for LazyArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyArray")
            .field("len", &self.elements.len())
            .finish()
    }
}

/// Append `n` in the canonical shortest form.
///
/// - Integral values below 1e21 print without a fraction: `14`, not `14.0`.
/// - Decimal exponents from -7 up to 20 print positionally: `0.000001`, `3.5`.
/// - Everything else uses exponent form with an explicit sign: `1e+21`, `1e-7`.
/// - `NaN`, `Infinity`, `-Infinity`; negative zero prints as `0`.
pub(crate) fn write_number(buf: &mut String, n: f64) {
    if n.is_nan() {
        buf.push_str("NaN");
        return;
    }
    if n.is_infinite() {
        buf.push_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
        return;
    }
    if n == 0.0 {
        buf.push('0');
        return;
    }

    let mut ryu_buf = ryu::Buffer::new();
    let shortest = ryu_buf.format_finite(n.abs());
    let (mantissa, exponent) = match shortest.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (shortest, 0),
    };

    let mut digits: SmallVec<[u8; 24]> = SmallVec::new();
    let mut point = mantissa.len() as i32;
    for (idx, b) in mantissa.bytes().enumerate() {
        if b == b'.' {
            point = idx as i32;
        } else {
            digits.push(b);
        }
    }
    let mut decimal_exp = point + exponent;

    let leading = digits.iter().take_while(|&&d| d == b'0').count();
    digits.drain(..leading);
    decimal_exp -= leading as i32;
    while digits.last() == Some(&b'0') {
        digits.pop();
    }

    if n < 0.0 {
        buf.push('-');
    }

    let k = digits.len() as i32;
    // Digits are ASCII by construction
    let text = std::str::from_utf8(&digits).unwrap_or_default();
    if k <= decimal_exp && decimal_exp <= 21 {
        buf.push_str(text);
        buf.extend(std::iter::repeat_n('0', (decimal_exp - k) as usize));
    } else if 0 < decimal_exp && decimal_exp <= 21 {
        let (int_part, frac_part) = text.split_at(decimal_exp as usize);
        buf.push_str(int_part);
        buf.push('.');
        buf.push_str(frac_part);
    } else if -6 < decimal_exp && decimal_exp <= 0 {
        buf.push_str("0.");
        buf.extend(std::iter::repeat_n('0', (-decimal_exp) as usize));
        buf.push_str(text);
    } else {
        let (first, rest) = text.split_at(1);
        buf.push_str(first);
        if !rest.is_empty() {
            buf.push('.');
            buf.push_str(rest);
        }
        let e = decimal_exp - 1;
        buf.push('e');
        buf.push(if e >= 0 { '+' } else { '-' });
        let mut itoa_buf = itoa::Buffer::new();
        buf.push_str(itoa_buf.format(e.unsigned_abs()));
    }
}
