//! Names visible to a formula during one evaluation.
use std::collections::HashMap;
use std::f64::consts;

use phf::phf_map;

/// Mathematical constants bound in every evaluation.
static CONSTANTS: phf::Map<&'static str, f64> = phf_map! {
    "E" => consts::E,
    "LN2" => consts::LN_2,
    "LN10" => consts::LN_10,
    "LOG2E" => consts::LOG2_E,
    "LOG10E" => consts::LOG10_E,
    "PI" => consts::PI,
    "SQRT1_2" => consts::FRAC_1_SQRT_2,
    "SQRT2" => consts::SQRT_2,
};

/// Name to number mapping for one evaluation.
///
/// The constants above are always present. `x` and `i` carry the current
/// selection's numeric value and its zero-based index. Extra names added with
/// [`Bindings::with`] shadow everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings {
    x: f64,
    i: f64,
    extra: HashMap<String, f64>,
}

impl Bindings {
    /// Bindings for the selection at `index` whose text converted to `x`.
    pub fn selection(x: f64, index: usize) -> Self {
        Self {
            x,
            i: index as f64,
            extra: HashMap::new(),
        }
    }

    /// Add or replace a name.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Resolve a name, or `None` when it is not bound.
    pub fn get(&self, name: &str) -> Option<f64> {
        if let Some(value) = self.extra.get(name) {
            return Some(*value);
        }
        match name {
            "x" => Some(self.x),
            "i" => Some(self.i),
            _ => CONSTANTS.get(name).copied(),
        }
    }
}
