//! The closed table of callable functions and their arities.
use phf::phf_map;

use super::eval::ops::{js_pow, to_int32, to_uint32};

/// How many arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

impl Arity {
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => n == count,
            Arity::Variadic => true,
        }
    }
}

/// Every function a formula may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Random,

    Abs,
    Acos,
    Acosh,
    Asin,
    Asinh,
    Atan,
    Atanh,
    Cbrt,
    Ceil,
    Clz32,
    Cos,
    Cosh,
    Exp,
    Expm1,
    Floor,
    Fround,
    Log,
    Log1p,
    Log10,
    Log2,
    Round,
    Sign,
    Sin,
    Sinh,
    Sqrt,
    Tan,
    Tanh,
    Trunc,

    Atan2,
    Imul,
    Pow,

    Hypot,
    Max,
    Min,
}

/// Function lookup by the exact (case-sensitive) name used in formulas.
static FUNCTIONS: phf::Map<&'static str, Function> = phf_map! {
    "random" => Function::Random,
    "abs" => Function::Abs,
    "acos" => Function::Acos,
    "acosh" => Function::Acosh,
    "asin" => Function::Asin,
    "asinh" => Function::Asinh,
    "atan" => Function::Atan,
    "atanh" => Function::Atanh,
    "cbrt" => Function::Cbrt,
    "ceil" => Function::Ceil,
    "clz32" => Function::Clz32,
    "cos" => Function::Cos,
    "cosh" => Function::Cosh,
    "exp" => Function::Exp,
    "expm1" => Function::Expm1,
    "floor" => Function::Floor,
    "fround" => Function::Fround,
    "log" => Function::Log,
    "log1p" => Function::Log1p,
    "log10" => Function::Log10,
    "log2" => Function::Log2,
    "round" => Function::Round,
    "sign" => Function::Sign,
    "sin" => Function::Sin,
    "sinh" => Function::Sinh,
    "sqrt" => Function::Sqrt,
    "tan" => Function::Tan,
    "tanh" => Function::Tanh,
    "trunc" => Function::Trunc,
    "atan2" => Function::Atan2,
    "imul" => Function::Imul,
    "pow" => Function::Pow,
    "hypot" => Function::Hypot,
    "max" => Function::Max,
    "min" => Function::Min,
};

impl Function {
    /// Look up a function by name.
    pub fn from_name(name: &str) -> Option<Self> {
        FUNCTIONS.get(name).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Random => "random",
            Function::Abs => "abs",
            Function::Acos => "acos",
            Function::Acosh => "acosh",
            Function::Asin => "asin",
            Function::Asinh => "asinh",
            Function::Atan => "atan",
            Function::Atanh => "atanh",
            Function::Cbrt => "cbrt",
            Function::Ceil => "ceil",
            Function::Clz32 => "clz32",
            Function::Cos => "cos",
            Function::Cosh => "cosh",
            Function::Exp => "exp",
            Function::Expm1 => "expm1",
            Function::Floor => "floor",
            Function::Fround => "fround",
            Function::Log => "log",
            Function::Log1p => "log1p",
            Function::Log10 => "log10",
            Function::Log2 => "log2",
            Function::Round => "round",
            Function::Sign => "sign",
            Function::Sin => "sin",
            Function::Sinh => "sinh",
            Function::Sqrt => "sqrt",
            Function::Tan => "tan",
            Function::Tanh => "tanh",
            Function::Trunc => "trunc",
            Function::Atan2 => "atan2",
            Function::Imul => "imul",
            Function::Pow => "pow",
            Function::Hypot => "hypot",
            Function::Max => "max",
            Function::Min => "min",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Function::Random => Arity::Exact(0),
            Function::Atan2 | Function::Imul | Function::Pow => Arity::Exact(2),
            Function::Hypot | Function::Max | Function::Min => Arity::Variadic,
            _ => Arity::Exact(1),
        }
    }

    /// Apply the function to already evaluated arguments.
    ///
    /// The parser guarantees the argument count matches [`Function::arity`].
    pub(crate) fn apply(self, args: &[f64]) -> f64 {
        let first = args.first().copied().unwrap_or(f64::NAN);
        let second = args.get(1).copied().unwrap_or(f64::NAN);

        match self {
            Function::Random => rand::random::<f64>(),

            Function::Abs => first.abs(),
            Function::Acos => first.acos(),
            Function::Acosh => first.acosh(),
            Function::Asin => first.asin(),
            Function::Asinh => first.asinh(),
            Function::Atan => first.atan(),
            Function::Atanh => first.atanh(),
            Function::Cbrt => first.cbrt(),
            Function::Ceil => first.ceil(),
            Function::Clz32 => to_uint32(first).leading_zeros() as f64,
            Function::Cos => first.cos(),
            Function::Cosh => first.cosh(),
            Function::Exp => first.exp(),
            Function::Expm1 => first.exp_m1(),
            Function::Floor => first.floor(),
            Function::Fround => first as f32 as f64,
            Function::Log => first.ln(),
            Function::Log1p => first.ln_1p(),
            Function::Log10 => first.log10(),
            Function::Log2 => first.log2(),
            Function::Round => round_half_up(first),
            Function::Sign => sign(first),
            Function::Sin => first.sin(),
            Function::Sinh => first.sinh(),
            Function::Sqrt => first.sqrt(),
            Function::Tan => first.tan(),
            Function::Tanh => first.tanh(),
            Function::Trunc => first.trunc(),

            Function::Atan2 => first.atan2(second),
            Function::Imul => to_int32(first).wrapping_mul(to_int32(second)) as f64,
            Function::Pow => js_pow(first, second),

            Function::Hypot => hypot(args),
            Function::Max => extremum(args, f64::NEG_INFINITY, |candidate, best| {
                candidate > best || (candidate == 0.0 && best == 0.0 && best.is_sign_negative())
            }),
            Function::Min => extremum(args, f64::INFINITY, |candidate, best| {
                candidate < best || (candidate == 0.0 && best == 0.0 && candidate.is_sign_negative())
            }),
        }
    }
}

/// Round to the nearest integer, ties toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    // (-0.5, 0] rounds to -0
    if rounded == 0.0 && value.is_sign_negative() {
        -0.0
    } else {
        rounded
    }
}

/// -1, 1, or the input itself for NaN and signed zeros.
fn sign(value: f64) -> f64 {
    if value.is_nan() || value == 0.0 {
        value
    } else {
        value.signum()
    }
}

fn hypot(args: &[f64]) -> f64 {
    if args.iter().any(|v| v.is_infinite()) {
        return f64::INFINITY;
    }
    if args.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    args.iter().fold(0.0, |acc, v| acc.hypot(*v))
}

fn extremum(args: &[f64], init: f64, better: impl Fn(f64, f64) -> bool) -> f64 {
    let mut best = init;
    for &candidate in args {
        if candidate.is_nan() {
            return f64::NAN;
        }
        if better(candidate, best) {
            best = candidate;
        }
    }
    best
}
