use crate::formula::ast::{BinaryOp, UnaryOp};

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Wrap a number onto 32 bits: NaN and infinities become 0, the rest is
/// truncated and reduced modulo 2^32.
pub(crate) fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let wrapped = value.trunc().rem_euclid(TWO_POW_32);
    wrapped as u32
}

/// Two's-complement view of [`to_uint32`].
#[inline]
pub(crate) fn to_int32(value: f64) -> i32 {
    to_uint32(value) as i32
}

/// Nonzero and not NaN.
#[inline]
pub(crate) fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

#[inline]
fn from_bool(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

/// Exponentiation where `1 ** ±Infinity` and `x ** NaN` are NaN.
pub(crate) fn js_pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exponent)
}

/// `None` for `!`, which parses but has no numeric meaning.
pub(crate) fn apply_unary(op: UnaryOp, operand: f64) -> Option<f64> {
    match op {
        UnaryOp::Negate => Some(-operand),
        UnaryOp::BitNot => Some(!to_int32(operand) as f64),
        UnaryOp::Not => None,
    }
}

pub(crate) fn apply_binary(op: BinaryOp, left: f64, right: f64) -> f64 {
    match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => left / right,
        BinaryOp::Pow => js_pow(left, right),
        // f64 `%` truncates like C fmod, keeping the dividend's sign
        BinaryOp::Rem => left % right,

        BinaryOp::BitOr => (to_int32(left) | to_int32(right)) as f64,
        BinaryOp::BitAnd => (to_int32(left) & to_int32(right)) as f64,
        BinaryOp::BitXor => (to_int32(left) ^ to_int32(right)) as f64,
        BinaryOp::Shl => to_int32(left).wrapping_shl(to_uint32(right) & 31) as f64,
        BinaryOp::Shr => to_int32(left).wrapping_shr(to_uint32(right) & 31) as f64,
        BinaryOp::UShr => to_uint32(left).wrapping_shr(to_uint32(right) & 31) as f64,

        BinaryOp::Or => {
            if is_truthy(left) {
                left
            } else {
                right
            }
        },
        BinaryOp::And => {
            if is_truthy(left) {
                right
            } else {
                left
            }
        },

        BinaryOp::Eq => from_bool(left == right),
        BinaryOp::Le => from_bool(left <= right),
        BinaryOp::Ge => from_bool(left >= right),
        BinaryOp::Lt => from_bool(left < right),
        BinaryOp::Gt => from_bool(left > right),
    }
}
