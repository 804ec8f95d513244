//! Literal and name recognition.

/// True for `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {},
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// True for the relaxed `[A-Za-z0-9_]+` accepted in front of a call's `(`.
pub(crate) fn is_function_name(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Parse an unsigned numeric literal.
///
/// Supported forms:
/// - Decimal: `12`, `1.5`, `.5`, `5.`, `1e3`, `2.5E-4`
/// - Prefixed integers: `0x1F`, `0o17`, `0b101` (either letter case)
///
/// Signs are not part of a literal; `-` and `+` are operators.
pub(crate) fn parse_number_literal(s: &str) -> Option<f64> {
    if let Some(value) = parse_prefixed_integer(s) {
        return Some(value);
    }

    let bytes = s.as_bytes();
    // fast_float2 also accepts inf/nan spellings and signs, which are not literals here
    if bytes.is_empty()
        || !bytes
            .iter()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        || !(bytes[0].is_ascii_digit() || bytes[0] == b'.')
    {
        return None;
    }

    fast_float2::parse(s).ok()
}

fn parse_prefixed_integer(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    // Accumulated in f64 so long literals cannot overflow
    bytes[2..].iter().try_fold(0.0_f64, |acc, &b| {
        let digit = (b as char).to_digit(radix)?;
        Some(acc * radix as f64 + digit as f64)
    })
}

/// Convert a selection's text into the number bound to `x`.
///
/// Surrounding whitespace is ignored and empty text counts as zero. A leading
/// sign is allowed on decimal numbers and `Infinity`. Anything else is NaN.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some(value) = parse_prefixed_integer(trimmed) {
        return value;
    }

    let (negative, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    // Prefixed integers never take a sign
    let magnitude = if unsigned == "Infinity" {
        Some(f64::INFINITY)
    } else if parse_prefixed_integer(unsigned).is_some() {
        None
    } else {
        parse_number_literal(unsigned)
    };

    match magnitude {
        Some(value) if negative => -value,
        Some(value) => value,
        None => f64::NAN,
    }
}
