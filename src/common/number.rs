//! Number stringification shared by cell rendering.
//!
//! Numbers are written the way a JavaScript `String(number)` call would print
//! them: the shortest round-trip digits, laid out positionally for decimal
//! exponents in `(-6, 21]` and in exponent form with an explicit sign
//! otherwise.

/// Largest decimal exponent still printed in positional notation.
const MAX_POSITIONAL_EXPONENT: i32 = 21;

/// Smallest decimal exponent still printed in positional notation.
const MIN_POSITIONAL_EXPONENT: i32 = -5;

/// Integral magnitudes below this fit an `i64` exactly.
const INT_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Append a signed integer to `buf`.
#[inline]
pub fn write_int(buf: &mut String, n: i64) {
    let mut buffer = itoa::Buffer::new();
    buf.push_str(buffer.format(n));
}

/// Append a float to `buf`.
pub fn write_float(buf: &mut String, n: f64) {
    if n.is_nan() {
        buf.push_str("NaN");
        return;
    }
    if n.is_infinite() {
        buf.push_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
        return;
    }
    if n == 0.0 {
        // -0 prints as 0
        buf.push('0');
        return;
    }

    // Fast path: integral values in i64 range
    if n.fract() == 0.0 && n.abs() < INT_LIMIT {
        write_int(buf, n as i64);
        return;
    }

    if n < 0.0 {
        buf.push('-');
    }
    let mut buffer = ryu::Buffer::new();
    let (digits, exponent) = decompose(buffer.format_finite(n.abs()));
    write_digits(buf, &digits, exponent);
}

/// Split ryu output into significant digits and the decimal exponent `n`
/// such that the value is `0.d1d2...dk * 10^n`.
fn decompose(formatted: &str) -> (String, i32) {
    let (mantissa, exp) = match formatted.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (formatted, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);
    let mut point = int_part.len() as i32 + exp;

    let leading = digits.len() - digits.trim_start_matches('0').len();
    digits.drain(..leading);
    point -= leading as i32;
    digits.truncate(digits.trim_end_matches('0').len());

    (digits, point)
}

fn write_digits(buf: &mut String, digits: &str, n: i32) {
    let k = digits.len() as i32;
    if k <= n && n <= MAX_POSITIONAL_EXPONENT {
        buf.push_str(digits);
        buf.extend(std::iter::repeat_n('0', (n - k) as usize));
    } else if 0 < n && n <= MAX_POSITIONAL_EXPONENT {
        let (int_part, frac_part) = digits.split_at(n as usize);
        buf.push_str(int_part);
        buf.push('.');
        buf.push_str(frac_part);
    } else if MIN_POSITIONAL_EXPONENT <= n && n <= 0 {
        buf.push_str("0.");
        buf.extend(std::iter::repeat_n('0', (-n) as usize));
        buf.push_str(digits);
    } else {
        let (first, rest) = digits.split_at(1);
        buf.push_str(first);
        if !rest.is_empty() {
            buf.push('.');
            buf.push_str(rest);
        }
        let exponent = n - 1;
        buf.push('e');
        buf.push(if exponent < 0 { '-' } else { '+' });
        write_int(buf, i64::from(exponent.abs()));
    }
}

/// Format a float into a fresh `String`.
#[inline]
pub fn fmt_float(n: f64) -> String {
    let mut buf = String::new();
    write_float(&mut buf, n);
    buf
}
