//! Render floating point values as compact, human readable strings.
//!
//! Large and small values use engineering notation: the exponent is always a
//! multiple of three, so `1234567` becomes `1.23e6` (or `1.23M` with SI
//! prefixes) and `0.75` becomes `750e-3` (or `750m`).
//!
//! ```rust
//! use xmledit::format;
//!
//! assert_eq!(format::natural(1234567.0, 3), "1.23e6");
//! assert_eq!(format::natural_si(1234567.0, 3), "1.23M");
//! assert_eq!(format::natural(3.1415926535, 3), "3.14");
//! ```

static SI_PREFIXES: &[(i32, &str)] = &[
    (-18, "a"),
    (-15, "f"),
    (-12, "p"),
    (-9, "n"),
    (-6, "µ"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
    (15, "P"),
    (18, "E"),
];

fn si_prefix(exp: i32) -> Option<&'static str> {
    SI_PREFIXES
        .iter()
        .find(|(e, _)| *e == exp)
        .map(|(_, prefix)| *prefix)
}

/// Format a value with `significant` digits, in engineering notation for
/// large and small values.
pub fn natural(value: f64, significant: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let (mantissa_value, exp) = naturalize(value);
    let mut s = mantissa(mantissa_value, significant);
    s.push_str(&exponent(exp));
    s
}

/// Like [`natural`], but uses an SI prefix instead of the exponent where one
/// exists.
pub fn natural_si(value: f64, significant: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let (mantissa_value, exp) = naturalize(value);
    let mut s = mantissa(mantissa_value, significant);
    s.push_str(&exponent_to_si(exp));
    s
}

/// Split a value into a mantissa and an exponent that is a multiple of
/// three, so that `value == mantissa * 10^exp`.
///
/// The exponent is picked so the mantissa reads naturally: at least 1 in
/// magnitude where possible, and below a million. Zero, infinities and NaN
/// come back unchanged with exponent 0.
pub fn naturalize(value: f64) -> (f64, i32) {
    if value == 0.0 || !value.is_finite() {
        return (value, 0);
    }
    let abs = value.abs();
    let mut exp = ((abs.log10() / 3.0).floor() * 3.0) as i32;

    let prev_exp = exp - 3;
    if (value / 10f64.powf(prev_exp as f64)).abs() < 1e6 {
        exp = prev_exp;
    }
    let next_exp = exp + 3;
    if (value / 10f64.powf(next_exp as f64)).abs() >= 1.0 {
        exp = next_exp;
    }

    (value / 10f64.powf(exp as f64), exp)
}

/// Format an exponent as `eN`; empty for zero.
pub fn exponent(exp: i32) -> String {
    if exp == 0 {
        String::new()
    } else {
        format!("e{}", exp)
    }
}

/// Format an exponent as an SI prefix, falling back to `eN`.
pub fn exponent_to_si(exp: i32) -> String {
    if exp == 0 {
        return String::new();
    }
    match si_prefix(exp) {
        Some(prefix) => prefix.to_string(),
        None => exponent(exp),
    }
}

/// Format a mantissa with the given number of significant digits.
///
/// Digits left of the decimal point are never dropped, so `468750` stays
/// `468750` even at three significant digits.
pub fn mantissa(value: f64, significant: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let exp10 = value.abs().log10().floor() as i64;
    let digits = (significant as i64 - exp10 - 1).max(0) as usize;
    simplify_number(&format!("{:.*}", digits, value))
}

/// Trim trailing zeros after a decimal point, and the point itself if
/// nothing is left after it.
pub fn simplify_number(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}
