//! Scalar coercion with fallback values.
//!
//! Conversions never fail: a token that does not parse yields the caller's
//! default. [`Tally`] wraps the same conversions and counts each substitution,
//! which is what lets the resolver tag a result as clean or dirty.

/// Strict integer conversion after trimming; `default` on failure.
pub fn to_int(token: &str, default: i64) -> i64 {
    parse_int(token).unwrap_or(default)
}

/// Strict float conversion after trimming; `default` on failure.
///
/// Non-finite results (`inf`, `NaN`) count as failures.
pub fn to_float(token: &str, default: f64) -> f64 {
    parse_float(token).unwrap_or(default)
}

/// True when `token` is non-empty and made of ASCII digits only.
pub fn is_digits_only(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Boolean-like vote flag: `1/0`, `true/false`, `yes/no`, `y/n`.
pub fn to_flag(token: &str, default: bool) -> bool {
    match token.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => true,
        "0" | "false" | "no" | "n" => false,
        _ => default,
    }
}

fn parse_int(token: &str) -> Option<i64> {
    token.trim().parse().ok()
}

fn parse_float(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Counts default substitutions made while decoding one field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    malformed: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn malformed(&self) -> usize {
        self.malformed
    }

    /// Records a malformed token or a dropped entry.
    pub fn flag_malformed(&mut self) {
        self.malformed += 1;
    }

    pub fn int(&mut self, token: &str, default: i64) -> i64 {
        parse_int(token).unwrap_or_else(|| {
            self.flag_malformed();
            default
        })
    }

    pub fn float(&mut self, token: &str, default: f64) -> f64 {
        parse_float(token).unwrap_or_else(|| {
            self.flag_malformed();
            default
        })
    }

    /// Like [`Tally::float`], but a blank token is "absent" and takes the
    /// default without being counted.
    pub fn float_or_blank(&mut self, token: &str, default: f64) -> f64 {
        if token.trim().is_empty() {
            default
        } else {
            self.float(token, default)
        }
    }

    /// Digits-only percentage, clamped to 0–100.
    ///
    /// Anything else is 0; values over 100 clamp and count as malformed.
    pub fn percentage(&mut self, token: &str) -> u8 {
        let token = token.trim();
        if !is_digits_only(token) {
            self.flag_malformed();
            return 0;
        }
        match token.parse::<u32>() {
            Ok(value) if value <= 100 => value as u8,
            _ => {
                self.flag_malformed();
                100
            }
        }
    }
}
