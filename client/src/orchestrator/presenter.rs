//! Result presentation
//!
//! Formats the numeric part of a result for the result surface.

use crate::service::types::CalculationResult;
use chrono::{DateTime, Local};

/// Text shown in the result surface
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    /// Volume with six decimals
    pub volume_text: String,
    /// Error estimate in exponential notation with two decimals
    pub error_text: String,
    /// When the result was received
    pub completed_at: DateTime<Local>,
}

impl ResultSummary {
    /// Format a result received now
    pub fn from_result(result: &CalculationResult) -> Self {
        Self {
            volume_text: format_volume(result.volume),
            error_text: format_error(result.error),
            completed_at: Local::now(),
        }
    }
}

/// Digits after the point that cover the exact expansion of any `f64`
const EXACT_PLACES: usize = 1100;

/// Fixed-point with exactly six decimals, e.g. `0.000123`
///
/// Ties round away from zero, like JavaScript's `toFixed`.
pub fn format_volume(volume: f64) -> String {
    if let Some(text) = non_finite(volume) {
        return text;
    }
    to_fixed(volume, 6)
}

/// Exponential with exactly two decimals and a signed exponent, e.g. `1.20e-5`
///
/// Ties round away from zero, like JavaScript's `toExponential`.
pub fn format_error(error: f64) -> String {
    if let Some(text) = non_finite(error) {
        return text;
    }
    to_exponential(error, 2)
}

fn to_fixed(value: f64, decimals: usize) -> String {
    let exact = format!("{:.*}", EXACT_PLACES, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((&exact, ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .collect();
    if frac_part.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        increment(&mut digits);
    }

    let (int_digits, frac_digits) = digits.split_at(digits.len() - decimals);
    format!(
        "{}{}.{}",
        sign(value),
        String::from_utf8_lossy(int_digits),
        String::from_utf8_lossy(frac_digits)
    )
}

fn to_exponential(value: f64, decimals: usize) -> String {
    let exact = format!("{:.*e}", EXACT_PLACES, value.abs());
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((&exact, "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or_default();
    let mantissa: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();

    let mut digits = mantissa[..=decimals].to_vec();
    if mantissa.get(decimals + 1).is_some_and(|d| *d >= b'5') {
        increment(&mut digits);
        // 9.995 became 10.00
        if digits.len() > decimals + 1 {
            digits.truncate(decimals + 1);
            exponent += 1;
        }
    }

    format!(
        "{}{}.{}e{}{}",
        sign(value),
        digits[0] as char,
        String::from_utf8_lossy(&digits[1..]),
        if exponent < 0 { '-' } else { '+' },
        exponent.unsigned_abs()
    )
}

/// Add one unit in the last place of a decimal digit string
fn increment(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Negative zero prints unsigned
fn sign(value: f64) -> &'static str {
    if value < 0.0 {
        "-"
    } else {
        ""
    }
}

fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_string())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else {
        None
    }
}
