//! Raw form input
//!
//! Values arrive as text exactly as the user typed them. Parsing is
//! permissive: anything unparsable is forwarded as NaN / missing and left
//! for the service to reject.

use crate::service::types::CalculationRequest;

/// Form values as entered by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFormValues {
    /// Function expression
    pub function: String,
    /// Lower x bound
    pub a: String,
    /// Upper x bound
    pub b: String,
    /// Lower y bound
    pub c: String,
    /// Upper y bound
    pub d: String,
    /// Samples per axis
    pub resolution: String,
}

impl Default for RawFormValues {
    fn default() -> Self {
        Self {
            function: "x**2 + y**2".to_string(),
            a: "-2".to_string(),
            b: "2".to_string(),
            c: "-2".to_string(),
            d: "2".to_string(),
            resolution: "50".to_string(),
        }
    }
}

impl RawFormValues {
    /// Coerce the text fields into a request without rejecting anything
    pub fn to_request(&self) -> CalculationRequest {
        CalculationRequest {
            function: self.function.clone(),
            a: parse_bound(&self.a),
            b: parse_bound(&self.b),
            c: parse_bound(&self.c),
            d: parse_bound(&self.d),
            resolution: parse_resolution(&self.resolution),
        }
    }
}

/// Parse a domain bound, NaN when the text is not a number
pub fn parse_bound(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse the resolution, truncating decimals; `None` when not a number
///
/// The whole text is read as a number, so `"1e3"` gives 1000 and `"50abc"`
/// gives `None` (no prefix parsing).
pub fn parse_resolution(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.abs() < i64::MAX as f64)
        .map(|value| value.trunc() as i64)
}
