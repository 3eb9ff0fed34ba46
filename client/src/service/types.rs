//! Calculation Service wire types
//!
//! Structs that mirror the JSON bodies exchanged with `POST /calculate`.

use crate::error::ClientError;
use serde::{Deserialize, Serialize};

/// Request body for the Calculation Service
///
/// Bounds that could not be parsed are carried as NaN and serialize as JSON
/// `null`; an unparsable resolution is `None`, which also serializes as `null`.
/// The service is responsible for rejecting them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRequest {
    /// Expression in the free variables `x` and `y`
    pub function: String,
    /// Lower bound of the x axis
    pub a: f64,
    /// Upper bound of the x axis
    pub b: f64,
    /// Lower bound of the y axis
    pub c: f64,
    /// Upper bound of the y axis
    pub d: f64,
    /// Samples per axis
    pub resolution: Option<i64>,
}

impl CalculationRequest {
    /// Check the request invariants locally
    ///
    /// Only used when local validation is switched on; by default requests are
    /// passed through and the service does the validation.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.function.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "The function cannot be empty".to_string(),
            ));
        }
        for (name, value) in [("a", self.a), ("b", self.b), ("c", self.c), ("d", self.d)] {
            if !value.is_finite() {
                return Err(ClientError::InvalidRequest(format!(
                    "Domain bound {name} must be a finite number"
                )));
            }
        }
        if self.a >= self.b {
            return Err(ClientError::InvalidRequest(
                "Invalid domain: a must be less than b".to_string(),
            ));
        }
        if self.c >= self.d {
            return Err(ClientError::InvalidRequest(
                "Invalid domain: c must be less than d".to_string(),
            ));
        }
        match self.resolution {
            Some(resolution) if resolution >= 2 => Ok(()),
            Some(_) => Err(ClientError::InvalidRequest(
                "The resolution must be at least 2".to_string(),
            )),
            None => Err(ClientError::InvalidRequest(
                "The resolution must be an integer".to_string(),
            )),
        }
    }
}

/// Coordinates for one plot axis
///
/// The service may send either one coordinate per sample or the full meshgrid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Axis {
    /// One value per sample along the axis
    Values(Vec<f64>),
    /// Full meshgrid, one row per y sample
    Grid(Vec<Vec<f64>>),
}

impl Axis {
    fn dims(&self) -> AxisDims {
        match self {
            Axis::Values(values) => AxisDims::Len(values.len()),
            Axis::Grid(rows) => AxisDims::Grid(rows.len(), rows.first().map_or(0, Vec::len)),
        }
    }

    fn is_rectangular(&self) -> bool {
        match self {
            Axis::Values(_) => true,
            Axis::Grid(rows) => rows.windows(2).all(|pair| pair[0].len() == pair[1].len()),
        }
    }
}

enum AxisDims {
    Len(usize),
    Grid(usize, usize),
}

/// Successful calculation
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    /// Integral of the surface over the domain
    pub volume: f64,
    /// Estimated absolute error of `volume`
    pub error: f64,
    /// X coordinates
    pub x: Axis,
    /// Y coordinates
    pub y: Axis,
    /// Surface heights, one row per y sample
    pub z: Vec<Vec<f64>>,
}

impl CalculationResult {
    /// Number of (rows, columns) in the height grid
    pub fn grid_dims(&self) -> (usize, usize) {
        (self.z.len(), self.z.first().map_or(0, Vec::len))
    }

    /// Verify that `x`, `y` and `z` describe the same grid
    pub fn check_shape(&self) -> Result<(), String> {
        let (rows, cols) = self.grid_dims();
        if rows == 0 || cols == 0 {
            return Err("z grid is empty".to_string());
        }
        if self.z.iter().any(|row| row.len() != cols) {
            return Err("z grid rows have different lengths".to_string());
        }

        for (name, axis, expected_len) in [("x", &self.x, cols), ("y", &self.y, rows)] {
            if !axis.is_rectangular() {
                return Err(format!("{name} grid rows have different lengths"));
            }
            match axis.dims() {
                AxisDims::Len(len) if len == expected_len => {}
                AxisDims::Grid(r, c) if (r, c) == (rows, cols) => {}
                AxisDims::Len(len) => {
                    return Err(format!(
                        "{name} has {len} values but z is {rows}x{cols}"
                    ))
                }
                AxisDims::Grid(r, c) => {
                    return Err(format!("{name} grid is {r}x{c} but z is {rows}x{cols}"))
                }
            }
        }
        Ok(())
    }
}

/// Response envelope from the Calculation Service
///
/// Every field is optional at this level so that a response with missing
/// fields is reported as malformed instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceResponse {
    /// Whether the calculation succeeded
    #[serde(default)]
    pub success: bool,
    /// Human readable message (always present on failure)
    #[serde(default)]
    pub message: Option<String>,
    /// Computed volume
    #[serde(default)]
    pub volume: Option<f64>,
    /// Error estimate
    #[serde(default)]
    pub error: Option<f64>,
    /// X coordinates
    #[serde(default)]
    pub x: Option<Axis>,
    /// Y coordinates
    #[serde(default)]
    pub y: Option<Axis>,
    /// Surface heights
    #[serde(default)]
    pub z: Option<Vec<Vec<f64>>>,
}

impl ServiceResponse {
    /// Interpret the envelope received with the given HTTP status
    ///
    /// Anything other than a 2xx status carrying `success: true` and a
    /// complete, consistently shaped result is an error.
    pub fn into_result(self, status: u16) -> Result<CalculationResult, ClientError> {
        if !self.success || !(200..300).contains(&status) {
            return Err(ClientError::Service {
                status,
                message: self.message,
            });
        }

        let missing = |field: &str| {
            ClientError::MalformedResponse(format!("successful response lacks `{field}`"))
        };
        let result = CalculationResult {
            volume: self.volume.ok_or_else(|| missing("volume"))?,
            error: self.error.ok_or_else(|| missing("error"))?,
            x: self.x.ok_or_else(|| missing("x"))?,
            y: self.y.ok_or_else(|| missing("y"))?,
            z: self.z.ok_or_else(|| missing("z"))?,
        };
        result.check_shape().map_err(ClientError::MalformedResponse)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> CalculationRequest {
        CalculationRequest {
            function: "x**2 + y**2".to_string(),
            a: -2.0,
            b: 2.0,
            c: -2.0,
            d: 2.0,
            resolution: Some(50),
        }
    }

    #[test]
    fn test_request_wire_format() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(
            value,
            json!({
                "function": "x**2 + y**2",
                "a": -2.0, "b": 2.0, "c": -2.0, "d": 2.0,
                "resolution": 50
            })
        );
    }

    #[test]
    fn test_unparsed_values_serialize_as_null() {
        let req = CalculationRequest {
            a: f64::NAN,
            resolution: None,
            ..request()
        };
        let value = serde_json::to_value(req).unwrap();
        assert!(value["a"].is_null());
        assert!(value["resolution"].is_null());
        assert_eq!(value["b"], json!(2.0));
    }

    #[test]
    fn test_validate_rejects_bad_requests() {
        assert!(request().validate().is_ok());

        let cases = [
            CalculationRequest { function: " ".into(), ..request() },
            CalculationRequest { a: f64::NAN, ..request() },
            CalculationRequest { a: 2.0, ..request() },
            CalculationRequest { c: 3.0, ..request() },
            CalculationRequest { resolution: Some(1), ..request() },
            CalculationRequest { resolution: None, ..request() },
        ];
        for case in cases {
            assert!(
                matches!(case.validate(), Err(ClientError::InvalidRequest(_))),
                "expected rejection for {case:?}"
            );
        }
    }

    #[test]
    fn test_success_with_vector_axes() {
        let body = json!({
            "success": true,
            "volume": 1.5,
            "error": 1e-9,
            "x": [0.0, 1.0, 2.0],
            "y": [0.0, 1.0],
            "z": [[0.0, 1.0, 2.0], [1.0, 2.0, 3.0]]
        });
        let response: ServiceResponse = serde_json::from_value(body).unwrap();
        let result = response.into_result(200).unwrap();
        assert_eq!(result.volume, 1.5);
        assert_eq!(result.grid_dims(), (2, 3));
        assert_eq!(result.x, Axis::Values(vec![0.0, 1.0, 2.0]));
    }

    #[test]
    fn test_success_with_meshgrid_axes() {
        let body = json!({
            "success": true,
            "volume": 0.0,
            "error": 0.0,
            "x": [[0.0, 1.0], [0.0, 1.0]],
            "y": [[5.0, 5.0], [6.0, 6.0]],
            "z": [[0.0, 0.0], [0.0, 0.0]],
            "message": "Calculation completed"
        });
        let response: ServiceResponse = serde_json::from_value(body).unwrap();
        let result = response.into_result(200).unwrap();
        assert!(matches!(result.y, Axis::Grid(_)));
    }

    #[test]
    fn test_failure_envelope() {
        let body = json!({"success": false, "message": "Invalid domain: a must be less than b"});
        let response: ServiceResponse = serde_json::from_value(body).unwrap();
        let err = response.into_result(400).unwrap_err();
        assert_eq!(err.user_message(), "Invalid domain: a must be less than b");
    }

    #[test]
    fn test_success_flag_with_error_status_is_failure() {
        let body = json!({"success": true, "volume": 1.0, "error": 0.0,
                          "x": [0.0], "y": [0.0], "z": [[0.0]]});
        let response: ServiceResponse = serde_json::from_value(body).unwrap();
        assert!(matches!(
            response.into_result(500),
            Err(ClientError::Service { status: 500, .. })
        ));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let body = json!({"success": true, "volume": 1.0, "x": [0.0], "y": [0.0], "z": [[0.0]]});
        let response: ServiceResponse = serde_json::from_value(body).unwrap();
        let err = response.into_result(200).unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(ref m) if m.contains("`error`")));
    }

    #[test]
    fn test_shape_mismatch_is_malformed() {
        let body = json!({"success": true, "volume": 1.0, "error": 0.0,
                          "x": [0.0, 1.0, 2.0], "y": [0.0, 1.0],
                          "z": [[0.0, 1.0], [1.0, 2.0]]});
        let response: ServiceResponse = serde_json::from_value(body).unwrap();
        assert!(matches!(
            response.into_result(200),
            Err(ClientError::MalformedResponse(_))
        ));

        let ragged = json!({"success": true, "volume": 1.0, "error": 0.0,
                            "x": [0.0, 1.0], "y": [0.0, 1.0],
                            "z": [[0.0, 1.0], [1.0]]});
        let response: ServiceResponse = serde_json::from_value(ragged).unwrap();
        assert!(response.into_result(200).is_err());
    }
}
