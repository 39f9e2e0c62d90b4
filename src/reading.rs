//! Pollutant readings
//!
//! A [`Reading`] is the six concentrations submitted for scoring. It is built
//! from loosely-typed form input and never fails: anything that is not a
//! number becomes `0`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Form field names, in display order.
pub const POLLUTANT_FIELDS: [&str; 6] = ["pm25", "pm10", "no2", "so2", "co", "o3"];

/// Human-readable labels matching [`POLLUTANT_FIELDS`].
pub const POLLUTANT_LABELS: [&str; 6] = ["PM2.5", "PM10", "NO2", "SO2", "CO", "O3"];

/// Six pollutant concentrations for a single submission
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Reading {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub so2: f64,
    pub co: f64,
    pub o3: f64,
}

impl Reading {
    /// Build a reading from raw form input.
    ///
    /// Missing or malformed fields resolve to `0`.
    pub fn from_form(form: &FormInput) -> Self {
        let field = |name: &str| form.get(name).map(parse_field).unwrap_or(0.0);

        Self {
            pm25: field("pm25"),
            pm10: field("pm10"),
            no2: field("no2"),
            so2: field("so2"),
            co: field("co"),
            o3: field("o3"),
        }
    }

    /// Values in [`POLLUTANT_FIELDS`] order
    pub fn values(&self) -> [f64; 6] {
        [self.pm25, self.pm10, self.no2, self.so2, self.co, self.o3]
    }
}

/// Raw, untyped form input keyed by field name
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    fields: HashMap<String, String>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set a field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormInput::new();
        for (k, v) in iter {
            form.set(k, v);
        }
        form
    }
}

/// Parse one form value using the longest leading decimal literal.
///
/// `"12.5"` → 12.5, `" 7abc"` → 7, `""`/`"abc"` → 0. Non-finite results and
/// negative zero collapse to `0`.
pub fn parse_field(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_numbers() {
        assert_eq!(parse_field("12.5"), 12.5);
        assert_eq!(parse_field("  40"), 40.0);
        assert_eq!(parse_field("1.2e2"), 120.0);
        assert_eq!(parse_field(".5"), 0.5);
        assert_eq!(parse_field("-3"), -3.0);
    }

    #[test]
    fn test_parse_field_leading_number() {
        assert_eq!(parse_field("7abc"), 7.0);
        assert_eq!(parse_field("3.5.1"), 3.5);
        assert_eq!(parse_field("2e"), 2.0);
        assert_eq!(parse_field("10 ppm"), 10.0);
    }

    #[test]
    fn test_parse_field_non_numeric_is_zero() {
        for raw in ["", "   ", "abc", ".", "-", "+.", "NaN", "Infinity", "e5", "1e999", "-0"] {
            let v = parse_field(raw);
            assert_eq!(v, 0.0, "{raw:?} should parse to zero");
            assert!(v.is_sign_positive(), "{raw:?} should not be negative zero");
        }
    }

    #[test]
    fn test_from_form_missing_fields_default_to_zero() {
        let form = FormInput::new().field("pm25", "120").field("co", "not a number");
        let reading = Reading::from_form(&form);

        assert_eq!(reading.pm25, 120.0);
        assert_eq!(reading.co, 0.0);
        assert_eq!(reading.pm10, 0.0);
        assert_eq!(reading.o3, 0.0);
    }

    #[test]
    fn test_from_form_all_fields() {
        let form: FormInput = [
            ("pm25", "120"),
            ("pm10", "80"),
            ("no2", "30"),
            ("so2", "10"),
            ("co", "1.2"),
            ("o3", "40"),
        ]
        .into_iter()
        .collect();

        let reading = Reading::from_form(&form);
        assert_eq!(reading.values(), [120.0, 80.0, 30.0, 10.0, 1.2, 40.0]);
    }

    #[test]
    fn test_reading_wire_format() {
        let reading = Reading {
            pm25: 1.0,
            ..Reading::default()
        };
        let json = serde_json::to_value(reading).unwrap();
        assert_eq!(json["pm25"], 1.0);
        for field in POLLUTANT_FIELDS {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}
