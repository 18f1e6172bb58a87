//! Turns raw form values into typed records, or into an ordered list of
//! field errors. Nothing here panics on user input.

use crate::error::{FieldError, FieldErrorKind, ValidationErrors};
use robocost_schemas::form::{FieldValue, FormValues};
use tracing::warn;

/// Field identifiers of the traditional lawn-care form, in declaration order.
pub const TRADITIONAL_FIELDS: [&str; 4] = [
    "fuelCostPerSeason",
    "manualMowerCost",
    "gardeningServiceCost",
    "mowsPerSeason",
];

/// Field identifiers of the robot ownership form, in declaration order.
pub const ROBOT_FIELDS: [&str; 5] = [
    "purchasePrice",
    "annualMaintenanceCost",
    "robotMowsPerSeason",
    "durationYears",
    "lawnAreaM2",
];

/// Field identifiers of the diagnostic quiz, in question order.
pub const DIAGNOSTIC_FIELDS: [&str; 9] = [
    "brand",
    "model",
    "lawnAreaM2",
    "usageFrequency",
    "terrainType",
    "hadTechnicalIssues",
    "hadRegularMaintenance",
    "accessories",
    "otherAccessories",
];

/// Reads fields one by one, collecting every failure instead of stopping at
/// the first. Call order defines error order.
pub struct FormReader<'a> {
    form: &'a FormValues,
    errors: ValidationErrors,
}

impl<'a> FormReader<'a> {
    pub fn new(form: &'a FormValues) -> Self {
        Self {
            form,
            errors: ValidationErrors::new(),
        }
    }

    fn record<T>(&mut self, field: &str, parsed: Result<T, FieldErrorKind>) -> Option<T> {
        match parsed {
            Ok(value) => Some(value),
            Err(kind) => {
                warn!(field, error = %kind, "rejected form field");
                self.errors.push(FieldError::new(field, kind));
                None
            }
        }
    }

    fn required(&self, field: &str) -> Result<&'a FieldValue, FieldErrorKind> {
        match self.form.get(field) {
            Some(value) if !value.is_blank() => Ok(value),
            _ => Err(FieldErrorKind::Missing),
        }
    }

    /// A money amount, zero allowed.
    pub fn amount(&mut self, field: &str) -> Option<f64> {
        let parsed = self.required(field).and_then(parse_number).and_then(check_amount);
        self.record(field, parsed)
    }

    /// A strictly positive number.
    pub fn positive(&mut self, field: &str) -> Option<f64> {
        let parsed = self.required(field).and_then(parse_number).and_then(check_positive);
        self.record(field, parsed)
    }

    /// A number no smaller than `min`.
    pub fn at_least(&mut self, field: &str, min: f64) -> Option<f64> {
        let parsed = self
            .required(field)
            .and_then(parse_number)
            .and_then(|value| check_at_least(value, min));
        self.record(field, parsed)
    }

    /// A whole number of at least one (frequencies, durations).
    pub fn count(&mut self, field: &str) -> Option<u32> {
        let parsed = self.required(field).and_then(parse_number).and_then(check_count);
        self.record(field, parsed)
    }

    pub fn text(&mut self, field: &str) -> Option<String> {
        let parsed = self.required(field).and_then(parse_text);
        self.record(field, parsed)
    }

    pub fn flag(&mut self, field: &str) -> Option<bool> {
        let parsed = self.required(field).and_then(parse_flag);
        self.record(field, parsed)
    }

    /// A categorical answer, resolved with `resolve` from its label.
    pub fn choice<T>(&mut self, field: &str, resolve: impl Fn(&str) -> Option<T>) -> Option<T> {
        let parsed = self
            .required(field)
            .and_then(parse_text)
            .and_then(|label| resolve(label.as_str()).ok_or(FieldErrorKind::UnknownOption));
        self.record(field, parsed)
    }

    /// An optional list; absent or blank gives an empty list.
    pub fn optional_list(&mut self, field: &str) -> Option<Vec<String>> {
        let form = self.form;
        match form.get(field) {
            None => Some(Vec::new()),
            Some(value) if value.is_blank() => Some(Vec::new()),
            Some(value) => {
                let parsed = parse_list(value);
                self.record(field, parsed)
            }
        }
    }

    /// Optional free text; absent gives an empty string.
    pub fn optional_text(&mut self, field: &str) -> Option<String> {
        let form = self.form;
        match form.get(field) {
            None | Some(FieldValue::Null) => Some(String::new()),
            Some(value) => {
                let parsed = parse_text(value);
                self.record(field, parsed)
            }
        }
    }

    pub fn finish<T>(self, build: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        self.errors.into_result(build)
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

pub fn parse_number(value: &FieldValue) -> Result<f64, FieldErrorKind> {
    let number = match value {
        FieldValue::Number(n) => *n,
        // Accept the French decimal comma as well as the dot.
        FieldValue::Text(text) => text
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| FieldErrorKind::NotANumber)?,
        FieldValue::Null => return Err(FieldErrorKind::Missing),
        FieldValue::Bool(_) | FieldValue::List(_) => return Err(FieldErrorKind::NotANumber),
    };
    if number.is_finite() {
        Ok(number)
    } else {
        Err(FieldErrorKind::NotANumber)
    }
}

pub fn parse_text(value: &FieldValue) -> Result<String, FieldErrorKind> {
    match value {
        FieldValue::Text(text) => Ok(text.trim().to_string()),
        FieldValue::Number(n) => Ok(n.to_string()),
        FieldValue::Null => Err(FieldErrorKind::Missing),
        FieldValue::Bool(_) | FieldValue::List(_) => Err(FieldErrorKind::UnknownOption),
    }
}

/// `true`/`false`, or the "Oui"/"Non" radio labels.
pub fn parse_flag(value: &FieldValue) -> Result<bool, FieldErrorKind> {
    match value {
        FieldValue::Bool(flag) => Ok(*flag),
        FieldValue::Text(text) => match text.trim().to_lowercase().as_str() {
            "oui" | "yes" | "true" | "o" | "y" => Ok(true),
            "non" | "no" | "false" | "n" => Ok(false),
            "" => Err(FieldErrorKind::Missing),
            _ => Err(FieldErrorKind::UnknownOption),
        },
        FieldValue::Null => Err(FieldErrorKind::Missing),
        FieldValue::Number(_) | FieldValue::List(_) => Err(FieldErrorKind::UnknownOption),
    }
}

fn parse_list(value: &FieldValue) -> Result<Vec<String>, FieldErrorKind> {
    match value {
        FieldValue::List(items) => Ok(items.clone()),
        FieldValue::Text(text) => Ok(split_accessories(text)),
        FieldValue::Null => Ok(Vec::new()),
        FieldValue::Bool(_) | FieldValue::Number(_) => Err(FieldErrorKind::UnknownOption),
    }
}

/// Splits a comma separated list typed by the customer. Pieces are trimmed
/// but never dropped, so `"a, b,"` yields three entries.
pub fn split_accessories(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(|piece| piece.trim().to_string()).collect()
}

pub fn check_amount(value: f64) -> Result<f64, FieldErrorKind> {
    if !value.is_finite() {
        Err(FieldErrorKind::NotANumber)
    } else if value < 0.0 {
        Err(FieldErrorKind::Negative)
    } else {
        Ok(value)
    }
}

pub fn check_positive(value: f64) -> Result<f64, FieldErrorKind> {
    if !value.is_finite() {
        Err(FieldErrorKind::NotANumber)
    } else if value <= 0.0 {
        Err(FieldErrorKind::NotPositive)
    } else {
        Ok(value)
    }
}

pub fn check_at_least(value: f64, min: f64) -> Result<f64, FieldErrorKind> {
    if !value.is_finite() {
        Err(FieldErrorKind::NotANumber)
    } else if value <= 0.0 {
        Err(FieldErrorKind::NotPositive)
    } else if value < min {
        Err(FieldErrorKind::BelowMinimum(min))
    } else {
        Ok(value)
    }
}

pub fn check_count(value: f64) -> Result<u32, FieldErrorKind> {
    if !value.is_finite() {
        Err(FieldErrorKind::NotANumber)
    } else if value <= 0.0 {
        Err(FieldErrorKind::NotPositive)
    } else if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        Err(FieldErrorKind::NotWhole)
    } else {
        Ok(value as u32)
    }
}
