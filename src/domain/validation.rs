//! Static schema checks for incoming JSON bodies.
//!
//! Every write shape reads its fields through a [`Payload`], which records
//! presence and type problems per field. Length and format rules live on the
//! typed input structs as `validator` attributes and are merged in by
//! [`Payload::finish`], so a single response reports every failing field.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

/// Field name → human-readable messages.
pub type ErrorMap = BTreeMap<String, Vec<String>>;

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";
pub const INVALID_STRING: &str = "Not a valid string.";
pub const INVALID_INTEGER: &str = "A valid integer is required.";
pub const INVALID_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

const DATE_FORMAT: &str = "%Y-%m-%d";

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn does_not_exist(pk: i64) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", pk)
}

/// Appends every field error from `errors` to `map`.
pub fn merge_validation_errors(map: &mut ErrorMap, errors: &ValidationErrors) {
    for (field, field_errors) in errors.field_errors() {
        let messages = map.entry(field.to_string()).or_default();
        messages.extend(field_errors.iter().map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid value.".to_string())
        }));
    }
}

pub struct Payload<'a> {
    fields: &'a Map<String, Value>,
    errors: ErrorMap,
}

impl<'a> Payload<'a> {
    pub fn new(data: &'a Value) -> Result<Self, ErrorMap> {
        match data {
            Value::Object(fields) => Ok(Payload { fields, errors: ErrorMap::new() }),
            other => {
                let mut errors = ErrorMap::new();
                errors.insert(
                    NON_FIELD_ERRORS.to_string(),
                    vec![format!("Invalid data. Expected a dictionary, but got {}.", json_type_name(other))],
                );
                Err(errors)
            }
        }
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.entry(field.to_string()).or_default().push(message.into());
    }

    /// Returns the non-null value of `field`. Absence is only an error when
    /// the field is required; `null` always is.
    fn value(&mut self, field: &str, required: bool) -> Option<&'a Value> {
        let fields = self.fields;
        match fields.get(field) {
            None => {
                if required {
                    self.add_error(field, REQUIRED);
                }
                None
            }
            Some(Value::Null) => {
                self.add_error(field, NOT_NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, field: &str, required: bool, trim: bool) -> Option<String> {
        let text = match self.value(field, required)? {
            Value::String(s) if trim => s.trim().to_string(),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => {
                self.add_error(field, INVALID_STRING);
                return None;
            }
        };

        if required && text.trim().is_empty() {
            self.add_error(field, NOT_BLANK);
            return None;
        }
        Some(text)
    }

    /// A required, non-blank string. Surrounding whitespace is trimmed.
    pub fn required_string(&mut self, field: &str) -> Option<String> {
        self.string(field, true, true)
    }

    /// A required string kept exactly as sent, for secrets.
    pub fn required_secret(&mut self, field: &str) -> Option<String> {
        self.string(field, true, false)
    }

    /// An optional string that may be blank.
    pub fn optional_string(&mut self, field: &str) -> Option<String> {
        self.string(field, false, true)
    }

    pub fn optional_integer(&mut self, field: &str) -> Option<i32> {
        let value = self.value(field, false)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 1e18)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        let Some(number) = parsed else {
            self.add_error(field, INVALID_INTEGER);
            return None;
        };

        if number > i32::MAX as i64 {
            self.add_error(field, format!("Ensure this value is less than or equal to {}.", i32::MAX));
            None
        } else if number < i32::MIN as i64 {
            self.add_error(field, format!("Ensure this value is greater than or equal to {}.", i32::MIN));
            None
        } else {
            Some(number as i32)
        }
    }

    pub fn required_date(&mut self, field: &str) -> Option<NaiveDate> {
        let value = self.value(field, true)?;
        let parsed = value
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok());

        if parsed.is_none() {
            self.add_error(field, INVALID_DATE);
        }
        parsed
    }

    /// The id of a related row. Existence is checked by the caller.
    pub fn required_pk(&mut self, field: &str) -> Option<i64> {
        let value = self.value(field, true)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        if parsed.is_none() {
            self.add_error(
                field,
                format!("Incorrect type. Expected pk value, received {}.", json_type_name(value)),
            );
        }
        parsed
    }

    /// Runs the `validator` rules of `input` and returns it when no field
    /// failed. Fields that already failed a type check keep only that error.
    pub fn finish<T: Validate>(mut self, input: T) -> Result<T, ErrorMap> {
        if let Err(rule_errors) = input.validate() {
            let mut rules = ErrorMap::new();
            merge_validation_errors(&mut rules, &rule_errors);
            for (field, messages) in rules {
                self.errors.entry(field).or_insert(messages);
            }
        }

        if self.errors.is_empty() {
            Ok(input)
        } else {
            Err(self.errors)
        }
    }
}
