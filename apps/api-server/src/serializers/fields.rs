//! Field-level reading and validation of JSON request bodies.

use serde_json::{Map, Value};

use folio_core::{DomainError, ValidationErrors};

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const INVALID_SLUG: &str =
    "Enter a valid \"slug\" consisting of letters, numbers, underscores or hyphens.";
pub const INVALID_URL: &str = "Enter a valid URL.";

/// Name of a JSON value's type, as reported in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// A request body being validated.
///
/// Reading a field records any problem against that field and returns `None`;
/// all problems are reported together by [`Payload::finish`]. On a partial
/// payload absent fields are simply skipped.
pub struct Payload<'a> {
    data: &'a Map<String, Value>,
    partial: bool,
    errors: ValidationErrors,
}

impl<'a> Payload<'a> {
    pub fn new(data: &'a Value, partial: bool) -> Result<Self, DomainError> {
        match data {
            Value::Object(map) => Ok(Self {
                data: map,
                partial,
                errors: ValidationErrors::new(),
            }),
            other => Err(ValidationErrors::single(
                ValidationErrors::NON_FIELD,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    kind_of(other)
                ),
            )
            .into()),
        }
    }

    fn raw(&mut self, field: &str) -> Option<&'a Value> {
        match self.data.get(field) {
            None => {
                if !self.partial {
                    self.errors.add(field, REQUIRED);
                }
                None
            }
            Some(Value::Null) => {
                self.errors.add(field, NOT_NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    /// A non-blank text field, trimmed, at most `max_len` characters.
    pub fn text(&mut self, field: &str, max_len: Option<usize>) -> Option<String> {
        let text = match self.raw(field)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => {
                self.errors.add(field, NOT_A_STRING);
                return None;
            }
        };

        if text.is_empty() {
            self.errors.add(field, NOT_BLANK);
            return None;
        }
        if let Some(max) = max_len {
            if text.chars().count() > max {
                self.errors.add(
                    field,
                    format!("Ensure this field has no more than {max} characters."),
                );
                return None;
            }
        }

        Some(text)
    }

    /// A primary key referencing another record. Integral numbers and numeric
    /// strings are accepted.
    pub fn pk(&mut self, field: &str) -> Option<i32> {
        let value = self.raw(field)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        };

        if parsed.is_none() {
            self.errors.add(
                field,
                format!(
                    "Incorrect type. Expected pk value, received {}.",
                    kind_of(value)
                ),
            );
        }
        parsed
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    pub fn finish(self) -> Result<(), DomainError> {
        self.errors.into_result(())
    }
}
