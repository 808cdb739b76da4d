//! Form state, the field store and request snapshots

use super::field::{parse_number, FieldValue, FormField};
use super::schema::{FieldKind, FIELD_SCHEMA};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Trait for common form navigation
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Current value of every field, in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    fields: Vec<FormField>,
}

impl FormState {
    /// Every field at its schema default
    pub fn new() -> Self {
        Self {
            fields: FIELD_SCHEMA.iter().map(FormField::from_descriptor).collect(),
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.key() == key)
    }

    /// Raw text of a field
    #[cfg(test)]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key() == key)
            .map(FormField::as_text)
    }

    /// First numeric field left empty, if any
    pub fn first_empty_numeric(&self) -> Option<&FormField> {
        self.fields
            .iter()
            .find(|f| f.kind().is_numeric() && f.as_text().trim().is_empty())
    }

    /// Capture the current values for a request
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self
                .fields
                .iter()
                .map(|f| (f.key(), f.value.clone()))
                .collect(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Form-wide validation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(String);

impl ValidationError {
    fn out_of_range(human_name: &str, min: f64, max: f64) -> Self {
        Self(format!("{human_name} must be between {min} and {max}"))
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Holds the form values and the single pending validation message
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    form: FormState,
    validation_error: Option<ValidationError>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    /// Apply one edit.
    ///
    /// Bounded fields only commit values inside their range; anything else
    /// (including empty or non-numeric text) leaves the old value in place
    /// and sets the validation message. Other fields always commit.
    pub fn update_field(&mut self, key: &str, raw_value: &str) {
        let Some(field) = self.form.field_mut(key) else {
            tracing::warn!("Ignoring edit to unknown field {key:?}");
            return;
        };

        if let FieldKind::NumericBounded { min, max } = field.kind() {
            match parse_number(raw_value) {
                Some(n) if (min..=max).contains(&n) => {
                    self.validation_error = None;
                }
                _ => {
                    let error =
                        ValidationError::out_of_range(&field.descriptor.human_name(), min, max);
                    tracing::debug!("Rejected {key}={raw_value:?}: {error}");
                    self.validation_error = Some(error);
                    return;
                }
            }
        }

        field.set_text(raw_value.to_string());
    }
}

/// Values captured when a submission is accepted
///
/// Serializes to the request body: one entry per schema key, numeric text
/// that parses is sent as a JSON number and everything else as a string.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    values: Vec<(&'static str, FieldValue)>,
}

#[derive(serde::Serialize)]
#[serde(untagged)]
enum WireValue<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
}

impl<'a> From<&'a FieldValue> for WireValue<'a> {
    fn from(value: &'a FieldValue) -> Self {
        match (value, value.number()) {
            (FieldValue::Numeric(_), Some(n))
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 =>
            {
                WireValue::Int(n as i64)
            }
            (FieldValue::Numeric(_), Some(n)) => WireValue::Float(n),
            (other, _) => WireValue::Text(other.as_text()),
        }
    }
}

impl Serialize for FormSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key, &WireValue::from(value))?;
        }
        map.end()
    }
}
