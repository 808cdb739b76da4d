//! Form field value objects

use super::schema::{FieldDescriptor, FieldKind};

/// Parse user text as a finite number (surrounding whitespace ignored)
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Type-safe field values
///
/// Numeric values keep the text the user typed so partial input stays
/// editable; the number is derived on demand.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Numeric(String),
    Choice(String),
}

impl FieldValue {
    /// Raw text as edited
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Numeric(s) | FieldValue::Choice(s) => s,
        }
    }

    /// Parsed number (None for choices and unparsable text)
    pub fn number(&self) -> Option<f64> {
        match self {
            FieldValue::Numeric(s) => parse_number(s),
            FieldValue::Choice(_) => None,
        }
    }
}

/// Represents a single form field with its schema entry and value
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub descriptor: &'static FieldDescriptor,
    pub value: FieldValue,
}

impl FormField {
    /// Create a field holding its schema default
    pub fn from_descriptor(descriptor: &'static FieldDescriptor) -> Self {
        let text = descriptor.default.to_string();
        let value = if descriptor.kind.is_numeric() {
            FieldValue::Numeric(text)
        } else {
            FieldValue::Choice(text)
        };
        Self { descriptor, value }
    }

    pub fn key(&self) -> &'static str {
        self.descriptor.key
    }

    pub fn kind(&self) -> FieldKind {
        self.descriptor.kind
    }

    pub fn as_text(&self) -> &str {
        self.value.as_text()
    }

    /// Replace the stored text, keeping the value's tag
    pub fn set_text(&mut self, value: String) {
        self.value = match self.value {
            FieldValue::Numeric(_) => FieldValue::Numeric(value),
            FieldValue::Choice(_) => FieldValue::Choice(value),
        };
    }

    /// Text the field would hold after typing `c`
    ///
    /// Returns None when `c` is not accepted by this field.
    pub fn with_char(&self, c: char) -> Option<String> {
        match self.value {
            FieldValue::Numeric(ref s) if c.is_ascii_digit() || c == '.' || c == '-' => {
                let mut next = s.clone();
                next.push(c);
                Some(next)
            }
            _ => None,
        }
    }

    /// Text the field would hold after a backspace
    pub fn without_last_char(&self) -> Option<String> {
        match self.value {
            FieldValue::Numeric(ref s) => {
                let mut next = s.clone();
                next.pop();
                Some(next)
            }
            FieldValue::Choice(_) => None,
        }
    }

    /// Numeric value stepped by `delta`, like a number input's spinner
    pub fn stepped(&self, delta: i32) -> Option<String> {
        let step = f64::from(delta);
        let next = match (self.kind(), self.value.number()) {
            (FieldKind::NumericBounded { min, .. }, None) => min,
            (FieldKind::NumericBounded { min, max }, Some(n)) => (n + step).clamp(min, max),
            (FieldKind::NumericFree, current) => current.unwrap_or(0.0) + step,
            (FieldKind::Enum(_), _) => return None,
        };
        Some(format_number(next))
    }

    /// Neighbouring option of an enum field, wrapping around
    pub fn cycled(&self, forward: bool) -> Option<String> {
        let options = self.kind().options();
        if options.is_empty() {
            return None;
        }
        let current = options
            .iter()
            .position(|o| *o == self.as_text())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else if current == 0 {
            options.len() - 1
        } else {
            current - 1
        };
        Some(options[next].to_string())
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Numeric(s) => s.clone(),
            FieldValue::Choice(s) => format!("◀ {s} ▶"),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
