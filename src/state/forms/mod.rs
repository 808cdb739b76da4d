//! Form domain layer
//!
//! Field schema, field values and the field store that validates edits
//! before committing them.

mod field;
mod form_state;
mod schema;

pub use field::FormField;
pub use form_state::{FieldStore, Form, FormSnapshot, FormState, ValidationError};
pub use schema::{FieldKind, FIELD_SCHEMA};

#[cfg(test)]
pub use schema::descriptor;
