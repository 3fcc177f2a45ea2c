//! Input records and the field specification they are aligned with.
//!
//! A [`FieldSpecification`] is the ordered list of column names agreed with
//! the remote model. Each [`InputRecord`] carries one value per field, in the
//! same order. Raw user input is turned into typed [`FieldValue`]s through
//! [`FieldDef::coerce_str`] / [`FieldDef::coerce_json`], which never fail:
//! anything that cannot be read as the field's kind becomes `null`.

mod field;
mod value;

pub use field::{FieldDef, FieldKind, FieldSpecification};
pub use value::{FieldValue, InputRecord};
