//! Record-kind schema tables, typed values, and the per-field codec for CDS501
//! crash-data extracts.
//!
//! This crate is I/O-free. It declares, per [`RecordKind`], the ordered field
//! list a delimited line must carry ([`RecordSchema`]) and converts one raw
//! field at a time into a [`Value`] ([`decode_value`]) and back
//! ([`encode_value`]). Line splitting and record linking live in `cds501`.

mod codec;
mod error;
mod schema;
mod value;

pub use codec::{decode_value, encode_value};
pub use error::{FieldError, FieldErrors, ValueError, ValueTypeError};
pub use schema::{
    CRASH, FieldDef, PARTICIPANT, PrimitiveType, REC_TYP_CD, RecordKind, RecordSchema, VEHICLE,
    fields_for, format_field_defs, kinds_with_field, schema_for,
};
pub use value::Value;

pub use rust_decimal::Decimal;
