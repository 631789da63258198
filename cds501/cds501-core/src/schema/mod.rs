//! Static, ordered field tables for the three CDS501 record kinds.

mod format;
mod tables;
mod types;

pub use format::format_field_defs;
pub use tables::{CRASH, PARTICIPANT, REC_TYP_CD, VEHICLE, fields_for, kinds_with_field, schema_for};
pub use types::{FieldDef, PrimitiveType, RecordKind, RecordSchema};
