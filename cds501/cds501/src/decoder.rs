//! Single-line decoding: discriminator dispatch, arity check, per-field codec.

use cds501_core::{FieldError, FieldErrors, RecordKind, Value, decode_value, schema_for};

use crate::{error::LineError, record::DecodedRecord, record::Row};

/// Field separator of the extract's line format.
pub const DELIMITER: char = ',';

/// Decode one physical line into a typed record.
///
/// A trailing `\n` or `\r\n` is ignored. Every field is decoded before
/// failing, so [`LineError::Fields`] lists all malformed values of the line
/// in position order. Decoding is pure: the same line always yields the same
/// result.
pub fn decode_line(line: &str) -> Result<DecodedRecord, LineError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(LineError::EmptyLine);
    }

    let raw: Vec<&str> = line.split(DELIMITER).collect();
    let discriminator = raw[0].trim();
    let kind = RecordKind::from_discriminator(discriminator).ok_or_else(|| {
        LineError::UnknownRecordType {
            found: discriminator.to_string(),
        }
    })?;

    let schema = schema_for(kind);
    if raw.len() != schema.len() {
        return Err(LineError::FieldCount {
            kind,
            expected: schema.len(),
            found: raw.len(),
        });
    }

    let mut values = Vec::with_capacity(schema.len());
    let mut errors = FieldErrors::default();
    for ((position, field), raw) in schema.iter().zip(raw) {
        match decode_value(raw, field) {
            Ok(value) => values.push(value),
            Err(error) => {
                errors.push(FieldError {
                    name: field.name,
                    position,
                    raw: raw.to_string(),
                    error,
                });
                values.push(Value::Null);
            }
        }
    }

    if !errors.is_empty() {
        return Err(LineError::Fields(errors));
    }
    Ok(DecodedRecord::from_row(Row::new(kind, values)))
}

/// Record kind named by the first value of `line`, without decoding the rest.
pub(crate) fn line_kind(line: &str) -> Option<RecordKind> {
    line.split(DELIMITER)
        .next()
        .and_then(|d| RecordKind::from_discriminator(d.trim()))
}
