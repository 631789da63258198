use std::fmt::{Error, Write as _};

use super::FieldDef;

/// Format field definitions one per line, prefixed by their ordinal position:
/// `  3 vhcl_coded_seq_no: { type: integer, nullable: true }`.
pub fn format_field_defs(fields: impl AsRef<[FieldDef]>) -> Result<String, Error> {
    let fields = fields.as_ref();
    let width = fields.len().saturating_sub(1).to_string().len();
    let mut out = String::new();

    for (position, field) in fields.iter().enumerate() {
        writeln!(
            out,
            "{position:>width$} {}: {{ type: {}, nullable: {} }}",
            field.name, field.primitive, field.nullable
        )?;
    }

    Ok(out)
}
